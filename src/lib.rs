//! Async client for the Applifting product-catalog service—register products, fetch
//! price/stock offers, and let the crate manage the refresh-token to access-token
//! exchange with restart-surviving caching.
//!
//! The [`auth::TokenManager`] is the heart of the crate: it decides when a cached
//! access token is still usable, when to exchange the refresh token for a new one,
//! and how to recover exactly once when the service rejects a token with HTTP 401.
//! [`client::ProductClient`] composes it with the [`http::Transport`] seam and the
//! wire models into the two domain operations the service exposes.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod model;
pub mod store;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
pub use uuid;
#[cfg(test)] use {color_eyre as _, httpmock as _, tracing_subscriber as _};
