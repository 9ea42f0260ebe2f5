//! Storage contracts and built-in access-token stores.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend holding at most one cached access token.
///
/// The token manager treats storage as an injected dependency so it can be
/// tested without real I/O and so independent managers can be given
/// independent backends. Implementations must report every read-path failure
/// (missing, unreadable, malformed content) from [`load`](TokenStore::load) as
/// `Ok(None)`—an absent token is never a fatal condition. Write failures are
/// real errors and propagate to the caller of the exchange.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns the cached token, if usable content is present.
	fn load(&self) -> StoreFuture<'_, Option<TokenSecret>>;

	/// Persists `token`, overwriting any prior content.
	fn save<'a>(&'a self, token: &'a TokenSecret) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failure surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Persisted shape of the cached token file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PersistedToken {
	pub access_token: TokenSecret,
}
