//! Layered error types shared across the transport, token, and client layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token-storage failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure after the connect-retry budget is exhausted.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response could not be decoded into the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Service answered with a non-2xx status.
	#[error("Service responded with HTTP {status}: {body}.")]
	Status {
		/// HTTP status code returned by the service.
		status: u16,
		/// Response body text, verbatim.
		body: String,
	},
}
impl Error {
	/// Returns `true` when the failure is an authorization rejection (HTTP 401).
	///
	/// This is the only status the token manager treats specially; see
	/// [`TokenManager::execute_authenticated_request`](crate::auth::TokenManager::execute_authenticated_request).
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Status { status: 401, .. })
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// An endpoint URL assembled from the base URL does not parse.
	#[error("Endpoint URL `{url}` is invalid.")]
	InvalidEndpoint {
		/// The URL string that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (DNS, TCP, TLS, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures while decoding service responses or encoding request payloads.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body is not valid JSON.
	#[error("Service returned a non-JSON body.")]
	Body {
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response JSON does not match the expected model.
	#[error("Service response does not match the expected shape.")]
	Model {
		/// Structured parsing failure carrying the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Request payload could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	Serialize {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Auth endpoint reply carries no string `access_token` field.
	#[error("Auth response is missing the access_token field.")]
	MissingAccessToken,
}
