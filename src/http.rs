//! HTTP transport seam and the default reqwest-backed implementation.
//!
//! [`Transport`] is the crate's only dependency on an HTTP stack: one JSON
//! request in, one decoded JSON value out. The default [`ReqwestTransport`]
//! retries connect-establishment failures with exponential backoff and
//! surfaces everything else to the caller unmodified—status and decode
//! failures are never retried at this layer.

// std
use std::time::Duration;
// crates.io
use reqwest::header::ACCEPT;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError, TransportError},
};

/// Boxed future returned by [`Transport::request`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Value>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing one authenticated JSON request.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be
/// shared by every manager and client in the process, and the returned future
/// must be `Send` so callers can box it freely. The transport knows nothing
/// about tokens beyond placing the supplied credential in the bearer header.
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Executes one request and returns the decoded JSON response body.
	fn request<'a>(
		&'a self,
		method: Method,
		url: &'a Url,
		token: &'a str,
		body: Option<&'a Value>,
	) -> TransportFuture<'a>;
}

/// Retry schedule applied to connect-establishment failures.
#[derive(Clone, Copy, Debug)]
pub struct BackoffPolicy {
	/// Total attempts, the first try included.
	pub max_attempts: u32,
	/// Wait before the second attempt; doubled after each further failure.
	pub base: Duration,
	/// Upper bound applied to every wait.
	pub cap: Duration,
}
impl BackoffPolicy {
	/// Wait applied after the zero-based `attempt`-th failed attempt.
	pub fn wait_after(&self, attempt: u32) -> Duration {
		self.base.saturating_mul(1_u32 << attempt.min(31)).min(self.cap)
	}

	/// Decides whether the zero-based `attempt`-th failure warrants another
	/// try, and with what wait. `None` means the failure surfaces to the
	/// caller; only connect-establishment failures are ever retryable. The
	/// retry loop is driven entirely by this method, so the attempt budget is
	/// checkable without a network.
	pub fn next_wait(&self, attempt: u32, retryable: bool) -> Option<Duration> {
		(retryable && attempt + 1 < self.max_attempts).then(|| self.wait_after(attempt))
	}
}
impl Default for BackoffPolicy {
	fn default() -> Self {
		Self { max_attempts: 5, base: Duration::from_secs(1), cap: Duration::from_secs(10) }
	}
}

/// Default transport executing requests through a shared [`ReqwestClient`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	policy: BackoffPolicy,
}
impl ReqwestTransport {
	/// Builds a transport with connect and total-request timeouts suited for the service.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.connect_timeout(Duration::from_secs(10))
			.timeout(Duration::from_secs(30))
			.build()?;

		Ok(Self::with_client(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, policy: BackoffPolicy::default() }
	}

	/// Replaces the connect-retry policy; tests shrink the waits through this.
	pub fn with_policy(mut self, policy: BackoffPolicy) -> Self {
		self.policy = policy;

		self
	}

	async fn dispatch(
		&self,
		method: Method,
		url: &Url,
		token: &str,
		body: Option<&Value>,
	) -> Result<Value> {
		let mut attempt = 0;

		loop {
			let mut request = self
				.client
				.request(method.clone(), url.clone())
				.header(ACCEPT, "application/json")
				.header("Bearer", token);

			if let Some(body) = body {
				request = request.json(body);
			}

			match request.send().await {
				Ok(response) => return Self::decode(response).await,
				Err(e) => match self.policy.next_wait(attempt, e.is_connect()) {
					Some(wait) => {
						tracing::warn!(
							attempt = attempt + 1,
							wait_ms = wait.as_millis() as u64,
							"connect failure, backing off before retrying",
						);
						tokio::time::sleep(wait).await;

						attempt += 1;
					},
					None => return Err(TransportError::from(e).into()),
				},
			}
		}
	}

	async fn decode(response: reqwest::Response) -> Result<Value> {
		let status = response.status();

		if !status.is_success() {
			let body = response.text().await.map_err(TransportError::from)?;

			tracing::error!(status = status.as_u16(), "service returned an error status");

			return Err(Error::Status { status: status.as_u16(), body });
		}

		let bytes = response.bytes().await.map_err(TransportError::from)?;

		serde_json::from_slice(&bytes).map_err(|e| {
			tracing::error!("failed to decode JSON from the response body");

			DecodeError::Body { source: e }.into()
		})
	}
}
impl Transport for ReqwestTransport {
	fn request<'a>(
		&'a self,
		method: Method,
		url: &'a Url,
		token: &'a str,
		body: Option<&'a Value>,
	) -> TransportFuture<'a> {
		Box::pin(self.dispatch(method, url, token, body))
	}
}

/// Joins `path` onto `base`, tolerating a trailing slash on the base.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, ConfigError> {
	let raw = format!("{}/{}", base.as_str().trim_end_matches('/'), path);

	Url::parse(&raw).map_err(|e| ConfigError::InvalidEndpoint { url: raw, source: e })
}
