//! Access-token lifecycle management.
//!
//! [`TokenManager`] owns the refresh-token → access-token exchange for one
//! service: it reuses a cached token while its expiry claim is in the future,
//! recovers a persisted token through the injected [`TokenStore`], exchanges
//! the refresh token when nothing usable is held, and retries an authenticated
//! call exactly once after the service rejects a token with HTTP 401.

mod claims;
pub mod secret;

pub use secret::TokenSecret;

// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError},
	http::{Transport, endpoint},
	store::TokenStore,
};

/// Classified outcome of one authenticated call, used by the two-attempt
/// recovery loop in [`TokenManager::execute_authenticated_request`].
enum CallOutcome {
	/// Decoded JSON response body.
	Success(Value),
	/// Service rejected the presented token (HTTP 401).
	Denied(Error),
	/// Any other failure; never recovered from here.
	Failed(Error),
}
impl CallOutcome {
	fn classify(result: Result<Value>) -> Self {
		match result {
			Ok(value) => Self::Success(value),
			Err(e) if e.is_unauthorized() => Self::Denied(e),
			Err(e) => Self::Failed(e),
		}
	}
}

/// Owns the access-token lifecycle for one refresh token + service pair.
///
/// The held token lives in a single mutable slot inside the manager; callers
/// needing isolated caches construct independent managers. Concurrent calls
/// racing through a refresh may each trigger their own exchange—the exchange
/// is idempotent from the caller's perspective and the last store write wins,
/// so no de-duplication is attempted.
pub struct TokenManager<C>
where
	C: Transport,
{
	transport: Arc<C>,
	store: Arc<dyn TokenStore>,
	refresh_token: TokenSecret,
	auth_endpoint: Url,
	access_token: Mutex<Option<TokenSecret>>,
}
impl<C> TokenManager<C>
where
	C: Transport,
{
	/// Creates a manager authenticating against `{base_url}/auth`.
	pub fn new(
		transport: impl Into<Arc<C>>,
		store: Arc<dyn TokenStore>,
		refresh_token: TokenSecret,
		base_url: &Url,
	) -> Result<Self, ConfigError> {
		let auth_endpoint = endpoint(base_url, "auth")?;

		Ok(Self {
			transport: transport.into(),
			store,
			refresh_token,
			auth_endpoint,
			access_token: Mutex::new(None),
		})
	}

	/// Exchanges the refresh token for a fresh access token, unconditionally.
	///
	/// The new token replaces the held one and is written to the store before
	/// this returns; a store-write failure is fatal and propagates, because a
	/// token was obtained but could not be durably cached and the caller must
	/// know rather than silently run degraded.
	pub async fn authenticate(&self) -> Result<TokenSecret> {
		let reply = self
			.transport
			.request(Method::POST, &self.auth_endpoint, self.refresh_token.expose(), None)
			.await?;
		let token = reply
			.get("access_token")
			.and_then(Value::as_str)
			.map(TokenSecret::new)
			.ok_or(DecodeError::MissingAccessToken)?;

		self.store.save(&token).await?;

		*self.access_token.lock() = Some(token.clone());

		tracing::info!("obtained a new access token");

		Ok(token)
	}

	/// Returns a currently usable access token, re-authenticating when needed.
	///
	/// A held token that passes the expiry check is returned without any
	/// network call. When nothing is held in memory the store is consulted
	/// first; only when neither source yields a usable token does the manager
	/// exchange the refresh token.
	pub async fn get_access_token(&self) -> Result<TokenSecret> {
		// Snapshot first: the guard must be gone before any await, both because
		// `recover_from_store` re-locks this mutex and to keep the future `Send`.
		let snapshot = self.access_token.lock().clone();
		let held = match snapshot {
			Some(token) => Some(token),
			None => self.recover_from_store().await,
		};

		match held {
			None => {
				tracing::info!("no cached access token, authenticating");

				self.authenticate().await
			},
			Some(token) if claims::is_expired(token.expose(), OffsetDateTime::now_utc()) => {
				tracing::info!("cached access token expired, refreshing");

				self.authenticate().await
			},
			Some(token) => {
				tracing::debug!("reusing cached access token");

				Ok(token)
			},
		}
	}

	/// Performs an authenticated call, recovering exactly once from a 401.
	///
	/// On an authorization rejection the manager forces a fresh exchange—
	/// bypassing the cache and expiry check entirely—and retries the same call
	/// once with the new token. A second rejection, or any other failure,
	/// propagates unmodified: at most two logical attempts per call.
	pub async fn execute_authenticated_request(
		&self,
		method: Method,
		url: &Url,
		body: Option<&Value>,
	) -> Result<Value> {
		let token = self.get_access_token().await?;

		match self.call(method.clone(), url, &token, body).await {
			CallOutcome::Success(value) => Ok(value),
			CallOutcome::Denied(_) => {
				tracing::info!("service rejected the access token, re-authenticating once");

				let token = self.authenticate().await?;

				match self.call(method, url, &token, body).await {
					CallOutcome::Success(value) => Ok(value),
					CallOutcome::Denied(e) | CallOutcome::Failed(e) => Err(e),
				}
			},
			CallOutcome::Failed(e) => Err(e),
		}
	}

	async fn call(
		&self,
		method: Method,
		url: &Url,
		token: &TokenSecret,
		body: Option<&Value>,
	) -> CallOutcome {
		CallOutcome::classify(self.transport.request(method, url, token.expose(), body).await)
	}

	async fn recover_from_store(&self) -> Option<TokenSecret> {
		let recovered = self.store.load().await.unwrap_or_else(|e| {
			tracing::warn!(error = %e, "token store read failed, treating the cached token as absent");

			None
		});

		if let Some(token) = &recovered {
			tracing::debug!("recovered a persisted access token");

			*self.access_token.lock() = Some(token.clone());
		}

		recovered
	}
}
impl<C> Debug for TokenManager<C>
where
	C: Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("auth_endpoint", &self.auth_endpoint.as_str())
			.field("access_token_cached", &self.access_token.lock().is_some())
			.finish()
	}
}
