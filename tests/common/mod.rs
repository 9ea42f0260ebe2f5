//! Shared fixtures for the httpmock-backed integration tests.

#![allow(dead_code)]

// std
use std::{sync::Arc, time::Duration};
// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use catalog_client::{
	auth::{TokenManager, TokenSecret},
	client::ProductClient,
	http::{BackoffPolicy, ReqwestTransport},
	store::{MemoryStore, StoreError, StoreFuture, TokenStore},
};
use httpmock::MockServer;
use time::OffsetDateTime;
use url::Url;

pub const REFRESH_TOKEN: &str = "refresh-fixture";

/// Transport with millisecond backoff so retry paths stay fast under test.
pub fn fast_transport() -> ReqwestTransport {
	ReqwestTransport::new().expect("Failed to build the test transport.").with_policy(
		BackoffPolicy {
			max_attempts: 5,
			base: Duration::from_millis(1),
			cap: Duration::from_millis(5),
		},
	)
}

pub fn base_url(server: &MockServer) -> Url {
	Url::parse(&server.base_url()).expect("Mock server URL should parse successfully.")
}

/// Token manager backed by an in-memory store against the mock server.
pub fn build_manager(server: &MockServer) -> (TokenManager<ReqwestTransport>, Arc<MemoryStore>) {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn TokenStore> = store_backend.clone();
	let manager =
		TokenManager::new(fast_transport(), store, TokenSecret::new(REFRESH_TOKEN), &base_url(server))
			.expect("Failed to build the test token manager.");

	(manager, store_backend)
}

/// Product client backed by an in-memory store against the mock server.
pub fn build_client(server: &MockServer) -> (ProductClient<ReqwestTransport>, Arc<MemoryStore>) {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn TokenStore> = store_backend.clone();
	let client =
		ProductClient::with_parts(fast_transport(), store, REFRESH_TOKEN, base_url(server))
			.expect("Failed to build the test product client.");

	(client, store_backend)
}

/// Seeds the store with an already-cached token.
pub async fn seed_token(store: &MemoryStore, token: &str) {
	store
		.save(&TokenSecret::new(token))
		.await
		.expect("Failed to seed the token into the store.");
}

/// Unsigned JWT whose payload carries the given `expires` claim.
pub fn token_with_expiry(expires: i64) -> String {
	let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
	let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"expires":{expires}}}"#));
	let signature = URL_SAFE_NO_PAD.encode(b"test-signature");

	format!("{header}.{payload}.{signature}")
}

/// Token whose expiry lies an hour in the future.
pub fn valid_token() -> String {
	token_with_expiry(OffsetDateTime::now_utc().unix_timestamp() + 3_600)
}

/// A second distinct valid token, two hours out.
pub fn fresher_token() -> String {
	token_with_expiry(OffsetDateTime::now_utc().unix_timestamp() + 7_200)
}

/// Token whose expiry lies an hour in the past.
pub fn expired_token() -> String {
	token_with_expiry(OffsetDateTime::now_utc().unix_timestamp() - 3_600)
}

/// Store whose writes always fail, for exercising the fatal-save path.
pub struct FailingStore;
impl TokenStore for FailingStore {
	fn load(&self) -> StoreFuture<'_, Option<TokenSecret>> {
		Box::pin(async { Ok(None) })
	}

	fn save<'a>(&'a self, _: &'a TokenSecret) -> StoreFuture<'a, ()> {
		Box::pin(async { Err(StoreError::Backend { message: "disk full".into() }) })
	}
}
