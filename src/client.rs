//! High-level product operations composed from the token manager and transport.

// crates.io
use uuid::Uuid;
// self
use crate::{
	_prelude::*,
	auth::{TokenManager, TokenSecret},
	error::{ConfigError, DecodeError},
	http::{ReqwestTransport, Transport, endpoint},
	model::{Offer, Product, ProductRegistered},
	store::{FileStore, TokenStore},
};

/// Production base URL of the product-catalog service.
pub const DEFAULT_BASE_URL: &str = "https://python.exercise.applifting.cz/api/v1";

/// Client for the product-catalog service.
///
/// Both operations are stateless compositions over the token manager: no
/// result caching, no local copies of registered products. Token refreshes
/// and the single 401 recovery happen transparently underneath.
pub struct ProductClient<C = ReqwestTransport>
where
	C: Transport,
{
	token_manager: TokenManager<C>,
	base_url: Url,
}
impl ProductClient<ReqwestTransport> {
	/// Client against the production service, caching the access token at the
	/// default well-known path.
	pub fn new(refresh_token: impl Into<TokenSecret>) -> Result<Self> {
		let base_url = Url::parse(DEFAULT_BASE_URL).map_err(|e| ConfigError::InvalidEndpoint {
			url: DEFAULT_BASE_URL.into(),
			source: e,
		})?;

		Self::with_base_url(refresh_token, base_url)
	}

	/// Same stack as [`ProductClient::new`] against a custom service URL.
	pub fn with_base_url(refresh_token: impl Into<TokenSecret>, base_url: Url) -> Result<Self> {
		Self::with_parts(ReqwestTransport::new()?, Arc::new(FileStore::new()), refresh_token, base_url)
	}
}
impl<C> ProductClient<C>
where
	C: Transport,
{
	/// Fully injected constructor for tests and embedders: any transport, any
	/// token store.
	pub fn with_parts(
		transport: impl Into<Arc<C>>,
		store: Arc<dyn TokenStore>,
		refresh_token: impl Into<TokenSecret>,
		base_url: Url,
	) -> Result<Self> {
		let token_manager = TokenManager::new(transport, store, refresh_token.into(), &base_url)?;

		Ok(Self { token_manager, base_url })
	}

	/// The underlying token manager, e.g. to pre-authenticate eagerly.
	pub fn token_manager(&self) -> &TokenManager<C> {
		&self.token_manager
	}

	/// Registers `product`, returning the identifier the service filed it under.
	pub async fn register_product(&self, product: &Product) -> Result<ProductRegistered> {
		let url = endpoint(&self.base_url, "products/register")?;
		let body =
			serde_json::to_value(product).map_err(|e| DecodeError::Serialize { source: e })?;
		let reply = self
			.token_manager
			.execute_authenticated_request(Method::POST, &url, Some(&body))
			.await?;

		decode(reply)
	}

	/// Fetches the current offers for a registered product.
	///
	/// A product without offers yields an empty vector, not an error.
	pub async fn get_product_offers(&self, product_id: Uuid) -> Result<Vec<Offer>> {
		let url = endpoint(&self.base_url, &format!("products/{product_id}/offers"))?;
		let reply =
			self.token_manager.execute_authenticated_request(Method::GET, &url, None).await?;

		decode(reply)
	}
}
impl<C> Debug for ProductClient<C>
where
	C: Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProductClient")
			.field("base_url", &self.base_url.as_str())
			.field("token_manager", &self.token_manager)
			.finish()
	}
}

fn decode<T>(value: Value) -> Result<T>
where
	T: serde::de::DeserializeOwned,
{
	serde_path_to_error::deserialize(value).map_err(|e| DecodeError::Model { source: e }.into())
}
