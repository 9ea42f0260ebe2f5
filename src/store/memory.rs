//! In-memory [`TokenStore`] for the restart-transient variant and for tests.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{StoreFuture, TokenStore},
};

type Slot = Arc<RwLock<Option<TokenSecret>>>;

/// Keeps the cached token in-process; it is lost when the process exits.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Slot);
impl MemoryStore {
	/// Returns a copy of the stored token without going through the async contract.
	pub fn snapshot(&self) -> Option<TokenSecret> {
		self.0.read().clone()
	}
}
impl TokenStore for MemoryStore {
	fn load(&self) -> StoreFuture<'_, Option<TokenSecret>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn save<'a>(&'a self, token: &'a TokenSecret) -> StoreFuture<'a, ()> {
		let slot = self.0.clone();
		let token = token.clone();

		Box::pin(async move {
			*slot.write() = Some(token);

			Ok(())
		})
	}
}
