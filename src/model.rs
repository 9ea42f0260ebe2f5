//! Wire models for the product-catalog endpoints.

// crates.io
use uuid::Uuid;
// self
use crate::_prelude::*;

/// A product to register, created by the caller. Immutable once built; the
/// crate keeps no copy of it after registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
	/// Opaque unique identifier chosen by the caller.
	pub id: Uuid,
	/// Display name.
	pub name: String,
	/// Free-form description.
	pub description: String,
}

/// Identifier under which the service filed a registered product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRegistered {
	/// Identifier assigned by the service; may differ from the submitted one.
	pub id: Uuid,
}

/// One price/stock offer attached to a registered product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
	/// Offer identifier.
	pub id: Uuid,
	/// Price in the smallest currency unit.
	pub price: u64,
	/// Units currently in stock.
	pub items_in_stock: u64,
}
