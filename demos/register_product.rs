//! End-to-end harness against the live service: registers a product and lists
//! its offers. Requires `REFRESH_TOKEN` in the environment.
//!
//! ```sh
//! REFRESH_TOKEN=... cargo run --example register_product
//! ```

// std
use std::env;
// crates.io
use catalog_client::{client::ProductClient, model::Product, uuid::Uuid};
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt::init();

	let refresh_token = env::var("REFRESH_TOKEN")?;
	let client = ProductClient::new(refresh_token)?;
	let product = Product {
		id: Uuid::new_v4(),
		name: "Premium Almond Butter".into(),
		description: "Made from high-quality Spanish almonds".into(),
	};
	let registered = client.register_product(&product).await?;

	tracing::info!(id = %registered.id, "registered product");

	let offers = client.get_product_offers(registered.id).await?;

	tracing::info!(count = offers.len(), ?offers, "fetched product offers");

	Ok(())
}
