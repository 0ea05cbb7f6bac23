//! `odk products`

use anyhow::{Context, Result};
use odk_api::{HttpOrderApi, OrderApi};
use odk_config::ClientConfig;

pub async fn run_products(client: ClientConfig) -> Result<()> {
    let api = HttpOrderApi::new(client);
    let products = api
        .fetch_products()
        .await
        .context("PRODUCTS_FETCH_FAILED")?;

    println!("products={}", products.len());
    for p in &products {
        println!("id={} cost={} name={}", p.id, p.cost.to_fixed_2(), p.name);
    }
    Ok(())
}
