//! Catalog loading.
//!
//! One fetch per mount, no retry, no loading indicator. A failed fetch is
//! logged and leaves the form with an empty catalog; submitting then fails
//! product validation until a host calls [`reload_catalog`].

use odk_api::OrderApi;
use odk_config::ClientConfig;
use odk_schemas::Product;
use tracing::{error, info};

use crate::form::OrderForm;

/// Fetch the catalog, degrading to an empty list on any error.
pub async fn load_catalog(api: &dyn OrderApi) -> Vec<Product> {
    match api.fetch_products().await {
        Ok(products) => {
            info!(count = products.len(), "catalog loaded");
            products
        }
        Err(e) => {
            error!(error = %e, "error fetching products");
            Vec::new()
        }
    }
}

/// Create a form and seed it from the catalog service.
pub async fn mount(api: &dyn OrderApi, config: &ClientConfig) -> OrderForm {
    let catalog = load_catalog(api).await;
    OrderForm::new(config.currency_label()).with_catalog(catalog)
}

/// Explicit host-driven retry of the catalog fetch.
///
/// Returns `true` when the fetch succeeded. On failure the current catalog
/// is kept as it was.
pub async fn reload_catalog(form: &mut OrderForm, api: &dyn OrderApi) -> bool {
    match api.fetch_products().await {
        Ok(products) => {
            info!(count = products.len(), "catalog reloaded");
            form.set_catalog(products);
            true
        }
        Err(e) => {
            error!(error = %e, "error reloading products");
            false
        }
    }
}
