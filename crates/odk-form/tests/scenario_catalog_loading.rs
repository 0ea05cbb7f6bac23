//! Catalog loading
//!
//! GREEN when:
//! - mount fetches the catalog exactly once and selects the first entry
//! - a failed fetch leaves an empty, still-usable form whose submit fails
//!   product validation
//! - an explicit reload recovers the catalog

use odk_api::ApiError;
use odk_config::ClientConfig;
use odk_form::validate::PRODUCT_REQUIRED;
use odk_form::{mount, reload_catalog, submit, Field, SubmitError};
use odk_schemas::{Micros, ProductId};
use odk_testkit::{sample_catalog, ScriptedApi, VALID_CUSTOMER_ID, VALID_EMAIL, VALID_NAME};

fn config() -> ClientConfig {
    ClientConfig::new("http://orders.test").unwrap()
}

#[tokio::test]
async fn mount_selects_first_product() {
    let api = ScriptedApi::with_catalog(sample_catalog());
    let form = mount(&api, &config()).await;

    assert_eq!(api.product_fetch_count(), 1);
    assert_eq!(form.catalog().len(), 3);
    assert_eq!(form.state().product, Some(ProductId(1)));
    assert_eq!(form.product_cost(), Micros::new(45_000_000));
    assert_eq!(form.state().quantity, "1");
}

#[tokio::test]
async fn empty_catalog_leaves_product_unset() {
    let api = ScriptedApi::with_catalog(vec![]);
    let form = mount(&api, &config()).await;
    assert_eq!(form.state().product, None);
    assert_eq!(form.total_display(), "Rs.0.00");
}

#[tokio::test]
async fn failed_fetch_degrades_without_retry() {
    let api = ScriptedApi::with_catalog_error(ApiError::Status {
        code: 502,
        body: "bad gateway".to_string(),
    });
    let mut form = mount(&api, &config()).await;

    assert_eq!(api.product_fetch_count(), 1, "no automatic retry");
    assert!(form.catalog().is_empty());
    assert_eq!(form.state().product, None);
    assert_eq!(form.status().message(), None, "no user-facing message");

    form.edit(Field::CustomerName, VALID_NAME);
    form.edit(Field::CustomerId, VALID_CUSTOMER_ID);
    form.edit(Field::UserEmail, VALID_EMAIL);

    let SubmitError::Invalid(errors) = submit(&mut form, &api).await.unwrap_err() else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(Field::Product), Some(PRODUCT_REQUIRED));
    assert_eq!(api.order_count(), 0);
}

#[tokio::test]
async fn reload_recovers_catalog() {
    let api = ScriptedApi::with_catalog_error(ApiError::Transport("down".to_string()));
    let mut form = mount(&api, &config()).await;
    assert!(!reload_catalog(&mut form, &api).await);
    assert!(form.catalog().is_empty());

    api.set_catalog(sample_catalog());
    assert!(reload_catalog(&mut form, &api).await);
    assert_eq!(form.state().product, Some(ProductId(1)));
    assert_eq!(api.product_fetch_count(), 3);
}

#[tokio::test]
async fn failed_reload_keeps_existing_catalog() {
    let api = ScriptedApi::with_catalog(sample_catalog());
    let mut form = mount(&api, &config()).await;
    form.select_product(ProductId(2));

    api.set_catalog_error(ApiError::Transport("down".to_string()));
    assert!(!reload_catalog(&mut form, &api).await);
    assert_eq!(form.catalog().len(), 3);
    assert_eq!(form.state().product, Some(ProductId(2)));
}

#[tokio::test]
async fn currency_label_comes_from_config() {
    let api = ScriptedApi::with_catalog(sample_catalog());
    let cfg = config().with_currency_label("USD ");
    let form = mount(&api, &cfg).await;
    assert_eq!(form.total_display(), "USD 45.00");
}

#[tokio::test]
async fn config_file_label_renders_like_builder_label() {
    let api = ScriptedApi::with_catalog(sample_catalog());
    let layered = serde_json::json!({"display": {"currency_label": "USD "}});
    let cfg = odk_config::resolve_client_config(Some("http://orders.test"), &layered).unwrap();
    let form = mount(&api, &cfg).await;
    assert_eq!(form.total_display(), "USD 45.00");
}
