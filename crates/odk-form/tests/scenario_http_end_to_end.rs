//! Full flow over HTTP against a mock server: mount, edit, submit.

use httpmock::prelude::*;
use odk_api::HttpOrderApi;
use odk_config::ClientConfig;
use odk_form::{mount, submit, Field, SubmissionStatus};
use odk_schemas::ProductId;
use serde_json::json;

#[tokio::test]
async fn order_placed_over_http() {
    let server = MockServer::start_async().await;
    let products = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products/");
            then.status(200).json_body(json!([
                {"id": 10, "name": "Chair", "cost": "150.00"},
                {"id": 11, "name": "Table", "cost": "300.50"}
            ]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/orders/create/").json_body(json!({
                "customer_name": "Alan Turing",
                "customer_id": "1912/1954",
                "user_email": "alan@example.org",
                "product": 11,
                "quantity": 2
            }));
            then.status(201).json_body(json!({"id": 501}));
        })
        .await;

    let cfg = ClientConfig::new(&server.url("/api")).unwrap();
    let api = HttpOrderApi::new(cfg.clone());

    let mut form = mount(&api, &cfg).await;
    assert_eq!(form.state().product, Some(ProductId(10)));

    form.edit(Field::CustomerName, "Alan Turing");
    form.edit(Field::CustomerId, "1912/1954");
    form.edit(Field::UserEmail, "alan@example.org");
    form.edit(Field::Product, "11");
    form.edit(Field::Quantity, "2");
    assert_eq!(form.total_display(), "Rs.601.00");

    let outcome = submit(&mut form, &api).await.unwrap();

    products.assert_async().await;
    create.assert_async().await;
    assert!(outcome.is_placed());
    assert_eq!(form.status(), &SubmissionStatus::Succeeded);
    assert_eq!(form.state().product, Some(ProductId(10)));
    assert_eq!(form.state().customer_name, "");
}

#[tokio::test]
async fn server_rejection_surfaces_generic_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products/");
            then.status(200)
                .json_body(json!([{"id": 1, "name": "Chair", "cost": 150}]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/orders/create/");
            then.status(400).json_body(json!({"user_email": ["blocked domain"]}));
        })
        .await;

    let cfg = ClientConfig::new(&server.base_url()).unwrap();
    let api = HttpOrderApi::new(cfg.clone());
    let mut form = mount(&api, &cfg).await;
    form.edit(Field::CustomerName, "Alan Turing");
    form.edit(Field::CustomerId, "1912/1954");
    form.edit(Field::UserEmail, "alan@example.org");

    let outcome = submit(&mut form, &api).await.unwrap();

    assert!(!outcome.is_placed());
    assert_eq!(
        form.status().message(),
        Some(odk_form::status::FAILURE_MESSAGE)
    );
    assert_eq!(form.state().user_email, "alan@example.org");
}
