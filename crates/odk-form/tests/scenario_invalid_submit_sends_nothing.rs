//! Invalid submit
//!
//! GREEN when a submit with any invalid field:
//! - issues zero create-order requests
//! - reports a message for every invalid field, not only the first
//! - clears any previous status message

use odk_api::ApiError;
use odk_config::ClientConfig;
use odk_form::validate::{
    CUSTOMER_ID_CHARSET, CUSTOMER_NAME_CHARSET, EMAIL_INVALID, PRODUCT_REQUIRED,
    QUANTITY_TOO_LOW,
};
use odk_form::{mount, submit, Field, SubmissionStatus, SubmitError};
use odk_testkit::{sample_catalog, ScriptedApi, VALID_CUSTOMER_ID, VALID_EMAIL, VALID_NAME};

fn config() -> ClientConfig {
    ClientConfig::new("http://orders.test").unwrap()
}

#[tokio::test]
async fn every_invalid_field_is_reported() {
    let api = ScriptedApi::with_catalog(sample_catalog());
    let mut form = mount(&api, &config()).await;
    form.edit(Field::CustomerName, "R2D2");
    form.edit(Field::CustomerId, "ABCDEFGH");
    form.edit(Field::UserEmail, "a@b");
    form.edit(Field::Product, "42");
    form.edit(Field::Quantity, "0");

    let err = submit(&mut form, &api).await.unwrap_err();

    let SubmitError::Invalid(errors) = err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert_eq!(api.order_count(), 0);
    assert_eq!(errors.len(), 5);
    assert_eq!(errors.get(Field::CustomerName), Some(CUSTOMER_NAME_CHARSET));
    assert_eq!(errors.get(Field::CustomerId), Some(CUSTOMER_ID_CHARSET));
    assert_eq!(errors.get(Field::UserEmail), Some(EMAIL_INVALID));
    assert_eq!(errors.get(Field::Product), Some(PRODUCT_REQUIRED));
    assert_eq!(errors.get(Field::Quantity), Some(QUANTITY_TOO_LOW));
    assert_eq!(form.errors(), &errors, "errors are surfaced on the form");
}

#[tokio::test]
async fn single_bad_field_blocks_submission() {
    let api = ScriptedApi::with_catalog(sample_catalog());
    let mut form = mount(&api, &config()).await;
    form.edit(Field::CustomerName, VALID_NAME);
    form.edit(Field::CustomerId, VALID_CUSTOMER_ID);
    form.edit(Field::UserEmail, "ada at example.com");

    assert!(submit(&mut form, &api).await.is_err());
    assert_eq!(api.order_count(), 0);
    assert_eq!(form.errors().len(), 1);
    assert_eq!(form.errors().get(Field::UserEmail), Some(EMAIL_INVALID));
}

#[tokio::test]
async fn validation_failure_clears_previous_failure_message() {
    let api = ScriptedApi::with_catalog(sample_catalog());
    api.push_order_result(Err(ApiError::Transport("refused".to_string())));
    let mut form = mount(&api, &config()).await;
    form.edit(Field::CustomerName, VALID_NAME);
    form.edit(Field::CustomerId, VALID_CUSTOMER_ID);
    form.edit(Field::UserEmail, VALID_EMAIL);

    submit(&mut form, &api).await.unwrap();
    assert!(matches!(form.status(), SubmissionStatus::Failed(_)));

    form.edit(Field::Quantity, "-1");
    assert!(submit(&mut form, &api).await.is_err());
    assert_eq!(form.status(), &SubmissionStatus::Idle);
    assert_eq!(form.status().message(), None);
    assert_eq!(api.order_count(), 1);
}

#[tokio::test]
async fn fixing_a_field_clears_its_error_immediately() {
    let api = ScriptedApi::with_catalog(sample_catalog());
    let mut form = mount(&api, &config()).await;
    assert!(submit(&mut form, &api).await.is_err());
    assert!(form.errors().get(Field::CustomerId).is_some());

    form.edit(Field::CustomerId, "1");
    assert_eq!(form.errors().get(Field::CustomerId), None);
    assert!(form.errors().get(Field::CustomerName).is_some());
}
