//! odk-api
//!
//! Client for the two endpoints the order form talks to:
//! - `GET  {api_url}/products/`      → catalog
//! - `POST {api_url}/orders/create/` → create one order
//!
//! Responses are decoded into `odk-schemas` types here; callers never see
//! raw JSON. There are no retries and no timeouts beyond reqwest's defaults.

mod error;

pub use error::ApiError;

use odk_config::ClientConfig;
use odk_schemas::{CreateOrderRequest, CreateOrderResponse, Product};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const PRODUCTS_PATH: &str = "products/";
pub const CREATE_ORDER_PATH: &str = "orders/create/";

/// Longest server error body kept in an [`ApiError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Catalog and order endpoints.
///
/// Object safe so the form can hold `&dyn OrderApi` and tests can swap in a
/// scripted implementation.
#[async_trait::async_trait]
pub trait OrderApi: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn create_order(&self, req: &CreateOrderRequest) -> Result<CreateOrderResponse, ApiError>;
}

/// reqwest-backed [`OrderApi`].
#[derive(Debug, Clone)]
pub struct HttpOrderApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpOrderApi {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl OrderApi for HttpOrderApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.config.endpoint(PRODUCTS_PATH);
        debug!(%url, "fetching catalog");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode_response(resp).await
    }

    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, ApiError> {
        let url = self.config.endpoint(CREATE_ORDER_PATH);
        debug!(%url, product = %req.product, quantity = req.quantity, "creating order");

        let resp = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode_response(resp).await
    }
}

async fn decode_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::Status {
            code: status.as_u16(),
            body: truncate_body(body.trim()),
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
