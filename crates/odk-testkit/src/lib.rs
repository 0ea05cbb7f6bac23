//! Test doubles for the order desk crates.
//!
//! [`ScriptedApi`] is an in-memory [`OrderApi`] that returns canned results
//! and records every request, so tests can assert exactly how many
//! create-order calls a flow made and what they carried.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use odk_api::{ApiError, OrderApi};
use odk_schemas::{CreateOrderRequest, CreateOrderResponse, Micros, OrderId, Product, ProductId};

/// Minimal scripted API used ONLY for tests.
///
/// - `fetch_products` returns the configured catalog result every time.
/// - `create_order` pops the next scripted result; when the script is
///   empty it succeeds with a sequential numeric id.
pub struct ScriptedApi {
    catalog: Mutex<Result<Vec<Product>, ApiError>>,
    order_script: Mutex<VecDeque<Result<CreateOrderResponse, ApiError>>>,
    product_fetches: Mutex<usize>,
    orders: Mutex<Vec<CreateOrderRequest>>,
}

impl ScriptedApi {
    pub fn with_catalog(products: Vec<Product>) -> Self {
        Self {
            catalog: Mutex::new(Ok(products)),
            order_script: Mutex::new(VecDeque::new()),
            product_fetches: Mutex::new(0),
            orders: Mutex::new(Vec::new()),
        }
    }

    /// Catalog fetches fail with `err`.
    pub fn with_catalog_error(err: ApiError) -> Self {
        let api = Self::with_catalog(Vec::new());
        *lock(&api.catalog) = Err(err);
        api
    }

    pub fn set_catalog(&self, products: Vec<Product>) {
        *lock(&self.catalog) = Ok(products);
    }

    pub fn set_catalog_error(&self, err: ApiError) {
        *lock(&self.catalog) = Err(err);
    }

    /// Queue the result of the next create-order call.
    pub fn push_order_result(&self, result: Result<CreateOrderResponse, ApiError>) {
        lock(&self.order_script).push_back(result);
    }

    pub fn product_fetch_count(&self) -> usize {
        *lock(&self.product_fetches)
    }

    /// Every create-order request received, in order.
    pub fn orders(&self) -> Vec<CreateOrderRequest> {
        lock(&self.orders).clone()
    }

    pub fn order_count(&self) -> usize {
        lock(&self.orders).len()
    }
}

#[async_trait::async_trait]
impl OrderApi for ScriptedApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        *lock(&self.product_fetches) += 1;
        lock(&self.catalog).clone()
    }

    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, ApiError> {
        let n = {
            let mut orders = lock(&self.orders);
            orders.push(req.clone());
            orders.len()
        };
        lock(&self.order_script)
            .pop_front()
            .unwrap_or_else(|| Ok(order_response(n as i64)))
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn product(id: i64, name: &str, cost: &str) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        cost: Micros::parse_decimal(cost).unwrap_or(Micros::ZERO),
    }
}

/// Three-item catalog: Notebook 45.00, Pen 12.49, Desk Lamp 1299.99.
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "Notebook", "45.00"),
        product(2, "Pen", "12.49"),
        product(3, "Desk Lamp", "1299.99"),
    ]
}

pub fn order_response(id: i64) -> CreateOrderResponse {
    CreateOrderResponse {
        id: OrderId::Number(id),
        extra: serde_json::Map::new(),
    }
}

/// Customer inputs that pass every validator.
pub const VALID_NAME: &str = "Ada Lovelace";
pub const VALID_CUSTOMER_ID: &str = "1815-1852";
pub const VALID_EMAIL: &str = "ada@example.com";
