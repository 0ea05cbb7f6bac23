//! Wire types shared by the catalog/order client and the order form.
//!
//! Everything that crosses the HTTP boundary is parsed into one of these
//! types; nothing downstream handles untyped JSON.

pub mod money;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use money::{Micros, MoneyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One purchasable catalog entry as served by `GET /products/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    #[serde(deserialize_with = "money::deserialize_price")]
    pub cost: Micros,
}

/// Body of `POST /orders/create/`.
///
/// The displayed unit cost is intentionally absent; the server prices the
/// order itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_id: String,
    pub user_email: String,
    pub product: ProductId,
    pub quantity: i64,
}

/// Server-assigned order identifier. Backends differ on whether this is a
/// number or a string; both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(i64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Number(n) => write!(f, "{n}"),
            OrderId::Text(s) => f.write_str(s),
        }
    }
}

/// Success body of `POST /orders/create/`. Only `id` is required; any other
/// fields the server echoes back are retained untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub id: OrderId,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
