//! Field validators.
//!
//! Each validator is pure and returns `None` when the value is acceptable,
//! or the message to show under the field. Rules are checked in order and
//! the first failing rule wins for that field.

use std::sync::OnceLock;

use odk_schemas::{Product, ProductId};
use regex::Regex;

pub const CUSTOMER_NAME_REQUIRED: &str = "Customer name is required";
pub const CUSTOMER_NAME_CHARSET: &str = "Customer name should contain only letters and spaces";
pub const CUSTOMER_ID_REQUIRED: &str = "Customer ID is required";
pub const CUSTOMER_ID_TOO_SHORT: &str = "Customer ID must be at least 8 characters";
pub const CUSTOMER_ID_CHARSET: &str = "Customer ID should contain only numbers and symbols";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PRODUCT_REQUIRED: &str = "Please select a product";
pub const QUANTITY_TOO_LOW: &str = "Quantity must be at least 1";

pub const CUSTOMER_ID_MIN_LEN: usize = 8;

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s]+$").expect("static regex"))
}

// Digits plus the symbol set ! @ # $ % ^ & * ( ) _ + - = [ ] { } ; ' : " \ | , . < > / ?
// Letters are deliberately absent.
fn customer_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^[0-9!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]+$"#).expect("static regex")
    })
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

pub fn validate_customer_name(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some(CUSTOMER_NAME_REQUIRED);
    }
    if !name_re().is_match(name) {
        return Some(CUSTOMER_NAME_CHARSET);
    }
    None
}

/// Length is counted in characters, so multi-byte input is not favoured.
pub fn validate_customer_id(id: &str) -> Option<&'static str> {
    if id.trim().is_empty() {
        return Some(CUSTOMER_ID_REQUIRED);
    }
    if id.chars().count() < CUSTOMER_ID_MIN_LEN {
        return Some(CUSTOMER_ID_TOO_SHORT);
    }
    if !customer_id_re().is_match(id) {
        return Some(CUSTOMER_ID_CHARSET);
    }
    None
}

pub fn validate_email(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        return Some(EMAIL_REQUIRED);
    }
    if !email_re().is_match(email) {
        return Some(EMAIL_INVALID);
    }
    None
}

/// Parse the quantity text the way the form does: an integer after trimming.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

pub fn validate_quantity(raw: &str) -> Option<&'static str> {
    match parse_quantity(raw) {
        Some(q) if q >= 1 => None,
        _ => Some(QUANTITY_TOO_LOW),
    }
}

/// A selection must name an entry that is actually in the catalog.
pub fn validate_product(catalog: &[Product], selected: Option<ProductId>) -> Option<&'static str> {
    match selected {
        Some(id) if catalog.iter().any(|p| p.id == id) => None,
        _ => Some(PRODUCT_REQUIRED),
    }
}
