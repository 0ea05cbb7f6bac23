//! Layered configuration for the order desk client.
//!
//! YAML documents are merged in order (later documents override earlier
//! ones), converted to JSON, checked for secret-looking literals, and hashed
//! over their canonical JSON form. [`client::resolve_client_config`] turns the
//! merged document into the [`client::ClientConfig`] that is injected into the
//! HTTP client and the order form.

pub mod client;
mod keys;
mod layers;

pub use client::{resolve_client_config, ClientConfig, ENV_API_URL};
pub use keys::{report_unused_keys, UnusedKeyPolicy, UnusedKeyReport, CONSUMED_POINTERS};
pub use layers::{load_layered_yaml, load_layered_yaml_from_strings, LoadedConfig};
