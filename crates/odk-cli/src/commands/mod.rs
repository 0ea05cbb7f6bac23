//! Command handler modules for the `odk` binary.
//!
//! Shared helpers used by more than one command live here.

pub mod catalog;
pub mod order;

use anyhow::{Context, Result};
use odk_config::{report_unused_keys, ClientConfig, LoadedConfig, UnusedKeyPolicy};

/// Merge `--config` layers (none is fine) and warn about keys nothing reads.
pub fn load_config(config_paths: &[String]) -> Result<LoadedConfig> {
    if config_paths.is_empty() {
        return LoadedConfig::empty();
    }

    let loaded = odk_config::load_layered_yaml(config_paths).context("load --config layers")?;

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        eprintln!(
            "WARN: CONFIG_UNUSED_KEYS unused_leaf_keys={}",
            report.unused_leaf_pointers.len()
        );
        for p in report.unused_leaf_pointers.iter().take(50) {
            eprintln!("  unused={}", p);
        }
    }

    Ok(loaded)
}

/// Resolve the API base URL and display settings for this invocation.
pub fn client_config(api_url: Option<&str>, config_paths: &[String]) -> Result<ClientConfig> {
    let loaded = load_config(config_paths)?;
    let client = odk_config::resolve_client_config(api_url, &loaded.config_json)?;
    tracing::debug!(
        api_url = client.api_url(),
        config_hash = %loaded.config_hash,
        "client config resolved"
    );
    Ok(client)
}
