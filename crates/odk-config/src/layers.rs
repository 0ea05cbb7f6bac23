//! Loading and merging YAML layers.

use std::fs;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::keys::reject_secret_literals;

/// The merged result of one or more YAML layers.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Lowercase hex SHA-256 of `canonical_json`.
    pub config_hash: String,
    /// Compact JSON with keys sorted at every depth.
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// No layers at all. Client resolution then falls back to the
    /// environment and build-time defaults.
    pub fn empty() -> Result<Self> {
        load_layered_yaml_from_strings(&[])
    }
}

/// Read each path and merge in order.
pub fn load_layered_yaml<P: AsRef<str>>(paths: &[P]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))
        })
        .collect::<Result<Vec<String>>>()?;

    let refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let doc: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {i}"))?;
        // Empty layer: nothing to override.
        if doc.is_null() {
            continue;
        }
        let doc = serde_json::to_value(doc).context("yaml->json conversion failed")?;
        overlay(&mut merged, doc);
    }

    reject_secret_literals(&merged)?;

    let canonical_json =
        serde_json::to_string(&sorted(&merged)).context("canonical json serialize failed")?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));

    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Objects merge key by key; anything else in `top` replaces `base`.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Object(base_map), Value::Object(top_map)) => {
            for (k, v) in top_map {
                overlay(base_map.entry(k).or_insert(Value::Null), v);
            }
        }
        (slot, v) => *slot = v,
    }
}

/// Key-sorted copy. `serde_json::Map` only sorts on its own while no crate in
/// the build enables `preserve_order`; the hash must not depend on that.
fn sorted(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k.clone(), sorted(v))).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}
