//! Leaf-key analysis over the merged config: the unused-key report and the
//! secret-literal guard.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-pointer prefixes the client actually reads.
///
/// Keep in sync with `client.rs`; anything else shows up in the unused-key
/// report.
pub const CONSUMED_POINTERS: &[&str] = &["/api/base_url", "/display/currency_label"];

/// Leading text of credentials that must never be committed to config.
const SECRET_PREFIXES: &[&str] = &[
    "sk-",
    "sk_live",
    "sk_test",
    "AKIA",
    "-----BEGIN",
    "ghp_",
    "gho_",
    "glpat-",
    "xoxb-",
    "xoxp-",
];

/// Shorter strings are too ambiguous to call a secret.
const MIN_SECRET_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Consumed pointers checked against (sorted, unique).
    pub consumed_prefixes: Vec<String>,
    /// Leaf pointers nothing reads (sorted, unique).
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// List the leaves of `config_json` that no consumer reads.
///
/// Under [`UnusedKeyPolicy::Fail`] a non-empty list is an error
/// (`CONFIG_UNUSED_KEYS`); under `Warn` the report is always returned.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = CONSUMED_POINTERS
        .iter()
        .map(|p| normalize_pointer(p))
        .collect();

    let mut unused = BTreeSet::new();
    walk_leaves(config_json, String::new(), &mut |ptr, _| {
        if !consumed.iter().any(|c| pointer_covers(c, &ptr)) {
            unused.insert(ptr);
        }
    });

    let report = UnusedKeyReport {
        consumed_prefixes: consumed.into_iter().collect(),
        unused_leaf_pointers: unused.into_iter().collect(),
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        let first: Vec<&str> = report
            .unused_leaf_pointers
            .iter()
            .take(12)
            .map(String::as_str)
            .collect();
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected; first: {}",
            report.unused_leaf_pointers.len(),
            first.join(", ")
        );
    }

    Ok(report)
}

/// Abort on the first string leaf that looks like a credential. The value is
/// never echoed.
pub(crate) fn reject_secret_literals(config_json: &Value) -> Result<()> {
    let mut found: Option<String> = None;
    walk_leaves(config_json, String::new(), &mut |ptr, leaf| {
        if found.is_none() && leaf.as_str().is_some_and(looks_like_secret) {
            found = Some(ptr);
        }
    });

    match found {
        Some(ptr) => bail!("CONFIG_SECRET_DETECTED leaf={ptr} value=REDACTED"),
        None => Ok(()),
    }
}

fn looks_like_secret(s: &str) -> bool {
    let t = s.trim();
    t.len() >= MIN_SECRET_LEN && SECRET_PREFIXES.iter().any(|p| t.starts_with(p))
}

/// Visit every scalar leaf with its RFC 6901 pointer. The root scalar is `/`.
fn walk_leaves(v: &Value, ptr: String, visit: &mut dyn FnMut(String, &Value)) {
    match v {
        Value::Object(map) => {
            for (k, child) in map {
                let token = k.replace('~', "~0").replace('/', "~1");
                walk_leaves(child, format!("{ptr}/{token}"), visit);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                walk_leaves(child, format!("{ptr}/{i}"), visit);
            }
        }
        leaf if ptr.is_empty() => visit("/".to_string(), leaf),
        leaf => visit(ptr, leaf),
    }
}

/// Leading `/`, no trailing `/` (except the root itself).
fn normalize_pointer(p: &str) -> String {
    let body = p.trim().trim_matches('/');
    format!("/{body}")
}

/// `/a/b` covers `/a/b` and `/a/b/c` but not `/a/bc`.
fn pointer_covers(prefix: &str, leaf: &str) -> bool {
    prefix == "/"
        || leaf
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
