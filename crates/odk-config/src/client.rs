//! Client configuration: where the catalog/order API lives and how totals
//! are labelled.
//!
//! # Contract
//! - The API base URL is resolved **once** at startup and injected into the
//!   HTTP client and form; nothing else reads the environment.
//! - Resolution order: explicit value (e.g. `--api-url`) → `ODK_API_URL`
//!   env var → `/api/base_url` in the layered config → the `ODK_API_URL`
//!   value captured at build time.
//! - The URL must be `http`/`https` and must not carry credentials.

use anyhow::{bail, Result};
use serde_json::Value;

pub const ENV_API_URL: &str = "ODK_API_URL";

/// Label prepended to rendered totals when the config does not set one.
pub const DEFAULT_CURRENCY_LABEL: &str = "Rs.";

const BUILD_TIME_API_URL: Option<&str> = option_env!("ODK_API_URL");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
    currency_label: String,
}

impl ClientConfig {
    /// Build from a base URL, validating and trimming trailing slashes.
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
        })
    }

    pub fn with_currency_label(mut self, label: impl Into<String>) -> Self {
        self.currency_label = label.into();
        self
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn currency_label(&self) -> &str {
        &self.currency_label
    }

    /// Join a relative endpoint path (`"products/"`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

/// Resolve the client config for this process.
///
/// # Errors
/// `CONFIG_MISSING_API_URL` when no source provides a URL, or
/// `CONFIG_INVALID_API_URL` when the winning value is malformed.
pub fn resolve_client_config(explicit: Option<&str>, config_json: &Value) -> Result<ClientConfig> {
    resolve_from_sources(
        explicit,
        resolve_env(ENV_API_URL),
        config_json,
        BUILD_TIME_API_URL,
    )
}

fn resolve_from_sources(
    explicit: Option<&str>,
    env_value: Option<String>,
    config_json: &Value,
    build_time: Option<&str>,
) -> Result<ClientConfig> {
    let api_url = explicit
        .map(str::to_string)
        .filter(|s| !s.trim().is_empty())
        .or(env_value)
        .or_else(|| read_str_at(config_json, "/api/base_url"))
        .or_else(|| build_time.map(str::to_string).filter(|s| !s.trim().is_empty()));

    let Some(api_url) = api_url else {
        bail!(
            "CONFIG_MISSING_API_URL: pass --api-url, set {}, or add api.base_url to the config",
            ENV_API_URL
        );
    };

    let mut cfg = ClientConfig::new(&api_url)?;
    if let Some(label) = read_label_at(config_json, "/display/currency_label") {
        cfg = cfg.with_currency_label(label);
    }
    Ok(cfg)
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let url = raw.trim();
    let lower = url.to_ascii_lowercase();
    let rest = if lower.starts_with("https://") {
        &url["https://".len()..]
    } else if lower.starts_with("http://") {
        &url["http://".len()..]
    } else {
        bail!("CONFIG_INVALID_API_URL: expected an http(s) URL, got '{url}'");
    };

    let authority = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    if authority.is_empty() {
        bail!("CONFIG_INVALID_API_URL: missing host in '{url}'");
    }
    if authority.contains('@') {
        // Never echo the URL here: it carries credentials.
        bail!("CONFIG_INVALID_API_URL: credentials must not be embedded in the API URL");
    }

    Ok(url.trim_end_matches('/').to_string())
}

/// Non-blank string at `pointer`, trimmed.
fn read_str_at(config: &Value, pointer: &str) -> Option<String> {
    let s = config.pointer(pointer)?.as_str()?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Display text is taken verbatim (`"USD "` keeps its space); blank counts
/// as unset.
fn read_label_at(config: &Value, pointer: &str) -> Option<String> {
    let s = config.pointer(pointer)?.as_str()?;
    (!s.trim().is_empty()).then(|| s.to_string())
}

fn resolve_env(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
