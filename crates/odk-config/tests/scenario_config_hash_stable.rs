//! Config hash stability
//!
//! GREEN when:
//! - loading the same layers twice yields the same config_hash
//! - reordering keys inside a YAML document does not change the hash
//! - different values produce different hashes
//! - later layers override earlier ones

use odk_config::{load_layered_yaml, load_layered_yaml_from_strings};

const BASE_YAML: &str = r#"
api:
  base_url: "http://localhost:8000/api"
display:
  currency_label: "Rs."
"#;

const BASE_YAML_REORDERED: &str = r#"
display:
  currency_label: "Rs."
api:
  base_url: "http://localhost:8000/api"
"#;

const STAGING_OVERLAY: &str = r#"
api:
  base_url: "https://staging.example.com/api"
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash.len(), 64, "sha256 hex digest");
}

#[test]
fn key_order_does_not_change_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        a.config_hash, b.config_hash,
        "canonicalization must make key order irrelevant"
    );
}

#[test]
fn overlay_overrides_and_changes_hash() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let merged = load_layered_yaml_from_strings(&[BASE_YAML, STAGING_OVERLAY]).unwrap();

    assert_ne!(base.config_hash, merged.config_hash);
    assert_eq!(
        merged.config_json["api"]["base_url"],
        "https://staging.example.com/api"
    );
    assert_eq!(merged.config_json["display"]["currency_label"], "Rs.");
}

#[test]
fn empty_layers_are_ignored() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, ""]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn files_load_in_merge_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.yaml");
    let overlay = dir.path().join("staging.yaml");
    std::fs::write(&base, BASE_YAML).unwrap();
    std::fs::write(&overlay, STAGING_OVERLAY).unwrap();

    let paths = [
        base.to_string_lossy().to_string(),
        overlay.to_string_lossy().to_string(),
    ];
    let from_files = load_layered_yaml(&paths).unwrap();
    let from_strings = load_layered_yaml_from_strings(&[BASE_YAML, STAGING_OVERLAY]).unwrap();

    assert_eq!(from_files.config_hash, from_strings.config_hash);
}

#[test]
fn missing_file_names_the_path() {
    let err = load_layered_yaml(&["/definitely/not/here.yaml"]).unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.yaml"));
}
