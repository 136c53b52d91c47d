//! Layered catalog loading.
//!
//! Catalog documents are YAML-or-JSON files keyed by item id. They load in
//! layer order and deep-merge: earlier documents are the base, later
//! documents override (per-item overrides sit in a small second file the
//! same way the kitchen's special-menu overrides sit on top of the stored
//! menu). The merged document is canonicalized and hashed so operators can
//! tell at a glance whether two machines serve the same menu.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::catalog::{MenuCatalog, MenuItemConfig};

/// The result of a layered catalog load.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// SHA-256 of the canonical merged document — the menu version marker.
    pub catalog_hash: String,
    /// Canonical (sorted-key) JSON of the merged document.
    pub canonical_json: String,
    pub catalog: MenuCatalog,
}

/// Load catalog documents from disk and merge them in order.
pub fn load_layered<P: AsRef<Path>>(paths: &[P]) -> Result<LoadedCatalog> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let p = p.as_ref();
        let raw = fs::read_to_string(p)
            .with_context(|| format!("failed to read catalog path: {}", p.display()))?;
        docs.push(raw);
    }
    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_from_strs(&doc_refs)
}

/// Merge catalog documents already in memory. Earlier docs are the base,
/// later docs override.
pub fn load_layered_from_strs(docs: &[&str]) -> Result<LoadedCatalog> {
    let mut merged = serde_json::json!({});
    for raw in docs {
        // YAML is a superset of JSON, so a single parse path covers both.
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid catalog document")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let catalog_hash = sha256_hex(canonical_json.as_bytes());
    let catalog = decode_catalog(merged)?;

    Ok(LoadedCatalog {
        catalog_hash,
        canonical_json,
        catalog,
    })
}

/// Decode the merged document into typed catalog entries.
///
/// The document is an object keyed by item id; the key is authoritative
/// for the id (entries need not repeat it).
fn decode_catalog(merged: Value) -> Result<MenuCatalog> {
    let raw: BTreeMap<String, MenuItemConfig> =
        serde_json::from_value(merged).context("catalog document has unexpected shape")?;

    let mut items = Vec::with_capacity(raw.len());
    for (key, mut item) in raw {
        let id: u64 = key
            .parse()
            .with_context(|| format!("catalog key is not an item id: {key:?}"))?;
        item.id = id;
        items.push(item);
    }
    Ok(MenuCatalog::from_items(items))
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        // Arrays and scalars replace wholesale; an override rewrites the
        // entire option list rather than splicing into it.
        (_, b) => b,
    }
}

/// Stable canonical form: objects serialized with sorted keys.
fn canonicalize_json(v: &Value) -> Result<String> {
    fn sort(v: &Value) -> Value {
        match v {
            Value::Object(map) => {
                let mut sorted = serde_json::Map::new();
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                for k in keys {
                    sorted.insert(k.clone(), sort(&map[k]));
                }
                Value::Object(sorted)
            }
            Value::Array(arr) => Value::Array(arr.iter().map(sort).collect()),
            other => other.clone(),
        }
    }
    serde_json::to_string(&sort(v)).context("canonical json serialization failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
    {
      "1": {"name": "noodle soup", "base_price": 50},
      "2": {
        "name": "dry noodles",
        "base_price": 40,
        "groups": [
          {"id": 10, "name": "noodle", "is_required": true,
           "options": [{"id": 100, "name": "egg", "price": 5}]}
        ]
      }
    }
    "#;

    #[test]
    fn single_document_loads() {
        let loaded = load_layered_from_strs(&[BASE]).unwrap();
        assert_eq!(loaded.catalog.len(), 2);
        let item = loaded.catalog.get(2).unwrap();
        assert_eq!(item.id, 2);
        assert_eq!(item.groups.len(), 1);
        assert!(item.groups[0].is_required);
    }

    #[test]
    fn override_document_wins_per_field() {
        let over = r#"{"1": {"base_price": 55}}"#;
        let loaded = load_layered_from_strs(&[BASE, over]).unwrap();
        let item = loaded.catalog.get(1).unwrap();
        assert_eq!(item.base_price, 55.0);
        // Untouched fields survive the merge.
        assert_eq!(item.name, "noodle soup");
    }

    #[test]
    fn hash_is_stable_across_key_order() {
        let a = r#"{"1": {"name": "x", "base_price": 10}}"#;
        let b = r#"{"1": {"base_price": 10, "name": "x"}}"#;
        let ha = load_layered_from_strs(&[a]).unwrap().catalog_hash;
        let hb = load_layered_from_strs(&[b]).unwrap().catalog_hash;
        assert_eq!(ha, hb);
    }

    #[test]
    fn hash_changes_when_an_override_applies() {
        let base_hash = load_layered_from_strs(&[BASE]).unwrap().catalog_hash;
        let over = r#"{"1": {"base_price": 99}}"#;
        let layered_hash = load_layered_from_strs(&[BASE, over]).unwrap().catalog_hash;
        assert_ne!(base_hash, layered_hash);
    }

    #[test]
    fn yaml_document_is_accepted() {
        let yaml = "
\"1\":
  name: noodle soup
  base_price: 50
";
        let loaded = load_layered_from_strs(&[yaml]).unwrap();
        assert_eq!(loaded.catalog.get(1).unwrap().base_price, 50.0);
    }

    #[test]
    fn non_numeric_key_is_rejected() {
        let bad = r#"{"soup": {"base_price": 50}}"#;
        let err = load_layered_from_strs(&[bad]).unwrap_err();
        assert!(err.to_string().contains("not an item id"));
    }
}
