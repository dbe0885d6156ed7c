//! Stable column keys.
//!
//! A [`ColumnKey`] is derived from a column's semantic identity, its
//! `(name, value)` pair, and is used for state-map lookups and for matching
//! rendered widths back to columns. The same identity always yields the same
//! key, across calls and across processes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::ColumnDefinition;

const KEY_DOMAIN: &[u8] = b"gridhead.column-key.v1";
const KEY_HEX_LEN: usize = 32;

/// Stable identifier for a column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
    /// Wrap an externally produced key (e.g. one read back from a store).
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColumnKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the key for a `(name, value)` pair.
///
/// Both parts are length-prefixed before hashing so `("ab", "c")` and
/// `("a", "bc")` differ, and an absent value differs from an empty one.
/// Callers should keep `name` non-empty; two unnamed columns bound to the
/// same value share a key.
#[must_use]
pub fn key_generator(name: &str, value: Option<&str>) -> ColumnKey {
    let mut hasher = blake3::Hasher::new();
    hasher.update(KEY_DOMAIN);
    hasher.update(&(name.len() as u64).to_le_bytes());
    hasher.update(name.as_bytes());
    match value {
        Some(value) => {
            hasher.update(&[1]);
            hasher.update(&(value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
    let hex = hasher.finalize().to_hex();
    ColumnKey(format!("col-{}", &hex.as_str()[..KEY_HEX_LEN]))
}

/// Key of a column object; identical to `key_generator(name, value)`.
#[must_use]
pub fn key_from_object(column: &ColumnDefinition) -> ColumnKey {
    key_generator(&column.name, column.value.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_identity_same_key() {
        assert_eq!(key_generator("Name", Some("name")), key_generator("Name", Some("name")));
    }

    #[test]
    fn object_and_pair_agree() {
        let col = ColumnDefinition::new("Name").value("name").width(30.0);
        assert_eq!(key_from_object(&col), key_generator("Name", Some("name")));
    }

    #[test]
    fn key_ignores_non_identity_fields() {
        let a = ColumnDefinition::new("Name").value("name").width(30.0);
        let b = ColumnDefinition::new("Name").value("name").resizable(false);
        assert_eq!(key_from_object(&a), key_from_object(&b));
    }

    #[test]
    fn concatenation_boundaries_do_not_collide() {
        assert_ne!(key_generator("ab", Some("c")), key_generator("a", Some("bc")));
        assert_ne!(key_generator("a", None), key_generator("a", Some("")));
    }

    #[test]
    fn key_shape_is_stable() {
        let key = key_generator("Name", None);
        assert!(key.as_str().starts_with("col-"));
        assert_eq!(key.as_str().len(), 4 + KEY_HEX_LEN);
    }
}
