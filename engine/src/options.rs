//! Comparison options.
//!
//! Arrays are compared by position unless a key column is configured for
//! their field path. Paths are column ids joined by `.`: `stock` is the
//! top-level `stock` array, `stock.tags` is the `tags` array inside each
//! record of `stock`.

use crate::{error::Result, ColumnId, Error, FieldPath};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration passed down the comparison.
///
/// Built by applying (path, key) pairs in order; a later pair for the same
/// path replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Field path to the key column used to match array elements
    #[serde(default)]
    array_keys: BTreeMap<FieldPath, ColumnId>,
}

impl CompareOptions {
    /// Options with no array keys: every array is compared by position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from (path, key) pairs, applied in order.
    pub fn from_pairs<I, P, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, K)>,
        P: Into<FieldPath>,
        K: Into<ColumnId>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |options, (path, key)| {
                options.with_array_key(path, key)
            })
    }

    /// Match elements of the array at `path` by `key_column`.
    pub fn with_array_key(
        mut self,
        path: impl Into<FieldPath>,
        key_column: impl Into<ColumnId>,
    ) -> Self {
        self.set_array_key(path, key_column);
        self
    }

    pub fn set_array_key(&mut self, path: impl Into<FieldPath>, key_column: impl Into<ColumnId>) {
        self.array_keys.insert(path.into(), key_column.into());
    }

    /// Key column configured for `path`. An empty key counts as unset.
    pub fn array_key(&self, path: &str) -> Option<&str> {
        self.array_keys
            .get(path)
            .map(String::as_str)
            .filter(|key| !key.is_empty())
    }

    pub fn has_array_key(&self, path: &str) -> bool {
        self.array_key(path).is_some()
    }

    /// Number of paths with a non-empty key.
    pub fn array_key_count(&self) -> usize {
        self.array_keys().count()
    }

    /// Iterate configured (path, key) pairs in path order, skipping empty keys.
    pub fn array_keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.array_keys
            .iter()
            .filter(|(_, key)| !key.is_empty())
            .map(|(path, key)| (path.as_str(), key.as_str()))
    }

    /// Parse a comma-separated `path=key` list, e.g. `stock=name,stock.tags=id`.
    ///
    /// Blank entries are ignored. An entry without `=`, or with an empty path
    /// or key, fails with [`Error::InvalidArrayKey`].
    pub fn parse_array_keys(list: &str) -> Result<Self> {
        let mut options = Self::new();
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (path, key) = entry
                .split_once('=')
                .map(|(p, k)| (p.trim(), k.trim()))
                .filter(|(p, k)| !p.is_empty() && !k.is_empty())
                .ok_or_else(|| Error::InvalidArrayKey(entry.to_string()))?;
            options.set_array_key(path, key);
        }
        Ok(options)
    }

    /// Parse options from JSON, e.g. `{"array_keys": {"stock": "name"}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
