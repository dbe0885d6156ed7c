//! Persisted column width overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::ColumnKey;
use crate::percent::Percent;

/// Override state recorded for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnState {
    pub width: Percent,
}

/// Mapping from column key to the width a prior resize left it at.
///
/// Owned by the external store. The layout engines only read snapshots of
/// it; entries are written by applying resize commands and are never removed
/// by the engines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnStateMap(BTreeMap<ColumnKey, ColumnState>);

impl ColumnStateMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Width override for `key`, if a resize has recorded one.
    #[must_use]
    pub fn width_override(&self, key: &ColumnKey) -> Option<Percent> {
        self.0.get(key).map(|state| state.width)
    }

    /// Record (or overwrite) the width for `key`.
    pub fn set_width(&mut self, key: ColumnKey, width: Percent) {
        self.0.insert(key, ColumnState { width });
    }

    /// Drop the entry for `key`. Used by stores on column removal.
    pub fn remove(&mut self, key: &ColumnKey) -> Option<ColumnState> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ColumnKey, Percent)> for ColumnStateMap {
    fn from_iter<I: IntoIterator<Item = (ColumnKey, Percent)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, width)| (key, ColumnState { width }))
                .collect(),
        )
    }
}
