//! Column width allocation.
//!
//! # Rules
//!
//! 1. A persisted override (from an earlier resize) is returned as-is.
//! 2. Otherwise the declared width is used, falling back to the grid default.
//! 3. **Remainder rule**: the last column, when it has no override and the
//!    declared widths of all columns sum to something in `(0, 100)`, absorbs
//!    the unallocated percentage: `100 - (declared_total - own_declared)`.
//!
//! Only the last column ever absorbs slack. Earlier undeclared columns get
//! the default width and are not counted in `declared_total`, so the row can
//! overflow 100% when several columns are undeclared; that is the documented
//! behaviour and is kept as-is.

use gridhead_core::{ColumnDefinition, ColumnKey, ColumnStateMap, Percent, key_from_object};

/// Sum of declared widths; undeclared columns count as `0`.
#[must_use]
pub fn declared_total(columns: &[ColumnDefinition]) -> f64 {
    columns.iter().map(ColumnDefinition::declared_width).sum()
}

/// Rendered width of the column at `index`.
///
/// `key` must be the column's key; it is passed in because the caller has
/// already derived it for the cell.
#[must_use]
pub fn compute_width(
    column: &ColumnDefinition,
    states: &ColumnStateMap,
    key: &ColumnKey,
    columns: &[ColumnDefinition],
    default_width: Percent,
    index: usize,
) -> Percent {
    if let Some(width) = states.width_override(key) {
        return width;
    }

    let is_last = index + 1 == columns.len();
    if is_last {
        let full = Percent::FULL.get();
        let total = declared_total(columns);
        if total > 0.0 && total < full {
            return Percent::new(full - (total - column.declared_width()));
        }
    }

    column.width.unwrap_or(default_width)
}

/// Widths for every column, in order.
#[must_use]
pub fn allocate_widths(
    columns: &[ColumnDefinition],
    states: &ColumnStateMap,
    default_width: Percent,
) -> Vec<Percent> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let key = key_from_object(column);
            compute_width(column, states, &key, columns, default_width, index)
        })
        .collect()
}
