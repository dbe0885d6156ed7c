//! Per-column capability resolution.
//!
//! Both capabilities use the same three-tier override chain:
//! the column's own flag, then the grid-level flag, then the grid default.
//! An explicit `false` at a higher tier wins over `true` below it.

use gridhead_core::{ColumnDefinition, ManagerConfig};

#[inline]
fn resolve_flag(column: Option<bool>, grid: Option<bool>, default: bool) -> bool {
    column.or(grid).unwrap_or(default)
}

/// Whether the column may be resized by dragging its right edge.
#[must_use]
pub fn is_resizable(column: &ColumnDefinition, config: &ManagerConfig) -> bool {
    resolve_flag(column.resizable, config.resizable, config.default_resizable)
}

/// Whether the column may be reordered by dragging its header text.
#[must_use]
pub fn is_moveable(column: &ColumnDefinition, config: &ManagerConfig) -> bool {
    resolve_flag(column.moveable, config.moveable, config.default_moveable)
}
