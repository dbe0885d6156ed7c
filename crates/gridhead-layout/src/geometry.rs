//! Explicit pointer and width samples for the resize engine.

use gridhead_core::{ColumnKey, Percent};
use rustc_hash::FxHashMap;

/// Last-known rendered width of each column, in percent of header width.
///
/// Maintained by the caller between samples (typically rebuilt from the last
/// assembled header row) and passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedWidths(FxHashMap<ColumnKey, Percent>);

impl RenderedWidths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert pixel widths measured by a renderer into percentages.
    ///
    /// Returns an empty map when `header_width_px` is not positive.
    #[must_use]
    pub fn from_pixels(
        header_width_px: f64,
        widths_px: impl IntoIterator<Item = (ColumnKey, f64)>,
    ) -> Self {
        if header_width_px.is_nan() || header_width_px <= 0.0 {
            return Self::default();
        }
        Self(
            widths_px
                .into_iter()
                .map(|(key, px)| (key, Percent::new(px / header_width_px * 100.0)))
                .collect(),
        )
    }

    pub fn insert(&mut self, key: ColumnKey, width: Percent) {
        self.0.insert(key, width);
    }

    #[must_use]
    pub fn get(&self, key: &ColumnKey) -> Option<Percent> {
        self.0.get(key).copied()
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

impl FromIterator<(ColumnKey, Percent)> for RenderedWidths {
    fn from_iter<I: IntoIterator<Item = (ColumnKey, Percent)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One pointer sample during a resize drag.
///
/// Positions are in the same pixel space (page coordinates in a browser,
/// cells in a terminal).
#[derive(Debug, Clone, Copy)]
pub struct ResizeGeometry<'a> {
    /// Pointer x position.
    pub cursor_x: f64,
    /// Left edge of the dragged column.
    pub column_left_x: f64,
    /// Total width of the header row.
    pub header_width_px: f64,
    pub current_widths: &'a RenderedWidths,
}

impl<'a> ResizeGeometry<'a> {
    #[must_use]
    pub fn new(
        cursor_x: f64,
        column_left_x: f64,
        header_width_px: f64,
        current_widths: &'a RenderedWidths,
    ) -> Self {
        Self {
            cursor_x,
            column_left_x,
            header_width_px,
            current_widths,
        }
    }

    /// Fraction of the header consumed from the column's left edge to the
    /// cursor.
    #[must_use]
    pub fn cursor_fraction(&self) -> f64 {
        (self.cursor_x - self.column_left_x) / self.header_width_px
    }
}
