//! Resize-by-drag engine.
//!
//! Called once per pointer sample while a column edge is dragged. Each call
//! is pure: the result depends only on its arguments, so samples can be
//! replayed and cancellation needs no cleanup.
//!
//! # Invariants
//!
//! 1. The pair's combined width is preserved: `dragged + next == combined`,
//!    where `combined` is the sum of both columns' current widths.
//! 2. Neither output is below `min_column_width`.
//! 3. A cursor that would leave either column under the minimum clamps that
//!    column to it, including a cursor past the neighbour's right edge.
//! 4. Samples that cannot satisfy both (cursor left of the column, a pair
//!    already narrower than twice the minimum, unknown widths, a degenerate
//!    header) are rejected and emit no command.

use gridhead_core::{ColumnKey, ManagerConfig, Percent};
use serde::Serialize;

use crate::command::{ColumnWidthUpdate, ResizeCommand};
use crate::geometry::ResizeGeometry;

/// Why a resize sample produced no command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ResizeRejection {
    /// The cell has no resize binding (not resizable, or the last column).
    NotResizable,
    /// Header width is zero, negative or not finite.
    InvalidHeaderWidth,
    /// A pointer coordinate is not finite.
    NonFiniteSample,
    /// No rendered width is known for one of the pair.
    UnknownWidth { key: ColumnKey },
    /// Cursor is left of the dragged column's left edge.
    CursorBeforeColumn,
    /// The pair is too narrow to give both columns the minimum width.
    PairBelowFloor { combined: f64, min: f64 },
}

/// Result of one resize sample.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeOutcome {
    Resized(ResizeCommand),
    Rejected(ResizeRejection),
}

impl ResizeOutcome {
    /// The command, if the sample was accepted.
    #[must_use]
    pub fn command(self) -> Option<ResizeCommand> {
        match self {
            Self::Resized(command) => Some(command),
            Self::Rejected(_) => None,
        }
    }
}

/// Split `combined` at `proposed`, enforcing the minimum on both sides.
///
/// Returns `(dragged, next)`. A proposal past `combined - min`, including
/// one beyond the pair's right edge, gives the neighbour exactly `min`.
pub fn split_pair(combined: f64, proposed: f64, min: f64) -> Result<(f64, f64), ResizeRejection> {
    if proposed < 0.0 {
        return Err(ResizeRejection::CursorBeforeColumn);
    }
    if combined < 2.0 * min {
        return Err(ResizeRejection::PairBelowFloor { combined, min });
    }

    if proposed > combined - min {
        Ok((combined - min, min))
    } else if proposed < min {
        Ok((min, combined - min))
    } else {
        Ok((proposed, combined - proposed))
    }
}

/// Turn one pointer sample into a width update for `dragged` and `next`.
#[must_use]
pub fn resize_columns(
    dragged: &ColumnKey,
    next: &ColumnKey,
    config: &ManagerConfig,
    geometry: &ResizeGeometry<'_>,
) -> ResizeOutcome {
    match compute(dragged, next, config, geometry) {
        Ok(command) => {
            tracing::trace!(
                message = "header.resize.applied",
                dragged = %dragged,
                next = %next,
                dragged_width = command.dragged.width.get(),
                next_width = command.next.width.get(),
            );
            ResizeOutcome::Resized(command)
        }
        Err(rejection) => {
            tracing::debug!(
                message = "header.resize.rejected",
                dragged = %dragged,
                next = %next,
                reason = ?rejection,
            );
            ResizeOutcome::Rejected(rejection)
        }
    }
}

fn compute(
    dragged: &ColumnKey,
    next: &ColumnKey,
    config: &ManagerConfig,
    geometry: &ResizeGeometry<'_>,
) -> Result<ResizeCommand, ResizeRejection> {
    if !geometry.header_width_px.is_finite() || geometry.header_width_px <= 0.0 {
        return Err(ResizeRejection::InvalidHeaderWidth);
    }
    if !geometry.cursor_x.is_finite() || !geometry.column_left_x.is_finite() {
        return Err(ResizeRejection::NonFiniteSample);
    }

    let current = |key: &ColumnKey| {
        geometry
            .current_widths
            .get(key)
            .map(Percent::get)
            .ok_or_else(|| ResizeRejection::UnknownWidth { key: key.clone() })
    };
    let combined = current(dragged)? + current(next)?;
    let proposed = geometry.cursor_fraction() * 100.0;

    let (dragged_width, next_width) =
        split_pair(combined, proposed, config.min_column_width.get())?;

    Ok(ResizeCommand {
        dragged: ColumnWidthUpdate {
            key: dragged.clone(),
            width: Percent::new(dragged_width),
        },
        next: ColumnWidthUpdate {
            key: next.clone(),
            width: Percent::new(next_width),
        },
    })
}
