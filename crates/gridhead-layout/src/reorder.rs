//! Reorder-by-drag engine.
//!
//! Drag-start serializes the moved column's identity into the transfer
//! channel; drop reads it back and reports the requested move. The engine
//! never reorders anything itself.

use gridhead_core::{ColumnDefinition, ManagerConfig, key_from_object};
use serde::Serialize;

use crate::command::ReorderCommand;
use crate::resolve::is_moveable;
use crate::transfer::{ColumnTransferPayload, TransferChannel, TransferPayloadError};

/// Result of starting a drag on a column's header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragStartOutcome {
    /// A column-move gesture began and its payload is in the channel.
    ///
    /// `suppress_default_image` tells the host to cancel the native drag
    /// image and stop propagation of per-frame drag events from the text, so
    /// the header cell's own drag handler (resize) does not fire for a move.
    ColumnMove {
        payload: ColumnTransferPayload,
        suppress_default_image: bool,
    },
    /// The column is not moveable; the channel was left untouched.
    NotMoveable,
}

/// Why a drop produced no reorder command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropIgnoredReason {
    /// The drop target cell has no drop binding (e.g. an injected column).
    NotADropTarget,
    /// No payload under the `"Text"` format.
    MissingPayload,
    /// The payload is not a column payload (foreign drag, bad JSON).
    MalformedPayload,
    /// The payload was written by an incompatible schema version.
    UnsupportedSchema { version: u16 },
    /// The payload's index is outside the current column list.
    SourceOutOfRange { index: usize, len: usize },
    /// The column at the payload's index is not the one that was dragged.
    StalePayload { index: usize },
    /// The drop index is outside the current column list.
    TargetOutOfRange { index: usize, len: usize },
}

/// Result of a drop on a header cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    Requested(ReorderCommand),
    Ignored(DropIgnoredReason),
}

impl ReorderOutcome {
    #[must_use]
    pub fn command(self) -> Option<ReorderCommand> {
        match self {
            Self::Requested(command) => Some(command),
            Self::Ignored(_) => None,
        }
    }
}

/// Begin a column-move drag: write `{ key, index }` into `transfer`.
#[must_use]
pub fn begin_column_drag(
    column: &ColumnDefinition,
    index: usize,
    config: &ManagerConfig,
    transfer: &mut TransferChannel,
) -> DragStartOutcome {
    if !is_moveable(column, config) {
        return DragStartOutcome::NotMoveable;
    }

    let payload = ColumnTransferPayload::new(key_from_object(column), index);
    if let Err(error) = transfer.write_column_payload(&payload) {
        tracing::warn!(message = "header.reorder.payload_write_failed", %error);
        return DragStartOutcome::NotMoveable;
    }

    tracing::debug!(
        message = "header.reorder.drag_start",
        key = %payload.key,
        index,
    );
    DragStartOutcome::ColumnMove {
        payload,
        suppress_default_image: true,
    }
}

/// Handle a drop on the cell at `drop_index`.
#[must_use]
pub fn reorder_on_drop(
    drop_index: usize,
    columns: &[ColumnDefinition],
    transfer: &TransferChannel,
) -> ReorderOutcome {
    match validate_drop(drop_index, columns, transfer) {
        Ok(payload) => {
            tracing::debug!(
                message = "header.reorder.requested",
                from = payload.index,
                to = drop_index,
            );
            ReorderOutcome::Requested(ReorderCommand {
                from_index: payload.index,
                to_index: drop_index,
                columns: columns.to_vec(),
            })
        }
        Err(reason) => {
            tracing::debug!(message = "header.reorder.ignored", reason = ?reason);
            ReorderOutcome::Ignored(reason)
        }
    }
}

fn validate_drop(
    drop_index: usize,
    columns: &[ColumnDefinition],
    transfer: &TransferChannel,
) -> Result<ColumnTransferPayload, DropIgnoredReason> {
    let payload = transfer.read_column_payload().map_err(|error| match error {
        TransferPayloadError::Missing => DropIgnoredReason::MissingPayload,
        TransferPayloadError::Malformed(_) => DropIgnoredReason::MalformedPayload,
        TransferPayloadError::UnsupportedSchemaVersion { version, .. } => {
            DropIgnoredReason::UnsupportedSchema { version }
        }
    })?;

    let len = columns.len();
    let Some(source) = columns.get(payload.index) else {
        return Err(DropIgnoredReason::SourceOutOfRange {
            index: payload.index,
            len,
        });
    };
    if key_from_object(source) != payload.key {
        return Err(DropIgnoredReason::StalePayload {
            index: payload.index,
        });
    }
    if drop_index >= len {
        return Err(DropIgnoredReason::TargetOutOfRange {
            index: drop_index,
            len,
        });
    }

    Ok(payload)
}
