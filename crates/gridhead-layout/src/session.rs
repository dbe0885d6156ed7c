//! One header's gesture session: the lifecycle machine, the transfer channel
//! and sequence numbering, driven by a renderer's raw callbacks.

use crate::command::{CommandSink, HeaderCommand};
use crate::geometry::ResizeGeometry;
use crate::gesture::{
    HeaderCancelReason, HeaderDragError, HeaderDragEvent, HeaderDragEventKind, HeaderDragMachine,
    HeaderDragTransition, HeaderGesture,
};
use crate::header::{HeaderCellDescriptor, HeaderRow};
use crate::reorder::{DragStartOutcome, ReorderOutcome};
use crate::resize::ResizeOutcome;
use crate::transfer::TransferChannel;

/// What one session call did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStep {
    /// Lifecycle transition, if the call reached the machine.
    pub transition: Option<HeaderDragTransition>,
    /// Command dispatched to the sink during this call.
    pub command: Option<HeaderCommand>,
}

#[derive(Debug, Clone, Default)]
pub struct HeaderSession {
    machine: HeaderDragMachine,
    transfer: TransferChannel,
    sequence: u64,
}

impl HeaderSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn machine(&self) -> &HeaderDragMachine {
        &self.machine
    }

    #[must_use]
    pub fn transfer(&self) -> &TransferChannel {
        &self.transfer
    }

    #[must_use]
    pub fn active_gesture(&self) -> Option<HeaderGesture> {
        self.machine.state().gesture()
    }

    /// Drag-start on a cell's header text. Cells whose column is not
    /// moveable leave the session untouched.
    pub fn begin_move(
        &mut self,
        row: &HeaderRow,
        cell_index: usize,
    ) -> Result<SessionStep, HeaderDragError> {
        let mut transfer = TransferChannel::new();
        let DragStartOutcome::ColumnMove { payload, .. } = row.drag_start(cell_index, &mut transfer)
        else {
            return Ok(SessionStep::default());
        };
        self.transfer = transfer;
        let transition = self.apply(HeaderDragEventKind::DragStart {
            gesture: HeaderGesture::Move {
                source_index: payload.index,
            },
        })?;
        Ok(SessionStep {
            transition: Some(transition),
            command: None,
        })
    }

    /// Drag-start on a cell's resize handle. Cells without a handle leave the
    /// session untouched.
    pub fn begin_resize(
        &mut self,
        row: &HeaderRow,
        cell_index: usize,
    ) -> Result<SessionStep, HeaderDragError> {
        let has_handle = row
            .cells()
            .get(cell_index)
            .is_some_and(HeaderCellDescriptor::is_resizable);
        if !has_handle {
            return Ok(SessionStep::default());
        }
        self.transfer.clear();
        let transition = self.apply(HeaderDragEventKind::DragStart {
            gesture: HeaderGesture::Resize {
                column_index: cell_index,
            },
        })?;
        Ok(SessionStep {
            transition: Some(transition),
            command: None,
        })
    }

    /// One drag sample over `cell_index`. During a resize gesture the sample
    /// is fed to the resize engine; move gestures only record it.
    pub fn drag(
        &mut self,
        row: &HeaderRow,
        cell_index: usize,
        geometry: &ResizeGeometry<'_>,
        sink: &mut dyn CommandSink,
    ) -> Result<SessionStep, HeaderDragError> {
        let transition = self.apply(HeaderDragEventKind::DragMove { cell_index })?;
        let command = match transition.to.gesture() {
            Some(HeaderGesture::Resize { column_index }) => {
                match row.drag(column_index, geometry, sink) {
                    ResizeOutcome::Resized(command) => Some(HeaderCommand::Resize(command)),
                    ResizeOutcome::Rejected(_) => None,
                }
            }
            _ => None,
        };
        Ok(SessionStep {
            transition: Some(transition),
            command,
        })
    }

    /// Drop on `cell_index`. Ends the gesture; a move gesture requests a
    /// reorder when the channel still holds its payload.
    pub fn drop(
        &mut self,
        row: &HeaderRow,
        cell_index: usize,
        sink: &mut dyn CommandSink,
    ) -> Result<SessionStep, HeaderDragError> {
        let gesture = self.active_gesture();
        let transition = self.apply(HeaderDragEventKind::Drop {
            target_index: cell_index,
        })?;
        let command = match gesture {
            Some(HeaderGesture::Move { .. }) => match row.drop(cell_index, &self.transfer, sink) {
                ReorderOutcome::Requested(command) => Some(HeaderCommand::Reorder(command)),
                ReorderOutcome::Ignored(_) => None,
            },
            _ => None,
        };
        self.transfer.clear();
        Ok(SessionStep {
            transition: Some(transition),
            command,
        })
    }

    /// Pointer left the header without dropping.
    pub fn leave(&mut self) -> Result<SessionStep, HeaderDragError> {
        let transition = self.apply(HeaderDragEventKind::DragLeave)?;
        self.transfer.clear();
        Ok(SessionStep {
            transition: Some(transition),
            command: None,
        })
    }

    /// Host-initiated cancel.
    pub fn cancel(&mut self) -> Result<SessionStep, HeaderDragError> {
        let transition = self.apply(HeaderDragEventKind::Cancel {
            reason: HeaderCancelReason::Programmatic,
        })?;
        self.transfer.clear();
        Ok(SessionStep {
            transition: Some(transition),
            command: None,
        })
    }

    fn apply(
        &mut self,
        kind: HeaderDragEventKind,
    ) -> Result<HeaderDragTransition, HeaderDragError> {
        self.sequence = self.sequence.saturating_add(1);
        self.machine
            .apply_event(&HeaderDragEvent::new(self.sequence, kind))
    }
}
