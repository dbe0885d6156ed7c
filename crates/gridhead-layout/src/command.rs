//! Commands emitted to the external store.

use gridhead_core::{ColumnDefinition, ColumnKey, Percent};
use serde::{Deserialize, Serialize};

/// New width for one column of a resized pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnWidthUpdate {
    pub key: ColumnKey,
    pub width: Percent,
}

/// Redistribute width between a dragged column and its right neighbour.
///
/// `dragged.width + next.width` equals the pair's combined width before the
/// gesture started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeCommand {
    pub dragged: ColumnWidthUpdate,
    pub next: ColumnWidthUpdate,
}

impl ResizeCommand {
    /// Combined width of the pair after the resize.
    #[must_use]
    pub fn combined_width(&self) -> f64 {
        self.dragged.width.get() + self.next.width.get()
    }
}

/// Request to move the column at `from_index` to `to_index`.
///
/// `columns` is the column list the indices refer to. The engine never
/// reorders anything itself; the store applies and persists the move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderCommand {
    pub from_index: usize,
    pub to_index: usize,
    pub columns: Vec<ColumnDefinition>,
}

/// Everything the header can ask the store to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HeaderCommand {
    Resize(ResizeCommand),
    Reorder(ReorderCommand),
}

/// Receiver of header commands.
///
/// Implementations must apply each command completely before the next layout
/// pass reads the column state map.
pub trait CommandSink {
    fn dispatch(&mut self, command: HeaderCommand);
}

/// Collects commands in dispatch order.
impl CommandSink for Vec<HeaderCommand> {
    fn dispatch(&mut self, command: HeaderCommand) {
        self.push(command);
    }
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn dispatch(&mut self, command: HeaderCommand) {
        (**self).dispatch(command);
    }
}
