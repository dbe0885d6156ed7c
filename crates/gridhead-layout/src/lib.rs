#![forbid(unsafe_code)]

//! Header layout and gesture engines for gridhead.
//!
//! - [`width`] allocates column widths in percent of the header.
//! - [`resize`] turns pointer samples on a column edge into [`ResizeCommand`]s.
//! - [`reorder`] turns header-text drag-and-drop into [`ReorderCommand`]s.
//! - [`header`] assembles renderer-agnostic cell descriptors and routes their
//!   events to the engines.
//! - [`gesture`] and [`session`] track a drag from start to drop or cancel.
//! - [`store`] is an in-memory [`CommandSink`] applying commands to columns.
//!
//! Nothing here renders; a host maps [`HeaderCellDescriptor`]s to its own
//! widgets and forwards their events back.

pub mod command;
pub mod geometry;
pub mod gesture;
pub mod header;
pub mod reorder;
pub mod resize;
pub mod resolve;
pub mod session;
pub mod store;
pub mod transfer;
pub mod width;

pub use command::{ColumnWidthUpdate, CommandSink, HeaderCommand, ReorderCommand, ResizeCommand};
pub use geometry::{RenderedWidths, ResizeGeometry};
pub use gesture::{
    HeaderCancelReason, HeaderDragEffect, HeaderDragError, HeaderDragEvent, HeaderDragEventKind,
    HeaderDragMachine, HeaderDragNoopReason, HeaderDragState, HeaderDragTransition, HeaderGesture,
};
pub use header::{
    CellBindings, CellStyle, ColumnManager, DragBinding, HeaderAssembler, HeaderCellDescriptor,
    HeaderRow, HeaderText, NoSelection, ResizeHandle, RowKind, SelectionModel,
};
pub use reorder::{
    DragStartOutcome, DropIgnoredReason, ReorderOutcome, begin_column_drag, reorder_on_drop,
};
pub use resize::{ResizeOutcome, ResizeRejection, resize_columns, split_pair};
pub use resolve::{is_moveable, is_resizable};
pub use session::{HeaderSession, SessionStep};
pub use store::ColumnStore;
pub use transfer::{
    COLUMN_TRANSFER_SCHEMA_VERSION, ColumnTransferPayload, TEXT_FORMAT, TransferChannel,
    TransferPayloadError,
};
pub use width::{allocate_widths, compute_width, declared_total};
