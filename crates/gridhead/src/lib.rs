#![forbid(unsafe_code)]

//! gridhead public facade crate.
//!
//! Re-exports the column model from `gridhead-core` and the layout and
//! gesture engines from `gridhead-layout`, and adds [`HeaderGrid`]: one
//! header's configuration, column store and gesture session wired together.

// --- Core re-exports -------------------------------------------------------

pub use gridhead_core::{
    ClickHandler, ColumnDefinition, ColumnKey, ColumnRenderer, ColumnState, ColumnStateMap,
    DEFAULT_CLASS_PREFIX, DisplayContent, GridError, ManagerConfig, Percent, key_from_object,
    key_generator,
};

// --- Layout re-exports -----------------------------------------------------

pub use gridhead_layout::{
    ColumnStore, CommandSink, DragStartOutcome, DropIgnoredReason, HeaderAssembler,
    HeaderCellDescriptor, HeaderCommand, HeaderDragError, HeaderDragMachine, HeaderGesture,
    HeaderRow, HeaderSession, NoSelection, RenderedWidths, ReorderCommand, ReorderOutcome,
    ResizeCommand, ResizeGeometry, ResizeOutcome, ResizeRejection, RowKind, SelectionModel,
    SessionStep, TransferChannel, TransferPayloadError,
};

pub use gridhead_core as core;
pub use gridhead_layout as layout;

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Gesture(#[from] HeaderDragError),
    #[error(transparent)]
    Transfer(#[from] TransferPayloadError),
}

/// Standard result type for gridhead APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Grid facade ----------------------------------------------------------

/// A header bound to its column store.
///
/// Every command the header produces is applied to the store immediately and
/// the row is re-assembled, so [`row`](Self::row) always reflects the latest
/// column order and widths.
#[derive(Debug)]
pub struct HeaderGrid {
    config: ManagerConfig,
    store: ColumnStore,
    session: HeaderSession,
    row: HeaderRow,
}

impl HeaderGrid {
    /// Validate `config` and assemble the initial row.
    pub fn new(config: ManagerConfig, columns: Vec<ColumnDefinition>) -> Result<Self> {
        let store = ColumnStore::new(columns);
        let row = HeaderAssembler::new(&config)?.assemble(
            store.columns(),
            store.states(),
            &NoSelection,
        );
        Ok(Self {
            config,
            store,
            session: HeaderSession::new(),
            row,
        })
    }

    /// Start from previously persisted width overrides.
    pub fn with_states(
        config: ManagerConfig,
        columns: Vec<ColumnDefinition>,
        states: ColumnStateMap,
    ) -> Result<Self> {
        let mut grid = Self::new(config, columns)?;
        grid.store = grid.store.with_states(states);
        grid.refresh()?;
        Ok(grid)
    }

    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    #[must_use]
    pub fn row(&self) -> &HeaderRow {
        &self.row
    }

    #[must_use]
    pub fn store(&self) -> &ColumnStore {
        &self.store
    }

    #[must_use]
    pub fn session(&self) -> &HeaderSession {
        &self.session
    }

    /// Re-assemble the row from the store.
    pub fn refresh(&mut self) -> Result<()> {
        self.refresh_with(&NoSelection)
    }

    /// Re-assemble with a selection model.
    pub fn refresh_with(&mut self, selection: &dyn SelectionModel) -> Result<()> {
        self.row = HeaderAssembler::new(&self.config)?.assemble(
            self.store.columns(),
            self.store.states(),
            selection,
        );
        Ok(())
    }

    pub fn click(&self, cell_index: usize) -> bool {
        self.row.click(cell_index)
    }

    pub fn begin_move(&mut self, cell_index: usize) -> Result<SessionStep> {
        Ok(self.session.begin_move(&self.row, cell_index)?)
    }

    pub fn begin_resize(&mut self, cell_index: usize) -> Result<SessionStep> {
        Ok(self.session.begin_resize(&self.row, cell_index)?)
    }

    /// One pointer sample. Widths are read from the current row.
    pub fn drag(
        &mut self,
        cell_index: usize,
        cursor_x: f64,
        column_left_x: f64,
        header_width_px: f64,
    ) -> Result<SessionStep> {
        let widths = self.row.rendered_widths();
        let geometry = ResizeGeometry::new(cursor_x, column_left_x, header_width_px, &widths);
        let step = self
            .session
            .drag(&self.row, cell_index, &geometry, &mut self.store)?;
        if step.command.is_some() {
            self.refresh()?;
        }
        Ok(step)
    }

    pub fn drop(&mut self, cell_index: usize) -> Result<SessionStep> {
        let step = self.session.drop(&self.row, cell_index, &mut self.store)?;
        if step.command.is_some() {
            self.refresh()?;
        }
        Ok(step)
    }

    pub fn leave(&mut self) -> Result<SessionStep> {
        Ok(self.session.leave()?)
    }

    pub fn cancel(&mut self) -> Result<SessionStep> {
        Ok(self.session.cancel()?)
    }

    /// Remove a column and its persisted width, then re-assemble.
    pub fn remove_column(&mut self, key: &ColumnKey) -> Result<Option<ColumnDefinition>> {
        let removed = self.store.remove_column(key);
        if removed.is_some() {
            tracing::debug!(message = "header_grid.column_removed", key = %key);
            self.refresh()?;
        }
        Ok(removed)
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ColumnDefinition, ColumnKey, ColumnStateMap, DisplayContent, Error, HeaderCellDescriptor,
        HeaderCommand, HeaderGrid, HeaderRow, ManagerConfig, Percent, Result,
    };

    pub use crate::{core, layout};
}
