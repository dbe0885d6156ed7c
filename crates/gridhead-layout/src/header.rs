//! Header row assembly.
//!
//! [`HeaderAssembler`] turns column definitions, the manager configuration
//! and the column state map into one [`HeaderCellDescriptor`] per column.
//! Descriptors are plain data: any renderer can draw them, and the returned
//! [`HeaderRow`] routes the renderer's click, drag, drag-start and drop
//! callbacks to the gesture engines.
//!
//! After all cells are built the list is handed to the selection model and
//! then to the column manager's action-column hook. What they do to the list
//! is opaque; cells they add carry no bindings and are ignored by dispatch.

use std::collections::BTreeMap;

use gridhead_core::{
    ClickHandler, ColumnDefinition, ColumnKey, ColumnStateMap, DisplayContent, GridError,
    ManagerConfig, Percent, key_from_object,
};
use rustc_hash::FxHashSet;

use crate::command::{CommandSink, HeaderCommand};
use crate::geometry::{RenderedWidths, ResizeGeometry};
use crate::reorder::{
    DragStartOutcome, DropIgnoredReason, ReorderOutcome, begin_column_drag, reorder_on_drop,
};
use crate::resize::{ResizeOutcome, ResizeRejection, resize_columns};
use crate::resolve::{is_moveable, is_resizable};
use crate::transfer::TransferChannel;
use crate::width::compute_width;

/// Class applied to the header row.
pub const HEADER_CLASS: &str = "header";
/// Class marking a resizable cell.
pub const RESIZABLE_CLASS: &str = "resizable";
/// Class marking draggable header text.
pub const DRAGGABLE_COLUMN_CLASS: &str = "draggable-column";
/// Class of the resize handle affordance.
pub const RESIZE_HANDLE_CLASS: &str = "drag-handle";

/// Which kind of row cells are being built for. The assembler only builds
/// header rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RowKind {
    Header,
}

/// Selection-model collaborator: marks or annotates cells in place.
pub trait SelectionModel {
    fn update_cells(
        &self,
        cells: &mut Vec<HeaderCellDescriptor>,
        columns: &[ColumnDefinition],
        kind: RowKind,
    );
}

/// Selection model that leaves cells untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelection;

impl SelectionModel for NoSelection {
    fn update_cells(&self, _: &mut Vec<HeaderCellDescriptor>, _: &[ColumnDefinition], _: RowKind) {}
}

/// Column-manager collaborator: owns the configuration and may append a
/// synthetic trailing column.
pub trait ColumnManager {
    fn config(&self) -> &ManagerConfig;

    fn add_action_column(&self, _cells: &mut Vec<HeaderCellDescriptor>, _kind: RowKind) {}
}

/// A bare configuration is a manager without an action column.
impl ColumnManager for ManagerConfig {
    fn config(&self) -> &ManagerConfig {
        self
    }
}

/// Inline style of a header cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub width: Percent,
}

/// Header text span.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderText {
    pub content: DisplayContent,
    /// Whether the span starts a column-move drag.
    pub draggable: bool,
    pub class_name: Option<String>,
}

/// Resize affordance rendered at a cell's right edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeHandle {
    pub class_name: String,
}

/// The pair a resize drag on this cell redistributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragBinding {
    pub key: ColumnKey,
    pub next_key: ColumnKey,
}

/// Event wiring for one cell. `None` means the event is not bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellBindings {
    /// Index of the source column; `None` for injected cells.
    pub column_index: Option<usize>,
    pub click: Option<ClickHandler>,
    pub drag: Option<DragBinding>,
    /// Drop target index.
    pub drop: Option<usize>,
    /// Source index written into the payload on drag-start.
    pub drag_start: Option<usize>,
}

/// Renderer-agnostic description of one header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCellDescriptor {
    pub key: ColumnKey,
    pub class_names: Vec<String>,
    pub style: CellStyle,
    pub text: HeaderText,
    pub resize_handle: Option<ResizeHandle>,
    pub bindings: CellBindings,
    /// Free-form annotations for collaborators (selection markers etc.).
    pub attributes: BTreeMap<String, String>,
}

impl HeaderCellDescriptor {
    /// A cell with no bindings, for collaborators that inject columns.
    #[must_use]
    pub fn synthetic(key: ColumnKey, content: DisplayContent, width: Percent) -> Self {
        Self {
            key,
            class_names: Vec::new(),
            style: CellStyle { width },
            text: HeaderText {
                content,
                draggable: false,
                class_name: None,
            },
            resize_handle: None,
            bindings: CellBindings::default(),
            attributes: BTreeMap::new(),
        }
    }

    /// Space-separated class attribute.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.class_names.join(" ")
    }

    /// Whether the cell carries a resize drag binding.
    #[must_use]
    pub fn is_resizable(&self) -> bool {
        self.bindings.drag.is_some()
    }
}

/// Builds header rows for one grid.
#[derive(Debug)]
pub struct HeaderAssembler<'m, M: ColumnManager + ?Sized> {
    manager: &'m M,
}

impl<'m, M: ColumnManager + ?Sized> HeaderAssembler<'m, M> {
    /// Validate the manager's configuration up front; gestures never fail on
    /// configuration afterwards.
    pub fn new(manager: &'m M) -> Result<Self, GridError> {
        let problems = manager.config().validate();
        if !problems.is_empty() {
            return Err(GridError::InvalidConfiguration { problems });
        }
        Ok(Self { manager })
    }

    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        self.manager.config()
    }

    /// Build the header row for `columns`.
    #[must_use]
    pub fn assemble(
        &self,
        columns: &[ColumnDefinition],
        states: &ColumnStateMap,
        selection: &dyn SelectionModel,
    ) -> HeaderRow {
        let _span = tracing::debug_span!("header.assemble", columns = columns.len()).entered();
        let config = self.manager.config();

        let keys: Vec<ColumnKey> = columns.iter().map(key_from_object).collect();
        let mut seen = FxHashSet::default();
        for key in &keys {
            if !seen.insert(key) {
                tracing::warn!(message = "header.assemble.duplicate_key", key = %key);
            }
        }

        let mut cells: Vec<HeaderCellDescriptor> = columns
            .iter()
            .enumerate()
            .map(|(index, column)| build_cell(config, columns, &keys, states, index, column))
            .collect();

        selection.update_cells(&mut cells, columns, RowKind::Header);
        self.manager.add_action_column(&mut cells, RowKind::Header);

        tracing::debug!(message = "header.assemble", cells = cells.len());
        HeaderRow {
            class_name: config.prefixed(HEADER_CLASS),
            cells,
            columns: columns.to_vec(),
            config: config.clone(),
        }
    }
}

fn build_cell(
    config: &ManagerConfig,
    columns: &[ColumnDefinition],
    keys: &[ColumnKey],
    states: &ColumnStateMap,
    index: usize,
    column: &ColumnDefinition,
) -> HeaderCellDescriptor {
    let key = keys[index].clone();
    let resizable = is_resizable(column, config);
    let moveable = is_moveable(column, config);
    let next_key = keys.get(index + 1);

    let mut class_names = Vec::with_capacity(2);
    if !column.class_name.is_empty() {
        class_names.push(column.class_name.clone());
    }
    if resizable {
        class_names.push(config.prefixed(RESIZABLE_CLASS));
    }

    // The last column has no neighbour to trade width with, so it gets no
    // handle even when resizable.
    let drag = match next_key {
        Some(next_key) if resizable => Some(DragBinding {
            key: key.clone(),
            next_key: next_key.clone(),
        }),
        _ => None,
    };
    let resize_handle = drag.as_ref().map(|_| ResizeHandle {
        class_name: config.prefixed(RESIZE_HANDLE_CLASS),
    });

    let width = compute_width(
        column,
        states,
        &key,
        columns,
        config.default_column_width,
        index,
    );

    HeaderCellDescriptor {
        key,
        class_names,
        style: CellStyle { width },
        text: HeaderText {
            content: column.display_content(),
            draggable: moveable,
            class_name: moveable.then(|| config.prefixed(DRAGGABLE_COLUMN_CLASS)),
        },
        resize_handle,
        bindings: CellBindings {
            column_index: Some(index),
            click: column.on_click.clone(),
            drag,
            drop: Some(index),
            drag_start: moveable.then_some(index),
        },
        attributes: BTreeMap::new(),
    }
}

/// An assembled header row and the dispatch entry points for its cells.
///
/// All dispatch methods take the index of a cell in [`cells`](Self::cells)
/// (which may differ from the column index once collaborators have added
/// cells).
#[derive(Debug, Clone)]
pub struct HeaderRow {
    class_name: String,
    cells: Vec<HeaderCellDescriptor>,
    columns: Vec<ColumnDefinition>,
    config: ManagerConfig,
}

impl HeaderRow {
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[must_use]
    pub fn cells(&self) -> &[HeaderCellDescriptor] {
        &self.cells
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Widths as assembled, for feeding the next resize sample.
    #[must_use]
    pub fn rendered_widths(&self) -> RenderedWidths {
        self.cells
            .iter()
            .map(|cell| (cell.key.clone(), cell.style.width))
            .collect()
    }

    /// Run the column's click handler. Returns whether one was bound.
    pub fn click(&self, cell_index: usize) -> bool {
        let Some(cell) = self.cells.get(cell_index) else {
            return false;
        };
        match (&cell.bindings.click, cell.bindings.column_index) {
            (Some(handler), Some(column_index)) => match self.columns.get(column_index) {
                Some(column) => {
                    handler.call(column);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Feed one resize sample for the cell; dispatches the command on success.
    pub fn drag(
        &self,
        cell_index: usize,
        geometry: &ResizeGeometry<'_>,
        sink: &mut dyn CommandSink,
    ) -> ResizeOutcome {
        let Some(binding) = self
            .cells
            .get(cell_index)
            .and_then(|cell| cell.bindings.drag.as_ref())
        else {
            return ResizeOutcome::Rejected(ResizeRejection::NotResizable);
        };

        let outcome = resize_columns(&binding.key, &binding.next_key, &self.config, geometry);
        if let ResizeOutcome::Resized(command) = &outcome {
            sink.dispatch(HeaderCommand::Resize(command.clone()));
        }
        outcome
    }

    /// Start a column-move drag from the cell's header text.
    pub fn drag_start(
        &self,
        cell_index: usize,
        transfer: &mut TransferChannel,
    ) -> DragStartOutcome {
        let Some(index) = self
            .cells
            .get(cell_index)
            .and_then(|cell| cell.bindings.drag_start)
        else {
            return DragStartOutcome::NotMoveable;
        };
        match self.columns.get(index) {
            Some(column) => begin_column_drag(column, index, &self.config, transfer),
            None => DragStartOutcome::NotMoveable,
        }
    }

    /// Handle a drop on the cell; dispatches a reorder command when the
    /// channel holds a valid column payload.
    pub fn drop(
        &self,
        cell_index: usize,
        transfer: &TransferChannel,
        sink: &mut dyn CommandSink,
    ) -> ReorderOutcome {
        let Some(index) = self
            .cells
            .get(cell_index)
            .and_then(|cell| cell.bindings.drop)
        else {
            return ReorderOutcome::Ignored(DropIgnoredReason::NotADropTarget);
        };

        let outcome = reorder_on_drop(index, &self.columns, transfer);
        if let ReorderOutcome::Requested(command) = &outcome {
            sink.dispatch(HeaderCommand::Reorder(command.clone()));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ManagerConfig {
        ManagerConfig {
            default_column_width: Percent::new(20.0),
            ..ManagerConfig::default()
        }
    }

    fn columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("A").width(40.0).class_name("name-col"),
            ColumnDefinition::new("B").width(30.0).resizable(false),
            ColumnDefinition::new("C"),
        ]
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let bad = ManagerConfig {
            min_column_width: Percent::new(0.0),
            ..ManagerConfig::default()
        };
        assert!(matches!(
            HeaderAssembler::new(&bad),
            Err(GridError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn cells_carry_classes_widths_and_bindings() {
        let config = config();
        let assembler = HeaderAssembler::new(&config).unwrap();
        let cols = columns();
        let row = assembler.assemble(&cols, &ColumnStateMap::new(), &NoSelection);

        assert_eq!(row.class_name(), "gridhead-header");
        let cells = row.cells();
        assert_eq!(cells.len(), 3);

        assert_eq!(cells[0].class_attr(), "name-col gridhead-resizable");
        assert_eq!(cells[0].style.width, Percent::new(40.0));
        assert_eq!(
            cells[0].bindings.drag,
            Some(DragBinding {
                key: key_from_object(&cols[0]),
                next_key: key_from_object(&cols[1]),
            })
        );
        assert!(cells[0].resize_handle.is_some());
        assert!(cells[0].is_resizable());

        assert_eq!(cells[1].class_attr(), "");
        assert!(cells[1].bindings.drag.is_none());
        assert!(!cells[1].is_resizable());
        assert!(cells[1].resize_handle.is_none());

        // Last column: resizable class, but no neighbour, so no handle.
        assert_eq!(cells[2].class_attr(), "gridhead-resizable");
        assert!(!cells[2].is_resizable());
        assert_eq!(cells[2].style.width, Percent::new(30.0));
        assert_eq!(cells[2].bindings.drop, Some(2));
    }

    #[test]
    fn moveable_text_gets_draggable_class() {
        let config = ManagerConfig {
            moveable: Some(true),
            ..config()
        };
        let assembler = HeaderAssembler::new(&config).unwrap();
        let row = assembler.assemble(&columns(), &ColumnStateMap::new(), &NoSelection);
        let text = &row.cells()[0].text;
        assert!(text.draggable);
        assert_eq!(text.class_name.as_deref(), Some("gridhead-draggable-column"));
        assert_eq!(row.cells()[0].bindings.drag_start, Some(0));
    }

    #[test]
    fn click_delegates_to_column_handler() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let clicked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&clicked);
        let cols = vec![
            ColumnDefinition::new("A").on_click(move |_| flag.store(true, Ordering::SeqCst)),
            ColumnDefinition::new("B"),
        ];
        let config = config();
        let row = HeaderAssembler::new(&config)
            .unwrap()
            .assemble(&cols, &ColumnStateMap::new(), &NoSelection);

        assert!(!row.click(1));
        assert!(row.click(0));
        assert!(clicked.load(Ordering::SeqCst));
        assert!(!row.click(9));
    }

    #[test]
    fn rendered_widths_mirror_cell_styles() {
        let config = config();
        let cols = columns();
        let row = HeaderAssembler::new(&config)
            .unwrap()
            .assemble(&cols, &ColumnStateMap::new(), &NoSelection);
        let widths = row.rendered_widths();
        assert_eq!(widths.get(&key_from_object(&cols[1])), Some(Percent::new(30.0)));
    }
}
