//! End-to-end header flows: assemble, drag, drop, apply to the store, and
//! re-assemble from the updated state.

use std::sync::{Arc, Mutex};

use gridhead_core::{
    ColumnDefinition, ColumnKey, DisplayContent, ManagerConfig, Percent, key_from_object,
};
use gridhead_layout::{
    ColumnManager, ColumnStore, DropIgnoredReason, HeaderAssembler, HeaderCellDescriptor,
    HeaderCommand, HeaderGesture, HeaderRow, HeaderSession, NoSelection, ReorderOutcome,
    ResizeGeometry, RowKind, SelectionModel, TransferChannel,
};

fn columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("Name").width(40.0),
        ColumnDefinition::new("Size").width(30.0),
        ColumnDefinition::new("Modified"),
    ]
}

fn moveable_config() -> ManagerConfig {
    ManagerConfig {
        moveable: Some(true),
        ..ManagerConfig::default()
    }
}

fn assemble(config: &ManagerConfig, store: &ColumnStore) -> HeaderRow {
    HeaderAssembler::new(config)
        .expect("valid config")
        .assemble(store.columns(), store.states(), &NoSelection)
}

#[test]
fn resize_drag_updates_store_and_next_layout() {
    let config = ManagerConfig::default();
    let mut store = ColumnStore::new(columns());
    let row = assemble(&config, &store);
    let widths = row.rendered_widths();
    let mut session = HeaderSession::new();

    session.begin_resize(&row, 0).expect("sequence");
    assert_eq!(
        session.active_gesture(),
        Some(HeaderGesture::Resize { column_index: 0 })
    );

    // 500px into a 1000px header: Name 50%, Size 20%.
    let geometry = ResizeGeometry::new(500.0, 0.0, 1000.0, &widths);
    let step = session.drag(&row, 0, &geometry, &mut store).expect("sequence");
    assert!(matches!(step.command, Some(HeaderCommand::Resize(_))));
    session.leave().expect("sequence");

    let row = assemble(&config, &store);
    let cells = row.cells();
    assert_eq!(cells[0].style.width, Percent::new(50.0));
    assert_eq!(cells[1].style.width, Percent::new(20.0));
    assert_eq!(cells[2].style.width, Percent::new(30.0));
}

#[test]
fn move_drag_reorders_store() {
    let config = moveable_config();
    let mut store = ColumnStore::new(columns());
    let row = assemble(&config, &store);
    let mut session = HeaderSession::new();

    session.begin_move(&row, 0).expect("sequence");
    let step = session.drop(&row, 2, &mut store).expect("sequence");
    assert!(matches!(step.command, Some(HeaderCommand::Reorder(_))));

    let names: Vec<_> = store.columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Size", "Modified", "Name"]);
}

#[test]
fn drop_without_payload_dispatches_nothing() {
    let config = moveable_config();
    let store = ColumnStore::new(columns());
    let row = assemble(&config, &store);
    let mut sink: Vec<HeaderCommand> = Vec::new();

    assert_eq!(
        row.drop(1, &TransferChannel::new(), &mut sink),
        ReorderOutcome::Ignored(DropIgnoredReason::MissingPayload)
    );
    assert!(sink.is_empty());
}

#[test]
fn leaving_mid_move_keeps_order() {
    let config = moveable_config();
    let mut store = ColumnStore::new(columns());
    let row = assemble(&config, &store);
    let mut session = HeaderSession::new();

    session.begin_move(&row, 1).expect("sequence");
    session.leave().expect("sequence");
    // A late drop after leaving finds an idle session and an empty channel.
    let step = session.drop(&row, 0, &mut store).expect("sequence");
    assert!(step.command.is_none());
    assert_eq!(store.columns(), columns().as_slice());
}

struct MarkSelected(usize);

impl SelectionModel for MarkSelected {
    fn update_cells(
        &self,
        cells: &mut Vec<HeaderCellDescriptor>,
        _columns: &[ColumnDefinition],
        kind: RowKind,
    ) {
        if kind != RowKind::Header {
            return;
        }
        if let Some(cell) = cells.get_mut(self.0) {
            cell.attributes.insert("aria-selected".into(), "true".into());
        }
    }
}

struct WithActions {
    config: ManagerConfig,
    calls: Mutex<Vec<RowKind>>,
}

impl ColumnManager for WithActions {
    fn config(&self) -> &ManagerConfig {
        &self.config
    }

    fn add_action_column(&self, cells: &mut Vec<HeaderCellDescriptor>, kind: RowKind) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(kind);
        }
        cells.push(HeaderCellDescriptor::synthetic(
            ColumnKey::new("actions"),
            DisplayContent::Text(String::new()),
            Percent::new(5.0),
        ));
    }
}

#[test]
fn collaborators_run_after_cells_are_built() {
    let manager = WithActions {
        config: ManagerConfig::default(),
        calls: Mutex::new(Vec::new()),
    };
    let cols = columns();
    let row = HeaderAssembler::new(&manager)
        .expect("valid config")
        .assemble(&cols, &Default::default(), &MarkSelected(1));

    assert_eq!(row.cells().len(), 4);
    assert_eq!(
        row.cells()[1].attributes.get("aria-selected").map(String::as_str),
        Some("true")
    );
    assert_eq!(*manager.calls.lock().expect("calls lock"), vec![RowKind::Header]);

    // The injected cell carries no bindings, so dispatch ignores it.
    let mut sink: Vec<HeaderCommand> = Vec::new();
    assert_eq!(
        row.drop(3, &TransferChannel::new(), &mut sink),
        ReorderOutcome::Ignored(DropIgnoredReason::NotADropTarget)
    );
    assert!(!row.click(3));
}

#[test]
fn header_text_uses_renderer_output() {
    let seen = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&seen);
    let cols = vec![
        ColumnDefinition::new("Name")
            .renderer(|column| DisplayContent::Markup(format!("<b>{}</b>", column.name))),
        ColumnDefinition::new("Size").on_click(move |column| {
            if let Ok(mut slot) = captured.lock() {
                *slot = Some(key_from_object(column));
            }
        }),
    ];
    let config = ManagerConfig::default();
    let row = HeaderAssembler::new(&config)
        .expect("valid config")
        .assemble(&cols, &Default::default(), &NoSelection);

    assert_eq!(
        row.cells()[0].text.content,
        DisplayContent::Markup("<b>Name</b>".into())
    );
    assert_eq!(
        row.cells()[1].text.content,
        DisplayContent::Text("Size".into())
    );
    assert!(row.click(1));
    assert_eq!(
        *seen.lock().expect("seen lock"),
        Some(key_from_object(&cols[1]))
    );
}
