//! In-memory column store.
//!
//! Holds the column order and the persisted width overrides, and applies
//! header commands to them synchronously.

use gridhead_core::{ColumnDefinition, ColumnKey, ColumnStateMap, key_from_object};

use crate::command::{CommandSink, HeaderCommand, ReorderCommand, ResizeCommand};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStore {
    columns: Vec<ColumnDefinition>,
    states: ColumnStateMap,
}

impl ColumnStore {
    #[must_use]
    pub fn new(columns: Vec<ColumnDefinition>) -> Self {
        Self {
            columns,
            states: ColumnStateMap::new(),
        }
    }

    #[must_use]
    pub fn with_states(mut self, states: ColumnStateMap) -> Self {
        self.states = states;
        self
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    #[must_use]
    pub fn states(&self) -> &ColumnStateMap {
        &self.states
    }

    /// Remove a column and its persisted width.
    pub fn remove_column(&mut self, key: &ColumnKey) -> Option<ColumnDefinition> {
        let position = self
            .columns
            .iter()
            .position(|column| key_from_object(column) == *key)?;
        self.states.remove(key);
        Some(self.columns.remove(position))
    }

    fn apply_resize(&mut self, command: ResizeCommand) {
        tracing::trace!(
            message = "column_store.apply",
            command = "resize",
            dragged = %command.dragged.key,
            next = %command.next.key,
        );
        self.states
            .set_width(command.dragged.key, command.dragged.width);
        self.states.set_width(command.next.key, command.next.width);
    }

    fn apply_reorder(&mut self, command: ReorderCommand) {
        let len = self.columns.len();
        if command.from_index >= len || command.to_index >= len {
            tracing::warn!(
                message = "column_store.apply.out_of_range",
                from = command.from_index,
                to = command.to_index,
                len,
            );
            return;
        }
        tracing::debug!(
            message = "column_store.apply",
            command = "reorder",
            from = command.from_index,
            to = command.to_index,
        );
        let column = self.columns.remove(command.from_index);
        self.columns.insert(command.to_index, column);
    }
}

impl CommandSink for ColumnStore {
    fn dispatch(&mut self, command: HeaderCommand) {
        match command {
            HeaderCommand::Resize(command) => self.apply_resize(command),
            HeaderCommand::Reorder(command) => self.apply_reorder(command),
        }
    }
}
