#![forbid(unsafe_code)]

//! Core data model for the gridhead column header engine.
//!
//! # Role in gridhead
//! `gridhead-core` owns the values every layout pass is built from:
//!
//! - **[`ColumnDefinition`]**: one column as declared by the grid author.
//! - **[`ManagerConfig`]**: grid-wide defaults (resizability, moveability,
//!   minimum and default widths), loadable from TOML or JSON.
//! - **[`ColumnKey`]**: the stable identifier derived from a column's
//!   `(name, value)` identity.
//! - **[`ColumnStateMap`]**: persisted width overrides produced by resize
//!   gestures and owned by the external store.
//!
//! The interaction engines live in `gridhead-layout`; nothing in this crate
//! holds gesture state.

pub mod column;
pub mod config;
pub mod error;
pub mod key;
pub mod percent;
pub mod state;

pub use column::{ClickHandler, ColumnDefinition, ColumnRenderer, DisplayContent};
pub use config::{DEFAULT_CLASS_PREFIX, ManagerConfig};
pub use error::GridError;
pub use key::{ColumnKey, key_from_object, key_generator};
pub use percent::Percent;
pub use state::{ColumnState, ColumnStateMap};
