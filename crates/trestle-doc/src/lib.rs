//! trestle-doc: document-model collaborators for table column resizing.
//!
//! This crate provides:
//! - `TableNode`/`CellAttrs` - the table subtree and its persisted cell attributes
//! - `TableGrid` - span-aware two-dimensional index over a table's cells
//! - `StepMap`/`Mapping` - position remapping across document edits
//! - `Transaction`/`Document` - atomic batched attribute writes

pub mod document;
pub mod error;
pub mod grid;
pub mod map;
pub mod node;
pub mod transaction;

pub use document::Document;
pub use error::DocError;
pub use grid::{CellRect, TableGrid};
pub use map::{Assoc, MapResult, Mapping, StepMap};
pub use node::{CellAttrs, TableCell, TableNode, TableRow};
pub use transaction::{Step, Transaction};
