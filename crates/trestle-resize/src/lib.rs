//! trestle-resize: interactive column resizing for document tables.
//!
//! This crate provides:
//! - `ResizeController` - binds pointer events to state transitions and commits
//! - `ResizeState`/`ResizeAction` - the per-editor interaction state machine
//! - width model functions - pointer-delta to percentage conversion with clamping
//! - grid writer - atomic, span-aware `colwidth` rewrites
//! - `handle_decorations` - overlay markers derived from the current state
//!
//! The document side (table tree, grid oracle, position mapping,
//! transactions) lives in `trestle-doc`.

pub mod controller;
pub mod decorations;
pub mod options;
pub mod state;
pub mod width;
pub mod writer;

pub use controller::{CellHit, LayoutView, PointerInput, ResizeController};
pub use decorations::{HandleMarker, handle_decorations};
pub use options::ResizeOptions;
pub use state::{DragState, ResizeAction, ResizeState};
pub use width::{current_column_width, drag_offset, dragged_width, stored_column_width};
pub use writer::{WidthCache, commit_column_resize, set_column_width};
