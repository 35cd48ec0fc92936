//! The resize interaction state machine.
//!
//! One `ResizeState` lives per editor instance, alongside (not inside) the
//! document's own state. Every transition produces a fresh snapshot; the
//! previous one is never mutated, so the state can travel with transaction
//! history the same way the rest of the editor state does.

use trestle_doc::{Assoc, Document, Mapping};

/// An in-progress drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Pointer X at drag start, in pixels.
    pub start_x: f64,
    /// The dragged column's width at drag start, in percent.
    pub start_width: f64,
    /// The table's rendered pixel width at drag start.
    pub table_width: f64,
    /// Signed percentage offset accumulated so far.
    pub offset: f64,
}

/// Snapshot of the resize interaction.
///
/// `active_handle` is the position of the cell immediately left of the
/// hovered boundary. Invariant: `dragging` is only present while
/// `active_handle` is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeState {
    pub active_handle: Option<usize>,
    pub dragging: Option<DragState>,
}

/// Named transitions of the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeAction {
    /// Pointer crossed in or out of a boundary zone.
    SetHandle(Option<usize>),
    /// A drag started (`Some`) or ended (`None`).
    SetDragging(Option<DragState>),
    /// Live pointer feedback during a drag; replaces only the offset.
    SetDraggingOffset(f64),
}

impl ResizeState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Produce the next snapshot for an explicit action.
    pub fn apply(&self, action: &ResizeAction) -> Self {
        match *action {
            ResizeAction::SetHandle(pos) => Self {
                active_handle: pos,
                dragging: None,
            },
            ResizeAction::SetDragging(drag) => {
                debug_assert!(
                    drag.is_none() || self.active_handle.is_some(),
                    "dragging requires an active handle"
                );
                Self {
                    active_handle: self.active_handle,
                    dragging: drag,
                }
            }
            ResizeAction::SetDraggingOffset(offset) => match self.dragging {
                Some(drag) => Self {
                    active_handle: self.active_handle,
                    dragging: Some(DragState { offset, ..drag }),
                },
                None => {
                    tracing::warn!(
                        target: "trestle::resize",
                        "offset update without an active drag"
                    );
                    *self
                }
            },
        }
    }

    /// Produce the next snapshot after a document edit.
    ///
    /// The handle is remapped with a bias toward deletion; if its position
    /// was deleted or no longer points at a cell, the whole state resets to
    /// idle. An invalidated handle also abandons any drag in progress, so
    /// the `dragging`-implies-handle invariant holds across edits.
    pub fn map_through(&self, mapping: &Mapping, doc: &Document) -> Self {
        let Some(handle) = self.active_handle else {
            return *self;
        };
        let mapped = mapping.map_result(handle, Assoc::Before);
        if mapped.deleted || !doc.points_at_cell(mapped.pos) {
            tracing::debug!(
                target: "trestle::resize",
                handle,
                "active handle invalidated by edit"
            );
            return Self::idle();
        }
        Self {
            active_handle: Some(mapped.pos),
            dragging: self.dragging,
        }
    }
}
