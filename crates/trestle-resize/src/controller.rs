//! Pointer handling: from screen coordinates to state transitions and,
//! on release, to a committed width batch.
//!
//! The controller is platform-agnostic. The host wires its pointer events
//! to the named methods here and supplies rendered geometry through the
//! [`LayoutView`] trait, the same way text platforms plug in behind a
//! buffer trait. Missed hits are normal interaction flow, never errors:
//! anything that cannot be resolved simply reports "no boundary".

use trestle_doc::{Document, TableGrid, Transaction};

use crate::options::ResizeOptions;
use crate::state::{DragState, ResizeAction, ResizeState};
use crate::width::{current_column_width, drag_offset, dragged_width};
use crate::writer::commit_column_resize;

/// Rendered geometry oracle supplied by the host.
pub trait LayoutView {
    /// The cell under a point, with its rendered horizontal edges.
    fn cell_at_point(&self, x: f64, y: f64) -> Option<CellHit>;

    /// The document position nearest to a point.
    fn pos_at_point(&self, x: f64, y: f64) -> Option<usize>;

    /// Rendered pixel width of the table.
    fn table_width(&self) -> f64;

    /// Rendered pixel width of the cell node at `pos`.
    fn cell_rendered_width(&self, pos: usize) -> f64;
}

/// A cell resolved from screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellHit {
    /// Position of the cell node.
    pub pos: usize,
    /// Left edge in screen pixels.
    pub left: f64,
    /// Right edge in screen pixels.
    pub right: f64,
}

/// A pointer event, reduced to what the controller needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    /// Pressed-button bitmask; bit 0 is the primary button.
    pub buttons: u8,
}

impl PointerInput {
    pub fn new(x: f64, y: f64, buttons: u8) -> Self {
        Self { x, y, buttons }
    }

    pub fn primary_pressed(&self) -> bool {
        self.buttons & 1 != 0
    }
}

enum Side {
    Left,
    Right,
}

/// Binds pointer events to the resize state machine and the grid writer.
///
/// One controller per editor instance. The drag record itself lives in
/// [`ResizeState`]; the controller only keeps gesture-scoped scratch data
/// (the captured sibling width) that dies with the gesture.
#[derive(Debug)]
pub struct ResizeController {
    options: ResizeOptions,
    state: ResizeState,
    /// Width of the column right of the handle at drag start, for clamping.
    next_sibling_width: Option<f64>,
}

impl ResizeController {
    pub fn new(options: ResizeOptions) -> Self {
        Self {
            options,
            state: ResizeState::idle(),
            next_sibling_width: None,
        }
    }

    /// Current interaction snapshot, for rendering (cursor class, handles).
    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    /// Whether a handle is active, i.e. the host should show a resize
    /// cursor.
    pub fn is_resizing(&self) -> bool {
        self.state.active_handle.is_some()
    }

    /// Pointer moved over the editing surface.
    ///
    /// Tracks boundary hover while idle; accumulates live drag feedback
    /// while dragging. A move without the primary button ends the drag.
    pub fn pointer_move(
        &mut self,
        doc: &mut Document,
        layout: &impl LayoutView,
        input: &PointerInput,
    ) {
        if self.state.is_dragging() {
            if !input.primary_pressed() {
                self.pointer_up(doc, input);
                return;
            }
            self.drag_move(input);
        } else {
            self.hover(doc, layout, input);
        }
    }

    /// Pointer left the editing surface.
    pub fn pointer_leave(&mut self) {
        if self.state.active_handle.is_some() && !self.state.is_dragging() {
            self.transition(ResizeAction::SetHandle(None));
        }
    }

    /// Pointer pressed. Returns true when a drag started, in which case
    /// the host should suppress default drag behavior and route move and
    /// release events here until the drag ends.
    pub fn pointer_down(
        &mut self,
        doc: &Document,
        layout: &impl LayoutView,
        input: &PointerInput,
    ) -> bool {
        let Some(handle) = self.state.active_handle else {
            return false;
        };
        if self.state.is_dragging() {
            return false;
        }
        let Some(cell) = doc.cell_at(handle) else {
            return false;
        };
        let table_width = layout.table_width();
        let start_width = current_column_width(
            &cell.attrs,
            layout.cell_rendered_width(handle),
            table_width,
        );
        self.next_sibling_width = next_column_width(doc, layout, handle, table_width);
        tracing::debug!(
            target: "trestle::resize",
            handle,
            start_width,
            table_width,
            "drag started"
        );
        self.transition(ResizeAction::SetDragging(Some(DragState {
            start_x: input.x,
            start_width,
            table_width,
            offset: 0.0,
        })));
        true
    }

    /// Pointer released: commit the final widths in one batch and end the
    /// drag.
    pub fn pointer_up(&mut self, doc: &mut Document, input: &PointerInput) {
        let Some(drag) = self.state.dragging else {
            return;
        };
        let offset = self.live_offset(&drag, input);
        let width = dragged_width(drag.start_width, offset, self.options.cell_min_width);

        if let Some(handle) = self.state.active_handle {
            self.commit(doc, handle, width, offset);
        }
        self.next_sibling_width = None;
        self.transition(ResizeAction::SetDragging(None));
    }

    /// The document changed under us: remap or drop the active handle.
    pub fn doc_edited(&mut self, doc: &Document, tr: &Transaction) {
        if !tr.doc_changed() || self.state.active_handle.is_none() {
            return;
        }
        let next = self.state.map_through(tr.mapping(), doc);
        if next.active_handle.is_none() {
            // Any drag was abandoned along with the handle.
            self.next_sibling_width = None;
        }
        self.state = next;
    }

    fn hover(&mut self, doc: &Document, layout: &impl LayoutView, input: &PointerInput) {
        let hit = self.boundary_at(doc, layout, input);
        if hit != self.state.active_handle {
            self.transition(ResizeAction::SetHandle(hit));
        }
    }

    fn drag_move(&mut self, input: &PointerInput) {
        let Some(drag) = self.state.dragging else {
            return;
        };
        let offset = self.live_offset(&drag, input);
        self.transition(ResizeAction::SetDraggingOffset(offset));
    }

    fn live_offset(&self, drag: &DragState, input: &PointerInput) -> f64 {
        drag_offset(
            input.x - drag.start_x,
            drag.table_width,
            self.options.cell_min_width,
            drag.start_width,
            self.next_sibling_width,
        )
    }

    fn commit(&self, doc: &mut Document, handle: usize, width: f64, offset: f64) {
        let start = doc.table_start();
        let Some(grid) = grid_for(doc) else {
            return;
        };
        let Some(rel) = handle.checked_sub(start) else {
            return;
        };
        let Some(rect) = grid.find_cell(rel) else {
            return;
        };
        // The dragged column is the rightmost one the handle cell spans.
        let column = rect.right - 1;
        let tr = commit_column_resize(
            doc,
            &grid,
            start,
            column,
            width,
            offset,
            self.next_sibling_width,
        );
        if tr.is_empty() {
            return;
        }
        if let Err(err) = doc.apply(&tr) {
            tracing::warn!(target: "trestle::resize", %err, "width commit rejected");
        }
    }

    fn transition(&mut self, action: ResizeAction) {
        tracing::trace!(target: "trestle::resize", action = ?action, "state transition");
        self.state = self.state.apply(&action);
    }
}

impl ResizeController {
    fn boundary_at(
        &self,
        doc: &Document,
        layout: &impl LayoutView,
        input: &PointerInput,
    ) -> Option<usize> {
        let cell = layout.cell_at_point(input.x, input.y)?;
        let side = if input.x - cell.left <= self.options.handle_width {
            Side::Left
        } else if cell.right - input.x <= self.options.handle_width {
            Side::Right
        } else {
            return None;
        };
        let pos = self.edge_cell(doc, layout, input, side)?;
        if !self.options.last_column_resizable && self.is_last_column(doc, pos) {
            return None;
        }
        Some(pos)
    }

    /// Resolve which grid cell owns the boundary under the pointer: the
    /// cell itself for a right edge, the previous cell in the row for a
    /// left edge. A left edge in the first column has no owner.
    fn edge_cell(
        &self,
        doc: &Document,
        layout: &impl LayoutView,
        input: &PointerInput,
        side: Side,
    ) -> Option<usize> {
        let probe_x = match side {
            Side::Left => input.x + self.options.handle_width,
            Side::Right => input.x - self.options.handle_width,
        };
        let pos = layout.pos_at_point(probe_x, input.y)?;
        let cell = doc.cell_around(pos)?;
        match side {
            Side::Right => Some(cell),
            Side::Left => {
                let start = doc.table_start();
                let grid = grid_for(doc)?;
                let rel = cell.checked_sub(start)?;
                let rect = grid.find_cell(rel)?;
                if rect.left == 0 {
                    return None;
                }
                Some(start + grid.cell_at(rect.top, rect.left - 1))
            }
        }
    }

    fn is_last_column(&self, doc: &Document, pos: usize) -> bool {
        let start = doc.table_start();
        let Some(grid) = grid_for(doc) else {
            return false;
        };
        let Some(rel) = pos.checked_sub(start) else {
            return false;
        };
        match grid.find_cell(rel) {
            Some(rect) => rect.right == grid.width(),
            None => false,
        }
    }
}

/// Width of the column right of the handle, in percent, captured at drag
/// start for clamping. `None` when the handle owns the last boundary.
fn next_column_width(
    doc: &Document,
    layout: &impl LayoutView,
    handle: usize,
    table_width: f64,
) -> Option<f64> {
    let start = doc.table_start();
    let grid = grid_for(doc)?;
    let rect = grid.find_cell(handle.checked_sub(start)?)?;
    if rect.right >= grid.width() {
        return None;
    }
    let pos = start + grid.cell_at(rect.top, rect.right);
    let cell = doc.cell_at(pos)?;
    Some(current_column_width(
        &cell.attrs,
        layout.cell_rendered_width(pos),
        table_width,
    ))
}

fn grid_for(doc: &Document) -> Option<TableGrid> {
    match TableGrid::build(doc.table()) {
        Ok(grid) => Some(grid),
        Err(err) => {
            tracing::warn!(target: "trestle::resize", %err, "table grid unavailable");
            None
        }
    }
}
