//! Drag-handle markers derived from the current state.
//!
//! A pure projection: given the document and the active handle, emit one
//! marker per row boundary. Markers carry no document semantics; the host
//! renders them as an overlay and throws them away on the next state
//! change.

use trestle_doc::{Document, TableGrid};

use crate::state::DragState;

/// One visual marker at a column boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMarker {
    /// Document position of the owning cell's closing token.
    pub pos: usize,
    /// Horizontal offset in pixels, leading the eventual commit position
    /// during a live drag.
    pub dx: f64,
}

/// Markers for the boundary owned by the cell at `active_handle`.
///
/// A marker is emitted for each row slot where the cell right of the
/// boundary differs from the cell left of it (or the boundary is the
/// table's right edge), skipping slots whose cell already produced a
/// marker in the row above.
pub fn handle_decorations(
    doc: &Document,
    active_handle: usize,
    drag: Option<&DragState>,
) -> Vec<HandleMarker> {
    let start = doc.table_start();
    let Some(rel) = active_handle.checked_sub(start) else {
        return Vec::new();
    };
    let Ok(grid) = TableGrid::build(doc.table()) else {
        return Vec::new();
    };
    let Some(rect) = grid.find_cell(rel) else {
        return Vec::new();
    };
    let boundary = rect.right;
    let dx = drag.map_or(0.0, |d| d.offset / 100.0 * d.table_width);

    let mut markers = Vec::new();
    for row in 0..grid.height() {
        let owner = grid.cell_at(row, boundary - 1);
        let right_differs =
            boundary == grid.width() || grid.cell_at(row, boundary) != owner;
        let above_same = row > 0 && grid.cell_at(row - 1, boundary - 1) == owner;
        if right_differs && !above_same {
            let pos = start + owner;
            let Some(cell) = doc.cell_at(pos) else {
                continue;
            };
            markers.push(HandleMarker {
                pos: pos + cell.size() - 1,
                dx,
            });
        }
    }
    markers
}
