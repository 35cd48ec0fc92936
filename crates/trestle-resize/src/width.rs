//! Pure width arithmetic.
//!
//! All widths here are percentages of the table width. Pixels appear only
//! as conversion inputs (rendered sizes, pointer deltas); nothing in this
//! module reads or writes the document.

use trestle_doc::CellAttrs;

/// Effective width of the column a cell ends in.
///
/// The stored value wins when present; otherwise the width is derived once
/// from the rendered size. The two paths are deliberately separate: the
/// derivation is read-only and its result must not be persisted as if it
/// were stored.
pub fn current_column_width(attrs: &CellAttrs, rendered_px: f64, table_width_px: f64) -> f64 {
    match stored_column_width(attrs) {
        Some(stored) => stored,
        None => derived_column_width(attrs, rendered_px, table_width_px),
    }
}

/// The authoritative stored width: the last `colwidth` entry, when set.
pub fn stored_column_width(attrs: &CellAttrs) -> Option<f64> {
    match attrs.colwidth.as_ref()?.last() {
        Some(&w) if w > 0.0 => Some(w),
        _ => None,
    }
}

/// One-shot fallback: the cell's rendered share of the table, minus spans
/// whose widths are already stored, split evenly over the spans still
/// unknown.
fn derived_column_width(attrs: &CellAttrs, rendered_px: f64, table_width_px: f64) -> f64 {
    let mut total = rendered_px / table_width_px * 100.0;
    let mut unknown = attrs.colspan as usize;
    if let Some(widths) = &attrs.colwidth {
        for &w in widths {
            if w > 0.0 {
                total -= w;
                unknown -= 1;
            }
        }
    }
    total / unknown.max(1) as f64
}

/// Convert a pointer delta to a percentage offset, clamped so neither the
/// dragged column nor its next sibling can be pushed below `cell_min_width`.
/// The sibling clamp is skipped when its width is unknown.
pub fn drag_offset(
    delta_x_px: f64,
    table_width_px: f64,
    cell_min_width: f64,
    current_width: f64,
    next_sibling_width: Option<f64>,
) -> f64 {
    let mut offset = delta_x_px / table_width_px * 100.0;
    if let Some(next) = next_sibling_width {
        if offset > next - cell_min_width {
            offset = next - cell_min_width;
        }
    }
    if offset < -(current_width - cell_min_width) {
        offset = -(current_width - cell_min_width);
    }
    offset
}

/// The width to commit at the end of a drag. Never below the floor,
/// whatever the accumulated offset was.
pub fn dragged_width(start_width: f64, offset: f64, cell_min_width: f64) -> f64 {
    (start_width + offset).max(cell_min_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THIRD: f64 = 100.0 / 3.0;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_stored_width_wins() {
        let attrs = CellAttrs::new(1, 1).with_colwidth(vec![42.0]);
        assert_eq!(current_column_width(&attrs, 123.0, 900.0), 42.0);
    }

    #[test]
    fn test_zero_entry_is_unset() {
        let attrs = CellAttrs::new(1, 1).with_colwidth(vec![0.0]);
        assert_eq!(stored_column_width(&attrs), None);
        assert!(approx(current_column_width(&attrs, 300.0, 900.0), THIRD));
    }

    #[test]
    fn test_derived_width_splits_spans() {
        // No stored widths at all: split the rendered share evenly.
        let attrs = CellAttrs::new(2, 1);
        assert!(approx(current_column_width(&attrs, 600.0, 900.0), THIRD));
    }

    #[test]
    fn test_derived_width_subtracts_known_spans() {
        // 270px of 900px = 30%; one span already stores 20%, so the
        // remaining unknown span gets 10%.
        let attrs = CellAttrs::new(2, 1).with_colwidth(vec![20.0, 0.0]);
        assert!(approx(current_column_width(&attrs, 270.0, 900.0), 10.0));
    }

    #[test]
    fn test_drag_offset_unclamped() {
        // +90px over a 900px table is +10%.
        let offset = drag_offset(90.0, 900.0, 5.0, THIRD, Some(THIRD));
        assert!(approx(offset, 10.0));
    }

    #[test]
    fn test_drag_offset_clamps_against_sibling() {
        // Growing by 40% would shrink the sibling below the floor.
        let offset = drag_offset(360.0, 900.0, 5.0, THIRD, Some(THIRD));
        assert!(approx(offset, THIRD - 5.0));
    }

    #[test]
    fn test_drag_offset_clamps_against_self() {
        // -300px is -33.3%, clamped so the dragged column stays at 5%.
        let offset = drag_offset(-300.0, 900.0, 5.0, THIRD, Some(THIRD));
        assert!(approx(offset, -(THIRD - 5.0)));
    }

    #[test]
    fn test_drag_offset_no_sibling_no_upper_clamp() {
        let offset = drag_offset(360.0, 900.0, 5.0, THIRD, None);
        assert!(approx(offset, 40.0));
    }

    #[test]
    fn test_dragged_width_floor() {
        for offset in [-1000.0, -40.0, -28.0, 0.0, 10.0, 500.0] {
            assert!(dragged_width(THIRD, offset, 5.0) >= 5.0);
        }
        assert!(approx(dragged_width(THIRD, 10.0, 5.0), THIRD + 10.0));
        assert_eq!(dragged_width(THIRD, -100.0, 5.0), 5.0);
    }
}
