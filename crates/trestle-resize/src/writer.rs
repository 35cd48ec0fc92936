//! Staged width writes over the table grid.
//!
//! Widths are committed by rewriting the `colwidth` attribute of every cell
//! in the affected column within one transaction, so the table never renders
//! an inconsistent intermediate split.

use std::collections::HashMap;

use trestle_doc::{CellAttrs, Document, TableGrid, Transaction};

/// Working width arrays for cells touched during one commit batch.
///
/// A cell spanning several logical columns can receive more than one write
/// in a single gesture; the cache keeps the in-progress array so later
/// writes build on earlier ones instead of the stored attributes. It is
/// owned by exactly one gesture and dropped once the batch is dispatched,
/// so it can never leak across gestures or editor instances.
#[derive(Debug, Default)]
pub struct WidthCache {
    widths: HashMap<usize, Vec<f64>>,
}

/// Stage a new width for every grid cell in `column`.
///
/// Row-span continuations are skipped (the spanning cell is written once,
/// at its top row), and writes whose value already matches are dropped so
/// an unchanged table produces an empty batch.
pub fn set_column_width(
    doc: &Document,
    grid: &TableGrid,
    table_start: usize,
    column: usize,
    width: f64,
    tr: &mut Transaction,
    cache: &mut WidthCache,
) {
    for row in 0..grid.height() {
        let rel = grid.cell_at(row, column);
        if row > 0 && grid.cell_at(row - 1, column) == rel {
            continue;
        }
        let pos = table_start + rel;
        let Some(cell) = doc.cell_at(pos) else {
            debug_assert!(false, "grid cell at {pos} missing from document");
            continue;
        };
        let attrs = &cell.attrs;
        debug_assert!(
            attrs.colwidth_consistent(),
            "colwidth length disagrees with colspan at {pos}"
        );
        let Some(first_col) = grid.col_count(rel) else {
            continue;
        };
        let colspan = attrs.colspan as usize;
        // Which slot of the cell's own width array this column maps to.
        let index = if colspan == 1 { 0 } else { column - first_col };

        let staged = cache.widths.get(&pos);
        if let Some(current) = staged.or(attrs.colwidth.as_ref()) {
            if current.get(index) == Some(&width) {
                continue;
            }
        }
        let mut widths = match staged {
            Some(w) => w.clone(),
            None => attrs
                .colwidth
                .clone()
                .unwrap_or_else(|| vec![0.0; colspan]),
        };
        if index >= widths.len() {
            tracing::warn!(
                target: "trestle::resize",
                pos,
                index,
                len = widths.len(),
                "skipping write into malformed colwidth"
            );
            continue;
        }
        widths[index] = width;
        tr.set_cell_attrs(
            pos,
            CellAttrs {
                colwidth: Some(widths.clone()),
                ..attrs.clone()
            },
        );
        cache.widths.insert(pos, widths);
    }
}

/// Build the commit batch for a finished drag.
///
/// Writes `width` into `column`; when the drag transferred width to the
/// next column (non-zero `offset` with a known sibling width), the sibling
/// is rewritten in the same batch. The gesture cache lives exactly as long
/// as this call.
pub fn commit_column_resize(
    doc: &Document,
    grid: &TableGrid,
    table_start: usize,
    column: usize,
    width: f64,
    offset: f64,
    next_sibling_width: Option<f64>,
) -> Transaction {
    let mut tr = Transaction::new();
    let mut cache = WidthCache::default();

    set_column_width(doc, grid, table_start, column, width, &mut tr, &mut cache);
    if offset != 0.0 {
        if let Some(next) = next_sibling_width {
            if column + 1 < grid.width() {
                set_column_width(
                    doc,
                    grid,
                    table_start,
                    column + 1,
                    next - offset,
                    &mut tr,
                    &mut cache,
                );
            }
        }
    }
    tracing::debug!(
        target: "trestle::resize",
        column,
        width,
        offset,
        steps = tr.steps().len(),
        "column resize staged"
    );
    tr
}

#[cfg(test)]
mod tests {
    use super::*;
    use trestle_doc::{TableCell, TableNode, TableRow};

    const THIRD: f64 = 100.0 / 3.0;

    fn cell(colspan: u32, rowspan: u32) -> TableCell {
        TableCell::new(CellAttrs::new(colspan, rowspan), 2)
    }

    fn doc_2x3() -> Document {
        let row = || TableRow::new(vec![cell(1, 1), cell(1, 1), cell(1, 1)]);
        Document::new(TableNode::new(vec![row(), row()]))
    }

    fn grid(doc: &Document) -> TableGrid {
        TableGrid::build(doc.table()).unwrap()
    }

    #[test]
    fn test_writes_every_row_of_column() {
        let mut doc = doc_2x3();
        let g = grid(&doc);
        let mut tr = Transaction::new();
        let mut cache = WidthCache::default();

        set_column_width(&doc, &g, doc.table_start(), 1, 40.0, &mut tr, &mut cache);
        assert_eq!(tr.steps().len(), 2);

        doc.apply(&tr).unwrap();
        assert_eq!(doc.cell_at(6).unwrap().attrs.colwidth, Some(vec![40.0]));
        assert_eq!(doc.cell_at(20).unwrap().attrs.colwidth, Some(vec![40.0]));
    }

    #[test]
    fn test_idempotent_second_commit_is_empty() {
        let mut doc = doc_2x3();
        let g = grid(&doc);

        let tr = commit_column_resize(&doc, &g, doc.table_start(), 0, 40.0, 0.0, None);
        assert!(!tr.is_empty());
        doc.apply(&tr).unwrap();

        let again = commit_column_resize(&doc, &g, doc.table_start(), 0, 40.0, 0.0, None);
        assert!(again.is_empty());
    }

    #[test]
    fn test_rowspan_cell_written_once() {
        // Column 0 is one cell spanning both rows.
        let doc = Document::new(TableNode::new(vec![
            TableRow::new(vec![cell(1, 2), cell(1, 1)]),
            TableRow::new(vec![cell(1, 1)]),
        ]));
        let g = grid(&doc);
        let mut tr = Transaction::new();
        let mut cache = WidthCache::default();

        set_column_width(&doc, &g, doc.table_start(), 0, 50.0, &mut tr, &mut cache);
        assert_eq!(tr.steps().len(), 1);
    }

    #[test]
    fn test_colspan_cell_accumulates_both_slots() {
        // Row 0 has separate cells; row 1 merges columns 0 and 1, so the
        // merged cell is written by both halves of the commit.
        let mut doc = Document::new(TableNode::new(vec![
            TableRow::new(vec![cell(1, 1), cell(1, 1), cell(1, 1)]),
            TableRow::new(vec![cell(2, 1), cell(1, 1)]),
        ]));
        let g = grid(&doc);

        let tr = commit_column_resize(
            &doc,
            &g,
            doc.table_start(),
            0,
            THIRD + 10.0,
            10.0,
            Some(THIRD),
        );
        doc.apply(&tr).unwrap();

        let merged = doc.cell_at(16).unwrap();
        let widths = merged.attrs.colwidth.clone().unwrap();
        assert_eq!(widths.len(), 2);
        assert!((widths[0] - (THIRD + 10.0)).abs() < 1e-9);
        assert!((widths[1] - (THIRD - 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_commit_transfers_width() {
        let mut doc = doc_2x3();
        let g = grid(&doc);

        let tr = commit_column_resize(
            &doc,
            &g,
            doc.table_start(),
            0,
            THIRD + 10.0,
            10.0,
            Some(THIRD),
        );
        doc.apply(&tr).unwrap();

        let w0 = doc.cell_at(2).unwrap().attrs.colwidth.clone().unwrap()[0];
        let w1 = doc.cell_at(6).unwrap().attrs.colwidth.clone().unwrap()[0];
        // Width moved, not created: the pair still sums to two thirds.
        assert!((w0 + w1 - 2.0 * THIRD).abs() < 1e-9);
        assert!((w0 - (THIRD + 10.0)).abs() < 1e-9);
        assert!((w1 - (THIRD - 10.0)).abs() < 1e-9);
        // Column 2 untouched.
        assert_eq!(doc.cell_at(10).unwrap().attrs.colwidth, None);
    }

    #[test]
    fn test_zero_offset_leaves_sibling_alone() {
        let doc = doc_2x3();
        let g = grid(&doc);
        let tr = commit_column_resize(&doc, &g, doc.table_start(), 0, 40.0, 0.0, Some(THIRD));
        // Only column 0's two cells are staged.
        assert_eq!(tr.steps().len(), 2);
    }
}
