//! Two-dimensional index over a table's cells, accounting for spans.
//!
//! The grid answers "which cell occupies (row, col)" in O(1) after a single
//! pass over the table. Cell entries are positions *relative to the table
//! start*, so the same grid can be reused wherever the table sits in the
//! document. A cell spanning several rows or columns appears once per
//! covered slot, always with the position of its top-left origin.

use crate::error::DocError;
use crate::node::TableNode;

/// The rectangle of grid slots a cell covers.
///
/// `left..right` and `top..bottom` are half-open: a plain cell at (0, 0)
/// has `left = 0, right = 1, top = 0, bottom = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

/// Span-aware map of a table's cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    width: usize,
    height: usize,
    /// Table-relative cell positions, row-major, one entry per grid slot.
    cells: Vec<usize>,
}

impl TableGrid {
    /// Build the grid from a table subtree.
    ///
    /// Rows that cover more or fewer columns than the first row are a
    /// malformed document and fail loudly rather than being patched up.
    pub fn build(table: &TableNode) -> Result<Self, DocError> {
        let height = table.rows.len();
        let mut width = 0usize;
        let mut cells: Vec<usize> = Vec::new();
        // Per column: (rows still covered by a span from above, origin pos).
        let mut carry: Vec<(u32, usize)> = Vec::new();
        // Cursor relative to the table start.
        let mut cursor = 0usize;

        for (r, row) in table.rows.iter().enumerate() {
            cursor += 1; // row open token
            let mut col = 0usize;
            for cell in &row.cells {
                // Columns still covered by a rowspan from an earlier row.
                while col < width {
                    let (left, origin) = carry[col];
                    if left == 0 {
                        break;
                    }
                    cells.push(origin);
                    carry[col].0 -= 1;
                    col += 1;
                }
                let rel = cursor;
                let colspan = cell.attrs.colspan as usize;
                let rowspan = cell.attrs.rowspan;
                if r == 0 {
                    width += colspan;
                    carry.resize(width, (0, 0));
                }
                if col + colspan > width {
                    return Err(DocError::RaggedTable { row: r });
                }
                for i in 0..colspan {
                    cells.push(rel);
                    if rowspan > 1 {
                        carry[col + i] = (rowspan - 1, rel);
                    }
                }
                col += colspan;
                cursor += cell.size();
            }
            // Trailing columns must all be covered from above.
            while col < width {
                let (left, origin) = carry[col];
                if left == 0 {
                    return Err(DocError::RaggedTable { row: r });
                }
                cells.push(origin);
                carry[col].0 -= 1;
                col += 1;
            }
            if cells.len() != (r + 1) * width {
                return Err(DocError::RaggedTable { row: r });
            }
            cursor += 1; // row close token
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of logical columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Table-relative position of the cell occupying `(row, col)`.
    ///
    /// Panics if the slot is outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> usize {
        self.cells[row * self.width + col]
    }

    /// Number of columns to the left of the cell at `rel`, i.e. the column
    /// index where that cell starts.
    pub fn col_count(&self, rel: usize) -> Option<usize> {
        self.cells
            .iter()
            .position(|&p| p == rel)
            .map(|i| i % self.width)
    }

    /// The rectangle of slots covered by the cell at `rel`.
    pub fn find_cell(&self, rel: usize) -> Option<CellRect> {
        let first = self.cells.iter().position(|&p| p == rel)?;
        let top = first / self.width;
        let left = first % self.width;

        let mut right = left + 1;
        while right < self.width && self.cells[top * self.width + right] == rel {
            right += 1;
        }
        let mut bottom = top + 1;
        while bottom < self.height && self.cells[bottom * self.width + left] == rel {
            bottom += 1;
        }

        Some(CellRect {
            left,
            top,
            right,
            bottom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CellAttrs, TableCell, TableRow};

    fn cell(colspan: u32, rowspan: u32) -> TableCell {
        TableCell::new(CellAttrs::new(colspan, rowspan), 2)
    }

    fn plain_table(rows: usize, cols: usize) -> TableNode {
        TableNode::new(
            (0..rows)
                .map(|_| TableRow::new((0..cols).map(|_| cell(1, 1)).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_plain_grid() {
        let grid = TableGrid::build(&plain_table(2, 3)).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);

        // Row 0 cells sit at rel 1, 5, 9; row 1 at 15, 19, 23.
        assert_eq!(grid.cell_at(0, 0), 1);
        assert_eq!(grid.cell_at(0, 1), 5);
        assert_eq!(grid.cell_at(0, 2), 9);
        assert_eq!(grid.cell_at(1, 0), 15);

        assert_eq!(grid.col_count(5), Some(1));
        assert_eq!(grid.col_count(23), Some(2));
        assert_eq!(grid.col_count(999), None);
    }

    #[test]
    fn test_colspan_repeats_origin() {
        // Row: [colspan 2][plain]
        let table = TableNode::new(vec![TableRow::new(vec![cell(2, 1), cell(1, 1)])]);
        let grid = TableGrid::build(&table).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.cell_at(0, 0), grid.cell_at(0, 1));

        let rect = grid.find_cell(grid.cell_at(0, 0)).unwrap();
        assert_eq!(
            rect,
            CellRect {
                left: 0,
                top: 0,
                right: 2,
                bottom: 1
            }
        );
    }

    #[test]
    fn test_rowspan_covers_lower_row() {
        // Row 0: [rowspan 2][plain]; row 1: [plain]
        let table = TableNode::new(vec![
            TableRow::new(vec![cell(1, 2), cell(1, 1)]),
            TableRow::new(vec![cell(1, 1)]),
        ]);
        let grid = TableGrid::build(&table).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cell_at(0, 0), grid.cell_at(1, 0));
        assert_ne!(grid.cell_at(1, 0), grid.cell_at(1, 1));

        let rect = grid.find_cell(grid.cell_at(0, 0)).unwrap();
        assert_eq!(rect.top, 0);
        assert_eq!(rect.bottom, 2);
        assert_eq!(rect.right, 1);
    }

    #[test]
    fn test_ragged_table_fails() {
        let table = TableNode::new(vec![
            TableRow::new(vec![cell(1, 1), cell(1, 1)]),
            TableRow::new(vec![cell(1, 1)]),
        ]);
        assert_eq!(
            TableGrid::build(&table),
            Err(DocError::RaggedTable { row: 1 })
        );

        let table = TableNode::new(vec![
            TableRow::new(vec![cell(1, 1)]),
            TableRow::new(vec![cell(1, 1), cell(1, 1)]),
        ]);
        assert!(matches!(
            TableGrid::build(&table),
            Err(DocError::RaggedTable { .. })
        ));
    }
}
