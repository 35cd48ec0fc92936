//! Document wrapper: position resolution and transaction application.
//!
//! The document holds a single table as its root node, which is all the
//! resize machinery needs; position 0 opens the table, so the table's
//! content starts at position 1.

use crate::error::DocError;
use crate::node::{TableCell, TableNode};
use crate::transaction::{Step, Transaction};

/// A document whose root is one table subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    table: TableNode,
}

impl Document {
    pub fn new(table: TableNode) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TableNode {
        &self.table
    }

    /// Position where the table's content starts. Add a grid's relative
    /// cell position to this to get an absolute position.
    pub fn table_start(&self) -> usize {
        1
    }

    /// The cell whose node starts right after `pos`, if any.
    pub fn cell_at(&self, pos: usize) -> Option<&TableCell> {
        let (r, c) = self.locate_cell(pos)?;
        Some(&self.table.rows[r].cells[c])
    }

    /// Does `pos` sit immediately before a cell node?
    pub fn points_at_cell(&self, pos: usize) -> bool {
        self.locate_cell(pos).is_some()
    }

    /// Position of the cell enclosing `pos`, for positions that fall inside
    /// a cell (its open token or its content).
    pub fn cell_around(&self, pos: usize) -> Option<usize> {
        let mut row_pos = self.table_start();
        for row in &self.table.rows {
            let mut cell_pos = row_pos + 1;
            for cell in &row.cells {
                if pos >= cell_pos && pos < cell_pos + cell.size() {
                    return Some(cell_pos);
                }
                cell_pos += cell.size();
            }
            row_pos += row.size();
        }
        None
    }

    /// Apply a transaction atomically.
    ///
    /// Steps run in order against a working copy; the document is only
    /// replaced when every step succeeded.
    pub fn apply(&mut self, tr: &Transaction) -> Result<(), DocError> {
        tracing::trace!(
            target: "trestle::doc",
            steps = tr.steps().len(),
            "applying transaction"
        );
        let mut table = self.table.clone();
        for step in tr.steps() {
            apply_step(&mut table, step)?;
        }
        self.table = table;
        Ok(())
    }

    fn locate_cell(&self, pos: usize) -> Option<(usize, usize)> {
        locate_cell(&self.table, self.table_start(), pos)
    }
}

fn locate_cell(table: &TableNode, table_start: usize, pos: usize) -> Option<(usize, usize)> {
    let mut row_pos = table_start;
    for (r, row) in table.rows.iter().enumerate() {
        let mut cell_pos = row_pos + 1;
        for (c, cell) in row.cells.iter().enumerate() {
            if cell_pos == pos {
                return Some((r, c));
            }
            if cell_pos > pos {
                return None;
            }
            cell_pos += cell.size();
        }
        row_pos += row.size();
    }
    None
}

fn apply_step(table: &mut TableNode, step: &Step) -> Result<(), DocError> {
    match *step {
        Step::SetCellAttrs { pos, ref attrs } => {
            if !attrs.colwidth_consistent() {
                return Err(DocError::ColwidthLength {
                    len: attrs.colwidth.as_ref().map_or(0, Vec::len),
                    colspan: attrs.colspan,
                });
            }
            let (r, c) = locate_cell(table, 1, pos).ok_or(DocError::NotACell(pos))?;
            table.rows[r].cells[c].attrs = attrs.clone();
            Ok(())
        }
        Step::ReplaceText {
            pos,
            deleted,
            inserted,
        } => {
            let mut row_pos = 1;
            for row in &mut table.rows {
                let row_size = row.size();
                let mut cell_pos = row_pos + 1;
                for cell in &mut row.cells {
                    let content_start = cell_pos + 1;
                    let content_end = content_start + cell.content_size;
                    if pos >= content_start && pos + deleted <= content_end {
                        cell.content_size = cell.content_size - deleted + inserted;
                        return Ok(());
                    }
                    cell_pos += cell.size();
                }
                row_pos += row_size;
            }
            Err(DocError::InvalidPosition(pos))
        }
    }
}
