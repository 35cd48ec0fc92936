//! Table node tree and persisted cell attributes.
//!
//! Positions use structured-document token arithmetic: a node takes one
//! token to open and one to close, so a cell's size is `2 + content_size`,
//! and a cell's *position* is the offset of the token just before the cell
//! node. Positions are stable only until the document is edited; remap them
//! through a [`crate::Mapping`] afterwards.

use serde::{Deserialize, Serialize};

fn default_span() -> u32 {
    1
}

/// Attributes persisted on every table cell.
///
/// `colwidth`, when present, holds one width percentage per spanned logical
/// column. An entry of `0.0` means "unset - derive from the rendered size".
/// Invariant: `colwidth.len() == colspan` whenever `colwidth` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellAttrs {
    #[serde(default = "default_span")]
    pub colspan: u32,
    #[serde(default = "default_span")]
    pub rowspan: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colwidth: Option<Vec<f64>>,
}

impl Default for CellAttrs {
    fn default() -> Self {
        Self {
            colspan: 1,
            rowspan: 1,
            colwidth: None,
        }
    }
}

impl CellAttrs {
    /// Create attributes with the given spans and no stored widths.
    pub fn new(colspan: u32, rowspan: u32) -> Self {
        Self {
            colspan,
            rowspan,
            colwidth: None,
        }
    }

    /// Attach a stored width array.
    pub fn with_colwidth(mut self, colwidth: Vec<f64>) -> Self {
        self.colwidth = Some(colwidth);
        self
    }

    /// Check the `colwidth`-matches-`colspan` invariant.
    pub fn colwidth_consistent(&self) -> bool {
        self.colwidth
            .as_ref()
            .is_none_or(|w| w.len() == self.colspan as usize)
    }
}

/// A single table cell: attributes plus the size of its content in tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub attrs: CellAttrs,
    pub content_size: usize,
}

impl TableCell {
    pub fn new(attrs: CellAttrs, content_size: usize) -> Self {
        Self {
            attrs,
            content_size,
        }
    }

    /// Node size including the open and close tokens.
    pub fn size(&self) -> usize {
        2 + self.content_size
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> usize {
        2 + self.cells.iter().map(TableCell::size).sum::<usize>()
    }
}

/// A table subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct TableNode {
    pub rows: Vec<TableRow>,
}

impl TableNode {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn size(&self) -> usize {
        2 + self.rows.iter().map(TableRow::size).sum::<usize>()
    }
}
