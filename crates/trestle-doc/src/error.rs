//! Error types for document and grid operations.

/// Errors from position resolution, grid construction, and transaction
/// application.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DocError {
    /// Position does not exist in the document.
    #[error("position {0} is out of range")]
    InvalidPosition(usize),

    /// Position does not sit immediately before a cell node.
    #[error("position {0} does not point at a cell")]
    NotACell(usize),

    /// Row occupies a different number of grid columns than the first row.
    #[error("row {row} does not line up with the table grid")]
    RaggedTable { row: usize },

    /// `colwidth` length disagrees with `colspan`.
    #[error("colwidth has {len} entries for a colspan of {colspan}")]
    ColwidthLength { len: usize, colspan: u32 },
}
