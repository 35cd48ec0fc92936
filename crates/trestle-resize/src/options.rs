//! Resize behavior configuration, supplied by the host editor.

use serde::Deserialize;

/// Tunables for the column-resize interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResizeOptions {
    /// Hit-test tolerance around a column boundary, in pixels.
    pub handle_width: f64,
    /// Hard floor on any column width, as a percentage of table width.
    pub cell_min_width: f64,
    /// Whether the rightmost column's right edge is a valid handle.
    pub last_column_resizable: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            handle_width: 5.0,
            cell_min_width: 5.0,
            last_column_resizable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ResizeOptions::default();
        assert_eq!(opts.handle_width, 5.0);
        assert_eq!(opts.cell_min_width, 5.0);
        assert!(opts.last_column_resizable);
    }
}
