//! Atomic batched mutation.
//!
//! A transaction collects steps and is applied as a unit by
//! [`crate::Document::apply`]: either every step lands or none do. Step
//! positions are expressed in the document as it stands when that step
//! applies, so the transaction carries its own accumulated [`Mapping`] for
//! remapping outside positions across the whole batch.

use crate::map::{Mapping, StepMap};
use crate::node::CellAttrs;

/// A single document mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Rewrite the attributes of the cell at `pos`. Does not move positions.
    SetCellAttrs { pos: usize, attrs: CellAttrs },
    /// Replace `deleted` tokens of cell content at `pos` with `inserted`
    /// new ones.
    ReplaceText {
        pos: usize,
        deleted: usize,
        inserted: usize,
    },
}

/// An ordered batch of steps plus the position mapping they produce.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    steps: Vec<Step>,
    mapping: Mapping,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an attribute rewrite for the cell at `pos`.
    pub fn set_cell_attrs(&mut self, pos: usize, attrs: CellAttrs) {
        self.steps.push(Step::SetCellAttrs { pos, attrs });
        self.mapping.push(StepMap::default());
    }

    /// Stage a content replacement inside a cell.
    pub fn replace_text(&mut self, pos: usize, deleted: usize, inserted: usize) {
        self.steps.push(Step::ReplaceText {
            pos,
            deleted,
            inserted,
        });
        self.mapping.push(StepMap::new(vec![(pos, deleted, inserted)]));
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether applying this transaction changes the document at all.
    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Assoc;

    #[test]
    fn test_attr_steps_do_not_move_positions() {
        let mut tr = Transaction::new();
        tr.set_cell_attrs(2, CellAttrs::default());
        assert!(tr.doc_changed());
        assert_eq!(tr.mapping().map(10, Assoc::Before), 10);
    }

    #[test]
    fn test_replace_steps_shift_positions() {
        let mut tr = Transaction::new();
        tr.replace_text(3, 0, 2);
        assert_eq!(tr.mapping().map(6, Assoc::Before), 8);
        assert_eq!(tr.mapping().map(3, Assoc::Before), 3);
    }
}
