//! Position remapping across document edits.
//!
//! Every content-changing step produces a [`StepMap`] describing the ranges
//! it replaced. Mapping a position through a step map (or a whole
//! [`Mapping`]) answers "where did this position end up", plus whether the
//! position itself was deleted. Callers that track a handle into the
//! document remap it with [`Assoc::Before`] so the handle leans away from
//! inserted content and collapses with deletions.

/// Which side a mapped position sticks to at an edit boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Before,
    After,
}

/// Result of mapping one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapResult {
    pub pos: usize,
    /// True when the position sat strictly inside replaced content.
    pub deleted: bool,
}

/// The ranges replaced by a single step: `(start, old_size, new_size)`,
/// sorted by start, expressed in pre-step coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepMap {
    ranges: Vec<(usize, usize, usize)>,
}

impl StepMap {
    pub fn new(ranges: Vec<(usize, usize, usize)>) -> Self {
        Self { ranges }
    }

    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        self.map_result(pos, assoc).pos
    }

    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        let mut diff = 0isize;
        for &(start, old_size, new_size) in &self.ranges {
            if start > pos {
                break;
            }
            let end = start + old_size;
            if pos <= end {
                let side = if old_size == 0 {
                    assoc
                } else if pos == start {
                    Assoc::Before
                } else if pos == end {
                    Assoc::After
                } else {
                    assoc
                };
                let base = (start as isize + diff) as usize;
                let mapped = match side {
                    Assoc::Before => base,
                    Assoc::After => base + new_size,
                };
                return MapResult {
                    pos: mapped,
                    deleted: pos > start && pos < end,
                };
            }
            diff += new_size as isize - old_size as isize;
        }
        MapResult {
            pos: (pos as isize + diff) as usize,
            deleted: false,
        }
    }
}

/// A sequence of step maps, applied in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(|m| m.ranges.is_empty())
    }

    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        self.map_result(pos, assoc).pos
    }

    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        let mut result = MapResult {
            pos,
            deleted: false,
        };
        for map in &self.maps {
            let step = map.map_result(result.pos, assoc);
            result.pos = step.pos;
            result.deleted |= step.deleted;
        }
        result
    }
}
