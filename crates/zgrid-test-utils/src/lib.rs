//! Test utilities for zgrid development.
//!
//! Provides [`HashGrid`], a cell-per-entry reference implementation of
//! [`Grid`] used as an oracle, a [`BlockCollector`] visitor, reusable
//! [`fixtures`], and [`compliance`] checks that any backend can run.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compliance;
pub mod fixtures;

use indexmap::IndexMap;
use zgrid_core::{BlockVisitor, Bounds3, Coord3, Grid, GridError};

/// Reference [`Grid`] storing one map entry per occupied cell.
///
/// Every cell is its own node and its own block, so counts and visits are
/// trivially correct. Blocks stream in insertion order. `set_block` walks
/// every cell of the box; keep boxes small.
#[derive(Clone, Debug, PartialEq)]
pub struct HashGrid<V> {
    cells: IndexMap<Coord3, V>,
}

impl<V> HashGrid<V> {
    pub fn new() -> Self {
        Self {
            cells: IndexMap::new(),
        }
    }

    /// Occupied cells with their values, in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = (&Coord3, &V)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<V> Default for HashGrid<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Grid<V> for HashGrid<V> {
    fn get(&self, x: i32, y: i32, z: i32) -> Option<&V> {
        self.cells.get(&[x, y, z])
    }

    fn set(&mut self, x: i32, y: i32, z: i32, value: Option<V>) -> Result<&mut Self, GridError> {
        match value {
            Some(v) => {
                self.cells.insert([x, y, z], v);
            }
            None => {
                self.cells.shift_remove(&[x, y, z]);
            }
        }
        Ok(self)
    }

    fn set_block(&mut self, bounds: Bounds3, value: Option<V>) -> Result<&mut Self, GridError> {
        if !bounds.is_well_formed() {
            return Err(GridError::InvalidBounds { bounds });
        }
        for x in bounds.min[0]..=bounds.max[0] {
            for y in bounds.min[1]..=bounds.max[1] {
                for z in bounds.min[2]..=bounds.max[2] {
                    self.set(x, y, z, value.clone())?;
                }
            }
        }
        Ok(self)
    }

    fn clear(&mut self) -> &mut Self {
        self.cells.clear();
        self
    }

    fn count_nodes(&self) -> usize {
        self.cells.len()
    }

    fn count_non_null(&self) -> u64 {
        self.cells.len() as u64
    }

    fn visit_blocks<F>(&self, visitor: &mut F)
    where
        F: BlockVisitor<V> + ?Sized,
    {
        for (c, v) in &self.cells {
            visitor.visit(&Bounds3::cell(*c), v);
        }
    }

    fn visit_blocks_in<F>(&self, bounds: &Bounds3, visitor: &mut F)
    where
        F: BlockVisitor<V> + ?Sized,
    {
        for (c, v) in &self.cells {
            if bounds.contains(*c) {
                visitor.visit(&Bounds3::cell(*c), v);
            }
        }
    }
}

/// [`BlockVisitor`] that records every block it is shown.
#[derive(Clone, Debug, Default)]
pub struct BlockCollector<V> {
    pub blocks: Vec<(Bounds3, V)>,
}

impl<V: Clone> BlockCollector<V> {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Total number of cells across the recorded blocks.
    pub fn volume(&self) -> u64 {
        self.blocks.iter().map(|(b, _)| b.volume()).sum()
    }

    /// Expand the recorded blocks into individual cells.
    ///
    /// # Panics
    ///
    /// Panics if two blocks share a cell.
    pub fn cell_map(&self) -> IndexMap<Coord3, V> {
        let mut out = IndexMap::new();
        for (b, v) in &self.blocks {
            for x in b.min[0]..=b.max[0] {
                for y in b.min[1]..=b.max[1] {
                    for z in b.min[2]..=b.max[2] {
                        let prev = out.insert([x, y, z], v.clone());
                        assert!(prev.is_none(), "cell {:?} reported twice", [x, y, z]);
                    }
                }
            }
        }
        out
    }
}

impl<V: Clone> BlockVisitor<V> for BlockCollector<V> {
    fn visit(&mut self, block: &Bounds3, value: &V) {
        self.blocks.push((*block, value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_grid_round_trip() {
        let mut g = HashGrid::new();
        g.set(1, 2, 3, Some(5u8)).unwrap();
        g.set_block(Bounds3::new([0, 0, 0], [1, 1, 1]), Some(7)).unwrap();
        assert_eq!(g.get(1, 2, 3), Some(&5));
        assert_eq!(g.get(1, 1, 1), Some(&7));
        assert_eq!(g.count_non_null(), 9);
        g.set(1, 2, 3, None).unwrap();
        assert_eq!(g.count_nodes(), 8);
    }

    #[test]
    fn collector_expands_blocks() {
        let mut g = HashGrid::new();
        g.set_block(Bounds3::new([0, 0, 0], [2, 1, 0]), Some('a')).unwrap();
        let mut c = BlockCollector::new();
        g.visit_blocks(&mut c);
        assert_eq!(c.volume(), 6);
        assert_eq!(c.cell_map().len(), 6);
    }

    #[test]
    fn hash_grid_passes_compliance() {
        compliance::run_full_compliance(HashGrid::<u32>::new);
    }
}
