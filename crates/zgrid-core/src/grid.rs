//! The [`Grid`] contract and block visitors.

use crate::coord::{Bounds3, Coord3};
use crate::error::GridError;

/// Receives the blocks streamed by [`Grid::visit_blocks`].
///
/// Implemented for every `FnMut(&Bounds3, &V)`, so closures can be
/// passed directly. Closures should annotate their parameter types
/// (`|b: &Bounds3, v: &V|`) so they are inferred as higher-ranked.
pub trait BlockVisitor<V> {
    /// Called once per block. Blocks never overlap; their order is up to
    /// the backend.
    fn visit(&mut self, block: &Bounds3, value: &V);
}

impl<V, F> BlockVisitor<V> for F
where
    F: FnMut(&Bounds3, &V),
{
    fn visit(&mut self, block: &Bounds3, value: &V) {
        self(block, value)
    }
}

/// Sparse mutable map from 3-D cells to values.
///
/// This is the contract consumers program against; backends decide how
/// cells are stored. Writing `None` deletes. Mutators return `&mut Self`
/// so calls can be chained with `?`.
pub trait Grid<V: Clone> {
    /// Value stored at `(x, y, z)`, if any.
    fn get(&self, x: i32, y: i32, z: i32) -> Option<&V>;

    /// Store `value` at `(x, y, z)`; `None` removes the cell.
    fn set(&mut self, x: i32, y: i32, z: i32, value: Option<V>) -> Result<&mut Self, GridError>;

    /// Store `value` in every cell of `bounds`; `None` removes them.
    fn set_block(&mut self, bounds: Bounds3, value: Option<V>) -> Result<&mut Self, GridError>;

    /// Remove every cell.
    fn clear(&mut self) -> &mut Self;

    /// Remove every stored value.
    ///
    /// Backends without a separate notion of contents treat this as
    /// [`clear`](Self::clear).
    fn clear_contents(&mut self) -> &mut Self {
        self.clear()
    }

    /// Number of storage nodes the backend currently holds.
    fn count_nodes(&self) -> usize;

    /// Number of occupied cells.
    fn count_non_null(&self) -> u64;

    /// Stream every stored block with its value.
    fn visit_blocks<F>(&self, visitor: &mut F)
    where
        F: BlockVisitor<V> + ?Sized;

    /// Stream the stored blocks clipped to `bounds`.
    fn visit_blocks_in<F>(&self, bounds: &Bounds3, visitor: &mut F)
    where
        F: BlockVisitor<V> + ?Sized;

    /// Copy every block of `src` into `self` at the same position.
    fn paste<G>(&mut self, src: &G) -> Result<&mut Self, GridError>
    where
        G: Grid<V> + ?Sized,
        Self: Sized,
    {
        self.paste_offset(src, [0, 0, 0])
    }

    /// Copy every block of `src` into `self`, moved by `offset`.
    ///
    /// Blocks are written in the order `src` streams them.
    fn paste_offset<G>(&mut self, src: &G, offset: Coord3) -> Result<&mut Self, GridError>
    where
        G: Grid<V> + ?Sized,
        Self: Sized,
    {
        let mut blocks: Vec<(Bounds3, V)> = Vec::new();
        src.visit_blocks(&mut |b: &Bounds3, v: &V| blocks.push((b.translate(offset), v.clone())));
        for (bounds, value) in blocks {
            self.set_block(bounds, Some(value))?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_visitors() {
        let mut seen = Vec::new();
        {
            let mut visitor = |b: &Bounds3, v: &u8| seen.push((*b, *v));
            BlockVisitor::visit(&mut visitor, &Bounds3::cell([1, 2, 3]), &9);
            BlockVisitor::visit(&mut visitor, &Bounds3::cell([0, 0, 0]), &4);
        }
        assert_eq!(
            seen,
            vec![
                (Bounds3::cell([1, 2, 3]), 9),
                (Bounds3::cell([0, 0, 0]), 4)
            ]
        );
    }
}
