//! Conversion between 3-D boxes and curve-key ranges.
//!
//! A box maps to a sorted list of disjoint key ranges by recursive
//! bisection along the Morton hierarchy. A key range maps back to
//! canonical blocks: maximal runs of `2^k` keys aligned on `2^k`, each of
//! which covers an axis-aligned box.

use crate::morton::{self, AXIS_BITS, AXIS_MASK, KEY_MAX, MAX_COORD, MIN_COORD};
use crate::node::{Link, RangeNode};
use crate::treap::SpatialTreap;
use smallvec::{smallvec, SmallVec};
use zgrid_core::{Axis, BlockVisitor, Bounds3};

/// Largest canonical block, in key bits.
///
/// Keeps every axis below 20 levels so no block crosses the sign boundary
/// and each decodes to a well-formed signed box.
const MAX_BLOCK_BITS: u32 = 57;

/// The full signed coordinate domain as a box.
pub const DOMAIN: Bounds3 = Bounds3::new(
    [MIN_COORD, MIN_COORD, MIN_COORD],
    [MAX_COORD, MAX_COORD, MAX_COORD],
);

type AxisParts = SmallVec<[(u32, u32); 2]>;

/// Raw 20-bit intervals covering `min..=max` on one axis.
///
/// An interval that crosses the sign boundary (or wraps) becomes two.
fn axis_parts(min: i32, max: i32) -> AxisParts {
    let extent = i64::from(max) - i64::from(min) + 1;
    if extent >= 1 << AXIS_BITS {
        return smallvec![(0, AXIS_MASK)];
    }
    let a = (min as u32) & AXIS_MASK;
    let b = (max as u32) & AXIS_MASK;
    if a <= b {
        smallvec![(a, b)]
    } else {
        smallvec![(a, AXIS_MASK), (0, b)]
    }
}

/// Sorted, coalesced key ranges covering exactly the cells of `bounds`.
///
/// `bounds` must be well formed. Coordinates outside the codec domain
/// wrap to their low 20 bits.
pub fn box_ranges(bounds: &Bounds3) -> Vec<(u64, u64)> {
    let parts: [AxisParts; 3] =
        Axis::ALL.map(|a| axis_parts(bounds.min[a.index()], bounds.max[a.index()]));
    let mut out = Vec::new();
    for &(x0, x1) in &parts[0] {
        for &(y0, y1) in &parts[1] {
            for &(z0, z1) in &parts[2] {
                bisect([x0, y0, z0], [x1, y1, z1], &mut out);
            }
        }
    }
    out.sort_unstable();
    coalesce(out)
}

fn bisect(min: [u32; 3], max: [u32; 3], out: &mut Vec<(u64, u64)>) {
    let klo = morton::encode_raw(min);
    let khi = morton::encode_raw(max);
    let volume: u64 = (0..3).map(|i| u64::from(max[i] - min[i]) + 1).product();
    if khi - klo + 1 == volume {
        out.push((klo, khi));
        return;
    }
    // The highest differing key bit names the coarsest cut that separates
    // the two corners.
    let bit = 63 - (klo ^ khi).leading_zeros();
    let (axis, level) = morton::axis_of_bit(bit);
    let i = axis.index();
    let cut = (max[i] >> level) << level;

    let mut lower_max = max;
    lower_max[i] = cut - 1;
    bisect(min, lower_max, out);

    let mut upper_min = min;
    upper_min[i] = cut;
    bisect(upper_min, max, out);
}

fn coalesce(sorted: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    let mut out: Vec<(u64, u64)> = Vec::with_capacity(sorted.len());
    for (lo, hi) in sorted {
        match out.last_mut() {
            Some(last) if last.1 + 1 == lo => last.1 = hi,
            _ => out.push((lo, hi)),
        }
    }
    out
}

/// Canonical blocks of the key range `lo..=hi`, in ascending order.
///
/// Each item is the `(first, last)` key of one aligned power-of-two run.
#[derive(Clone, Debug)]
pub struct KeyBlocks {
    next: u64,
    hi: u64,
    done: bool,
}

impl KeyBlocks {
    /// Decompose `lo..=hi`. Both ends must be at most [`KEY_MAX`].
    pub fn new(lo: u64, hi: u64) -> Self {
        debug_assert!(hi <= KEY_MAX);
        Self {
            next: lo,
            hi,
            done: lo > hi,
        }
    }
}

impl Iterator for KeyBlocks {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = self.next;
        let span = self.hi - start + 1;
        let k = start
            .trailing_zeros()
            .min(63 - span.leading_zeros())
            .min(MAX_BLOCK_BITS);
        let end = start + ((1u64 << k) - 1);
        if end == self.hi {
            self.done = true;
        } else {
            self.next = end + 1;
        }
        Some((start, end))
    }
}

/// The box covered by a canonical block.
pub fn block_bounds(first: u64, last: u64) -> Bounds3 {
    Bounds3::new(morton::decode_coord(first), morton::decode_coord(last))
}

fn walk_overlapping<'a, V, F>(link: &'a Link<V>, lo: u64, hi: u64, f: &mut F)
where
    F: FnMut(&'a RangeNode<V>),
{
    let Some(node) = link.as_deref() else {
        return;
    };
    if lo < node.lo {
        walk_overlapping(&node.left, lo, hi, f);
    }
    if node.lo <= hi && node.hi >= lo {
        f(node);
    }
    if hi > node.hi {
        walk_overlapping(&node.right, lo, hi, f);
    }
}

impl<V> SpatialTreap<V> {
    /// Stream every stored cell as canonical blocks, in ascending key order.
    pub fn visit_blocks<F>(&self, visitor: &mut F)
    where
        F: BlockVisitor<V> + ?Sized,
    {
        for node in self.ranges() {
            for (first, last) in KeyBlocks::new(node.lo, node.hi) {
                visitor.visit(&block_bounds(first, last), &node.value);
            }
        }
    }

    /// Stream the stored blocks that intersect `bounds`, clipped to it.
    ///
    /// Only nodes inside the key hull of `bounds` are visited.
    pub fn visit_blocks_in<F>(&self, bounds: &Bounds3, visitor: &mut F)
    where
        F: BlockVisitor<V> + ?Sized,
    {
        let Some(query) = bounds.intersect(&DOMAIN) else {
            return;
        };
        let (klo, khi) = key_hull(&query);
        walk_overlapping(&self.root, klo, khi, &mut |node: &RangeNode<V>| {
            let lo = node.lo.max(klo);
            let hi = node.hi.min(khi);
            for (first, last) in KeyBlocks::new(lo, hi) {
                if let Some(clipped) = block_bounds(first, last).intersect(&query) {
                    visitor.visit(&clipped, &node.value);
                }
            }
        });
    }
}

/// Smallest key interval containing every cell of an in-domain box.
fn key_hull(bounds: &Bounds3) -> (u64, u64) {
    let mut lo = [0u32; 3];
    let mut hi = [0u32; 3];
    for axis in Axis::ALL {
        let i = axis.index();
        for (n, (a, b)) in axis_parts(bounds.min[i], bounds.max[i]).into_iter().enumerate() {
            lo[i] = if n == 0 { a } else { lo[i].min(a) };
            hi[i] = if n == 0 { b } else { hi[i].max(b) };
        }
    }
    (morton::encode_raw(lo), morton::encode_raw(hi))
}
