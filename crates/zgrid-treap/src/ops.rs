//! Whole-tree operations: cloning, equality, dilation, value
//! substitution, and subtraction.

use crate::block::{box_ranges, DOMAIN};
use crate::node;
use crate::trace::debug_log;
use crate::treap::SpatialTreap;
use zgrid_core::{Axis, Bounds3};

impl<V: Clone> SpatialTreap<V> {
    /// Independent copy of every node.
    ///
    /// The copy also carries a copy of the priority generator, so both
    /// trees keep drawing the same priority sequence.
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}

impl<V: Clone + PartialEq> SpatialTreap<V> {
    /// Dilate every stored region by one cell along each axis.
    ///
    /// Axes are processed x, y, z in turn; each pass overlays copies of
    /// the previous pass shifted by -1 then +1. Where shifted copies
    /// overlap a different value, the later write wins. Cells pushed past
    /// the coordinate domain are dropped.
    pub fn expand(&mut self) -> &mut Self {
        debug_log!("expand: {} nodes before", self.count_nodes());
        for axis in Axis::ALL {
            let source = self.clone();
            for delta in [-1, 1] {
                let offset = axis.offset(delta);
                source.visit_blocks(&mut |b: &Bounds3, v: &V| {
                    let Some(moved) = b.translate(offset).intersect(&DOMAIN) else {
                        return;
                    };
                    for (lo, hi) in box_ranges(&moved) {
                        self.put_range(lo, hi, Some(v.clone()));
                    }
                });
            }
        }
        debug_log!("expand: {} nodes after", self.count_nodes());
        self
    }

    /// Replace every occurrence of `from` with `to`; `None` deletes those
    /// cells. Returns the number of ranges that held `from`.
    ///
    /// Node bounds are kept and neighbours that become equal are merged.
    pub fn change_all(&mut self, from: &V, to: Option<V>) -> usize {
        let Some(to) = to else {
            let doomed: Vec<(u64, u64)> = self
                .ranges()
                .filter(|n| n.value == *from)
                .map(|n| (n.lo, n.hi))
                .collect();
            debug_log!("change_all: deleting {} ranges", doomed.len());
            for &(lo, hi) in &doomed {
                self.remove_range(lo, hi);
            }
            return doomed.len();
        };
        let mut boundaries = Vec::new();
        node::for_each_value_mut(&mut self.root, &mut |lo, hi, v: &mut V| {
            if *v == *from {
                *v = to.clone();
                boundaries.push(lo);
                boundaries.push(hi + 1);
            }
        });
        let changed = boundaries.len() / 2;
        debug_log!("change_all: rewrote {} ranges", changed);
        for b in boundaries {
            self.try_merge(b);
        }
        changed
    }

    /// Give every stored cell the value `to`; `None` clears the tree.
    pub fn change_all_to(&mut self, to: Option<V>) -> &mut Self {
        let Some(to) = to else {
            return self.clear();
        };
        let mut boundaries = Vec::new();
        node::for_each_value_mut(&mut self.root, &mut |_, hi, v: &mut V| {
            *v = to.clone();
            boundaries.push(hi + 1);
        });
        debug_log!("change_all_to: merging across {} boundaries", boundaries.len());
        for b in boundaries {
            self.try_merge(b);
        }
        self
    }

    /// Remove every key that `other` stores, whatever its value.
    pub fn bulk_delete<W>(&mut self, other: &SpatialTreap<W>) -> &mut Self {
        debug_log!("bulk_delete: subtracting {} ranges", other.count_nodes());
        for n in other.ranges() {
            self.remove_range(n.lo, n.hi);
        }
        self
    }
}

impl<V: PartialEq> PartialEq for SpatialTreap<V> {
    /// Same ranges with the same values; priorities and tree shape are
    /// ignored.
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.first_node();
        let mut b = other.first_node();
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if x.lo != y.lo || x.hi != y.hi || x.value != y.value {
                        return false;
                    }
                    a = self.next_node(x.hi);
                    b = other.next_node(y.hi);
                }
                _ => return false,
            }
        }
    }
}

impl<V: Eq> Eq for SpatialTreap<V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn treap() -> SpatialTreap<u8> {
        SpatialTreap::with_seed(0xabc)
    }

    // ── Clone / equality ────────────────────────────────────────

    #[test]
    fn clone_is_independent() {
        let mut a = treap();
        a.set_block(Bounds3::new([0, 0, 0], [3, 3, 3]), Some(1)).unwrap();
        let mut b = a.deep_clone();
        assert_eq!(a, b);
        b.set(1, 1, 1, Some(2)).unwrap();
        assert_eq!(a.get(1, 1, 1), Some(&1));
        assert_ne!(a, b);
    }

    #[test]
    fn equality_ignores_shape() {
        let mut a = SpatialTreap::with_seed(1);
        let mut b = SpatialTreap::with_seed(2);
        for x in 0..20 {
            a.set(x * 2, 0, 0, Some(x as u8)).unwrap();
        }
        for x in (0..20).rev() {
            b.set(x * 2, 0, 0, Some(x as u8)).unwrap();
        }
        assert_eq!(a, b);
    }

    // ── Expand ──────────────────────────────────────────────────

    #[test]
    fn expand_single_cell_fills_cube() {
        let mut t = treap();
        t.set(0, 0, 0, Some(1)).unwrap();
        t.expand();
        assert_eq!(t.count_non_null(), 27);
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    assert_eq!(t.get(x, y, z), Some(&1));
                }
            }
        }
        assert_eq!(t.get(2, 0, 0), None);
        t.validate().unwrap();
    }

    #[test]
    fn expand_clips_at_domain_edge() {
        use crate::morton::MAX_COORD;
        let mut t = treap();
        t.set(MAX_COORD, 0, 0, Some(1)).unwrap();
        t.expand();
        assert_eq!(t.count_non_null(), 18);
        t.validate().unwrap();
    }

    #[test]
    fn expand_later_write_wins() {
        let mut t = treap();
        t.set(0, 0, 0, Some(1)).unwrap();
        t.set(2, 0, 0, Some(2)).unwrap();
        t.expand();
        // x = 1 takes 2 from the -1 shift, then 1 from the +1 shift.
        assert_eq!(t.get(1, 0, 0), Some(&1));
        t.validate().unwrap();
    }

    // ── Value substitution ──────────────────────────────────────

    #[test]
    fn change_all_merges_new_neighbours() {
        let mut t = treap();
        t.set_range(0, 9, Some(1)).unwrap();
        t.set_range(10, 19, Some(2)).unwrap();
        t.set_range(20, 29, Some(1)).unwrap();
        assert_eq!(t.change_all(&2, Some(1)), 1);
        assert_eq!(t.count_nodes(), 1);
        assert_eq!(t.count_non_null(), 30);
        t.validate().unwrap();
    }

    #[test]
    fn change_all_to_none_deletes_matches() {
        let mut t = treap();
        t.set_range(0, 9, Some(1)).unwrap();
        t.set_range(10, 19, Some(2)).unwrap();
        t.set_range(30, 39, Some(2)).unwrap();
        assert_eq!(t.change_all(&2, None), 2);
        assert_eq!(t.count_non_null(), 10);
        assert_eq!(t.get_key(15), None);
    }

    #[test]
    fn change_all_to_unifies_everything() {
        let mut t = treap();
        t.set_range(0, 9, Some(1)).unwrap();
        t.set_range(10, 19, Some(2)).unwrap();
        t.set_range(25, 29, Some(3)).unwrap();
        t.change_all_to(Some(7));
        let spans: Vec<_> = t.ranges().map(|n| (n.lo, n.hi, n.value)).collect();
        assert_eq!(spans, vec![(0, 19, 7), (25, 29, 7)]);
        t.validate().unwrap();
        t.change_all_to(None);
        assert!(t.is_empty());
    }

    // ── Subtraction ─────────────────────────────────────────────

    #[test]
    fn bulk_delete_subtracts_regions() {
        let mut t = treap();
        t.set_block(Bounds3::new([0, 0, 0], [3, 3, 3]), Some(1)).unwrap();
        let mut hole: SpatialTreap<()> = SpatialTreap::with_seed(4);
        hole.set_block(Bounds3::new([1, 1, 1], [2, 2, 2]), Some(())).unwrap();
        t.bulk_delete(&hole);
        assert_eq!(t.count_non_null(), 64 - 8);
        assert_eq!(t.get(1, 2, 1), None);
        assert_eq!(t.get(0, 0, 0), Some(&1));
        t.validate().unwrap();
    }
}
