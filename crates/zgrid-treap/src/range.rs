//! Key-range writes: overwrite, delete, and merge-on-write.

use crate::morton::KEY_MAX;
use crate::node::{self, RangeNode};
use crate::trace::trace_log;
use crate::treap::SpatialTreap;
use zgrid_core::GridError;

impl<V: Clone + PartialEq> SpatialTreap<V> {
    /// Map every key in `lo..=hi` to `value`; `None` deletes them.
    ///
    /// Afterwards no two key-adjacent nodes hold equal values.
    pub fn set_range(&mut self, lo: u64, hi: u64, value: Option<V>) -> Result<(), GridError> {
        check_range(lo, hi)?;
        self.put_range(lo, hi, value);
        Ok(())
    }

    /// Remove every key in `lo..=hi`.
    pub fn delete_range(&mut self, lo: u64, hi: u64) -> Result<(), GridError> {
        check_range(lo, hi)?;
        self.remove_range(lo, hi);
        Ok(())
    }

    /// [`set_range`](Self::set_range) on an already checked range.
    pub(crate) fn put_range(&mut self, lo: u64, hi: u64, value: Option<V>) {
        match value {
            Some(value) => self.write_range(lo, hi, value),
            None => self.remove_range(lo, hi),
        }
    }

    fn write_range(&mut self, lo: u64, hi: u64, value: V) {
        let absorb = node::first_overlap(&self.root, lo, hi)
            .map(|n| (n.lo, n.hi, n.value == value || (lo <= n.lo && n.hi <= hi)));

        match absorb {
            Some((n_lo, n_hi, true)) => {
                // Stretch the first overlapping node over the whole range.
                // Nothing lies in lo..n_lo, so only the tail needs clearing.
                if hi > n_hi {
                    self.remove_range(n_hi + 1, hi);
                }
                let new_lo = lo.min(n_lo);
                let new_hi = hi.max(n_hi);
                if let Some(n) = node::find_mut(&mut self.root, n_lo) {
                    n.lo = new_lo;
                    n.hi = new_hi;
                    n.value = value;
                }
                self.try_merge(new_lo);
                self.try_merge(new_hi + 1);
            }
            Some(_) => {
                self.remove_range(lo, hi);
                self.insert_fresh(lo, hi, value);
            }
            None => self.insert_fresh(lo, hi, value),
        }
    }

    fn insert_fresh(&mut self, lo: u64, hi: u64, value: V) {
        let priority = self.next_priority();
        let fresh = RangeNode::boxed(lo, hi, value, priority);
        self.root = node::insert(self.root.take(), fresh);
        self.try_merge(lo);
        self.try_merge(hi + 1);
    }

    /// Merge the node ending at `boundary - 1` with the node starting at
    /// `boundary` if their values are equal.
    pub(crate) fn try_merge(&mut self, boundary: u64) {
        if boundary == 0 || boundary > KEY_MAX {
            return;
        }
        let mergeable = match (
            node::find(&self.root, boundary - 1),
            node::find(&self.root, boundary),
        ) {
            (Some(a), Some(b)) => a.hi == boundary - 1 && b.lo == boundary && a.value == b.value,
            _ => false,
        };
        if !mergeable {
            return;
        }
        let (root, removed) = node::remove(self.root.take(), boundary);
        self.root = root;
        if let Some(b) = removed {
            trace_log!("merge at {:#x}: absorbing up to {:#x}", boundary, b.hi);
            if let Some(a) = node::find_mut(&mut self.root, boundary - 1) {
                a.hi = b.hi;
            }
        }
    }

    /// Remove every key in `lo..=hi`, splitting a node that strictly
    /// contains the range into two.
    pub(crate) fn remove_range(&mut self, lo: u64, hi: u64) {
        let hole = node::find(&self.root, lo)
            .filter(|n| n.lo < lo && n.hi > hi)
            .map(|n| n.hi);
        if let Some(old_hi) = hole {
            trace_log!("split {:#x}..={:#x} around a hole", lo, hi);
            let priority = self.next_priority();
            let tail_value = match node::find_mut(&mut self.root, lo) {
                Some(n) => {
                    n.hi = lo - 1;
                    n.value.clone()
                }
                None => return,
            };
            let tail = RangeNode::boxed(hi + 1, old_hi, tail_value, priority);
            self.root = node::insert(self.root.take(), tail);
            return;
        }
        self.root = node::clear_span(self.root.take(), lo, hi);
    }
}

fn check_range(lo: u64, hi: u64) -> Result<(), GridError> {
    if lo > hi {
        return Err(GridError::InvalidRange { lo, hi });
    }
    if hi > KEY_MAX {
        return Err(GridError::KeyOutOfDomain { key: hi, max: KEY_MAX });
    }
    Ok(())
}
