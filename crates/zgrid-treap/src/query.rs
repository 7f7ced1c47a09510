//! Point lookups and ordered node access.

use crate::node::{self, RangeNode};
use crate::treap::SpatialTreap;

impl<V> SpatialTreap<V> {
    /// Value stored at `(x, y, z)`, if any.
    ///
    /// Under [`CoordPolicy::Reject`](crate::CoordPolicy::Reject) a
    /// coordinate outside the codec domain is never stored, so this
    /// returns `None`.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<&V> {
        let key = self.read_key([x, y, z])?;
        self.get_key(key)
    }

    /// Value stored at curve key `key`, if any.
    pub fn get_key(&self, key: u64) -> Option<&V> {
        node::find(&self.root, key).map(|n| &n.value)
    }

    /// The node covering the smallest stored key.
    pub fn first_node(&self) -> Option<&RangeNode<V>> {
        node::first(&self.root)
    }

    /// The node with the smallest `lo` strictly greater than `after`.
    ///
    /// Walking `first_node` then `next_node(prev.hi())` visits every node
    /// in key order without allocating.
    pub fn next_node(&self, after: u64) -> Option<&RangeNode<V>> {
        node::next_after(&self.root, after)
    }
}
