//! Range nodes and treap primitives over owned subtrees.
//!
//! Every mutating primitive takes a subtree by value and returns its
//! replacement, so no node is ever modified through a borrowed parent
//! link. Lookups descend with plain references.
//!
//! Callers uphold the order invariant: ranges handed to [`insert`] never
//! overlap a range already in the tree.

use crate::error::ValidationError;
use crate::morton::KEY_MAX;
use smallvec::SmallVec;

/// Owned, optional subtree.
pub(crate) type Link<V> = Option<Box<RangeNode<V>>>;

/// A maximal run of curve keys `lo..=hi` that all map to `value`.
#[derive(Clone, Debug)]
pub struct RangeNode<V> {
    pub(crate) lo: u64,
    pub(crate) hi: u64,
    pub(crate) value: V,
    pub(crate) priority: u64,
    pub(crate) left: Link<V>,
    pub(crate) right: Link<V>,
}

impl<V> RangeNode<V> {
    pub(crate) fn boxed(lo: u64, hi: u64, value: V, priority: u64) -> Box<Self> {
        debug_assert!(lo <= hi);
        Box::new(Self {
            lo,
            hi,
            value,
            priority,
            left: None,
            right: None,
        })
    }

    /// First key of the run.
    pub fn lo(&self) -> u64 {
        self.lo
    }

    /// Last key of the run (inclusive).
    pub fn hi(&self) -> u64 {
        self.hi
    }

    /// Value shared by every key in the run.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Number of keys in the run.
    pub fn len(&self) -> u64 {
        self.hi - self.lo + 1
    }

    /// Always `false`: a live node covers at least one key.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `true` if `key` lies in `lo..=hi`.
    pub fn contains(&self, key: u64) -> bool {
        self.lo <= key && key <= self.hi
    }
}

/// Which way a rotation turns the parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Rotation {
    /// The right child rises; the parent becomes its left child.
    Left,
    /// The left child rises; the parent becomes its right child.
    Right,
}

/// Single rotation at `parent`. Key order is preserved.
///
/// Rotating toward a missing child returns `parent` unchanged.
pub(crate) fn rotate<V>(mut parent: Box<RangeNode<V>>, toward: Rotation) -> Box<RangeNode<V>> {
    match toward {
        Rotation::Left => match parent.right.take() {
            Some(mut child) => {
                parent.right = child.left.take();
                child.left = Some(parent);
                child
            }
            None => parent,
        },
        Rotation::Right => match parent.left.take() {
            Some(mut child) => {
                parent.left = child.right.take();
                child.right = Some(parent);
                child
            }
            None => parent,
        },
    }
}

/// Insert `node` as a leaf, then rotate it up while it outranks its parent.
pub(crate) fn insert<V>(link: Link<V>, node: Box<RangeNode<V>>) -> Link<V> {
    let Some(mut cur) = link else {
        return Some(node);
    };
    if node.hi < cur.lo {
        cur.left = insert(cur.left.take(), node);
        if cur.left.as_ref().is_some_and(|l| l.priority > cur.priority) {
            cur = rotate(cur, Rotation::Right);
        }
    } else {
        debug_assert!(node.lo > cur.hi, "inserted range overlaps {:#x}", cur.lo);
        cur.right = insert(cur.right.take(), node);
        if cur.right.as_ref().is_some_and(|r| r.priority > cur.priority) {
            cur = rotate(cur, Rotation::Left);
        }
    }
    Some(cur)
}

/// Concatenate two subtrees where every key of `a` is below every key of `b`.
///
/// The higher-priority root is promoted at each step.
pub(crate) fn join<V>(a: Link<V>, b: Link<V>) -> Link<V> {
    match (a, b) {
        (None, b) => b,
        (a, None) => a,
        (Some(mut a), Some(mut b)) => {
            if a.priority >= b.priority {
                a.right = join(a.right.take(), Some(b));
                Some(a)
            } else {
                b.left = join(Some(a), b.left.take());
                Some(b)
            }
        }
    }
}

/// Unlink the node starting at `lo`.
///
/// Returns the new subtree and the detached node (childless), if found.
pub(crate) fn remove<V>(link: Link<V>, lo: u64) -> (Link<V>, Link<V>) {
    let Some(mut cur) = link else {
        return (None, None);
    };
    if lo < cur.lo {
        let (left, removed) = remove(cur.left.take(), lo);
        cur.left = left;
        (Some(cur), removed)
    } else if lo > cur.lo {
        let (right, removed) = remove(cur.right.take(), lo);
        cur.right = right;
        (Some(cur), removed)
    } else {
        let joined = join(cur.left.take(), cur.right.take());
        (joined, Some(cur))
    }
}

/// Node whose range contains `key`.
pub(crate) fn find<V>(link: &Link<V>, key: u64) -> Option<&RangeNode<V>> {
    let mut cur = link.as_deref();
    while let Some(node) = cur {
        if key < node.lo {
            cur = node.left.as_deref();
        } else if key > node.hi {
            cur = node.right.as_deref();
        } else {
            return Some(node);
        }
    }
    None
}

/// Mutable [`find`].
pub(crate) fn find_mut<V>(mut link: &mut Link<V>, key: u64) -> Option<&mut RangeNode<V>> {
    while let Some(node) = link {
        if key < node.lo {
            link = &mut node.left;
        } else if key > node.hi {
            link = &mut node.right;
        } else {
            return Some(&mut **node);
        }
    }
    None
}

/// Lowest node intersecting `lo..=hi`.
pub(crate) fn first_overlap<V>(link: &Link<V>, lo: u64, hi: u64) -> Option<&RangeNode<V>> {
    let mut best = None;
    let mut cur = link.as_deref();
    while let Some(node) = cur {
        if node.hi < lo {
            cur = node.right.as_deref();
        } else if node.lo > hi {
            cur = node.left.as_deref();
        } else {
            best = Some(node);
            cur = node.left.as_deref();
        }
    }
    best
}

/// Node with the smallest `lo` strictly greater than `after`.
pub(crate) fn next_after<V>(link: &Link<V>, after: u64) -> Option<&RangeNode<V>> {
    let mut best = None;
    let mut cur = link.as_deref();
    while let Some(node) = cur {
        if node.lo > after {
            best = Some(node);
            cur = node.left.as_deref();
        } else {
            cur = node.right.as_deref();
        }
    }
    best
}

/// Leftmost node.
pub(crate) fn first<V>(link: &Link<V>) -> Option<&RangeNode<V>> {
    let mut cur = link.as_deref()?;
    while let Some(left) = cur.left.as_deref() {
        cur = left;
    }
    Some(cur)
}

/// Remove every key in `lo..=hi` from the subtree.
///
/// Nodes wholly inside are dropped and nodes straddling one edge are
/// trimmed. The caller must already have split any single node that
/// strictly contains `lo..=hi`.
pub(crate) fn clear_span<V>(link: Link<V>, lo: u64, hi: u64) -> Link<V> {
    let mut node = link?;
    if node.hi < lo {
        node.right = clear_span(node.right.take(), lo, hi);
        return Some(node);
    }
    if node.lo > hi {
        node.left = clear_span(node.left.take(), lo, hi);
        return Some(node);
    }
    let left = if lo < node.lo {
        clear_span(node.left.take(), lo, hi)
    } else {
        node.left.take()
    };
    let right = if hi > node.hi {
        clear_span(node.right.take(), lo, hi)
    } else {
        node.right.take()
    };
    if lo <= node.lo && node.hi <= hi {
        return join(left, right);
    }
    debug_assert!(node.lo >= lo || node.hi <= hi, "hole must be split by caller");
    if node.lo < lo {
        node.hi = lo - 1;
    } else {
        node.lo = hi + 1;
    }
    node.left = left;
    node.right = right;
    Some(node)
}

/// Visit every node in key order with mutable access to its value.
///
/// Bounds are not exposed mutably; only values may change.
pub(crate) fn for_each_value_mut<V, F>(link: &mut Link<V>, f: &mut F)
where
    F: FnMut(u64, u64, &mut V),
{
    if let Some(node) = link {
        for_each_value_mut(&mut node.left, f);
        f(node.lo, node.hi, &mut node.value);
        for_each_value_mut(&mut node.right, f);
    }
}

/// Check order, heap, and domain invariants below `link`.
///
/// Keys must lie strictly between `above` and `below` (exclusive
/// bounds inherited from ancestors).
pub(crate) fn check_structure<V>(
    link: &Link<V>,
    above: Option<u64>,
    below: Option<u64>,
) -> Result<(), ValidationError> {
    let Some(node) = link else {
        return Ok(());
    };
    if node.lo > node.hi {
        return Err(ValidationError::EmptyRange {
            lo: node.lo,
            hi: node.hi,
        });
    }
    if node.hi > KEY_MAX {
        return Err(ValidationError::KeyOutOfDomain { hi: node.hi });
    }
    if above.is_some_and(|a| node.lo <= a) || below.is_some_and(|b| node.hi >= b) {
        return Err(ValidationError::OrderViolation { lo: node.lo });
    }
    for child in [&node.left, &node.right].into_iter().flatten() {
        if child.priority > node.priority {
            return Err(ValidationError::HeapViolation {
                parent_lo: node.lo,
                child_lo: child.lo,
            });
        }
    }
    check_structure(&node.left, above, Some(node.lo))?;
    check_structure(&node.right, Some(node.hi), below)
}

/// In-order iterator over the nodes of a subtree.
///
/// Holds the pending left spine on a small inline stack; treap depth is
/// logarithmic in expectation, so it rarely spills to the heap.
pub struct Ranges<'a, V> {
    stack: SmallVec<[&'a RangeNode<V>; 32]>,
}

impl<'a, V> Ranges<'a, V> {
    pub(crate) fn new(link: &'a Link<V>) -> Self {
        let mut it = Self {
            stack: SmallVec::new(),
        };
        it.push_spine(link.as_deref());
        it
    }

    fn push_spine(&mut self, mut cur: Option<&'a RangeNode<V>>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a, V> Iterator for Ranges<'a, V> {
    type Item = &'a RangeNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_spine(node.right.as_deref());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(lo: u64, hi: u64, priority: u64) -> Box<RangeNode<u8>> {
        RangeNode::boxed(lo, hi, 0, priority)
    }

    fn build(nodes: &[(u64, u64, u64)]) -> Link<u8> {
        nodes
            .iter()
            .fold(None, |root, &(lo, hi, p)| insert(root, leaf(lo, hi, p)))
    }

    fn los(link: &Link<u8>) -> Vec<u64> {
        Ranges::new(link).map(|n| n.lo).collect()
    }

    // ── Rotation ────────────────────────────────────────────────

    #[test]
    fn rotate_left_then_right_is_identity() {
        let mut root = leaf(10, 10, 5);
        root.left = Some(leaf(0, 0, 1));
        root.right = Some(leaf(20, 20, 3));
        let rotated = rotate(root, Rotation::Left);
        assert_eq!(rotated.lo, 20);
        assert_eq!(rotated.left.as_ref().map(|n| n.lo), Some(10));
        let back = rotate(rotated, Rotation::Right);
        assert_eq!(back.lo, 10);
        let link = Some(back);
        assert_eq!(los(&link), vec![0, 10, 20]);
    }

    #[test]
    fn rotate_toward_missing_child_is_noop() {
        let root = leaf(4, 4, 1);
        assert_eq!(rotate(root, Rotation::Right).lo, 4);
    }

    // ── Insert / remove ─────────────────────────────────────────

    #[test]
    fn insert_keeps_heap_and_order() {
        let root = build(&[(10, 12, 1), (0, 3, 9), (20, 25, 4), (5, 7, 12), (14, 14, 2)]);
        check_structure(&root, None, None).unwrap();
        assert_eq!(root.as_ref().map(|n| n.lo), Some(5));
        assert_eq!(los(&root), vec![0, 5, 10, 14, 20]);
    }

    #[test]
    fn remove_joins_children_by_priority() {
        let root = build(&[(10, 12, 50), (0, 3, 9), (20, 25, 40), (30, 31, 7)]);
        let (root, removed) = remove(root, 10);
        assert_eq!(removed.map(|n| n.hi), Some(12));
        check_structure(&root, None, None).unwrap();
        assert_eq!(root.as_ref().map(|n| n.lo), Some(20));
        assert_eq!(los(&root), vec![0, 20, 30]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let root = build(&[(10, 12, 1)]);
        let (root, removed) = remove(root, 11);
        assert!(removed.is_none());
        assert_eq!(los(&root), vec![10]);
    }

    // ── Lookup ──────────────────────────────────────────────────

    #[test]
    fn find_and_neighbours() {
        let root = build(&[(10, 12, 1), (0, 3, 9), (20, 25, 4)]);
        assert_eq!(find(&root, 11).map(|n| n.lo), Some(10));
        assert!(find(&root, 13).is_none());
        assert_eq!(next_after(&root, 3).map(|n| n.lo), Some(10));
        assert_eq!(next_after(&root, 10).map(|n| n.lo), Some(20));
        assert!(next_after(&root, 20).is_none());
        assert_eq!(first(&root).map(|n| n.lo), Some(0));
        assert_eq!(first_overlap(&root, 2, 21).map(|n| n.lo), Some(0));
        assert_eq!(first_overlap(&root, 4, 21).map(|n| n.lo), Some(10));
        assert!(first_overlap(&root, 13, 19).is_none());
    }

    #[test]
    fn find_mut_edits_value() {
        let mut root = build(&[(10, 12, 1), (0, 3, 9)]);
        find_mut(&mut root, 2).unwrap().value = 7;
        assert_eq!(find(&root, 0).map(|n| n.value), Some(7));
    }

    // ── Span clearing ───────────────────────────────────────────

    #[test]
    fn clear_span_trims_and_drops() {
        let root = build(&[(0, 9, 3), (10, 19, 8), (20, 29, 5), (30, 39, 1)]);
        let root = clear_span(root, 5, 24);
        check_structure(&root, None, None).unwrap();
        let spans: Vec<_> = Ranges::new(&root).map(|n| (n.lo, n.hi)).collect();
        assert_eq!(spans, vec![(0, 4), (25, 29), (30, 39)]);
    }

    // ── Validation ──────────────────────────────────────────────

    #[test]
    fn heap_violation_detected() {
        let mut root = leaf(10, 10, 1);
        root.left = Some(leaf(0, 0, 5));
        let link = Some(root);
        assert_eq!(
            check_structure(&link, None, None),
            Err(ValidationError::HeapViolation {
                parent_lo: 10,
                child_lo: 0
            })
        );
    }

    #[test]
    fn order_violation_detected() {
        let mut root = leaf(10, 10, 5);
        root.left = Some(leaf(10, 11, 1));
        let link = Some(root);
        assert_eq!(
            check_structure(&link, None, None),
            Err(ValidationError::OrderViolation { lo: 10 })
        );
    }
}
