//! Invariant-check errors reported by [`SpatialTreap::validate`](crate::SpatialTreap::validate).

use std::fmt;

/// A structural invariant that does not hold.
///
/// Only produced by `validate()`, which tests call after mutations.
/// Production paths never construct these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A node has `lo > hi`.
    EmptyRange {
        /// Node lower bound.
        lo: u64,
        /// Node upper bound.
        hi: u64,
    },
    /// A node's range is not strictly between its ancestors' bounds.
    OrderViolation {
        /// Lower bound of the misplaced node.
        lo: u64,
    },
    /// A child's priority exceeds its parent's.
    HeapViolation {
        /// Lower bound of the parent.
        parent_lo: u64,
        /// Lower bound of the child.
        child_lo: u64,
    },
    /// Two key-adjacent nodes hold equal values.
    UnmergedNeighbours {
        /// Upper bound of the first node (the second starts one key later).
        boundary: u64,
    },
    /// A node extends past the largest curve key.
    KeyOutOfDomain {
        /// The node's upper bound.
        hi: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRange { lo, hi } => write!(f, "node range {lo:#x}..={hi:#x} is empty"),
            Self::OrderViolation { lo } => write!(f, "node at {lo:#x} breaks key order"),
            Self::HeapViolation {
                parent_lo,
                child_lo,
            } => write!(
                f,
                "child {child_lo:#x} outranks parent {parent_lo:#x} in priority"
            ),
            Self::UnmergedNeighbours { boundary } => {
                write!(f, "equal-valued nodes meet unmerged after {boundary:#x}")
            }
            Self::KeyOutOfDomain { hi } => write!(f, "node ends beyond key domain at {hi:#x}"),
        }
    }
}

impl std::error::Error for ValidationError {}
