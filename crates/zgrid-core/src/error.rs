//! Error types for grid operations.

use crate::coord::{Axis, Bounds3};
use std::error::Error;
use std::fmt;

/// Errors arising from grid writes and range primitives.
///
/// Reads never fail: a missing cell is reported as `None`, not as an
/// error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A key range was passed with `lo > hi`.
    InvalidRange {
        /// Lower bound as passed.
        lo: u64,
        /// Upper bound as passed.
        hi: u64,
    },
    /// A curve key lies above the largest encodable key.
    KeyOutOfDomain {
        /// The offending key.
        key: u64,
        /// Largest valid key.
        max: u64,
    },
    /// A coordinate lies outside the encodable domain.
    CoordinateOutOfRange {
        /// Axis of the offending component.
        axis: Axis,
        /// The offending value.
        value: i32,
        /// Smallest valid value.
        min: i32,
        /// Largest valid value.
        max: i32,
    },
    /// A box has `min > max` on some axis.
    InvalidBounds {
        /// The offending box.
        bounds: Bounds3,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { lo, hi } => {
                write!(f, "invalid key range: lo {lo:#x} > hi {hi:#x}")
            }
            Self::KeyOutOfDomain { key, max } => {
                write!(f, "key {key:#x} exceeds maximum {max:#x}")
            }
            Self::CoordinateOutOfRange {
                axis,
                value,
                min,
                max,
            } => {
                write!(f, "{axis} coordinate {value} outside [{min}, {max}]")
            }
            Self::InvalidBounds { bounds } => {
                write!(f, "invalid bounds {bounds}: min exceeds max")
            }
        }
    }
}

impl Error for GridError {}
