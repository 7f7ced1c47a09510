//! Sparse 3-D grid backed by a treap of Morton-key ranges.
//!
//! [`SpatialTreap`] maps integer cells to values. Cells are ordered along
//! a Z-order (Morton) curve and runs of consecutive keys with one value
//! are stored as a single tree node, so large uniform regions stay cheap.
//!
//! # Layers
//!
//! - [`morton`]: 3 × 20-bit coordinate ↔ 60-bit key codec
//! - [`node`]: range nodes and treap primitives over owned subtrees
//! - [`block`]: box ↔ key-range decomposition
//! - [`SpatialTreap`]: range writes with merge-on-write, queries, block
//!   visitation, and whole-tree operations; implements
//!   [`Grid`](zgrid_core::Grid)
//!
//! # Logging
//!
//! Enable the `tracing` feature to emit `tracing` events for node splits,
//! merges, and bulk operations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod trace;

pub mod block;
pub mod config;
pub mod error;
pub mod morton;
pub mod node;
pub mod treap;

mod ops;
mod query;
mod range;

pub use config::{CoordPolicy, TreapConfig};
pub use error::ValidationError;
pub use node::{RangeNode, Ranges};
pub use treap::SpatialTreap;
