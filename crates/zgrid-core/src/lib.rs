//! Core types and traits for the zgrid workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by every grid backend: 3-D
//! coordinates and boxes, the [`Grid`] contract, block visitors, and
//! error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod grid;

pub use coord::{Axis, Bounds3, Coord3};
pub use error::GridError;
pub use grid::{BlockVisitor, Grid};
