//! zgrid: sparse 3-D grids stored as Morton-keyed range treaps.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the zgrid sub-crates. For most users, adding `zgrid` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use zgrid::prelude::*;
//!
//! let mut world: SpatialTreap<&'static str> = SpatialTreap::with_seed(42);
//! world
//!     .set_block(Bounds3::new([-8, -8, -4], [7, 7, -1]), Some("stone"))?
//!     .set_block(Bounds3::new([-8, -8, 0], [7, 7, 0]), Some("grass"))?;
//!
//! assert_eq!(world.get(3, -2, 0), Some(&"grass"));
//! assert_eq!(world.count_non_null(), 16 * 16 * 5);
//!
//! // Stream the stored region as axis-aligned blocks.
//! let mut grass = 0;
//! world.visit_blocks(&mut |b: &Bounds3, v: &&'static str| {
//!     if *v == "grass" {
//!         grass += b.volume();
//!     }
//! });
//! assert_eq!(grass, 256);
//! # Ok::<(), GridError>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not in the
//! prelude:
//!
//! | Module | Crate | Contents |
//! |---|---|---|
//! | [`types`] | `zgrid-core` | Coordinates, boxes, the `Grid` contract, errors |
//! | [`treap`] | `zgrid-treap` | The treap backend, codec, configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`zgrid-core`).
///
/// Contains [`types::Coord3`], [`types::Bounds3`], the [`types::Grid`]
/// contract, [`types::BlockVisitor`], and [`types::GridError`].
pub use zgrid_core as types;

/// The spatial treap backend (`zgrid-treap`).
///
/// [`treap::SpatialTreap`] with its [`treap::TreapConfig`], plus the
/// [`treap::morton`] codec and [`treap::block`] decomposition helpers.
pub use zgrid_treap as treap;

/// Common imports for typical zgrid usage.
///
/// ```rust
/// use zgrid::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use zgrid_core::{Axis, BlockVisitor, Bounds3, Coord3, Grid};

    // Errors
    pub use zgrid_core::GridError;

    // Backend
    pub use zgrid_treap::{CoordPolicy, SpatialTreap, TreapConfig};
}
