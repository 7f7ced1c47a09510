//! The [`SpatialTreap`] type and its [`Grid`] implementation.

use crate::config::{CoordPolicy, TreapConfig};
use crate::error::ValidationError;
use crate::morton::{self, MAX_COORD, MIN_COORD};
use crate::node::{self, Link, Ranges};
use crate::trace::debug_log;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use zgrid_core::{Axis, BlockVisitor, Bounds3, Coord3, Grid, GridError};

/// Sparse map from 3-D cells to values, stored as a treap of Morton-key
/// ranges.
///
/// Cells are keyed by their Z-order curve key. Each tree node holds one
/// maximal run of consecutive keys sharing a value, so storage grows with
/// the number of same-valued runs rather than with the number of cells.
/// Adjacent runs with equal values are merged on every write.
///
/// The tree is balanced by random node priorities drawn from a per-treap
/// generator (see [`TreapConfig::seed`]).
///
/// # Examples
///
/// ```
/// use zgrid_core::Bounds3;
/// use zgrid_treap::SpatialTreap;
///
/// let mut grid = SpatialTreap::with_seed(1);
/// grid.set(0, 0, 0, Some(1)).unwrap();
/// grid.set(1, 0, 0, Some(1)).unwrap();
/// assert_eq!(grid.count_nodes(), 1);
///
/// grid.set_block(Bounds3::new([-5, -5, -5], [4, 4, 4]), Some(2)).unwrap();
/// assert_eq!(grid.count_non_null(), 1000);
/// assert_eq!(grid.get(-5, 4, 0), Some(&2));
/// ```
#[derive(Clone)]
pub struct SpatialTreap<V> {
    pub(crate) root: Link<V>,
    rng: ChaCha8Rng,
    config: TreapConfig,
}

impl<V> SpatialTreap<V> {
    /// Create an empty treap with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreapConfig::default())
    }

    /// Create an empty treap whose priorities derive from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(TreapConfig::new().seed(seed))
    }

    /// Create an empty treap with an explicit configuration.
    pub fn with_config(config: TreapConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        Self {
            root: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    /// The configuration this treap was built with.
    pub fn config(&self) -> &TreapConfig {
        &self.config
    }

    /// `true` if no cell is stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of range nodes.
    pub fn count_nodes(&self) -> usize {
        self.ranges().count()
    }

    /// Number of occupied cells: the summed length of every range.
    pub fn count_non_null(&self) -> u64 {
        self.ranges().map(|n| n.len()).sum()
    }

    /// Drop the whole tree.
    pub fn clear(&mut self) -> &mut Self {
        debug_log!("clear: dropping {} nodes", self.count_nodes());
        self.root = None;
        self
    }

    /// In-order iterator over the range nodes.
    pub fn ranges(&self) -> Ranges<'_, V> {
        Ranges::new(&self.root)
    }

    pub(crate) fn next_priority(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Curve key for a write, or the policy's rejection.
    pub(crate) fn write_key(&self, c: Coord3) -> Result<u64, GridError> {
        self.check_coord(c)?;
        Ok(morton::encode(c[0], c[1], c[2]))
    }

    /// Curve key for a read, or `None` if the coordinate can never be stored.
    pub(crate) fn read_key(&self, c: Coord3) -> Option<u64> {
        self.check_coord(c).ok()?;
        Some(morton::encode(c[0], c[1], c[2]))
    }

    pub(crate) fn check_coord(&self, c: Coord3) -> Result<(), GridError> {
        if self.config.coord_policy == CoordPolicy::Wrap {
            return Ok(());
        }
        for axis in Axis::ALL {
            let value = c[axis.index()];
            if !morton::in_domain(value) {
                return Err(GridError::CoordinateOutOfRange {
                    axis,
                    value,
                    min: MIN_COORD,
                    max: MAX_COORD,
                });
            }
        }
        Ok(())
    }
}

impl<V: PartialEq> SpatialTreap<V> {
    /// Check the order, heap, and maximal-merge invariants.
    ///
    /// Intended for tests; mutators keep these invariants themselves.
    pub fn validate(&self) -> Result<(), ValidationError> {
        node::check_structure(&self.root, None, None)?;
        let mut prev: Option<&node::RangeNode<V>> = None;
        for cur in self.ranges() {
            if let Some(p) = prev {
                if p.hi + 1 == cur.lo && p.value == cur.value {
                    return Err(ValidationError::UnmergedNeighbours { boundary: p.hi });
                }
            }
            prev = Some(cur);
        }
        Ok(())
    }
}

impl<V: Clone + PartialEq> SpatialTreap<V> {
    /// Store `value` at `(x, y, z)`; `None` removes the cell.
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: Option<V>) -> Result<&mut Self, GridError> {
        let key = self.write_key([x, y, z])?;
        self.put_range(key, key, value);
        Ok(self)
    }

    /// Store `value` in every cell of `bounds`; `None` removes them.
    pub fn set_block(&mut self, bounds: Bounds3, value: Option<V>) -> Result<&mut Self, GridError> {
        if !bounds.is_well_formed() {
            return Err(GridError::InvalidBounds { bounds });
        }
        self.check_coord(bounds.min)?;
        self.check_coord(bounds.max)?;
        for (lo, hi) in crate::block::box_ranges(&bounds) {
            self.put_range(lo, hi, value.clone());
        }
        Ok(self)
    }
}

impl<V> Default for SpatialTreap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SpatialTreap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Runs<'a, V>(&'a SpatialTreap<V>);

        impl<V: fmt::Debug> fmt::Debug for Runs<'_, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list()
                    .entries(self.0.ranges().map(|n| (n.lo..=n.hi, &n.value)))
                    .finish()
            }
        }

        f.debug_struct("SpatialTreap")
            .field("config", &self.config)
            .field("ranges", &Runs(self))
            .finish()
    }
}

impl<V: Clone + PartialEq> Grid<V> for SpatialTreap<V> {
    fn get(&self, x: i32, y: i32, z: i32) -> Option<&V> {
        SpatialTreap::get(self, x, y, z)
    }

    fn set(&mut self, x: i32, y: i32, z: i32, value: Option<V>) -> Result<&mut Self, GridError> {
        SpatialTreap::set(self, x, y, z, value)
    }

    fn set_block(&mut self, bounds: Bounds3, value: Option<V>) -> Result<&mut Self, GridError> {
        SpatialTreap::set_block(self, bounds, value)
    }

    fn clear(&mut self) -> &mut Self {
        SpatialTreap::clear(self)
    }

    fn count_nodes(&self) -> usize {
        SpatialTreap::count_nodes(self)
    }

    fn count_non_null(&self) -> u64 {
        SpatialTreap::count_non_null(self)
    }

    fn visit_blocks<F>(&self, visitor: &mut F)
    where
        F: BlockVisitor<V> + ?Sized,
    {
        SpatialTreap::visit_blocks(self, visitor)
    }

    fn visit_blocks_in<F>(&self, bounds: &Bounds3, visitor: &mut F)
    where
        F: BlockVisitor<V> + ?Sized,
    {
        SpatialTreap::visit_blocks_in(self, bounds, visitor)
    }
}
