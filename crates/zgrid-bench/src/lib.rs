//! Benchmark profiles and utilities for the zgrid treap.
//!
//! - [`terrain_profile`]: a 256×256 height field of stacked columns
//! - [`random_cells`]: deterministic scattered coordinates via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zgrid_core::{Bounds3, Coord3, GridError};
use zgrid_treap::SpatialTreap;

/// Side length of the terrain profile, in cells.
pub const TERRAIN_SIDE: i32 = 256;

/// Build a terrain-like grid: every `(x, y)` column is filled from
/// `z = -16` up to a height derived from `seed`, stone below dirt.
///
/// Columns are written as boxes, so this also exercises `set_block`.
pub fn terrain_profile(seed: u64) -> Result<SpatialTreap<u8>, GridError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut t = SpatialTreap::with_seed(seed);
    let half = TERRAIN_SIDE / 2;
    for x in -half..half {
        for y in -half..half {
            let height = (rng.next_u32() % 8) as i32;
            let column = Bounds3::new([x, y, -16], [x, y, height]);
            let dirt = Bounds3::new([x, y, height - 2], [x, y, height]);
            t.set_block(column, Some(1))?.set_block(dirt, Some(2))?;
        }
    }
    Ok(t)
}

/// `n` coordinates drawn uniformly from `-extent..extent` on each axis.
pub fn random_cells(seed: u64, n: usize, extent: i32) -> Vec<Coord3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let span = (2 * extent).max(1) as u32;
    (0..n)
        .map(|_| {
            [0; 3].map(|_: i32| (rng.next_u32() % span) as i32 - extent)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_cells_deterministic_and_bounded() {
        let a = random_cells(42, 100, 10);
        assert_eq!(a, random_cells(42, 100, 10));
        assert!(a.iter().flatten().all(|v| (-10..10).contains(v)));
    }

    #[test]
    fn terrain_profile_is_valid() {
        let t = terrain_profile(7).unwrap();
        t.validate().unwrap();
        assert!(t.count_non_null() >= (TERRAIN_SIDE * TERRAIN_SIDE * 15) as u64);
        assert_eq!(t.get(0, 0, -16), Some(&1));
    }
}
