//! Reusable write sequences for grid tests.
//!
//! Each fixture is a list of [`Write`]s that can be replayed against any
//! [`Grid`] with [`apply`]. All fixtures stay within a few thousand
//! cells so the [`HashGrid`](crate::HashGrid) oracle can replay them too.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zgrid_core::{Bounds3, Coord3, Grid, GridError};

/// One grid mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum Write<V> {
    Cell(Coord3, Option<V>),
    Block(Bounds3, Option<V>),
}

/// Replay `writes` against `grid` in order.
pub fn apply<V, G>(grid: &mut G, writes: &[Write<V>]) -> Result<(), GridError>
where
    V: Clone,
    G: Grid<V>,
{
    for w in writes {
        match w {
            Write::Cell([x, y, z], v) => {
                grid.set(*x, *y, *z, v.clone())?;
            }
            Write::Block(b, v) => {
                grid.set_block(*b, v.clone())?;
            }
        }
    }
    Ok(())
}

/// The 2×2×1 square at the origin, written one cell at a time.
pub fn origin_square() -> Vec<Write<u32>> {
    [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]]
        .into_iter()
        .map(|c| Write::Cell(c, Some(1)))
        .collect()
}

/// A 10×10×10 cube centred on the origin, crossing every sign boundary.
pub fn straddling_cube() -> Vec<Write<u32>> {
    vec![Write::Block(Bounds3::new([-5, -5, -5], [4, 4, 4]), Some(1))]
}

/// An 8×8×8 cube with its 4×4×4 core removed and one face repainted.
pub fn punctured_cube() -> Vec<Write<u32>> {
    vec![
        Write::Block(Bounds3::new([0, 0, 0], [7, 7, 7]), Some(1)),
        Write::Block(Bounds3::new([2, 2, 2], [5, 5, 5]), None),
        Write::Block(Bounds3::new([0, 0, 7], [7, 7, 7]), Some(2)),
    ]
}

/// Horizontal layers of alternating values, offset into negative space.
pub fn layered_slab() -> Vec<Write<u32>> {
    (-3..=3)
        .map(|z| {
            Write::Block(
                Bounds3::new([-6, -4, z], [5, 3, z]),
                Some((z.rem_euclid(2)) as u32),
            )
        })
        .collect()
}

/// `count` random single-cell writes and deletes within `-extent..extent`
/// on each axis. Values are drawn from `0..4` so neighbours often match.
pub fn scatter(seed: u64, count: usize, extent: i32) -> Vec<Write<u32>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let span = (2 * extent).max(1) as u64;
    let coord = |rng: &mut ChaCha8Rng| (rng.next_u64() % span) as i32 - extent;
    (0..count)
        .map(|_| {
            let c = [coord(&mut rng), coord(&mut rng), coord(&mut rng)];
            let roll = rng.next_u64() % 5;
            let v = if roll == 4 { None } else { Some(roll as u32) };
            Write::Cell(c, v)
        })
        .collect()
}

/// Every named fixture, for table-driven tests.
pub fn all() -> Vec<(&'static str, Vec<Write<u32>>)> {
    vec![
        ("origin_square", origin_square()),
        ("straddling_cube", straddling_cube()),
        ("punctured_cube", punctured_cube()),
        ("layered_slab", layered_slab()),
        ("scatter", scatter(0x2545_f491, 400, 6)),
    ]
}
