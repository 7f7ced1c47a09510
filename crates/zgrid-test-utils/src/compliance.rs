//! Grid contract compliance checks.
//!
//! These functions verify that a [`Grid`] implementation honours the
//! contract: reads agree with a [`HashGrid`] oracle, visited blocks tile
//! the stored cells exactly, bounded visits clip, and `clear` empties.
//! Reused by every backend's test suite.

use crate::fixtures::{self, Write};
use crate::{BlockCollector, HashGrid};
use std::fmt::Debug;
use zgrid_core::{Bounds3, Grid, GridError};

/// Smallest box containing every cell touched by `writes`.
pub fn write_hull<V>(writes: &[Write<V>]) -> Option<Bounds3> {
    writes
        .iter()
        .map(|w| match w {
            Write::Cell(c, _) => Bounds3::cell(*c),
            Write::Block(b, _) => *b,
        })
        .reduce(|a, b| {
            Bounds3::new(
                [0, 1, 2].map(|i| a.min[i].min(b.min[i])),
                [0, 1, 2].map(|i| a.max[i].max(b.max[i])),
            )
        })
}

/// Assert that every cell of `region` reads the same from `grid` and
/// `oracle`, and that both hold the same number of cells.
pub fn assert_matches_oracle<V, G>(grid: &G, oracle: &HashGrid<V>, region: &Bounds3)
where
    V: Clone + PartialEq + Debug,
    G: Grid<V>,
{
    for x in region.min[0]..=region.max[0] {
        for y in region.min[1]..=region.max[1] {
            for z in region.min[2]..=region.max[2] {
                assert_eq!(
                    grid.get(x, y, z),
                    oracle.get(x, y, z),
                    "cell ({x}, {y}, {z}) disagrees with oracle"
                );
            }
        }
    }
    assert_eq!(
        grid.count_non_null(),
        oracle.count_non_null(),
        "count_non_null ({}) != oracle ({})",
        grid.count_non_null(),
        oracle.count_non_null()
    );
}

/// Assert that `visit_blocks` reports disjoint blocks covering exactly
/// the stored cells, each with the stored value.
pub fn assert_blocks_cover_contents<V, G>(grid: &G)
where
    V: Clone + PartialEq + Debug,
    G: Grid<V>,
{
    let mut c = BlockCollector::new();
    grid.visit_blocks(&mut c);
    assert_eq!(
        c.volume(),
        grid.count_non_null(),
        "visited volume != count_non_null"
    );
    for (cell, v) in c.cell_map() {
        let [x, y, z] = cell;
        assert_eq!(grid.get(x, y, z), Some(&v), "block value at {cell:?}");
    }
}

/// Assert that `visit_blocks_in(bounds)` reports only cells inside
/// `bounds` and every stored cell inside it.
pub fn assert_visit_in_clips<V, G>(grid: &G, bounds: &Bounds3)
where
    V: Clone + PartialEq + Debug,
    G: Grid<V>,
{
    let mut c = BlockCollector::new();
    grid.visit_blocks_in(bounds, &mut c);
    for (b, _) in &c.blocks {
        assert_eq!(
            b.intersect(bounds),
            Some(*b),
            "block {b} leaks outside {bounds}"
        );
    }
    let mut stored = 0u64;
    for x in bounds.min[0]..=bounds.max[0] {
        for y in bounds.min[1]..=bounds.max[1] {
            for z in bounds.min[2]..=bounds.max[2] {
                if grid.get(x, y, z).is_some() {
                    stored += 1;
                }
            }
        }
    }
    assert_eq!(c.cell_map().len() as u64, stored, "clipped visit volume");
}

/// Assert that pasting `src` into a fresh grid reproduces its cells.
pub fn assert_paste_reproduces<V, G, H>(src: &G, mut dst: H)
where
    V: Clone + PartialEq + Debug,
    G: Grid<V>,
    H: Grid<V>,
{
    dst.paste(src).expect("paste of in-domain blocks succeeds");
    let mut a = BlockCollector::new();
    src.visit_blocks(&mut a);
    let mut b = BlockCollector::new();
    dst.visit_blocks(&mut b);
    let (mut a, mut b): (Vec<_>, Vec<_>) = (
        a.cell_map().into_iter().collect(),
        b.cell_map().into_iter().collect(),
    );
    a.sort_by_key(|(c, _)| *c);
    b.sort_by_key(|(c, _)| *c);
    assert_eq!(a, b, "pasted cells differ from source");
}

/// Assert that a box with `min > max` is refused.
pub fn assert_inverted_bounds_rejected<V, G>(grid: &mut G, value: V)
where
    V: Clone,
    G: Grid<V>,
{
    let bounds = Bounds3::new([1, 0, 0], [0, 0, 0]);
    let err = grid.set_block(bounds, Some(value)).err();
    assert_eq!(err, Some(GridError::InvalidBounds { bounds }));
}

/// Assert that `clear` leaves nothing behind.
pub fn assert_clear_empties<V, G>(grid: &mut G)
where
    V: Clone,
    G: Grid<V>,
{
    grid.clear();
    assert_eq!(grid.count_non_null(), 0);
    assert_eq!(grid.count_nodes(), 0);
    let mut c = BlockCollector::new();
    grid.visit_blocks(&mut c);
    assert!(c.blocks.is_empty(), "blocks survive clear");
}

/// Run every check against grids built by `make`, once per fixture.
pub fn run_full_compliance<G, M>(make: M)
where
    G: Grid<u32>,
    M: Fn() -> G,
{
    for (name, writes) in fixtures::all() {
        let mut grid = make();
        let mut oracle = HashGrid::new();
        fixtures::apply(&mut grid, &writes)
            .unwrap_or_else(|e| panic!("fixture {name}: {e}"));
        fixtures::apply(&mut oracle, &writes)
            .unwrap_or_else(|e| panic!("fixture {name}: {e}"));

        let Some(hull) = write_hull(&writes) else {
            continue;
        };
        let margin = Bounds3::new(
            hull.min.map(|v| v - 1),
            hull.max.map(|v| v + 1),
        );
        assert_matches_oracle(&grid, &oracle, &margin);
        assert_blocks_cover_contents(&grid);
        let half = Bounds3::new(hull.min, [hull.max[0], hull.max[1], (hull.min[2] + hull.max[2]) / 2]);
        assert_visit_in_clips(&grid, &half);
        assert_paste_reproduces(&grid, HashGrid::new());
        assert_inverted_bounds_rejected(&mut grid, 0);
        assert_clear_empties(&mut grid);
    }
}
