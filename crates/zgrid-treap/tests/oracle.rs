//! Randomised operation sequences checked against the `HashGrid` oracle.

use proptest::prelude::*;
use zgrid_core::{Bounds3, Grid};
use zgrid_test_utils::{compliance, BlockCollector, HashGrid};
use zgrid_treap::SpatialTreap;

const EXTENT: i32 = 6;

#[derive(Clone, Debug)]
enum Op {
    Set([i32; 3], Option<u8>),
    Block([i32; 3], [i32; 3], Option<u8>),
}

fn coord() -> impl Strategy<Value = [i32; 3]> {
    prop::array::uniform3(-EXTENT..EXTENT)
}

fn value() -> impl Strategy<Value = Option<u8>> {
    prop_oneof![3 => (0u8..3).prop_map(Some), 1 => Just(None)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (coord(), value()).prop_map(|(c, v)| Op::Set(c, v)),
        1 => (coord(), coord(), value()).prop_map(|(a, b, v)| Op::Block(a, b, v)),
    ]
}

fn replay(ops: &[Op], seed: u64) -> (SpatialTreap<u8>, HashGrid<u8>) {
    let mut t = SpatialTreap::with_seed(seed);
    let mut oracle = HashGrid::new();
    for op in ops {
        match *op {
            Op::Set([x, y, z], v) => {
                t.set(x, y, z, v).unwrap();
                oracle.set(x, y, z, v).unwrap();
            }
            Op::Block(a, b, v) => {
                let bounds = Bounds3::from_corners(a, b);
                t.set_block(bounds, v).unwrap();
                oracle.set_block(bounds, v).unwrap();
            }
        }
    }
    (t, oracle)
}

fn region() -> Bounds3 {
    Bounds3::new([-EXTENT; 3], [EXTENT - 1; 3])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn reads_match_oracle(ops in prop::collection::vec(op(), 1..60), seed in any::<u64>()) {
        let (t, oracle) = replay(&ops, seed);
        compliance::assert_matches_oracle(&t, &oracle, &region());
    }

    #[test]
    fn invariants_hold_after_every_sequence(ops in prop::collection::vec(op(), 1..60)) {
        let (t, _) = replay(&ops, 7);
        prop_assert!(t.validate().is_ok(), "{:?}", t.validate());
        let summed: u64 = t.ranges().map(|n| n.len()).sum();
        prop_assert_eq!(t.count_non_null(), summed);
    }

    #[test]
    fn blocks_tile_contents(ops in prop::collection::vec(op(), 1..40)) {
        let (t, oracle) = replay(&ops, 11);
        let mut c = BlockCollector::new();
        t.visit_blocks(&mut c);
        let cells = c.cell_map();
        prop_assert_eq!(cells.len(), oracle.len());
        for (p, v) in oracle.cells() {
            prop_assert_eq!(cells.get(p), Some(v));
        }
    }

    #[test]
    fn clipped_visits_stay_inside(
        ops in prop::collection::vec(op(), 1..40),
        a in coord(),
        b in coord(),
    ) {
        let (t, _) = replay(&ops, 13);
        compliance::assert_visit_in_clips(&t, &Bounds3::from_corners(a, b));
    }

    #[test]
    fn clone_is_independent(
        ops in prop::collection::vec(op(), 1..30),
        p in coord(),
    ) {
        let (t, _) = replay(&ops, 17);
        let before = t.get(p[0], p[1], p[2]).copied();
        let replacement = before.map_or(0, |v| v.wrapping_add(1));
        let mut copy = t.deep_clone();
        copy.set(p[0], p[1], p[2], Some(replacement)).unwrap();
        prop_assert_eq!(t.get(p[0], p[1], p[2]).copied(), before);
        prop_assert_eq!(copy.get(p[0], p[1], p[2]), Some(&replacement));
    }

    #[test]
    fn equality_is_shape_independent(ops in prop::collection::vec(op(), 1..40)) {
        let (a, _) = replay(&ops, 1);
        let (b, _) = replay(&ops, 2);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn change_all_matches_oracle(ops in prop::collection::vec(op(), 1..40), to in value()) {
        let (mut t, oracle) = replay(&ops, 19);
        t.change_all(&1, to);
        prop_assert!(t.validate().is_ok());
        let mut expect = HashGrid::new();
        for (p, v) in oracle.cells() {
            let v = if *v == 1 { to } else { Some(*v) };
            expect.set(p[0], p[1], p[2], v).unwrap();
        }
        compliance::assert_matches_oracle(&t, &expect, &region());
    }
}
