//! Coordinate, axis, and box types.

use std::fmt;

/// A 3-D integer coordinate, ordered `[x, y, z]`.
pub type Coord3 = [i32; 3];

/// One of the three spatial axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// First coordinate component.
    X,
    /// Second coordinate component.
    Y,
    /// Third coordinate component.
    Z,
}

impl Axis {
    /// All axes in coordinate order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of this axis within a [`Coord3`].
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Offset vector of length `delta` along this axis.
    pub fn offset(self, delta: i32) -> Coord3 {
        let mut out = [0; 3];
        out[self.index()] = delta;
        out
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// An axis-aligned box of cells with inclusive corners.
///
/// Construction does not validate the corners; backends reject boxes
/// with `min > max` on any axis when they are written. Use
/// [`from_corners`](Self::from_corners) to build a box from two
/// arbitrary opposite corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds3 {
    /// Minimum corner (inclusive).
    pub min: Coord3,
    /// Maximum corner (inclusive).
    pub max: Coord3,
}

impl Bounds3 {
    /// Create a box from its minimum and maximum corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use zgrid_core::Bounds3;
    ///
    /// let b = Bounds3::new([-5, -5, -5], [4, 4, 4]);
    /// assert_eq!(b.volume(), 1000);
    /// assert!(b.contains([0, 0, 0]));
    /// ```
    pub const fn new(min: Coord3, max: Coord3) -> Self {
        Self { min, max }
    }

    /// A box holding the single cell `c`.
    pub const fn cell(c: Coord3) -> Self {
        Self { min: c, max: c }
    }

    /// Build a box from two opposite corners given in any order.
    pub fn from_corners(a: Coord3, b: Coord3) -> Self {
        Self {
            min: [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])],
            max: [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])],
        }
    }

    /// `true` if `min <= max` on every axis.
    pub fn is_well_formed(&self) -> bool {
        (0..3).all(|i| self.min[i] <= self.max[i])
    }

    /// Side length along `axis`, or 0 for a malformed box.
    pub fn extent(&self, axis: Axis) -> u64 {
        let i = axis.index();
        if self.min[i] > self.max[i] {
            return 0;
        }
        (i64::from(self.max[i]) - i64::from(self.min[i]) + 1) as u64
    }

    /// Number of cells in the box (0 for a malformed box).
    pub fn volume(&self) -> u64 {
        Axis::ALL.iter().map(|&a| self.extent(a)).product()
    }

    /// `true` if `c` lies inside the box.
    pub fn contains(&self, c: Coord3) -> bool {
        (0..3).all(|i| self.min[i] <= c[i] && c[i] <= self.max[i])
    }

    /// Overlap of two boxes, if any.
    pub fn intersect(&self, other: &Bounds3) -> Option<Bounds3> {
        let out = Bounds3 {
            min: [
                self.min[0].max(other.min[0]),
                self.min[1].max(other.min[1]),
                self.min[2].max(other.min[2]),
            ],
            max: [
                self.max[0].min(other.max[0]),
                self.max[1].min(other.max[1]),
                self.max[2].min(other.max[2]),
            ],
        };
        out.is_well_formed().then_some(out)
    }

    /// The box moved by `offset`. Components saturate at the `i32` limits.
    pub fn translate(&self, offset: Coord3) -> Bounds3 {
        let shift = |c: Coord3| {
            [
                c[0].saturating_add(offset[0]),
                c[1].saturating_add(offset[1]),
                c[2].saturating_add(offset[2]),
            ]
        };
        Bounds3 {
            min: shift(self.min),
            max: shift(self.max),
        }
    }
}

impl fmt::Display for Bounds3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{})..=({},{},{})",
            self.min[0], self.min[1], self.min[2], self.max[0], self.max[1], self.max[2]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn axis_offsets() {
        assert_eq!(Axis::X.offset(1), [1, 0, 0]);
        assert_eq!(Axis::Y.offset(-1), [0, -1, 0]);
        assert_eq!(Axis::Z.offset(3), [0, 0, 3]);
        assert_eq!(Axis::Z.to_string(), "z");
    }

    #[test]
    fn volume_of_single_cell_is_one() {
        assert_eq!(Bounds3::cell([7, -3, 2]).volume(), 1);
    }

    #[test]
    fn malformed_box_has_no_volume() {
        let b = Bounds3::new([0, 0, 0], [-1, 4, 4]);
        assert!(!b.is_well_formed());
        assert_eq!(b.volume(), 0);
    }

    #[test]
    fn from_corners_normalizes() {
        let b = Bounds3::from_corners([4, -2, 0], [-1, 3, 0]);
        assert_eq!(b, Bounds3::new([-1, -2, 0], [4, 3, 0]));
    }

    #[test]
    fn intersect_disjoint_is_none() {
        let a = Bounds3::new([0, 0, 0], [3, 3, 3]);
        let b = Bounds3::new([4, 0, 0], [5, 3, 3]);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn intersect_overlap() {
        let a = Bounds3::new([-5, -5, -5], [4, 4, 4]);
        let b = Bounds3::new([0, 0, 0], [9, 9, 9]);
        let i = a.intersect(&b).unwrap();
        assert_eq!(i, Bounds3::new([0, 0, 0], [4, 4, 4]));
        assert_eq!(i.volume(), 125);
    }

    #[test]
    fn translate_saturates() {
        let b = Bounds3::new([i32::MAX - 1, 0, 0], [i32::MAX, 0, 0]);
        let t = b.translate([5, 1, -1]);
        assert_eq!(t.max[0], i32::MAX);
        assert_eq!(t.min[1], 1);
        assert_eq!(t.min[2], -1);
    }

    proptest! {
        #[test]
        fn intersection_is_contained_in_both(
            a0 in -20i32..20, a1 in -20i32..20,
            b0 in -20i32..20, b1 in -20i32..20,
            p in -20i32..20,
        ) {
            let a = Bounds3::from_corners([a0, a0, 0], [a1, a1, 0]);
            let b = Bounds3::from_corners([b0, b0, 0], [b1, b1, 0]);
            let c = [p, p, 0];
            let in_both = a.contains(c) && b.contains(c);
            match a.intersect(&b) {
                Some(i) => prop_assert_eq!(i.contains(c), in_both),
                None => prop_assert!(!in_both),
            }
        }
    }
}
