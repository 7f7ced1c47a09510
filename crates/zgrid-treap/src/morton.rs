//! Morton (Z-order) codec for 3 × 20-bit signed coordinates.
//!
//! Each axis is truncated to its low 20 bits (two's complement) and
//! spread to every third bit of a 60-bit key: x at offsets 0, 3, 6, …,
//! y at 1, 4, 7, …, z at 2, 5, 8, …. Decoding compacts the bits back and
//! sign-extends. Both directions are fixed mask/shift sequences.
//!
//! Keys order the raw bit patterns, so on each axis the non-negative
//! values sort before the negative ones.

use zgrid_core::{Axis, Coord3};

/// Significant bits per axis.
pub const AXIS_BITS: u32 = 20;

/// Significant bits in a curve key.
pub const KEY_BITS: u32 = AXIS_BITS * 3;

/// Largest curve key.
pub const KEY_MAX: u64 = (1 << KEY_BITS) - 1;

/// Smallest encodable coordinate value.
pub const MIN_COORD: i32 = -(1 << (AXIS_BITS - 1));

/// Largest encodable coordinate value.
pub const MAX_COORD: i32 = (1 << (AXIS_BITS - 1)) - 1;

/// Mask selecting the raw bits of one axis.
pub const AXIS_MASK: u32 = (1 << AXIS_BITS) - 1;

/// Spread the low 20 bits of `v` to every third bit.
#[inline]
fn spread(v: u32) -> u64 {
    let mut x = u64::from(v & AXIS_MASK);
    x = (x | (x << 32)) & 0x001f_0000_0000_ffff;
    x = (x | (x << 16)) & 0x001f_0000_ff00_00ff;
    x = (x | (x << 8)) & 0x100f_00f0_0f00_f00f;
    x = (x | (x << 4)) & 0x10c3_0c30_c30c_30c3;
    x = (x | (x << 2)) & 0x1249_2492_4924_9249;
    x
}

/// Gather every third bit of `k` (starting at bit 0) into 20 bits.
#[inline]
fn compact(k: u64) -> u32 {
    let mut x = k & 0x1249_2492_4924_9249;
    x = (x | (x >> 2)) & 0x10c3_0c30_c30c_30c3;
    x = (x | (x >> 4)) & 0x100f_00f0_0f00_f00f;
    x = (x | (x >> 8)) & 0x001f_0000_ff00_00ff;
    x = (x | (x >> 16)) & 0x001f_0000_0000_ffff;
    x = (x | (x >> 32)) & u64::from(AXIS_MASK);
    x as u32
}

/// Sign-extend a 20-bit two's-complement pattern.
#[inline]
fn sign_extend(raw: u32) -> i32 {
    ((raw << (32 - AXIS_BITS)) as i32) >> (32 - AXIS_BITS)
}

/// Interleave three coordinates into a curve key.
///
/// Values outside [`MIN_COORD`]`..=`[`MAX_COORD`] wrap to their low
/// 20 bits.
///
/// ```
/// use zgrid_treap::morton::{decode, encode};
///
/// assert_eq!(encode(1, 0, 0), 1);
/// assert_eq!(encode(0, 1, 0), 2);
/// assert_eq!(encode(0, 0, 1), 4);
/// assert_eq!(decode(encode(-7, 3, 12)), (-7, 3, 12));
/// ```
#[inline]
pub fn encode(x: i32, y: i32, z: i32) -> u64 {
    encode_raw([x as u32, y as u32, z as u32])
}

/// Interleave three raw 20-bit axis patterns into a curve key.
#[inline]
pub fn encode_raw(raw: [u32; 3]) -> u64 {
    spread(raw[0]) | (spread(raw[1]) << 1) | (spread(raw[2]) << 2)
}

/// Split a curve key back into three signed coordinates.
#[inline]
pub fn decode(key: u64) -> (i32, i32, i32) {
    let [x, y, z] = decode_raw(key);
    (sign_extend(x), sign_extend(y), sign_extend(z))
}

/// Split a curve key into three raw 20-bit axis patterns.
#[inline]
pub fn decode_raw(key: u64) -> [u32; 3] {
    [compact(key), compact(key >> 1), compact(key >> 2)]
}

/// [`decode`] as a [`Coord3`].
#[inline]
pub fn decode_coord(key: u64) -> Coord3 {
    let (x, y, z) = decode(key);
    [x, y, z]
}

/// `true` if `v` survives a round trip through the codec.
#[inline]
pub fn in_domain(v: i32) -> bool {
    (MIN_COORD..=MAX_COORD).contains(&v)
}

/// Axis and per-axis bit level that key bit `bit` encodes.
#[inline]
pub fn axis_of_bit(bit: u32) -> (Axis, u32) {
    let axis = match bit % 3 {
        0 => Axis::X,
        1 => Axis::Y,
        _ => Axis::Z,
    };
    (axis, bit / 3)
}
