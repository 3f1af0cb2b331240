//! Fixed-point sine and cosine.
//!
//! The unit circle is scaled to 255 ([`MAX_SIN`]); angles are integer degrees.
//! Every product with a trig value has to be divided by `MAX_SIN` again to
//! return to the original units.

/// Amplitude of [`fast_sin`] / [`fast_cos`].
pub const MAX_SIN: i32 = 255;

/// `255 * sin(deg)` for `deg` in `0..=90`, rounded.
pub const SIN_TABLE: [u8; 91] = [
    0, 4, 8, 13, 17, 22, 26, 31, 35, 39, 44, 48, 53, 57, 61, 65, 70, 74, 78, 83, 87, 91, 95, 99,
    103, 107, 111, 115, 119, 123, 127, 131, 135, 138, 142, 146, 149, 153, 156, 160, 163, 167, 170,
    173, 177, 180, 183, 186, 189, 192, 195, 198, 200, 203, 206, 208, 211, 213, 216, 218, 220, 223,
    225, 227, 229, 231, 232, 234, 236, 238, 239, 241, 242, 243, 245, 246, 247, 248, 249, 250, 251,
    251, 252, 253, 253, 254, 254, 254, 254, 254, 255,
];

/// Fixed-point sine of an angle in degrees, in `-255..=255`.
///
/// Any `i32` is accepted; the angle is reduced into `0..360` first and the
/// quarter-wave table is mirrored into the other three quadrants.
#[inline]
pub fn fast_sin(degrees: i32) -> i32 {
    let angle = degrees.rem_euclid(360) as usize;
    match angle {
        0..=89 => SIN_TABLE[angle] as i32,
        90..=179 => SIN_TABLE[180 - angle] as i32,
        180..=269 => -(SIN_TABLE[angle - 180] as i32),
        _ => -(SIN_TABLE[360 - angle] as i32),
    }
}

/// Fixed-point cosine, `fast_sin(degrees + 90)`.
#[inline]
pub fn fast_cos(degrees: i32) -> i32 {
    fast_sin(degrees.rem_euclid(360) + 90)
}

/// Wrap an accumulated angle back into `0..360`.
#[inline]
pub fn wrap_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}
