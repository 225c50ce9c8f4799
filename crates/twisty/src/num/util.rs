//! Quadrant conversions, robust vector angles, and rotations.

use nalgebra::{Unit, UnitQuaternion, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

/// One quadrant in radians.
pub const QUADRANT: f64 = FRAC_PI_2;

#[inline]
pub fn to_quadrants(rad: f64) -> f64 {
    rad / QUADRANT
}

#[inline]
pub fn from_quadrants(q: f64) -> f64 {
    q * QUADRANT
}

/// Unsigned angle between two vectors, in quadrants `[0, 2]`.
///
/// Uses `atan2(|a×b|, a·b)` which stays accurate near `0` and `2`.
#[inline]
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    to_quadrants(a.cross(b).norm().atan2(a.dot(b)))
}

/// Signed angle from `from` to `to` around `axis` (counterclockwise positive), in quadrants `(-2, 2]`.
#[inline]
pub fn signed_angle(from: &Vector3<f64>, to: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    to_quadrants(from.cross(to).dot(axis).atan2(from.dot(to)))
}

/// Rotation taking the canonical north pole `e_z` onto `dir`.
pub fn rotation_to(dir: &Unit<Vector3<f64>>) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between(&Vector3::z(), dir.as_ref())
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI))
}

/// Counterclockwise rotation by `theta` quadrants about `axis`.
#[inline]
pub fn rotation_about(axis: &Unit<Vector3<f64>>, theta: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(axis, from_quadrants(theta))
}

/// Overlap length of two intervals `[s1, s1+l1]` and `[s2, s2+l2]` on the circle of circumference 4.
pub fn circular_overlap(s1: f64, l1: f64, s2: f64, l2: f64) -> f64 {
    let s = (s2 - s1).rem_euclid(4.0);
    let seg = |lo: f64, hi: f64| (hi.min(l1) - lo.max(0.0)).max(0.0);
    seg(s, s + l2) + seg(s - 4.0, s - 4.0 + l2)
}
