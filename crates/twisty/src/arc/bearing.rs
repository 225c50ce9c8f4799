//! Directions at a vertex and the sectors between them.

use super::Arc;
use crate::circle::SphCircle;
use crate::num::{signed_angle, Side, Tolerance};
use nalgebra::Vector3;
use std::cmp::Ordering;

/// A direction leaving a vertex along a circle.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Bearing {
    pub dir: Vector3<f64>,
    pub circle: SphCircle,
}

impl Bearing {
    /// Leaving the point at `theta` forwards along `circle`.
    pub fn leaving(circle: &SphCircle, theta: f64) -> Self {
        Self {
            dir: circle.tangent(theta),
            circle: *circle,
        }
    }

    /// Leaving the point at `theta` backwards along `circle`.
    pub fn returning(circle: &SphCircle, theta: f64) -> Self {
        Self {
            dir: -circle.tangent(theta),
            circle: circle.complement(),
        }
    }

    #[inline]
    pub fn curvature(&self) -> f64 {
        self.circle.curvature()
    }

    #[inline]
    pub fn same_curve(&self, other: &Bearing, tol: Tolerance) -> bool {
        self.circle.same_as(&other.circle, tol)
    }
}

/// Counterclockwise position of `d` seen from `base` around the vertex `at`, in `[0, 4]`.
///
/// Tangent ties are broken by curvature: a direction bending further left
/// than `base` sits just after it (`0`), otherwise just before it (`4`).
pub(crate) fn sweep(base: &Bearing, d: &Bearing, at: &Vector3<f64>, tol: Tolerance) -> f64 {
    if base.same_curve(d, tol) {
        return 0.0;
    }
    let a = tol.mod4(signed_angle(&base.dir, &d.dir, at));
    if a == 0.0 {
        if d.curvature() > base.curvature() {
            0.0
        } else {
            4.0
        }
    } else {
        a
    }
}

#[inline]
fn key_cmp(a: (f64, f64), b: (f64, f64), tol: Tolerance) -> Ordering {
    match tol.cmp(a.0, b.0) {
        Ordering::Equal => a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal),
        o => o,
    }
}

/// Side of direction `d` relative to the sector swept counterclockwise from `from` to `to`.
pub(crate) fn classify(
    d: &Bearing,
    from: &Bearing,
    to: &Bearing,
    at: &Vector3<f64>,
    tol: Tolerance,
) -> Side {
    if d.same_curve(from, tol) || d.same_curve(to, tol) {
        return Side::On;
    }
    let kd = (sweep(from, d, at, tol), d.curvature());
    let kt = (sweep(from, to, at, tol), to.curvature());
    match key_cmp(kd, kt, tol) {
        Ordering::Less => Side::Inside,
        _ => Side::Outside,
    }
}

/// Order of two candidate sectors ending at the same incoming direction:
/// the narrower one first; equal widths prefer the outgoing curve bending
/// further left.
pub(crate) fn sector_cmp(a: (f64, f64), b: (f64, f64), tol: Tolerance) -> Ordering {
    match tol.cmp(a.0, b.0) {
        Ordering::Equal => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
        o => o,
    }
}

/// Interior angle at the vertex where `x` ends and `y` starts, in `[0, 4]`.
pub(crate) fn corner_angle(x: &Arc, y: &Arc, tol: Tolerance) -> f64 {
    let at = y.start();
    let w = Bearing::leaving(&y.circle, 0.0);
    let u = Bearing::returning(&x.circle, x.length);
    tol.snap(sweep(&w, &u, &at, tol), &[2.0])
}
