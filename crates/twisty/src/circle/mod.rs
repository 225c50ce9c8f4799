//! Oriented circles on the unit sphere.
//!
//! Purpose
//! - `SphCircle` is the boundary of a spherical cap: a center direction, an
//!   angular radius in `(0, 2)` quadrants, and a rotation that fixes both the
//!   center (image of `e_z`) and the parameter origin (image of `e_x`).
//! - Parameter `θ` runs counterclockwise around the center, so the cap lies to
//!   the left of the direction of travel.
//!
//! Model
//! - `point(θ) = q · (sinρ cosφ, sinρ sinφ, cosρ)` with `ρ = radius·π/2`, `φ = θ·π/2`.
//! - `complement()` is the same point set traversed the other way; it bounds
//!   the opposite cap and satisfies `complement().point(θ) == point(-θ)`.
//!
//! Code cross-refs: `Relation`, `Meet`, `Arc`

mod relation;

pub use relation::{Intersection, Meet, Relation};

use crate::num::{
    angle_between, from_quadrants, rotation_to, to_quadrants, Side, Tolerance,
};
use nalgebra::{Unit, UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Oriented circle: cap boundary with a parameter origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphCircle {
    orientation: UnitQuaternion<f64>,
    radius: f64,
}

impl SphCircle {
    /// Circle around `center` (normalized here) with the canonical parameter origin.
    pub fn new(center: Vector3<f64>, radius: f64) -> Self {
        let c = Unit::new_normalize(center);
        Self {
            orientation: rotation_to(&c),
            radius,
        }
    }

    /// Great circle (radius `1`) whose left side contains `normal`.
    #[inline]
    pub fn great(normal: Vector3<f64>) -> Self {
        Self::new(normal, 1.0)
    }

    #[inline]
    pub fn from_orientation(orientation: UnitQuaternion<f64>, radius: f64) -> Self {
        Self {
            orientation,
            radius,
        }
    }

    #[inline]
    pub fn center(&self) -> Unit<Vector3<f64>> {
        self.orientation * Vector3::z_axis()
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.orientation
    }

    pub fn point(&self, theta: f64) -> Vector3<f64> {
        let (sr, cr) = from_quadrants(self.radius).sin_cos();
        let (sp, cp) = from_quadrants(theta).sin_cos();
        self.orientation * Vector3::new(sr * cp, sr * sp, cr)
    }

    /// Unit tangent in the direction of increasing `θ`.
    pub fn tangent(&self, theta: f64) -> Vector3<f64> {
        let (sp, cp) = from_quadrants(theta).sin_cos();
        self.orientation * Vector3::new(-sp, cp, 0.0)
    }

    /// Parameter of the projection of `p` onto this circle, in `[0, 4)`.
    pub fn theta_of(&self, p: &Vector3<f64>, tol: Tolerance) -> f64 {
        let local = self.orientation.inverse_transform_vector(p);
        tol.mod4(to_quadrants(local.y.atan2(local.x)))
    }

    /// Geodesic curvature toward the cap, `cot ρ`.
    #[inline]
    pub fn curvature(&self) -> f64 {
        let rho = from_quadrants(self.radius);
        rho.cos() / rho.sin()
    }

    /// Angular distance (quadrants) from the center to `p`.
    #[inline]
    pub fn distance_to(&self, p: &Vector3<f64>) -> f64 {
        angle_between(self.center().as_ref(), p)
    }

    pub fn side_of(&self, p: &Vector3<f64>, tol: Tolerance) -> Side {
        match tol.cmp(self.distance_to(p), self.radius) {
            std::cmp::Ordering::Less => Side::Inside,
            std::cmp::Ordering::Greater => Side::Outside,
            std::cmp::Ordering::Equal => Side::On,
        }
    }

    pub fn complement(&self) -> Self {
        let flip = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI);
        Self {
            orientation: self.orientation * flip,
            radius: 2.0 - self.radius,
        }
    }

    /// Same circle with the parameter origin moved to `θ`.
    pub fn shifted(&self, theta: f64) -> Self {
        let spin = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), from_quadrants(theta));
        Self {
            orientation: self.orientation * spin,
            radius: self.radius,
        }
    }

    /// Image under a rigid rotation of the sphere.
    #[inline]
    pub fn rotated(&self, q: &UnitQuaternion<f64>) -> Self {
        Self {
            orientation: q * self.orientation,
            radius: self.radius,
        }
    }

    /// Same oriented point set (parameter origin ignored).
    pub fn same_as(&self, other: &SphCircle, tol: Tolerance) -> bool {
        tol.eq(self.radius, other.radius)
            && tol.is_zero(angle_between(
                self.center().as_ref(),
                other.center().as_ref(),
            ))
    }

    pub fn relation_to(&self, other: &SphCircle, tol: Tolerance) -> Relation {
        relation::classify(self, other, tol)
    }

    /// Common points of the two circles; see `Meet` for ordering.
    pub fn meet(&self, other: &SphCircle, tol: Tolerance) -> Meet {
        match self.relation_to(other, tol) {
            Relation::Equal | Relation::Complement => Meet::Coincident,
            Relation::Intersect(x) => {
                let theta0 = self.theta_of(other.center().as_ref(), tol);
                let half = x.arc / 2.0;
                Meet::Cross(self.point(theta0 - half), self.point(theta0 + half))
            }
            Relation::KissingInclude
            | Relation::KissingExclude
            | Relation::KissingAntiInclude
            | Relation::KissingAntiExclude => {
                let theta0 = self.theta_of(other.center().as_ref(), tol);
                let near = self.point(theta0);
                let far = self.point(theta0 + 2.0);
                let miss = |p: &Vector3<f64>| (other.distance_to(p) - other.radius).abs();
                if miss(&near) <= miss(&far) {
                    Meet::Kiss(near)
                } else {
                    Meet::Kiss(far)
                }
            }
            _ => Meet::Disjoint,
        }
    }
}

#[cfg(test)]
mod tests;
