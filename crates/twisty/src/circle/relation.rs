//! Eleven-way classification of two circles and their common points.

use super::SphCircle;
use crate::num::{angle_between, from_quadrants, to_quadrants, Tolerance};
use nalgebra::Vector3;
use std::cmp::Ordering;

/// Geometry of a transversal intersection (all values in quadrants).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Corner angle of the lens `cap(self) ∩ cap(other)`, in `(0, 2)`.
    pub angle: f64,
    /// Length of `self` lying inside the other cap.
    pub arc: f64,
    /// Length of the other circle lying inside `cap(self)`.
    pub dual_arc: f64,
}

/// Relation of circle `self` to circle `other`, read as caps.
///
/// `Include`: the other cap lies inside this one. `Anti*`: the same with
/// complements (e.g. `AntiExclude`: the two complements are disjoint, so the
/// caps cover the sphere). `Kissing*`: the boundary case, touching at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Relation {
    Equal,
    Complement,
    Include,
    KissingInclude,
    Exclude,
    KissingExclude,
    AntiInclude,
    KissingAntiInclude,
    AntiExclude,
    KissingAntiExclude,
    Intersect(Intersection),
}

impl Relation {
    #[inline]
    pub fn is_coincident(&self) -> bool {
        matches!(self, Relation::Equal | Relation::Complement)
    }

    #[inline]
    pub fn is_kissing(&self) -> bool {
        matches!(
            self,
            Relation::KissingInclude
                | Relation::KissingExclude
                | Relation::KissingAntiInclude
                | Relation::KissingAntiExclude
        )
    }
}

/// Common points of two circles.
///
/// For `Cross(enter, exit)`, travelling along the first circle one enters the
/// second circle's cap at `enter` and leaves it at `exit`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Meet {
    Disjoint,
    Coincident,
    Kiss(Vector3<f64>),
    Cross(Vector3<f64>, Vector3<f64>),
}

impl Meet {
    pub fn points(&self) -> Vec<Vector3<f64>> {
        match *self {
            Meet::Disjoint | Meet::Coincident => Vec::new(),
            Meet::Kiss(p) => vec![p],
            Meet::Cross(p, q) => vec![p, q],
        }
    }
}

pub(super) fn classify(a: &SphCircle, b: &SphCircle, tol: Tolerance) -> Relation {
    let d = angle_between(a.center().as_ref(), b.center().as_ref());
    let (r1, r2) = (a.radius(), b.radius());
    if tol.is_zero(d) && tol.eq(r1, r2) {
        return Relation::Equal;
    }
    if tol.eq(d, 2.0) && tol.eq(r1 + r2, 2.0) {
        return Relation::Complement;
    }
    match tol.cmp(d, r1 - r2) {
        Ordering::Less => return Relation::Include,
        Ordering::Equal => return Relation::KissingInclude,
        Ordering::Greater => {}
    }
    match tol.cmp(d, r2 - r1) {
        Ordering::Less => return Relation::AntiInclude,
        Ordering::Equal => return Relation::KissingAntiInclude,
        Ordering::Greater => {}
    }
    match tol.cmp(d, r1 + r2) {
        Ordering::Greater => return Relation::Exclude,
        Ordering::Equal => return Relation::KissingExclude,
        Ordering::Less => {}
    }
    match tol.cmp(d, 4.0 - r1 - r2) {
        Ordering::Greater => return Relation::AntiExclude,
        Ordering::Equal => return Relation::KissingAntiExclude,
        Ordering::Less => {}
    }
    Relation::Intersect(intersection(d, r1, r2))
}

fn intersection(d: f64, r1: f64, r2: f64) -> Intersection {
    let (sd, cd) = from_quadrants(d).sin_cos();
    let (s1, c1) = from_quadrants(r1).sin_cos();
    let (s2, c2) = from_quadrants(r2).sin_cos();
    let half1 = ((c2 - c1 * cd) / (s1 * sd)).clamp(-1.0, 1.0).acos();
    let half2 = ((c1 - c2 * cd) / (s2 * sd)).clamp(-1.0, 1.0).acos();
    let between = ((cd - c1 * c2) / (s1 * s2)).clamp(-1.0, 1.0).acos();
    Intersection {
        angle: 2.0 - to_quadrants(between),
        arc: 2.0 * to_quadrants(half1),
        dual_arc: 2.0 * to_quadrants(half2),
    }
}
