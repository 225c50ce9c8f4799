//! The `Arc` record as stored in the sphere arena.

use crate::circle::SphCircle;
use crate::lock::LockId;
use crate::sphere::{ArcId, ElementId};
use nalgebra::{UnitQuaternion, Vector3};
use std::collections::BTreeMap;

/// One boundary arc of one element.
///
/// `adj[b] = o` records that arc `b` (on the complementary circle, bounding
/// the neighbour) covers this arc's parameters `[o, o + len(b)]` modulo 4.
#[derive(Clone, Debug)]
pub struct Arc {
    pub(crate) circle: SphCircle,
    pub(crate) length: f64,
    pub(crate) angle: f64,
    pub(crate) next: ArcId,
    pub(crate) prev: ArcId,
    pub(crate) adj: BTreeMap<ArcId, f64>,
    pub(crate) element: Option<ElementId>,
    pub(crate) lock: Option<LockId>,
}

impl Arc {
    /// Arc linked to itself (a one-arc loop) with a flat corner.
    pub(crate) fn looped(id: ArcId, circle: SphCircle, length: f64) -> Self {
        Self {
            circle,
            length,
            angle: 2.0,
            next: id,
            prev: id,
            adj: BTreeMap::new(),
            element: None,
            lock: None,
        }
    }

    #[inline]
    pub fn circle(&self) -> &SphCircle {
        &self.circle
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }
    /// Corner angle at the start vertex, measured inside the region.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }
    #[inline]
    pub fn radius(&self) -> f64 {
        self.circle.radius()
    }
    #[inline]
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.circle.orientation()
    }
    #[inline]
    pub fn next(&self) -> ArcId {
        self.next
    }
    #[inline]
    pub fn prev(&self) -> ArcId {
        self.prev
    }
    #[inline]
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }
    #[inline]
    pub fn lock(&self) -> Option<LockId> {
        self.lock
    }

    pub fn adjacency(&self) -> impl Iterator<Item = (ArcId, f64)> + '_ {
        self.adj.iter().map(|(&b, &o)| (b, o))
    }

    #[inline]
    pub fn offset_to(&self, other: ArcId) -> Option<f64> {
        self.adj.get(&other).copied()
    }

    #[inline]
    pub fn point(&self, t: f64) -> Vector3<f64> {
        self.circle.point(t)
    }
    #[inline]
    pub fn tangent(&self, t: f64) -> Vector3<f64> {
        self.circle.tangent(t)
    }
    #[inline]
    pub fn start(&self) -> Vector3<f64> {
        self.circle.point(0.0)
    }
    #[inline]
    pub fn end(&self) -> Vector3<f64> {
        self.circle.point(self.length)
    }
    #[inline]
    pub fn midpoint(&self) -> Vector3<f64> {
        self.circle.point(self.length / 2.0)
    }

    /// Left turning accumulated along the arc, `cos ρ · length`.
    #[inline]
    pub fn turning(&self) -> f64 {
        crate::num::from_quadrants(self.radius()).cos() * self.length
    }
}
