//! Lock records.

use crate::circle::SphCircle;
use crate::num::Tolerance;
use crate::sphere::ArcId;

/// Index of a lock in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LockId(pub usize);

/// Side of a lock: `Left` is the cap of the lock circle, `Right` its complement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockSide {
    Left,
    Right,
}

impl LockSide {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            LockSide::Left => LockSide::Right,
            LockSide::Right => LockSide::Left,
        }
    }
}

/// A ray leaving a lock vertex: its angle from the forward direction of the
/// side's circle, and the radius of the circle it follows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Latch {
    pub angle: f64,
    pub radius: f64,
}

impl Latch {
    /// Tangent to the lock circle; such rays never block a twist.
    #[inline]
    pub fn is_tangent(&self, tol: Tolerance) -> bool {
        tol.is_zero(self.angle) || tol.eq(self.angle, 2.0)
    }

    /// Same angle with complementary radii: the two rays continue one circle.
    #[inline]
    pub fn fits(&self, other: &Latch, tol: Tolerance) -> bool {
        tol.eq(self.angle, other.angle) && tol.eq(self.radius + other.radius, 2.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickKind {
    /// The side continues straight through the vertex.
    Flat,
    /// Rays enter the side here; `free` when all of them are tangent.
    Corner { latches: Vec<Latch>, free: bool },
}

/// Feature at the start of one lock segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub arc: ArcId,
    pub kind: TickKind,
}

#[derive(Clone, Debug)]
pub struct Lock {
    pub(crate) circle: SphCircle,
    pub(crate) left: Vec<ArcId>,
    pub(crate) right: Vec<ArcId>,
    pub(crate) left_ticks: Vec<Tick>,
    pub(crate) right_ticks: Vec<Tick>,
    pub(crate) offset: f64,
    pub(crate) passwords: Vec<f64>,
}

impl Lock {
    /// Lock circle; its parameter frame measures all positions.
    #[inline]
    pub fn circle(&self) -> &SphCircle {
        &self.circle
    }

    /// Segments of one side in walking order.
    pub fn side(&self, side: LockSide) -> &[ArcId] {
        match side {
            LockSide::Left => &self.left,
            LockSide::Right => &self.right,
        }
    }

    pub fn ticks(&self, side: LockSide) -> &[Tick] {
        match side {
            LockSide::Left => &self.left_ticks,
            LockSide::Right => &self.right_ticks,
        }
    }

    /// Accumulated twist, reduced modulo 4.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Twist amounts (sorted, in `[0, 4)`) at which latches on both sides line up.
    #[inline]
    pub fn passwords(&self) -> &[f64] {
        &self.passwords
    }

    pub fn segments(&self) -> impl Iterator<Item = ArcId> + '_ {
        self.left.iter().chain(self.right.iter()).copied()
    }
}
