//! Kernel of a spherical cut-and-twist puzzle.
//!
//! The unit sphere is partitioned into elements bounded by circular arcs.
//! Elements are cut along circles (`Sphere::slice`); a full circle of arcs
//! with clean sides forms a lock (`Sphere::build_lock`) along which one side
//! turns rigidly (`Sphere::twist`).
//!
//! Units
//! - Angles and arc lengths are measured in quadrants: a full turn is `4`,
//!   a straight angle `2`, a great circle has radius `1`.
//!
//! API Policy
//! - `api` is the curated surface for callers (the CLI among them); module
//!   internals may change freely.

pub mod api;
pub mod arc;
pub mod circle;
pub mod cycles;
pub mod error;
pub mod lock;
pub mod num;
pub mod rand;
pub mod sphere;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{KernelError, KernelResult};
pub use num::{Side, Tolerance};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::arc::{Arc, DirCode, MeetRecord};
    pub use crate::circle::{Intersection, Meet, Relation, SphCircle};
    pub use crate::error::{KernelError, KernelResult};
    pub use crate::lock::{Latch, Lock, LockId, LockSide, Tick, TickKind};
    pub use crate::num::{Side, Tolerance};
    pub use crate::rand::{draw_circle, draw_circles, CircleCfg, ReplayToken};
    pub use crate::sphere::{ArcId, Element, ElementId, Sphere};
    pub use nalgebra::Vector3 as Vec3;
}
