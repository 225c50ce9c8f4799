//! Locks: full circles of arcs along which one side of the puzzle can turn.
//!
//! Purpose
//! - A lock exists on circle `C` when the arcs on `C` (left side) and on its
//!   complement (right side) each add up to the whole circle. Everything
//!   reachable from one side without crossing `C` turns rigidly.
//! - Each vertex on `C` carries a tick: the rays (latches) leaving it into
//!   one side. Matching latches on opposite sides give the twist amounts
//!   ("passwords") at which another circle becomes whole again.
//!
//! Model
//! - Positions are parameters of the lock circle, whose frame stays fixed in
//!   space while either side turns. Twisting by `θ` shifts the moved side's
//!   tick positions, lowers `offset` and every password by `θ`, and rebuilds
//!   adjacency across `C` from positions and lengths alone.
//!
//! Code cross-refs: `Sphere::build_lock`, `Sphere::twist`, `decipher`

mod build;
mod twist;
mod types;

pub use build::decipher;
pub use types::{Latch, Lock, LockId, LockSide, Tick, TickKind};

#[cfg(test)]
mod tests;
