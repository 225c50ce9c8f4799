//! Curated API for callers.
//!
//! - Prefer these re-exports over reaching into module internals.
//! - Breaking changes are allowed when they improve the kernel.

// Geometry of single circles
pub use crate::circle::{Intersection, Meet, Relation, SphCircle};
pub use crate::num::{from_quadrants, to_quadrants, Side, Tolerance, QUADRANT};
// Boundary arcs and events
pub use crate::arc::{Arc, DirCode, MeetRecord};
// Arena, cutting, and locks
pub use crate::lock::{decipher, Latch, Lock, LockId, LockSide, Tick, TickKind};
pub use crate::sphere::{ArcId, Element, ElementId, Sphere};
// Loop extraction
pub use crate::cycles::{decompose_cycles, CycleError};
// Random cutting circles
pub use crate::rand::{draw_circle, draw_circles, CircleCfg, ReplayToken as CircleReplay};
// Errors
pub use crate::error::{KernelError, KernelResult};
