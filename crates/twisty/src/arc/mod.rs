//! Boundary arcs and the local geometry at their endpoints.
//!
//! Purpose
//! - `Arc` is a piece of an oriented circle: the parameter origin of its
//!   circle is the arc's start, it runs for `length` quadrants, and the region
//!   it bounds lies on its left.
//! - `Bearing` describes a direction leaving a vertex together with the circle
//!   it follows; sectors at a vertex are compared by tangent angle first and
//!   by curvature on ties.
//! - `MeetRecord` is the event produced when a circle meets an arc: where, and
//!   how the circle and the region see each other just before and after.
//!
//! Code cross-refs: `Sphere::interpolate`, `Sphere::merge_prev`, `Sphere::slice`

mod bearing;
mod meet;
mod types;

pub use meet::{DirCode, MeetRecord};
pub use types::Arc;

pub(crate) use bearing::{classify, corner_angle, sector_cmp, sweep, Bearing};

#[cfg(test)]
mod tests;
