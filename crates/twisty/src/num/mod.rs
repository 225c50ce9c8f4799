//! Angles in quadrants, tolerant comparisons, and small rotation helpers.
//!
//! Purpose
//! - Every length and angle in the kernel is measured in quadrants (a full
//!   turn is `4.0`), so "flat" is exactly `2.0` and periodic values live on
//!   `[0, 4)`.
//! - `Tolerance` centralizes the single comparison epsilon and the walk guard
//!   used by every loop that follows `next`/adjacency links.
//!
//! Conventions
//! - Values within `eps` of a snap target are replaced by the exact target
//!   (`0`, `2`, `4 ≡ 0`), so later equality tests see identical numbers.
//! - Rotations are `nalgebra::UnitQuaternion<f64>`; `rotation_to` maps the
//!   canonical north pole `e_z` onto a given direction.
//!
//! Code cross-refs: `Tolerance`, `Side`, `mod4`, `signed_angle`

mod types;
mod util;

pub use types::{Side, Tolerance};
pub use util::{
    angle_between, circular_overlap, from_quadrants, rotation_about, rotation_to, signed_angle,
    to_quadrants, QUADRANT,
};
