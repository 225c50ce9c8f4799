//! Events where a circle meets an arc.

use super::{classify, sweep, Arc, Bearing};
use crate::circle::SphCircle;
use crate::num::{angle_between, Side, Tolerance};
use crate::sphere::ArcId;
use nalgebra::Vector3;
use std::fmt;
use tracing::warn;

/// Side seen just before and just after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirCode {
    pub before: Side,
    pub after: Side,
}

impl DirCode {
    #[inline]
    pub fn new(before: Side, after: Side) -> Self {
        Self { before, after }
    }

    /// Enters or leaves the interior.
    #[inline]
    pub fn is_crossing(&self) -> bool {
        (self.before == Side::Inside) != (self.after == Side::Inside)
    }

    /// Passes from one open side to the other.
    #[inline]
    pub fn is_transversal(&self) -> bool {
        self.before != self.after && self.before != Side::On && self.after != Side::On
    }

    /// Tie-break rank for events at the same place; `+-` sorts before `-+`.
    #[inline]
    pub fn rank(&self) -> u8 {
        3 * self.before.rank() + self.after.rank()
    }
}

impl fmt::Display for DirCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.before, self.after)
    }
}

/// A circle meeting one arc of a region boundary.
///
/// `code` is the circle's direction relative to the region; `dual` is the
/// boundary's direction relative to the circle's cap.
#[derive(Clone, Copy, Debug)]
pub struct MeetRecord {
    pub arc: ArcId,
    /// Parameter along the arc, in `[0, length)`; `0` is the arc's start vertex.
    pub offset: f64,
    /// Parameter along the circle.
    pub theta: f64,
    /// Counterclockwise angle from the boundary's direction to the circle's direction.
    pub angle: f64,
    pub point: Vector3<f64>,
    pub code: DirCode,
    pub dual: DirCode,
}

impl Arc {
    /// Events of `circle` on this arc. `prev` is the arc arriving at this arc's
    /// start and fixes the sector at the vertex.
    ///
    /// An arc lying on `circle` reports only its start vertex.
    pub fn meet_with(
        &self,
        id: ArcId,
        circle: &SphCircle,
        prev: &Arc,
        tol: Tolerance,
    ) -> Vec<MeetRecord> {
        let at_start = |out: &mut Vec<MeetRecord>| {
            let at = self.start();
            let w = Bearing::leaving(&self.circle, 0.0);
            let u = Bearing::returning(&prev.circle, prev.length);
            out.push(record(id, 0.0, at, &w, &u, circle, tol));
        };
        let mut out = Vec::new();
        if self.circle.relation_to(circle, tol).is_coincident() {
            at_start(&mut out);
            return out;
        }
        // A computed meet point within `sqrt(eps)` of an incident vertex is that vertex.
        let near = tol.eps.sqrt();
        let on_start = circle.side_of(&self.start(), tol) == Side::On;
        let on_end = circle.side_of(&self.end(), tol) == Side::On;
        let mut vertex_seen = false;
        if on_start {
            vertex_seen = true;
            at_start(&mut out);
        }
        for p in self.circle.meet(circle, tol).points() {
            let gap = [(on_start, self.start()), (on_end, self.end())]
                .into_iter()
                .filter(|(on, _)| *on)
                .map(|(_, v)| angle_between(&p, &v))
                .find(|&d| d < near);
            if let Some(d) = gap {
                if d >= tol.eps {
                    warn!(arc = id.0, gap = d, "meet point snapped to vertex");
                }
                continue;
            }
            let t = self.circle.theta_of(&p, tol);
            if t == 0.0 {
                if !vertex_seen {
                    vertex_seen = true;
                    at_start(&mut out);
                }
            } else if t < self.length - tol.eps {
                let at = self.point(t);
                let w = Bearing::leaving(&self.circle, t);
                let u = Bearing::returning(&self.circle, t);
                out.push(record(id, t, at, &w, &u, circle, tol));
            }
        }
        out.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        out
    }
}

fn record(
    arc: ArcId,
    offset: f64,
    at: Vector3<f64>,
    w: &Bearing,
    u: &Bearing,
    circle: &SphCircle,
    tol: Tolerance,
) -> MeetRecord {
    let theta = circle.theta_of(&at, tol);
    let f = Bearing::leaving(circle, theta);
    let b = Bearing::returning(circle, theta);
    MeetRecord {
        arc,
        offset,
        theta,
        angle: sweep(w, &f, &at, tol),
        point: at,
        code: DirCode::new(
            classify(&b, w, u, &at, tol),
            classify(&f, w, u, &at, tol),
        ),
        dual: DirCode::new(
            classify(u, &f, &b, &at, tol),
            classify(w, &f, &b, &at, tol),
        ),
    }
}
