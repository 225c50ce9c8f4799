//! Cutting an element along a circle.
//!
//! Steps
//! 1. Collect the circle's events on the boundary and group coincident ones.
//! 2. Read the side of every span of the circle between events; spans inside
//!    the element become a pair of new arcs (one per side, mutually adjacent).
//! 3. Split old arcs where the circle crosses them and sort every arc into
//!    the inside or outside part.
//! 4. At each event vertex, re-link arriving and leaving arcs of each part by
//!    face tracing: an arriving arc continues with the leaving arc whose
//!    sector to it is narrowest.
//! 5. Every loop containing a new arc starts an element; remaining loops join
//!    the smallest element of their part that encloses them.

use super::{ArcId, ElementId, Sphere};
use crate::arc::{corner_angle, sector_cmp, sweep, Bearing, DirCode, MeetRecord};
use crate::circle::{Relation, SphCircle};
use crate::cycles::decompose_cycles;
use crate::error::{KernelError, KernelResult};
use crate::num::{Side, Tolerance};
use nalgebra::Vector3;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// Coincident events of the cutting circle.
#[derive(Clone, Copy, Debug)]
struct EventGroup {
    theta: f64,
    before: Side,
    after: Side,
}

/// Arriving and leaving arcs at one event vertex on one side.
type Ends = (Vec<ArcId>, Vec<ArcId>);

const SAMPLES: [f64; 3] = [0.25, 0.5, 0.75];

impl Sphere {
    /// Cut element `e` along `circle`; returns the elements inside and outside its cap.
    ///
    /// When the circle misses the interior of `e`, `e` itself is returned on
    /// its side and nothing changes. Otherwise `e` is consumed.
    pub fn slice(
        &mut self,
        e: ElementId,
        circle: &SphCircle,
    ) -> KernelResult<(Vec<ElementId>, Vec<ElementId>)> {
        let tol = self.tol;
        let meets = self.element_meets(e, circle)?;
        let along = DirCode::new(Side::On, Side::On);
        if meets.iter().any(|m| m.code == along) && meets.iter().any(|m| m.code.is_crossing()) {
            return Err(KernelError::Inconsistent(
                "circle runs along the boundary and also crosses it".into(),
            ));
        }
        let groups = group_events(&meets, tol);
        let spans = self.inside_spans(e, circle, &groups)?;
        if spans.is_empty() {
            let inside = self.whole_side(e, circle)?;
            debug!(element = e.0, inside, "slice leaves element whole");
            return Ok(if inside {
                (vec![e], vec![])
            } else {
                (vec![], vec![e])
            });
        }
        let touched: Vec<Vector3<f64>> = meets.iter().map(|m| m.point).collect();
        let reseed = self.detach_locks_near(e, &touched)?;

        let mut cuts: BTreeMap<ArcId, Vec<f64>> = BTreeMap::new();
        for m in &meets {
            if m.offset > 0.0 && m.dual.is_transversal() {
                cuts.entry(m.arc).or_default().push(m.offset);
            }
        }
        for (a, mut ts) in cuts {
            ts.sort_by(|x, y| y.total_cmp(x));
            ts.dedup_by(|x, y| (*x - *y).abs() < tol.eps);
            for t in ts {
                self.interpolate(a, t)?;
            }
        }

        let mut part: BTreeMap<ArcId, bool> = BTreeMap::new();
        let old: Vec<ArcId> = self.element(e)?.arcs().collect();
        for a in old {
            part.insert(a, self.inside_part(a, circle)?);
        }
        let mut fresh: HashSet<ArcId> = HashSet::new();
        for &(start, len) in &spans {
            let kin = self.alloc_arc(circle.shifted(start), len);
            let kout = self.alloc_arc(circle.complement().shifted(-(start + len)), len);
            self.set_adj(kin, kout, 0.0)?;
            part.insert(kin, true);
            part.insert(kout, false);
            fresh.insert(kin);
            fresh.insert(kout);
            trace!(start, len, "span inside element");
        }
        if !groups.is_empty() {
            self.restitch(circle, &groups, &part)?;
        }

        let mut dash = Vec::new();
        let mut rest = Vec::new();
        for side in [true, false] {
            let mut edges = Vec::new();
            for (&a, &p) in &part {
                if p == side {
                    edges.push((a, self.arc(a)?.next));
                }
            }
            for lp in decompose_cycles(&edges, false)? {
                if lp.iter().any(|a| fresh.contains(a)) {
                    dash.push((side, lp));
                } else {
                    rest.push((side, lp));
                }
            }
        }

        self.free_element(e)?;
        let mut made: Vec<(bool, ElementId, f64)> = Vec::with_capacity(dash.len());
        for (side, lp) in dash {
            let area = self.loop_area(&lp)?;
            let id = self.alloc_element(lp.into_iter().collect());
            made.push((side, id, area));
        }
        let mut placed = Vec::with_capacity(rest.len());
        for (side, lp) in rest {
            let host = self.enclosing(&made, side, &lp)?.ok_or_else(|| {
                KernelError::BrokenTopology(format!(
                    "loop through arc {} is not enclosed by any piece",
                    lp[0].0
                ))
            })?;
            placed.push((host, lp));
        }
        for (host, lp) in placed {
            for &a in &lp {
                self.arc_mut(a)?.element = Some(host);
            }
            self.element_mut(host)?.arcs.extend(lp);
        }

        let mut inside = Vec::new();
        let mut outside = Vec::new();
        for &(side, id, _) in &made {
            self.merge_trivial_vertices(id)?;
            if side {
                inside.push(id);
            } else {
                outside.push(id);
            }
        }
        for seed in reseed {
            if self.arc(seed).map_or(false, |a| a.lock.is_none()) {
                self.build_lock(seed)?;
            }
        }
        debug!(
            element = e.0,
            inside = inside.len(),
            outside = outside.len(),
            "slice"
        );
        Ok((inside, outside))
    }

    fn inside_spans(
        &self,
        e: ElementId,
        circle: &SphCircle,
        groups: &[EventGroup],
    ) -> KernelResult<Vec<(f64, f64)>> {
        let tol = self.tol;
        if groups.is_empty() {
            return match self.locate(e, &circle.point(0.0))? {
                Side::Inside => Ok(vec![(0.0, 4.0)]),
                Side::Outside => Ok(Vec::new()),
                Side::On => Err(KernelError::Inconsistent(
                    "circle touches the boundary without events".into(),
                )),
            };
        }
        let n = groups.len();
        let mut spans = Vec::new();
        for i in 0..n {
            let g = groups[i];
            let h = groups[(i + 1) % n];
            if g.after != h.before {
                return Err(KernelError::Inconsistent(format!(
                    "side after theta {} ({}) differs from side before theta {} ({})",
                    g.theta, g.after, h.theta, h.before
                )));
            }
            if g.after == Side::Inside {
                let len = if n == 1 {
                    4.0
                } else {
                    tol.mod4(h.theta - g.theta)
                };
                spans.push((g.theta, len));
            }
        }
        Ok(spans)
    }

    /// Side of the cap holding arc `a` (arcs on the circle follow their direction).
    fn inside_part(&self, a: ArcId, circle: &SphCircle) -> KernelResult<bool> {
        let arc = self.arc(a)?;
        match arc.circle.relation_to(circle, self.tol) {
            Relation::Equal => return Ok(true),
            Relation::Complement => return Ok(false),
            _ => {}
        }
        let depth = |f: f64| circle.radius() - circle.distance_to(&arc.point(f * arc.length));
        let deepest = SAMPLES
            .into_iter()
            .map(depth)
            .max_by(|x, y| x.abs().total_cmp(&y.abs()))
            .unwrap_or(0.0);
        Ok(deepest > 0.0)
    }

    /// Side of an element the circle does not cut.
    fn whole_side(&self, e: ElementId, circle: &SphCircle) -> KernelResult<bool> {
        let mut best = (0.0f64, true);
        for a in self.element(e)?.arcs() {
            let arc = self.arc(a)?;
            match arc.circle.relation_to(circle, self.tol) {
                Relation::Equal => return Ok(true),
                Relation::Complement => return Ok(false),
                _ => {}
            }
            for f in SAMPLES {
                let d = circle.radius() - circle.distance_to(&arc.point(f * arc.length));
                if d.abs() > best.0 {
                    best = (d.abs(), d > 0.0);
                }
            }
        }
        Ok(best.1)
    }

    /// Re-link every arc ending or starting at an event vertex, side by side.
    fn restitch(
        &mut self,
        circle: &SphCircle,
        groups: &[EventGroup],
        part: &BTreeMap<ArcId, bool>,
    ) -> KernelResult<()> {
        let tol = self.tol;
        let group_of = |p: &Vector3<f64>| -> Option<usize> {
            if circle.side_of(p, tol) != Side::On {
                return None;
            }
            let th = circle.theta_of(p, tol);
            groups
                .iter()
                .position(|g| tol.dist4(g.theta, th) < tol.eps)
        };

        let mut ends: BTreeMap<(bool, usize), Ends> = BTreeMap::new();
        for (&a, &side) in part {
            let arc = self.arc(a)?;
            let loose_end = part.get(&arc.next) != Some(&side);
            let loose_start = part.get(&arc.prev) != Some(&side);
            match group_of(&arc.end()) {
                Some(g) => ends.entry((side, g)).or_default().0.push(a),
                None if loose_end => return Err(off_circle(a)),
                None => {}
            }
            match group_of(&arc.start()) {
                Some(g) => ends.entry((side, g)).or_default().1.push(a),
                None if loose_start => return Err(off_circle(a)),
                None => {}
            }
        }

        let mut relinked = Vec::new();
        for ((_, g), (ins, outs)) in ends {
            if ins.len() != outs.len() {
                return Err(KernelError::BrokenTopology(format!(
                    "{} arcs arrive and {} leave at theta {}",
                    ins.len(),
                    outs.len(),
                    groups[g].theta
                )));
            }
            let mut taken = vec![false; outs.len()];
            for &x in &ins {
                let xa = self.arc(x)?;
                let at = xa.end();
                let u = Bearing::returning(&xa.circle, xa.length);
                let mut best: Option<(usize, (f64, f64))> = None;
                for (j, &y) in outs.iter().enumerate() {
                    let w = Bearing::leaving(&self.arc(y)?.circle, 0.0);
                    let key = (sweep(&w, &u, &at, tol), w.curvature());
                    if best.map_or(true, |(_, k)| sector_cmp(key, k, tol) == Ordering::Less) {
                        best = Some((j, key));
                    }
                }
                let Some((j, _)) = best else {
                    return Err(KernelError::BrokenTopology(format!(
                        "no arc leaves the vertex where arc {} ends",
                        x.0
                    )));
                };
                if taken[j] {
                    return Err(KernelError::BrokenTopology(format!(
                        "two arcs continue with arc {}",
                        outs[j].0
                    )));
                }
                taken[j] = true;
                relinked.push((x, outs[j]));
            }
        }
        for &(x, y) in &relinked {
            self.link(x, y)?;
        }
        for &(x, y) in &relinked {
            let angle = corner_angle(self.arc(x)?, self.arc(y)?, tol);
            self.arc_mut(y)?.angle = angle;
        }
        Ok(())
    }

    fn enclosing(
        &self,
        made: &[(bool, ElementId, f64)],
        side: bool,
        lp: &[ArcId],
    ) -> KernelResult<Option<ElementId>> {
        let mut best: Option<(f64, ElementId)> = None;
        for &(s, id, area) in made {
            if s != side {
                continue;
            }
            let mut verdict = Side::On;
            for &a in lp {
                verdict = self.locate(id, &self.arc(a)?.midpoint())?;
                if verdict != Side::On {
                    break;
                }
            }
            if verdict == Side::Inside && best.map_or(true, |(b, _)| area < b) {
                best = Some((area, id));
            }
        }
        Ok(best.map(|(_, id)| id))
    }
}

fn off_circle(a: ArcId) -> KernelError {
    KernelError::BrokenTopology(format!("arc {} is cut off the cutting circle", a.0))
}

fn combine(sides: impl Iterator<Item = Side>) -> Side {
    let mut out = Side::Outside;
    for s in sides {
        match s {
            Side::On => return Side::On,
            Side::Inside => out = Side::Inside,
            Side::Outside => {}
        }
    }
    out
}

fn group_events(meets: &[MeetRecord], tol: Tolerance) -> Vec<EventGroup> {
    let mut sorted: Vec<&MeetRecord> = meets.iter().collect();
    sorted.sort_by(|a, b| {
        a.theta
            .total_cmp(&b.theta)
            .then(a.code.rank().cmp(&b.code.rank()))
    });
    let mut clusters: Vec<Vec<&MeetRecord>> = Vec::new();
    for m in sorted {
        match clusters.last_mut() {
            Some(c) if c.last().map_or(false, |l| m.theta - l.theta < tol.eps) => c.push(m),
            _ => clusters.push(vec![m]),
        }
    }
    if clusters.len() > 1 {
        let first = clusters[0][0].theta;
        let last = clusters[clusters.len() - 1]
            .last()
            .map_or(first, |m| m.theta);
        if tol.dist4(first, last) < tol.eps {
            if let Some(tail) = clusters.pop() {
                clusters[0].splice(0..0, tail);
            }
        }
    }
    clusters
        .iter()
        .map(|c| EventGroup {
            theta: c[0].theta,
            before: combine(c.iter().map(|m| m.code.before)),
            after: combine(c.iter().map(|m| m.code.after)),
        })
        .collect()
}
