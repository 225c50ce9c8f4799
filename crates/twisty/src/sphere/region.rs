//! Read-only queries on elements: loops, events, point location, area, vertex fans.

use super::{ArcId, ElementId, Sphere};
use crate::arc::MeetRecord;
use crate::circle::SphCircle;
use crate::cycles::decompose_cycles;
use crate::error::{KernelError, KernelResult};
use crate::num::{angle_between, circular_overlap, from_quadrants, Side};
use nalgebra::Vector3;
use std::collections::{BTreeSet, HashMap};

impl Sphere {
    /// Closed boundary loops of `e`, each starting at its smallest arc id.
    pub fn loops(&self, e: ElementId) -> KernelResult<Vec<Vec<ArcId>>> {
        let max_walk = self.tol.max_walk;
        let elem = self.element(e)?;
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for start in elem.arcs() {
            if seen.contains(&start) {
                continue;
            }
            let mut lp = Vec::new();
            let mut cur = start;
            loop {
                let arc = self.arc(cur)?;
                if arc.element != Some(e) || !seen.insert(cur) || lp.len() >= max_walk {
                    return Err(KernelError::BrokenTopology(format!(
                        "loop of element {} through arc {} does not close",
                        e.0, cur.0
                    )));
                }
                lp.push(cur);
                cur = arc.next;
                if cur == start {
                    break;
                }
            }
            out.push(lp);
        }
        Ok(out)
    }

    /// Events of `circle` on arc `a` (see `Arc::meet_with`).
    pub fn arc_meets(&self, a: ArcId, circle: &SphCircle) -> KernelResult<Vec<MeetRecord>> {
        let arc = self.arc(a)?;
        let prev = self.arc(arc.prev)?;
        Ok(arc.meet_with(a, circle, prev, self.tol))
    }

    /// Events of `circle` on the whole boundary of `e`, loop by loop.
    pub fn element_meets(&self, e: ElementId, circle: &SphCircle) -> KernelResult<Vec<MeetRecord>> {
        let mut out = Vec::new();
        for lp in self.loops(e)? {
            for a in lp {
                out.extend(self.arc_meets(a, circle)?);
            }
        }
        Ok(out)
    }

    /// Whether `p` lies inside, outside, or on the boundary of `e`.
    ///
    /// Casts the great circle through `p` and a boundary vertex and reads the
    /// approach side of the first event after `p`.
    pub fn locate(&self, e: ElementId, p: &Vector3<f64>) -> KernelResult<Side> {
        let tol = self.tol;
        if self.element(e)?.is_whole_sphere() {
            return Ok(Side::Inside);
        }
        let p = p.normalize();
        let probe = self.probe_through(e, &p)?;
        let tp = probe.theta_of(&p, tol);
        let meets = self.element_meets(e, &probe)?;
        let ahead: Vec<(f64, &MeetRecord)> = meets
            .iter()
            .map(|m| (tol.mod4(m.theta - tp), m))
            .collect();
        if ahead.iter().any(|(d, _)| *d == 0.0) {
            return Ok(Side::On);
        }
        let first = ahead
            .iter()
            .map(|(d, _)| *d)
            .min_by(f64::total_cmp)
            .ok_or_else(|| KernelError::Inconsistent("probe circle missed the boundary".into()))?;
        let group: Vec<Side> = ahead
            .iter()
            .filter(|(d, _)| tol.eq(*d, first))
            .map(|(_, m)| m.code.before)
            .collect();
        Ok(if group.contains(&Side::Inside) {
            Side::Inside
        } else if group.contains(&Side::On) {
            Side::On
        } else {
            Side::Outside
        })
    }

    #[inline]
    pub fn contains(&self, e: ElementId, p: &Vector3<f64>) -> KernelResult<bool> {
        Ok(self.locate(e, p)? == Side::Inside)
    }

    /// Great circle through `p` and a boundary anchor, clear of tangency with
    /// the arc circles through that anchor.
    fn probe_through(&self, e: ElementId, p: &Vector3<f64>) -> KernelResult<SphCircle> {
        const CLEARANCE: f64 = 1e-3;
        let tol = self.tol;
        let elem = self.element(e)?;
        let mut anchors: Vec<(Vector3<f64>, Vec<&SphCircle>)> =
            Vec::with_capacity(2 * elem.arc_count());
        for a in elem.arcs() {
            let arc = self.arc(a)?;
            let prev = self.arc(arc.prev)?;
            anchors.push((arc.start(), vec![&arc.circle, &prev.circle]));
        }
        for a in elem.arcs() {
            let arc = self.arc(a)?;
            anchors.push((arc.midpoint(), vec![&arc.circle]));
        }
        anchors
            .into_iter()
            .filter(|(q, _)| {
                let d = angle_between(p, q);
                d > CLEARANCE && d < 2.0 - CLEARANCE
            })
            .map(|(q, through)| (SphCircle::great(p.cross(&q)), through))
            .find(|(probe, through)| {
                through.iter().all(|c| {
                    let rel = probe.relation_to(c, tol);
                    !rel.is_kissing() && !rel.is_coincident()
                })
            })
            .map(|(probe, _)| probe)
            .ok_or_else(|| KernelError::Inconsistent("no probe direction for point".into()))
    }

    /// Total left turning of one loop: exterior corner angles plus geodesic curvature.
    pub(crate) fn loop_turning(&self, lp: &[ArcId]) -> KernelResult<f64> {
        let mut total = 0.0;
        for &a in lp {
            let arc = self.arc(a)?;
            total += (2.0 - arc.angle) + arc.turning();
        }
        Ok(total)
    }

    /// Area of the region left of a single loop.
    pub(crate) fn loop_area(&self, lp: &[ArcId]) -> KernelResult<f64> {
        Ok(from_quadrants(4.0 - self.loop_turning(lp)?))
    }

    /// Area of element `e` (steradians), by Gauss–Bonnet over all its loops.
    pub fn area(&self, e: ElementId) -> KernelResult<f64> {
        let loops = self.loops(e)?;
        let mut turning = 0.0;
        for lp in &loops {
            turning += self.loop_turning(lp)?;
        }
        Ok(from_quadrants(4.0 * (2.0 - loops.len() as f64) - turning))
    }

    /// Arc across from `a` just after parameter `pos`, with the matching
    /// parameter along that arc (in `(0, len]`).
    pub(crate) fn partner_beyond(&self, a: ArcId, pos: f64) -> KernelResult<Option<(ArcId, f64)>> {
        let tol = self.tol;
        for (b, o) in self.arc(a)?.adjacency() {
            let lb = self.arc(b)?.length;
            let rel = tol.mod4(pos - o);
            if rel < lb - tol.eps {
                return Ok(Some((b, lb - rel)));
            }
        }
        Ok(None)
    }

    /// Sectors around the start vertex of `a`, walking clockwise from `a`.
    ///
    /// Each entry is an outgoing arc with its corner angle; an arc running
    /// straight through the vertex contributes a flat sector `2`. Returns
    /// `None` when some ray has no neighbour across it.
    pub fn vertex_fan(&self, a: ArcId) -> KernelResult<Option<Vec<(ArcId, f64)>>> {
        let tol = self.tol;
        let mut fan = Vec::new();
        let mut cur = a;
        while fan.len() < tol.max_walk {
            fan.push((cur, self.arc(cur)?.angle));
            let mut ray = (cur, 0.0);
            let next_out = loop {
                let Some((z, t)) = self.partner_beyond(ray.0, ray.1)? else {
                    return Ok(None);
                };
                let zarc = self.arc(z)?;
                if tol.eq(t, zarc.length) {
                    break zarc.next;
                }
                fan.push((z, 2.0));
                ray = (z, t);
                if fan.len() >= tol.max_walk {
                    return Err(KernelError::BrokenTopology(format!(
                        "vertex fan at arc {} does not close",
                        a.0
                    )));
                }
            };
            if next_out == a {
                return Ok(Some(fan));
            }
            cur = next_out;
        }
        Err(KernelError::BrokenTopology(format!(
            "vertex fan at arc {} does not close",
            a.0
        )))
    }

    /// Check links, adjacency symmetry and coverage, and vertex angle sums.
    pub fn validate(&self) -> KernelResult<()> {
        let tol = self.tol;
        for e in self.element_ids() {
            let mut edges = Vec::new();
            for a in self.element(e)?.arcs() {
                edges.push((a, self.arc(a)?.next));
            }
            decompose_cycles(&edges, false)?;
            for &(a, n) in &edges {
                let nx = self.arc(n)?;
                if nx.prev != a || nx.element != Some(e) {
                    return Err(KernelError::BrokenTopology(format!(
                        "arc {} -> {} is not mirrored or leaves element {}",
                        a.0, n.0, e.0
                    )));
                }
            }
        }
        for a in self.arc_ids() {
            let arc = self.arc(a)?;
            let mut covered = 0.0;
            for (b, o) in arc.adjacency() {
                let other = self.arc(b)?;
                let back = other.offset_to(a).ok_or_else(|| {
                    KernelError::BrokenTopology(format!("adjacency {} -> {} is one-sided", a.0, b.0))
                })?;
                if !tol.eq4(back, o + other.length - arc.length) {
                    return Err(KernelError::Inconsistent(format!(
                        "adjacency offsets of arcs {} and {} disagree",
                        a.0, b.0
                    )));
                }
                covered += circular_overlap(0.0, arc.length, o, other.length);
            }
            let slack = tol.eps * (1 + arc.adj.len()) as f64;
            if (covered - arc.length).abs() > slack {
                return Err(KernelError::BrokenTopology(format!(
                    "arc {} is covered for {covered} of {}",
                    a.0, arc.length
                )));
            }
            if let Some(fan) = self.vertex_fan(a)? {
                let sum: f64 = fan.iter().map(|(_, ang)| ang).sum();
                if (sum - 4.0).abs() > tol.eps * fan.len() as f64 {
                    return Err(KernelError::AngleSum { arc: a, sum });
                }
            }
        }
        Ok(())
    }

    /// Boundary loops of the union of `elems`.
    ///
    /// Arcs shared by two members cancel; shared boundaries must be split at
    /// the same vertices on both sides.
    pub fn union_boundary(&self, elems: &[ElementId]) -> KernelResult<Vec<Vec<ArcId>>> {
        let tol = self.tol;
        let mut nodes: Vec<Vector3<f64>> = Vec::new();
        let mut node = |p: Vector3<f64>| -> usize {
            if let Some(i) = nodes.iter().position(|q| angle_between(q, &p) < tol.eps) {
                return i;
            }
            nodes.push(p);
            nodes.len() - 1
        };
        let mut edges = Vec::new();
        let mut first_half: HashMap<(usize, usize), ArcId> = HashMap::new();
        for &e in elems {
            for a in self.element(e)?.arcs() {
                let arc = self.arc(a)?;
                let l = arc.length;
                let chain = [
                    node(arc.start()),
                    node(arc.point(l / 3.0)),
                    node(arc.point(2.0 * l / 3.0)),
                    node(arc.end()),
                ];
                for w in chain.windows(2) {
                    edges.push((w[0], w[1]));
                }
                first_half.insert((chain[0], chain[1]), a);
            }
        }
        let cycles = decompose_cycles(&edges, true)?;
        Ok(cycles
            .into_iter()
            .map(|cyc| {
                let n = cyc.len();
                (0..n)
                    .filter_map(|i| first_half.get(&(cyc[i], cyc[(i + 1) % n])).copied())
                    .collect()
            })
            .collect())
    }
}
