//! Local edits of the boundary: splitting an arc and merging trivial vertices.

use super::{ArcId, ElementId, Sphere};
use crate::error::{KernelError, KernelResult};
use crate::num::{angle_between, circular_overlap};

impl Sphere {
    /// Split arc `a` at parameter `t`, returning the new arc covering `[t, len]`.
    ///
    /// The new vertex is flat (corner angle `2`); adjacency is redistributed
    /// between the two parts. A lock through `a` is dropped.
    pub fn interpolate(&mut self, a: ArcId, t: f64) -> KernelResult<ArcId> {
        let tol = self.tol;
        let (circle, len, next, element, lock, adj) = {
            let arc = self.arc(a)?;
            (
                arc.circle,
                arc.length,
                arc.next,
                arc.element,
                arc.lock,
                arc.adj.clone(),
            )
        };
        if !(t > tol.eps && t < len - tol.eps) {
            return Err(KernelError::InvalidParameter {
                what: "split parameter",
                value: t,
            });
        }
        if let Some(l) = lock {
            self.unlock(l)?;
        }
        let b = self.alloc_arc(circle.shifted(t), len - t);
        self.arc_mut(b)?.element = element;
        if let Some(e) = element {
            self.element_mut(e)?.arcs.insert(b);
        }
        self.arc_mut(a)?.length = t;
        self.link(b, next)?;
        self.link(a, b)?;

        for (c, o) in adj {
            let lc = self.arc(c)?.length;
            let ob = tol.mod4(o - t);
            let keep_a = circular_overlap(0.0, t, o, lc) > tol.eps;
            let to_b = circular_overlap(0.0, len - t, ob, lc) > tol.eps;
            self.clear_adj(a, c)?;
            if keep_a {
                self.set_adj(a, c, o)?;
            }
            if to_b {
                self.set_adj(b, c, ob)?;
            }
        }
        Ok(b)
    }

    /// True when `a` continues its predecessor along the same circle through a flat vertex.
    pub fn continues_prev(&self, a: ArcId) -> KernelResult<bool> {
        let tol = self.tol;
        let arc = self.arc(a)?;
        if arc.prev == a {
            return Ok(false);
        }
        let prev = self.arc(arc.prev)?;
        Ok(tol.eq(arc.angle, 2.0)
            && prev.element == arc.element
            && prev.circle.same_as(&arc.circle, tol)
            && tol.is_zero(angle_between(&prev.end(), &arc.start()))
            && prev.length + arc.length <= 4.0 + tol.eps)
    }

    /// Absorb `a` into its predecessor; returns the surviving arc.
    ///
    /// Inverse of `interpolate`. Fails on a one-arc loop and when the two arcs
    /// do not lie on one circle through a flat vertex.
    pub fn merge_prev(&mut self, a: ArcId) -> KernelResult<ArcId> {
        let tol = self.tol;
        let p = self.arc(a)?.prev;
        if p == a {
            return Err(KernelError::SelfMerge(a));
        }
        if !self.continues_prev(a)? {
            return Err(KernelError::NotMergeable(a));
        }
        let (la, next, lock_a, adj) = {
            let arc = self.arc(a)?;
            (arc.length, arc.next, arc.lock, arc.adj.clone())
        };
        let (lp, lock_p) = {
            let prev = self.arc(p)?;
            (prev.length, prev.lock)
        };
        for l in [lock_a, lock_p].into_iter().flatten() {
            if self.lock(l).is_ok() {
                self.unlock(l)?;
            }
        }
        self.free_arc(a)?;
        self.arc_mut(p)?.length = (lp + la).min(4.0);
        self.link(p, next)?;
        {
            let prev = self.arc_mut(p)?;
            for (c, o) in adj {
                prev.adj.entry(c).or_insert(tol.mod4(o + lp));
            }
        }
        let partners: Vec<(ArcId, f64)> = self.arc(p)?.adjacency().collect();
        for (c, o) in partners {
            self.set_adj(p, c, o)?;
        }
        Ok(p)
    }

    /// Merge every flat same-circle vertex of element `e`; returns the number of merges.
    pub fn merge_trivial_vertices(&mut self, e: ElementId) -> KernelResult<usize> {
        let mut merged = 0;
        loop {
            let mut changed = false;
            let arcs: Vec<ArcId> = self.element(e)?.arcs().collect();
            for a in arcs {
                if self.arc(a).is_err() {
                    continue;
                }
                if self.continues_prev(a)? {
                    self.merge_prev(a)?;
                    merged += 1;
                    changed = true;
                }
            }
            if !changed {
                return Ok(merged);
            }
        }
    }
}
