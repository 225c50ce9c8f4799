//! Finding the two sides of a lock and reading their ticks.

use super::types::{Latch, Lock, LockId, Tick, TickKind};
use crate::circle::{Relation, SphCircle};
use crate::error::{KernelError, KernelResult};
use crate::num::Tolerance;
use crate::sphere::{ArcId, ElementId, Sphere};
use nalgebra::Vector3;
use tracing::{debug, trace};

impl Sphere {
    pub fn lock(&self, id: LockId) -> KernelResult<&Lock> {
        self.locks
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(KernelError::UnknownLock(id))
    }

    pub(crate) fn lock_mut(&mut self, id: LockId) -> KernelResult<&mut Lock> {
        self.locks
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(KernelError::UnknownLock(id))
    }

    /// Live locks in creation order.
    pub fn lock_ids(&self) -> Vec<LockId> {
        self.locks
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.as_ref().map(|_| LockId(i)))
            .collect()
    }

    /// Lock through `seed`: the one it already belongs to, or a freshly built one.
    pub fn lock_at(&mut self, seed: ArcId) -> KernelResult<Option<LockId>> {
        match self.arc(seed)?.lock {
            Some(l) => Ok(Some(l)),
            None => self.build_lock(seed),
        }
    }

    /// Build the lock on the circle of `seed`, with `seed`'s side as left.
    ///
    /// Returns `None` when either side fails to close into a full circle:
    /// some vertex on the circle has a ray crossing it, or the arcs on the
    /// circle are interrupted.
    pub fn build_lock(&mut self, seed: ArcId) -> KernelResult<Option<LockId>> {
        let tol = self.tol;
        let arc = self.arc(seed)?;
        if let Some(l) = arc.lock {
            return Ok(Some(l));
        }
        let circle = arc.circle;
        let Some(partner) = arc.adj.keys().next().copied() else {
            return Ok(None);
        };
        if self.arc(partner)?.circle.relation_to(&circle, tol) != Relation::Complement {
            return Ok(None);
        }
        let Some((left, left_ticks)) = self.walk_side(seed, &circle)? else {
            trace!(seed = seed.0, "left side of lock does not close");
            return Ok(None);
        };
        let Some((right, right_ticks)) = self.walk_side(partner, &circle)? else {
            trace!(seed = seed.0, "right side of lock does not close");
            return Ok(None);
        };
        for &a in left.iter().chain(right.iter()) {
            if let Some(l) = self.arc(a)?.lock {
                return Ok(Some(l));
            }
        }

        let passwords = decipher(&left_ticks, &right_ticks, tol);
        let id = LockId(self.locks.len());
        for &a in left.iter().chain(right.iter()) {
            self.arc_mut(a)?.lock = Some(id);
        }
        debug!(
            lock = id.0,
            left = left.len(),
            right = right.len(),
            passwords = ?passwords,
            "lock built"
        );
        self.locks.push(Some(Lock {
            circle,
            left,
            right,
            left_ticks,
            right_ticks,
            offset: 0.0,
            passwords,
        }));
        Ok(Some(id))
    }

    /// Release a lock; its arcs become free for other locks.
    pub fn unlock(&mut self, id: LockId) -> KernelResult<()> {
        let lock = self
            .locks
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(KernelError::UnknownLock(id))?;
        for a in lock.segments() {
            if let Ok(arc) = self.arc_mut(a) {
                if arc.lock == Some(id) {
                    arc.lock = None;
                }
            }
        }
        debug!(lock = id.0, "lock released");
        Ok(())
    }

    /// Release every lock running through element `e` or through one of
    /// `points`; returns one surviving segment of each, to rebuild from later.
    pub(crate) fn detach_locks_near(
        &mut self,
        e: ElementId,
        points: &[Vector3<f64>],
    ) -> KernelResult<Vec<ArcId>> {
        let tol = self.tol;
        let mut marks: Vec<Vector3<f64>> = points.to_vec();
        for a in self.element(e)?.arcs() {
            marks.push(self.arc(a)?.start());
        }
        let mut hit = Vec::new();
        for l in self.lock_ids() {
            let mut touches = false;
            let mut seed = None;
            for a in self.lock(l)?.segments() {
                let arc = self.arc(a)?;
                if arc.element == Some(e) {
                    touches = true;
                } else if seed.is_none() {
                    seed = Some(a);
                }
                let s = arc.start();
                if marks.iter().any(|m| (m - s).norm() < tol.eps) {
                    touches = true;
                }
            }
            if touches {
                hit.push((l, seed));
            }
        }
        let mut seeds = Vec::with_capacity(hit.len());
        for (l, seed) in hit {
            self.unlock(l)?;
            seeds.extend(seed);
        }
        Ok(seeds)
    }

    /// Segments along `circle` starting from `start`, with the tick at the
    /// start of each, positions read in the frame of `frame`.
    fn walk_side(
        &self,
        start: ArcId,
        frame: &SphCircle,
    ) -> KernelResult<Option<(Vec<ArcId>, Vec<Tick>)>> {
        let tol = self.tol;
        let circle = self.arc(start)?.circle;
        let mut segs = vec![start];
        let mut ticks = Vec::new();
        let mut total = self.arc(start)?.length;
        let mut x = start;
        loop {
            let Some((y, kind)) = self.turn(x, &circle)? else {
                return Ok(None);
            };
            let position = frame.theta_of(&self.arc(y)?.start(), tol);
            ticks.push(Tick {
                position,
                arc: y,
                kind,
            });
            if y == start {
                break;
            }
            if segs.len() >= tol.max_walk || total > 4.0 + tol.eps {
                return Ok(None);
            }
            total += self.arc(y)?.length;
            segs.push(y);
            x = y;
        }
        if !tol.eq(total, 4.0) {
            return Ok(None);
        }
        ticks.rotate_right(1);
        Ok(Some((segs, ticks)))
    }

    /// The arc continuing `x` along `circle` on the same side, with the tick
    /// between them. Turns clockwise around the end of `x`, collecting the
    /// rays passed, until the sectors add up to a straight angle.
    fn turn(&self, x: ArcId, circle: &SphCircle) -> KernelResult<Option<(ArcId, TickKind)>> {
        let tol = self.tol;
        let mut cum = 0.0;
        let mut latches = Vec::new();
        let mut incoming = x;
        for _ in 0..tol.max_walk {
            let y = self.arc(incoming)?.next;
            let ya = self.arc(y)?;
            cum += ya.angle;
            if ya.circle.same_as(circle, tol) {
                if !tol.eq(cum, 2.0) {
                    return Ok(None);
                }
                let kind = if latches.is_empty() {
                    TickKind::Flat
                } else {
                    let free = latches.iter().all(|l: &Latch| l.is_tangent(tol));
                    TickKind::Corner { latches, free }
                };
                return Ok(Some((y, kind)));
            }
            if cum > 2.0 + tol.eps {
                return Ok(None);
            }
            latches.push(Latch {
                angle: tol.snap(2.0 - cum, &[0.0, 2.0]),
                radius: ya.radius(),
            });
            let mut ray = (y, 0.0);
            incoming = loop {
                let Some((z, t)) = self.partner_beyond(ray.0, ray.1)? else {
                    return Ok(None);
                };
                if tol.eq(t, self.arc(z)?.length) {
                    break z;
                }
                cum += 2.0;
                if cum > 2.0 + tol.eps {
                    return Ok(None);
                }
                ray = (z, t);
            };
        }
        Err(KernelError::BrokenTopology(format!(
            "turning around the end of arc {} does not finish",
            x.0
        )))
    }
}

/// Twist amounts of the left side that bring a latch on the left onto a
/// matching latch on the right, sorted and deduplicated modulo 4.
///
/// Ticks whose latches are all tangent to the lock circle never constrain.
pub fn decipher(left: &[Tick], right: &[Tick], tol: Tolerance) -> Vec<f64> {
    let mut out = Vec::new();
    for l in left {
        let TickKind::Corner {
            latches: ll,
            free: false,
        } = &l.kind
        else {
            continue;
        };
        for r in right {
            let TickKind::Corner {
                latches: rl,
                free: false,
            } = &r.kind
            else {
                continue;
            };
            let fits = ll
                .iter()
                .filter(|a| !a.is_tangent(tol))
                .any(|a| rl.iter().any(|b| a.fits(b, tol)));
            if fits {
                out.push(r.position - l.position);
            }
        }
    }
    normalize_turns(out, tol)
}

/// Reduce modulo 4, sort, and drop duplicates (including across the wrap).
pub(crate) fn normalize_turns(mut v: Vec<f64>, tol: Tolerance) -> Vec<f64> {
    for x in v.iter_mut() {
        *x = tol.mod4(*x);
    }
    v.sort_by(f64::total_cmp);
    v.dedup_by(|a, b| tol.eq(*a, *b));
    if v.len() > 1 && tol.eq4(v[0], v[v.len() - 1]) {
        v.pop();
    }
    v
}
