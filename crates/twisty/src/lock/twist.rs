//! Turning one side of a lock.

use super::build::normalize_turns;
use super::types::{LockId, LockSide};
use crate::error::{KernelError, KernelResult};
use crate::num::{circular_overlap, rotation_about};
use crate::sphere::{ArcId, ElementId, Sphere};
use std::collections::{BTreeSet, HashSet, VecDeque};
use tracing::{debug, trace};

impl Sphere {
    /// Elements reachable from one side of lock `l` without crossing its circle.
    pub fn elements_of_side(&self, l: LockId, side: LockSide) -> KernelResult<Vec<ElementId>> {
        let lock = self.lock(l)?;
        let fence: HashSet<ArcId> = lock.segments().collect();
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();
        for &a in lock.side(side) {
            let e = self.element_of(a)?;
            if seen.insert(e) {
                queue.push_back(e);
            }
        }
        while let Some(e) = queue.pop_front() {
            for a in self.element(e)?.arcs() {
                if fence.contains(&a) {
                    continue;
                }
                for (b, _) in self.arc(a)?.adjacency() {
                    let f = self.element_of(b)?;
                    if seen.insert(f) {
                        queue.push_back(f);
                    }
                }
            }
        }
        Ok(seen.into_iter().collect())
    }

    /// Rotate one side of lock `l` by `theta` quadrants, counterclockwise
    /// seen from outside above that side's cap.
    ///
    /// Other locks that end up split between the moving and the resting part
    /// are released and rebuilt afterwards when they still close. Locks lying
    /// wholly on the moving part turn with it.
    pub fn twist(&mut self, l: LockId, theta: f64, side: LockSide) -> KernelResult<()> {
        let tol = self.tol;
        let theta = tol.mod4(theta);
        if theta == 0.0 {
            return Ok(());
        }
        let moved: BTreeSet<ElementId> = self.elements_of_side(l, side)?.into_iter().collect();
        for e in self.elements_of_side(l, side.flip())? {
            if moved.contains(&e) {
                return Err(KernelError::Inconsistent(format!(
                    "element {} lies on both sides of lock {}",
                    e.0, l.0
                )));
            }
        }

        let mut reseed = Vec::new();
        let mut carried = Vec::new();
        for other in self.lock_ids() {
            if other == l {
                continue;
            }
            let mut inside = None;
            let mut outside = false;
            for a in self.lock(other)?.segments() {
                if moved.contains(&self.element_of(a)?) {
                    inside.get_or_insert(a);
                } else {
                    outside = true;
                }
            }
            match (inside, outside) {
                (Some(seed), true) => {
                    trace!(lock = other.0, "released by twist");
                    self.unlock(other)?;
                    reseed.push(seed);
                }
                (Some(_), false) => carried.push(other),
                _ => {}
            }
        }

        let center = self.lock(l)?.circle.center();
        let axis = match side {
            LockSide::Left => center,
            LockSide::Right => -center,
        };
        let q = rotation_about(&axis, theta);
        for &e in &moved {
            let arcs: Vec<ArcId> = self.element(e)?.arcs().collect();
            for a in arcs {
                let arc = self.arc_mut(a)?;
                arc.circle = arc.circle.rotated(&q);
            }
        }
        for other in carried {
            let lock = self.lock_mut(other)?;
            lock.circle = lock.circle.rotated(&q);
        }

        let lock = self.lock_mut(l)?;
        match side {
            LockSide::Left => {
                for t in &mut lock.left_ticks {
                    t.position = tol.mod4(t.position + theta);
                }
            }
            LockSide::Right => {
                for t in &mut lock.right_ticks {
                    t.position = tol.mod4(t.position - theta);
                }
            }
        }
        lock.offset = tol.mod4(lock.offset - theta);
        let shifted = lock.passwords.iter().map(|p| p - theta).collect();
        lock.passwords = normalize_turns(shifted, tol);
        self.relink(l)?;

        for seed in reseed {
            if self.arc(seed)?.lock.is_none() {
                self.build_lock(seed)?;
            }
        }
        debug!(lock = l.0, theta, side = ?side, moved = moved.len(), "twist");
        Ok(())
    }

    /// Recompute adjacency across lock `l` from segment positions and lengths.
    fn relink(&mut self, l: LockId) -> KernelResult<()> {
        let tol = self.tol;
        let lock = self.lock(l)?;
        let frame = lock.circle;
        let left = lock.left.clone();
        let right = lock.right.clone();
        for &a in &left {
            for &b in &right {
                self.clear_adj(a, b)?;
            }
        }

        let Some(&first) = left.first() else {
            return Ok(());
        };
        let mut p = frame.theta_of(&self.arc(first)?.start(), tol);
        let mut lefts = Vec::with_capacity(left.len());
        for &a in &left {
            let len = self.arc(a)?.length;
            lefts.push((a, p, len));
            p += len;
        }
        let Some(&first) = right.first() else {
            return Ok(());
        };
        let mut q = frame.theta_of(&self.arc(first)?.start(), tol);
        let mut rights = Vec::with_capacity(right.len());
        for &b in &right {
            let len = self.arc(b)?.length;
            rights.push((b, q, len));
            q -= len;
        }

        for &(a, pa, la) in &lefts {
            for &(b, qb, lb) in &rights {
                let o = tol.mod4(qb - lb - pa);
                if circular_overlap(0.0, la, o, lb) > tol.eps {
                    self.set_adj(a, b, o)?;
                }
            }
        }
        Ok(())
    }
}
