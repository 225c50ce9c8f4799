//! Arena of arcs, elements, and locks covering the unit sphere.
//!
//! Purpose
//! - Own every `Arc`, `Element`, and `Lock`; cross references are plain ids
//!   (`ArcId`, `ElementId`, `LockId`) so the cyclic `next`/`prev`/adjacency
//!   structure needs no shared ownership.
//! - An element is a set of arcs forming one or more closed loops; the region
//!   lies to the left of every loop. An element without arcs is the whole sphere.
//!
//! Invariants (checked by `validate`)
//! - `next`/`prev` are mutually inverse and stay inside one element.
//! - Adjacency is symmetric: `adj[a][b] = o` implies
//!   `adj[b][a] = o + len(b) - len(a) (mod 4)`.
//! - Corner angles around any fully surrounded vertex sum to `4`.
//!
//! Code cross-refs: `Sphere::slice`, `Sphere::build_lock`, `Sphere::twist`

mod edit;
mod region;
mod slice;

use crate::arc::Arc;
use crate::circle::SphCircle;
use crate::error::{KernelError, KernelResult};
use crate::lock::Lock;
use crate::num::Tolerance;
use std::collections::BTreeSet;

/// Index of an arc in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(pub usize);

/// Index of an element in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// A rigid piece of the surface: the region left of a set of closed loops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub(crate) arcs: BTreeSet<ArcId>,
}

impl Element {
    pub fn arcs(&self) -> impl Iterator<Item = ArcId> + '_ {
        self.arcs.iter().copied()
    }
    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }
    #[inline]
    pub fn is_whole_sphere(&self) -> bool {
        self.arcs.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Sphere {
    pub(crate) tol: Tolerance,
    pub(crate) arcs: Vec<Option<Arc>>,
    pub(crate) elements: Vec<Option<Element>>,
    pub(crate) locks: Vec<Option<Lock>>,
}

impl Sphere {
    pub fn new(tol: Tolerance) -> Self {
        Self {
            tol,
            ..Self::default()
        }
    }

    #[inline]
    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Add the element covering the whole sphere (no boundary).
    pub fn whole_sphere(&mut self) -> ElementId {
        self.alloc_element(BTreeSet::new())
    }

    pub fn arc(&self, id: ArcId) -> KernelResult<&Arc> {
        self.arcs
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(KernelError::UnknownArc(id))
    }

    pub(crate) fn arc_mut(&mut self, id: ArcId) -> KernelResult<&mut Arc> {
        self.arcs
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(KernelError::UnknownArc(id))
    }

    pub fn element(&self, id: ElementId) -> KernelResult<&Element> {
        self.elements
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(KernelError::UnknownElement(id))
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> KernelResult<&mut Element> {
        self.elements
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(KernelError::UnknownElement(id))
    }

    /// Live elements in creation order.
    pub fn element_ids(&self) -> Vec<ElementId> {
        live_ids(&self.elements).map(ElementId).collect()
    }

    /// Live arcs in creation order.
    pub fn arc_ids(&self) -> Vec<ArcId> {
        live_ids(&self.arcs).map(ArcId).collect()
    }

    /// Element owning `arc`.
    pub fn element_of(&self, arc: ArcId) -> KernelResult<ElementId> {
        self.arc(arc)?.element.ok_or_else(|| {
            KernelError::BrokenTopology(format!("arc {} has no element", arc.0))
        })
    }

    pub(crate) fn alloc_arc(&mut self, circle: SphCircle, length: f64) -> ArcId {
        let id = ArcId(self.arcs.len());
        self.arcs.push(Some(Arc::looped(id, circle, length)));
        id
    }

    /// Drop an arc and every adjacency entry pointing at it.
    pub(crate) fn free_arc(&mut self, id: ArcId) -> KernelResult<()> {
        let arc = self.arc(id)?;
        let partners: Vec<ArcId> = arc.adj.keys().copied().collect();
        let owner = arc.element;
        for b in partners {
            self.arc_mut(b)?.adj.remove(&id);
        }
        if let Some(e) = owner {
            self.element_mut(e)?.arcs.remove(&id);
        }
        self.arcs[id.0] = None;
        Ok(())
    }

    pub(crate) fn alloc_element(&mut self, arcs: BTreeSet<ArcId>) -> ElementId {
        let id = ElementId(self.elements.len());
        for a in &arcs {
            if let Some(Some(arc)) = self.arcs.get_mut(a.0) {
                arc.element = Some(id);
            }
        }
        self.elements.push(Some(Element { arcs }));
        id
    }

    pub(crate) fn free_element(&mut self, id: ElementId) -> KernelResult<Element> {
        self.elements
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(KernelError::UnknownElement(id))
    }

    /// `x.next = y`, `y.prev = x`.
    pub(crate) fn link(&mut self, x: ArcId, y: ArcId) -> KernelResult<()> {
        self.arc_mut(x)?.next = y;
        self.arc_mut(y)?.prev = x;
        Ok(())
    }

    /// Record that `b` covers `a` from offset `o`, and the matching reverse entry.
    pub(crate) fn set_adj(&mut self, a: ArcId, b: ArcId, o: f64) -> KernelResult<()> {
        let tol = self.tol;
        let la = self.arc(a)?.length;
        let lb = self.arc(b)?.length;
        self.arc_mut(a)?.adj.insert(b, tol.mod4(o));
        self.arc_mut(b)?.adj.insert(a, tol.mod4(o + lb - la));
        Ok(())
    }

    pub(crate) fn clear_adj(&mut self, a: ArcId, b: ArcId) -> KernelResult<()> {
        self.arc_mut(a)?.adj.remove(&b);
        self.arc_mut(b)?.adj.remove(&a);
        Ok(())
    }
}

fn live_ids<T>(slots: &[Option<T>]) -> impl Iterator<Item = usize> + '_ {
    slots
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.as_ref().map(|_| i))
}
