//! Serializable summaries of a cut sphere and its locks.

use serde::Serialize;
use std::str::FromStr;
use twisty::api::{
    ElementId, KernelResult, LockId, LockSide, SphCircle, Sphere, Tick, TickKind, Tolerance,
};
use twisty::prelude::Vec3;

/// A circle given as center direction and radius (quadrants).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CircleSpec {
    pub center: [f64; 3],
    pub radius: f64,
}

impl CircleSpec {
    pub fn from_circle(c: &SphCircle) -> Self {
        let n = c.center();
        Self {
            center: [n.x, n.y, n.z],
            radius: c.radius(),
        }
    }

    pub fn to_circle(self) -> SphCircle {
        let [x, y, z] = self.center;
        SphCircle::new(Vec3::new(x, y, z), self.radius)
    }
}

impl FromStr for CircleSpec {
    type Err = String;

    /// Parse `x,y,z,radius`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("bad number in circle '{s}': {e}"))?;
        let [x, y, z, radius] = parts[..] else {
            return Err(format!("circle '{s}' needs four values x,y,z,radius"));
        };
        if x * x + y * y + z * z < 1e-18 {
            return Err(format!("circle '{s}' has a zero center"));
        }
        if !(radius > 0.0 && radius < 2.0) {
            return Err(format!("circle '{s}' radius must lie in (0, 2)"));
        }
        Ok(Self {
            center: [x, y, z],
            radius,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ElementSummary {
    pub id: usize,
    pub arcs: usize,
    pub loops: usize,
    pub area: f64,
}

#[derive(Debug, Serialize)]
pub struct SphereSummary {
    pub eps: f64,
    pub arcs: usize,
    pub elements: Vec<ElementSummary>,
    pub total_area: f64,
}

#[derive(Debug, Serialize)]
pub struct TickSummary {
    pub position: f64,
    pub arc: usize,
    /// `[angle, radius]` per latch; empty for a flat tick.
    pub latches: Vec<[f64; 2]>,
    pub free: bool,
}

#[derive(Debug, Serialize)]
pub struct LockSummary {
    pub id: usize,
    pub circle: CircleSpec,
    pub offset: f64,
    pub passwords: Vec<f64>,
    pub left: Vec<usize>,
    pub right: Vec<usize>,
    pub left_ticks: Vec<TickSummary>,
    pub right_ticks: Vec<TickSummary>,
    pub left_elements: Vec<usize>,
    pub right_elements: Vec<usize>,
}

pub fn summarize_sphere(s: &Sphere) -> KernelResult<SphereSummary> {
    let tol: Tolerance = s.tolerance();
    let mut elements = Vec::new();
    let mut total_area = 0.0;
    for e in s.element_ids() {
        let area = s.area(e)?;
        total_area += area;
        elements.push(ElementSummary {
            id: e.0,
            arcs: s.element(e)?.arc_count(),
            loops: s.loops(e)?.len(),
            area,
        });
    }
    Ok(SphereSummary {
        eps: tol.eps,
        arcs: s.arc_ids().len(),
        elements,
        total_area,
    })
}

fn summarize_ticks(ticks: &[Tick]) -> Vec<TickSummary> {
    ticks
        .iter()
        .map(|t| match &t.kind {
            TickKind::Flat => TickSummary {
                position: t.position,
                arc: t.arc.0,
                latches: Vec::new(),
                free: true,
            },
            TickKind::Corner { latches, free } => TickSummary {
                position: t.position,
                arc: t.arc.0,
                latches: latches.iter().map(|l| [l.angle, l.radius]).collect(),
                free: *free,
            },
        })
        .collect()
}

fn ids(es: Vec<ElementId>) -> Vec<usize> {
    es.into_iter().map(|e| e.0).collect()
}

pub fn summarize_lock(s: &Sphere, l: LockId) -> KernelResult<LockSummary> {
    let lock = s.lock(l)?;
    Ok(LockSummary {
        id: l.0,
        circle: CircleSpec::from_circle(lock.circle()),
        offset: lock.offset(),
        passwords: lock.passwords().to_vec(),
        left: lock.side(LockSide::Left).iter().map(|a| a.0).collect(),
        right: lock.side(LockSide::Right).iter().map(|a| a.0).collect(),
        left_ticks: summarize_ticks(lock.ticks(LockSide::Left)),
        right_ticks: summarize_ticks(lock.ticks(LockSide::Right)),
        left_elements: ids(s.elements_of_side(l, LockSide::Left)?),
        right_elements: ids(s.elements_of_side(l, LockSide::Right)?),
    })
}
