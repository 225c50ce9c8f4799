//! Kernel error type.

use crate::cycles::CycleError;
use crate::lock::LockId;
use crate::sphere::{ArcId, ElementId};
use std::fmt;

/// Failures of kernel operations. Topology errors mean the arena no longer
/// satisfies its link/adjacency invariants and should be discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    UnknownArc(ArcId),
    UnknownElement(ElementId),
    UnknownLock(LockId),
    InvalidParameter { what: &'static str, value: f64 },
    SelfMerge(ArcId),
    NotMergeable(ArcId),
    BrokenTopology(String),
    AngleSum { arc: ArcId, sum: f64 },
    Inconsistent(String),
    Cycles(CycleError),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::UnknownArc(a) => write!(f, "unknown arc {}", a.0),
            KernelError::UnknownElement(e) => write!(f, "unknown element {}", e.0),
            KernelError::UnknownLock(l) => write!(f, "unknown lock {}", l.0),
            KernelError::InvalidParameter { what, value } => {
                write!(f, "invalid {what}: {value}")
            }
            KernelError::SelfMerge(a) => write!(f, "arc {} cannot merge with itself", a.0),
            KernelError::NotMergeable(a) => {
                write!(f, "arc {} does not continue its predecessor", a.0)
            }
            KernelError::BrokenTopology(msg) => write!(f, "broken topology: {msg}"),
            KernelError::AngleSum { arc, sum } => {
                write!(f, "angles around the start of arc {} sum to {sum}", arc.0)
            }
            KernelError::Inconsistent(msg) => write!(f, "inconsistent geometry: {msg}"),
            KernelError::Cycles(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for KernelError {}

impl From<CycleError> for KernelError {
    fn from(e: CycleError) -> Self {
        KernelError::Cycles(e)
    }
}

pub type KernelResult<T> = Result<T, KernelError>;
