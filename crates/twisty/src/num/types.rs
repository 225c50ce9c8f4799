//! Tolerance configuration and the three-way side classification.

use std::cmp::Ordering;
use std::fmt;

/// Numeric configuration (tolerances) passed explicitly to every operation.
#[derive(Clone, Copy, Debug)]
pub struct Tolerance {
    /// Comparison epsilon for lengths and angles, in quadrants.
    pub eps: f64,
    /// Upper bound on steps for any loop/vertex walk before it is declared broken.
    pub max_walk: usize,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            eps: 1e-5,
            max_walk: 4096,
        }
    }
}

impl Tolerance {
    #[inline]
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            ..Self::default()
        }
    }

    /// Three-way compare with an `eps` dead band around equality.
    #[inline]
    pub fn cmp(&self, a: f64, b: f64) -> Ordering {
        if (a - b).abs() < self.eps {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    #[inline]
    pub fn eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.eps
    }

    #[inline]
    pub fn is_zero(&self, a: f64) -> bool {
        a.abs() < self.eps
    }

    /// Reduce into `[0, 4)`; values within `eps` of `0` or `4` become exactly `0`.
    #[inline]
    pub fn mod4(&self, x: f64) -> f64 {
        let r = x.rem_euclid(4.0);
        if r < self.eps || r > 4.0 - self.eps {
            0.0
        } else {
            r
        }
    }

    /// `mod4` followed by snapping to the first listed target within `eps`.
    pub fn mod4_snap(&self, x: f64, targets: &[f64]) -> f64 {
        let r = self.mod4(x);
        self.snap(r, targets)
    }

    /// Replace `x` by the first target within `eps`, else return it unchanged.
    #[inline]
    pub fn snap(&self, x: f64, targets: &[f64]) -> f64 {
        targets
            .iter()
            .copied()
            .find(|&t| self.eq(x, t))
            .unwrap_or(x)
    }

    /// Distance between two periodic values on the circle of circumference 4.
    #[inline]
    pub fn dist4(&self, a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(4.0);
        d.min(4.0 - d)
    }

    /// True when `a` and `b` coincide modulo 4.
    #[inline]
    pub fn eq4(&self, a: f64, b: f64) -> bool {
        self.dist4(a, b) < self.eps
    }
}

/// Where something lies relative to a region or cap: inside, outside, or on its boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Inside,
    Outside,
    On,
}

impl Side {
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Side::Inside => '+',
            Side::Outside => '-',
            Side::On => '0',
        }
    }

    /// Sort rank; `Inside < Outside < On`.
    #[inline]
    pub(crate) fn rank(self) -> u8 {
        match self {
            Side::Inside => 0,
            Side::Outside => 1,
            Side::On => 2,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
