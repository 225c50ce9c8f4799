//! Random cutting circles (uniform centers + replay tokens).
//!
//! Purpose
//! - Deterministic sampler of cutting circles for benches, the CLI, and
//!   randomized tests. Each draw is addressed by `(seed, index)` so a single
//!   failing cut can be replayed without regenerating the whole sequence.
//!
//! Model
//! - Center uniform on the sphere (uniform height and azimuth), radius
//!   uniform in `[radius_min, radius_max]` quadrants.
//!
//! Code cross-refs: `SphCircle::new`, `Sphere::slice`

use crate::circle::SphCircle;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Radius range for drawn circles, in quadrants. Clamped into `(0, 2)`.
#[derive(Clone, Copy, Debug)]
pub struct CircleCfg {
    pub radius_min: f64,
    pub radius_max: f64,
}
impl Default for CircleCfg {
    fn default() -> Self {
        Self {
            radius_min: 0.2,
            radius_max: 1.8,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one cutting circle.
pub fn draw_circle(cfg: CircleCfg, tok: ReplayToken) -> SphCircle {
    let mut rng = tok.to_std_rng();
    let z: f64 = rng.gen_range(-1.0..1.0);
    let phi: f64 = rng.gen::<f64>() * 2.0 * std::f64::consts::PI;
    let rho = (1.0 - z * z).max(0.0).sqrt();
    let center = Vector3::new(rho * phi.cos(), rho * phi.sin(), z);
    let lo = cfg.radius_min.clamp(1e-3, 2.0 - 1e-3);
    let hi = cfg.radius_max.clamp(lo, 2.0 - 1e-3);
    let radius = if hi > lo { rng.gen_range(lo..hi) } else { lo };
    SphCircle::new(center, radius)
}

/// `n` circles with indices `0..n` under one seed.
pub fn draw_circles(cfg: CircleCfg, seed: u64, n: usize) -> Vec<SphCircle> {
    (0..n as u64)
        .map(|index| draw_circle(cfg, ReplayToken { seed, index }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_token_same_circle() {
        let cfg = CircleCfg::default();
        let tok = ReplayToken { seed: 7, index: 3 };
        assert_eq!(draw_circle(cfg, tok), draw_circle(cfg, tok));
        let other = draw_circle(cfg, ReplayToken { seed: 7, index: 4 });
        assert_ne!(draw_circle(cfg, tok), other);
    }

    #[test]
    fn radii_respect_bounds() {
        let cfg = CircleCfg {
            radius_min: 0.5,
            radius_max: 0.7,
        };
        for c in draw_circles(cfg, 11, 64) {
            assert!((0.5..0.7).contains(&c.radius()));
        }
    }
}
