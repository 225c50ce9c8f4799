//! Criterion microbenches for cutting and twisting.
//!
//! - slice: whole sphere cut by 2-8 seeded random circles.
//! - twist: quarter turn of the equator lock on a sphere cut by meridians.
//! - circle relation on random pairs.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector3;
use twisty::prelude::*;

fn cut_all(circles: &[SphCircle]) -> Sphere {
    let mut s = Sphere::default();
    s.whole_sphere();
    for c in circles {
        for e in s.element_ids() {
            s.slice(e, c).unwrap();
        }
    }
    s
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice");
    let cfg = CircleCfg::default();
    for n in [2usize, 4, 8] {
        let circles = draw_circles(cfg, 42, n);
        group.bench_with_input(BenchmarkId::new("random_circles", n), &circles, |b, cs| {
            b.iter(|| cut_all(cs))
        });
    }
    group.finish();
}

fn bench_twist(c: &mut Criterion) {
    let mut group = c.benchmark_group("twist");
    let equator = SphCircle::great(Vector3::z());
    let mut circles = vec![equator];
    for phi in [0.0f64, 0.5, 1.1, 2.3] {
        circles.push(SphCircle::great(Vector3::new(phi.cos(), phi.sin(), 0.0)));
    }
    let base = cut_all(&circles);
    let seed = base
        .arc_ids()
        .into_iter()
        .find(|&a| base.arc(a).unwrap().circle().same_as(&equator, base.tolerance()));
    group.bench_function(BenchmarkId::new("equator_quarter_turn", 4), |b| {
        b.iter_batched(
            || base.clone(),
            |mut s| {
                if let Some(l) = seed.and_then(|a| s.build_lock(a).unwrap()) {
                    s.twist(l, 1.0, LockSide::Left).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_relation(c: &mut Criterion) {
    let circles = draw_circles(CircleCfg::default(), 3, 64);
    let tol = Tolerance::default();
    c.bench_function("relation/random_pairs", |b| {
        b.iter(|| {
            let mut n = 0usize;
            for pair in circles.windows(2) {
                if pair[0].relation_to(&pair[1], tol).is_coincident() {
                    n += 1;
                }
            }
            n
        })
    });
}

criterion_group!(benches, bench_slice, bench_twist, bench_relation);
criterion_main!(benches);
