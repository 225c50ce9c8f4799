use super::*;
use crate::circle::SphCircle;
use crate::num::Tolerance;
use crate::sphere::{ArcId, ElementId, Sphere};
use approx::assert_abs_diff_eq;
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_6;

fn great(x: f64, y: f64, z: f64) -> SphCircle {
    SphCircle::great(Vector3::new(x, y, z))
}

fn equator() -> SphCircle {
    great(0.0, 0.0, 1.0)
}

/// Hemispheres, north cut by `north_cut`, south cut by `south_cut`.
/// Returns the pieces as `[north inside, north outside, south inside, south outside]`.
fn cut_halves(north_cut: &SphCircle, south_cut: &SphCircle) -> (Sphere, [ElementId; 4]) {
    let mut s = Sphere::default();
    let w = s.whole_sphere();
    let (n, so) = s.slice(w, &equator()).unwrap();
    let (a, b) = s.slice(n[0], north_cut).unwrap();
    let (c, d) = s.slice(so[0], south_cut).unwrap();
    (s, [a[0], b[0], c[0], d[0]])
}

fn quarters() -> (Sphere, [ElementId; 4]) {
    cut_halves(&great(1.0, 0.0, 0.0), &great(1.0, 0.0, 0.0))
}

fn arc_on(s: &Sphere, e: ElementId, circle: &SphCircle) -> ArcId {
    let tol = s.tolerance();
    s.element(e)
        .unwrap()
        .arcs()
        .find(|&a| s.arc(a).unwrap().circle().same_as(circle, tol))
        .unwrap()
}

fn side_length(s: &Sphere, l: LockId, side: LockSide) -> f64 {
    let lock = s.lock(l).unwrap();
    lock.side(side)
        .iter()
        .map(|&a| s.arc(a).unwrap().length())
        .sum()
}

fn assert_turns(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-9);
    }
}

#[test]
fn hemisphere_lock_is_flat() {
    let mut s = Sphere::default();
    let w = s.whole_sphere();
    let (n, so) = s.slice(w, &equator()).unwrap();
    let seed = s.loops(n[0]).unwrap()[0][0];
    let l = s.build_lock(seed).unwrap().unwrap();
    let lock = s.lock(l).unwrap();
    assert_eq!(lock.side(LockSide::Left), &[seed]);
    assert_eq!(lock.side(LockSide::Right).len(), 1);
    assert_abs_diff_eq!(side_length(&s, l, LockSide::Left), 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(side_length(&s, l, LockSide::Right), 4.0, epsilon = 1e-9);
    assert!(lock
        .ticks(LockSide::Left)
        .iter()
        .all(|t| t.kind == TickKind::Flat));
    assert!(lock.passwords().is_empty());
    assert_eq!(s.elements_of_side(l, LockSide::Left).unwrap(), n);
    assert_eq!(s.elements_of_side(l, LockSide::Right).unwrap(), so);
    assert_eq!(s.lock_at(seed).unwrap(), Some(l));

    s.twist(l, 0.5, LockSide::Left).unwrap();
    assert_abs_diff_eq!(s.lock(l).unwrap().offset(), 3.5, epsilon = 1e-12);
    s.validate().unwrap();
    s.twist(l, 0.0, LockSide::Left).unwrap();
    assert_abs_diff_eq!(s.lock(l).unwrap().offset(), 3.5, epsilon = 1e-12);
}

#[test]
fn quarter_lock_has_two_passwords() {
    let (mut s, [ne, nw, se, sw]) = quarters();
    let seed = arc_on(&s, ne, &equator());
    let l = s.build_lock(seed).unwrap().unwrap();
    let lock = s.lock(l).unwrap();
    assert_eq!(lock.side(LockSide::Left).len(), 2);
    assert_eq!(lock.side(LockSide::Right).len(), 2);
    assert_abs_diff_eq!(side_length(&s, l, LockSide::Left), 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(side_length(&s, l, LockSide::Right), 4.0, epsilon = 1e-9);
    for side in [LockSide::Left, LockSide::Right] {
        for tick in lock.ticks(side) {
            match &tick.kind {
                TickKind::Corner { latches, free } => {
                    assert!(!free);
                    assert_eq!(latches.len(), 1);
                    assert_abs_diff_eq!(latches[0].angle, 1.0, epsilon = 1e-9);
                    assert_abs_diff_eq!(latches[0].radius, 1.0, epsilon = 1e-9);
                }
                TickKind::Flat => panic!("unexpected flat tick"),
            }
        }
    }
    assert_turns(lock.passwords(), &[0.0, 2.0]);
    assert_eq!(s.elements_of_side(l, LockSide::Left).unwrap(), vec![ne, nw]);
    assert_eq!(s.elements_of_side(l, LockSide::Right).unwrap(), vec![se, sw]);
}

#[test]
fn twist_releases_crossing_lock_until_realigned() {
    let (mut s, [ne, ..]) = quarters();
    let meridian = great(1.0, 0.0, 0.0);
    let kin = arc_on(&s, ne, &meridian);
    let m = s.build_lock(kin).unwrap().unwrap();
    let l = s.build_lock(arc_on(&s, ne, &equator())).unwrap().unwrap();

    s.twist(l, 1.0, LockSide::Left).unwrap();
    s.validate().unwrap();
    assert!(s.lock(m).is_err());
    assert_eq!(s.arc(kin).unwrap().lock(), None);
    assert_eq!(s.build_lock(kin).unwrap(), None);
    assert_turns(s.lock(l).unwrap().passwords(), &[1.0, 3.0]);
    assert_abs_diff_eq!(s.lock(l).unwrap().offset(), 3.0, epsilon = 1e-12);

    s.twist(l, 1.0, LockSide::Left).unwrap();
    s.validate().unwrap();
    assert_turns(s.lock(l).unwrap().passwords(), &[0.0, 2.0]);
    assert!(s.build_lock(kin).unwrap().is_some());
}

#[test]
fn right_twist_moves_the_other_side() {
    let (mut s, [ne, nw, se, sw]) = quarters();
    let l = s.build_lock(arc_on(&s, ne, &equator())).unwrap().unwrap();
    let north_pole = s.locate(ne, &Vector3::new(0.5, 0.5, 0.7)).unwrap();
    s.twist(l, 0.5, LockSide::Right).unwrap();
    s.validate().unwrap();
    assert_eq!(s.locate(ne, &Vector3::new(0.5, 0.5, 0.7)).unwrap(), north_pole);
    assert_turns(s.lock(l).unwrap().passwords(), &[1.5, 3.5]);
    let south_areas: f64 = [se, sw].iter().map(|&e| s.area(e).unwrap()).sum();
    let north_areas: f64 = [ne, nw].iter().map(|&e| s.area(e).unwrap()).sum();
    assert_abs_diff_eq!(south_areas, north_areas, epsilon = 1e-9);
}

#[test]
fn lock_on_moving_side_turns_with_it() {
    let mut s = Sphere::default();
    let w = s.whole_sphere();
    let (n, _) = s.slice(w, &equator()).unwrap();
    let cap = SphCircle::new(Vector3::new(0.5, 0.0, 0.85), 0.3);
    let (inner, ring) = s.slice(n[0], &cap).unwrap();
    let plug = arc_on(&s, inner[0], &cap);
    let hole = arc_on(&s, ring[0], &cap.complement());
    let c = s.build_lock(plug).unwrap().unwrap();
    let l = s.build_lock(arc_on(&s, ring[0], &equator())).unwrap().unwrap();

    s.twist(l, 1.0, LockSide::Left).unwrap();
    s.validate().unwrap();
    let tol = s.tolerance();
    let moved = *s.lock(c).unwrap().circle();
    assert!(moved.same_as(s.arc(plug).unwrap().circle(), tol));
    assert!(!moved.same_as(&cap, tol));
    assert_abs_diff_eq!(moved.center().z, cap.center().z, epsilon = 1e-9);

    s.twist(c, 1.0, LockSide::Left).unwrap();
    s.validate().unwrap();
    let p = *s.arc(plug).unwrap().circle();
    let h = *s.arc(hole).unwrap().circle();
    assert!(p.same_as(&h.complement(), tol));
    assert!(p.same_as(&moved, tol));
    assert!(s.arc(plug).unwrap().offset_to(hole).is_some());
}

#[test]
fn passwords_do_not_depend_on_seed_side() {
    let tilted = SphCircle::great(Vector3::new(FRAC_PI_6.cos(), FRAC_PI_6.sin(), 0.0));
    let (mut s, [ne, _, se, _]) = cut_halves(&great(1.0, 0.0, 0.0), &tilted);
    let from_north = s.build_lock(arc_on(&s, ne, &equator())).unwrap().unwrap();
    let north_pw = s.lock(from_north).unwrap().passwords().to_vec();
    assert_turns(&north_pw, &[1.0 / 3.0, 7.0 / 3.0]);
    s.unlock(from_north).unwrap();
    assert!(s.lock_ids().is_empty());

    let south_seed = arc_on(&s, se, &equator().complement());
    let from_south = s.build_lock(south_seed).unwrap().unwrap();
    assert_turns(s.lock(from_south).unwrap().passwords(), &north_pw);
}

#[test]
fn twisting_by_a_password_completes_a_circle() {
    let tilted = SphCircle::great(Vector3::new(FRAC_PI_6.cos(), FRAC_PI_6.sin(), 0.0));
    let (mut s, [ne, ..]) = cut_halves(&great(1.0, 0.0, 0.0), &tilted);
    let kin = arc_on(&s, ne, &great(1.0, 0.0, 0.0));
    assert_eq!(s.build_lock(kin).unwrap(), None);

    let l = s.build_lock(arc_on(&s, ne, &equator())).unwrap().unwrap();
    let first = s.lock(l).unwrap().passwords()[0];
    s.twist(l, first, LockSide::Left).unwrap();
    s.validate().unwrap();
    assert_abs_diff_eq!(s.lock(l).unwrap().passwords()[0], 0.0, epsilon = 1e-9);
    assert!(s.arc(kin).unwrap().circle().same_as(&tilted, s.tolerance()));
    assert!(s.build_lock(kin).unwrap().is_some());
}

#[test]
fn decipher_skips_free_ticks() {
    let tol = Tolerance::default();
    let latch = |angle| Latch { angle, radius: 1.0 };
    let corner = |position, latches: Vec<Latch>| {
        let free = latches.iter().all(|l| l.is_tangent(tol));
        Tick {
            position,
            arc: ArcId(0),
            kind: TickKind::Corner { latches, free },
        }
    };
    let left = [corner(0.5, vec![latch(1.0)]), corner(1.5, vec![latch(0.0)])];
    let right = [corner(3.0, vec![latch(1.0)]), corner(2.0, vec![latch(2.0)])];
    assert_turns(&decipher(&left, &right, tol), &[2.5]);
    assert!(decipher(&left[1..], &right, tol).is_empty());
}

#[test]
fn unlock_clears_segments() {
    let (mut s, [ne, ..]) = quarters();
    let l = s.build_lock(arc_on(&s, ne, &equator())).unwrap().unwrap();
    let segs: Vec<ArcId> = s.lock(l).unwrap().segments().collect();
    assert_eq!(segs.len(), 4);
    s.unlock(l).unwrap();
    for a in segs {
        assert_eq!(s.arc(a).unwrap().lock(), None);
    }
    assert!(matches!(
        s.unlock(l),
        Err(crate::error::KernelError::UnknownLock(_))
    ));
}
