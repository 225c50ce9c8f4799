use super::*;
use crate::circle::SphCircle;
use crate::num::{Side, Tolerance};
use crate::sphere::ArcId;
use approx::assert_relative_eq;
use nalgebra::Vector3;

fn tol() -> Tolerance {
    Tolerance::default()
}

fn equator_loop() -> Arc {
    Arc::looped(ArcId(0), SphCircle::great(Vector3::z()), 4.0)
}

#[test]
fn full_circle_has_flat_corner() {
    let a = equator_loop();
    assert_relative_eq!(corner_angle(&a, &a, tol()), 2.0);
    assert_relative_eq!(a.turning(), 0.0, epsilon = 1e-12);
}

#[test]
fn quarter_corner_is_one_quadrant() {
    // x runs along the equator from +x to +y, y heads north along the x=0 meridian
    let x = Arc::looped(ArcId(0), SphCircle::great(Vector3::z()), 1.0);
    let y = Arc::looped(ArcId(1), SphCircle::great(Vector3::x()).shifted(1.0), 2.0);
    assert_relative_eq!(y.start(), Vector3::y(), epsilon = 1e-12);
    assert_relative_eq!(corner_angle(&x, &y, tol()), 1.0, epsilon = 1e-9);
}

#[test]
fn great_circle_crosses_equator_twice() {
    let a = equator_loop();
    let k = SphCircle::great(Vector3::x());
    let ms = a.meet_with(ArcId(0), &k, &a, tol());
    assert_eq!(ms.len(), 2);
    assert_relative_eq!(ms[0].offset, 1.0, epsilon = 1e-9);
    assert_relative_eq!(ms[1].offset, 3.0, epsilon = 1e-9);
    assert_eq!(ms[0].code.to_string(), "-+");
    assert_eq!(ms[0].dual.to_string(), "+-");
    assert_eq!(ms[1].code.to_string(), "+-");
    assert!(ms.iter().all(|m| m.code.is_crossing() && m.dual.is_transversal()));
    assert_relative_eq!(ms[0].theta, 1.0, epsilon = 1e-9);
}

#[test]
fn coincident_circle_reports_start_only() {
    let a = equator_loop();
    let ms = a.meet_with(ArcId(0), a.circle(), &a, tol());
    assert_eq!(ms.len(), 1);
    assert_eq!(ms[0].offset, 0.0);
    assert_eq!(ms[0].code, DirCode::new(Side::On, Side::On));
    let back = a.meet_with(ArcId(0), &a.circle().complement(), &a, tol());
    assert_eq!(back[0].code, DirCode::new(Side::On, Side::On));
}

#[test]
fn external_tangency_is_a_touch() {
    let cap = SphCircle::new(Vector3::z(), 0.5).shifted(3.0);
    let a = Arc::looped(ArcId(0), cap, 4.0);
    let k = SphCircle::new(Vector3::x(), 0.5);
    let ms = a.meet_with(ArcId(0), &k, &a, tol());
    assert_eq!(ms.len(), 1);
    assert_relative_eq!(ms[0].offset, 1.0, epsilon = 1e-6);
    assert_eq!(ms[0].code.to_string(), "--");
    assert_eq!(ms[0].dual.to_string(), "--");
    assert!(!ms[0].code.is_crossing());
}

#[test]
fn rank_orders_exit_before_entry() {
    let exit = DirCode::new(Side::Inside, Side::Outside);
    let entry = DirCode::new(Side::Outside, Side::Inside);
    assert!(exit.rank() < entry.rank());
}

#[test]
fn near_tangent_circle_through_start_meets_at_vertex() {
    // cap tangent to the equator a little past the arc's start, passing
    // through the start within eps
    let a = equator_loop();
    let touch = a.circle().point(1e-3);
    let k = SphCircle::new(touch + Vector3::z(), 0.5);
    assert!(a.circle().relation_to(&k, tol()).is_kissing());
    assert_eq!(k.side_of(&a.start(), tol()), Side::On);
    let ms = a.meet_with(ArcId(0), &k, &a, tol());
    assert_eq!(ms.len(), 1);
    assert_eq!(ms[0].offset, 0.0);
    assert_relative_eq!(ms[0].point, a.start(), epsilon = 1e-12);
}
