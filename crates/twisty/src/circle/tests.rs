use super::*;
use crate::num::Tolerance;
use approx::assert_relative_eq;
use nalgebra::Vector3;
use proptest::prelude::*;

fn tol() -> Tolerance {
    Tolerance::default()
}

#[test]
fn point_and_theta_agree() {
    let c = SphCircle::new(Vector3::new(0.3, -0.2, 0.9), 0.7);
    for k in 0..8 {
        let th = 0.5 * k as f64 + 0.1;
        let p = c.point(th);
        assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.distance_to(&p), 0.7, epsilon = 1e-9);
        assert_relative_eq!(c.theta_of(&p, tol()), th % 4.0, epsilon = 1e-9);
    }
}

#[test]
fn cap_lies_left_of_travel() {
    let c = SphCircle::new(Vector3::new(1.0, 2.0, -0.5), 0.4);
    let p = c.point(1.3);
    let t = c.tangent(1.3);
    let left = p.cross(&t);
    // moving a little to the left enters the cap
    let probe = (p + 1e-3 * left).normalize();
    assert_eq!(c.side_of(&probe, tol()), crate::num::Side::Inside);
}

#[test]
fn complement_reverses_parameter() {
    let c = SphCircle::new(Vector3::new(-0.4, 0.1, 0.3), 1.3);
    let k = c.complement();
    assert_relative_eq!(k.radius(), 0.7, epsilon = 1e-12);
    for th in [0.0, 0.7, 1.9, 3.2] {
        assert_relative_eq!(k.point(th), c.point(-th), epsilon = 1e-12);
    }
    assert_eq!(c.relation_to(&k, tol()), Relation::Complement);
}

#[test]
fn concentric_relations() {
    let small = SphCircle::new(Vector3::z(), 0.5);
    let big = SphCircle::new(Vector3::z(), 1.0);
    assert_eq!(big.relation_to(&small, tol()), Relation::Include);
    assert_eq!(small.relation_to(&big, tol()), Relation::AntiInclude);
    assert_eq!(small.relation_to(&small, tol()), Relation::Equal);
    assert_eq!(big.meet(&small, tol()), Meet::Disjoint);
}

#[test]
fn kissing_caps_touch_once() {
    let a = SphCircle::new(Vector3::z(), 0.5);
    let b = SphCircle::new(Vector3::x(), 0.5);
    assert_eq!(a.relation_to(&b, tol()), Relation::KissingExclude);
    let pts = a.meet(&b, tol()).points();
    assert_eq!(pts.len(), 1);
    let s = std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(pts[0], Vector3::new(s, 0.0, s), epsilon = 1e-9);
}

#[test]
fn far_caps_exclude_and_cover() {
    let a = SphCircle::new(Vector3::z(), 0.3);
    let b = SphCircle::new(-Vector3::z(), 0.3);
    assert_eq!(a.relation_to(&b, tol()), Relation::Exclude);
    let ac = a.complement();
    let bc = b.complement();
    assert_eq!(ac.relation_to(&bc, tol()), Relation::AntiExclude);
}

#[test]
fn orthogonal_great_circles() {
    let a = SphCircle::great(Vector3::z());
    let b = SphCircle::great(Vector3::x());
    match a.relation_to(&b, tol()) {
        Relation::Intersect(x) => {
            assert_relative_eq!(x.angle, 1.0, epsilon = 1e-9);
            assert_relative_eq!(x.arc, 2.0, epsilon = 1e-9);
            assert_relative_eq!(x.dual_arc, 2.0, epsilon = 1e-9);
        }
        other => panic!("expected intersection, got {other:?}"),
    }
    match a.meet(&b, tol()) {
        Meet::Cross(enter, exit) => {
            // entering the x>0 hemisphere along the equator happens at -y
            assert_relative_eq!(enter, -Vector3::y(), epsilon = 1e-9);
            assert_relative_eq!(exit, Vector3::y(), epsilon = 1e-9);
        }
        other => panic!("expected crossing, got {other:?}"),
    }
}

fn unit_vec() -> impl Strategy<Value = Vector3<f64>> {
    (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0)
        .prop_filter("non-degenerate", |(x, y, z)| x * x + y * y + z * z > 0.05)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z).normalize())
}

proptest! {
    #[test]
    fn relation_with_self_and_complement(c in unit_vec(), r in 0.05f64..1.95) {
        let s = SphCircle::new(c, r);
        prop_assert_eq!(s.relation_to(&s, tol()), Relation::Equal);
        prop_assert_eq!(s.relation_to(&s.complement(), tol()), Relation::Complement);
    }

    #[test]
    fn crossing_points_lie_on_both(c1 in unit_vec(), c2 in unit_vec(), r1 in 0.2f64..1.8, r2 in 0.2f64..1.8) {
        let a = SphCircle::new(c1, r1);
        let b = SphCircle::new(c2, r2);
        if let Meet::Cross(p, q) = a.meet(&b, tol()) {
            prop_assert!((a.distance_to(&p) - r1).abs() < 1e-6);
            prop_assert!((b.distance_to(&p) - r2).abs() < 1e-6);
            prop_assert!((a.distance_to(&q) - r1).abs() < 1e-6);
            prop_assert!((b.distance_to(&q) - r2).abs() < 1e-6);
        }
    }
}
