use keebgen_core::{Point, cross_about};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn rotating_back_restores_point(p in point(), pivot in point(), angle in -10.0f64..10.0) {
        let back = p.rotate_about(pivot, angle).rotate_about(pivot, -angle);
        prop_assert!(back.approx_eq(p, 1e-9));
    }

    #[test]
    fn rotation_keeps_distance_to_pivot(p in point(), pivot in point(), angle in -10.0f64..10.0) {
        let before = p - pivot;
        let after = p.rotate_about(pivot, angle) - pivot;
        prop_assert!((before.x.hypot(before.y) - after.x.hypot(after.y)).abs() < 1e-9);
    }

    #[test]
    fn quarter_turn_lands_on_left_side(u in point(), v in point()) {
        prop_assume!(!u.approx_eq(v, 1e-3));
        // Rotating v a quarter turn counter-clockwise about u puts it left of u -> v.
        let left = v.rotate_about(u, std::f64::consts::FRAC_PI_2);
        prop_assert!(cross_about(left, u, v) < 0.0);
    }
}
