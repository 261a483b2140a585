use proptest::prelude::*;
use std::f64::consts::PI;
use svg2gcode_camtools::{offset_polygon, signed_area, OffsetSide};
use svg2gcode_core::Point;

fn square(side: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(side, 0.0),
        Point::new(side, side),
        Point::new(0.0, side),
        Point::new(0.0, 0.0),
    ]
}

fn side_lengths(closed: &[Point]) -> Vec<f64> {
    closed.windows(2).map(|w| w[0].distance_to(&w[1])).collect()
}

#[test]
fn test_outside_tool_radius_grows_each_side() {
    // Tool diameter 2 gives a radius of 1: a side of 2 becomes 2 + 2 * 1.
    let out = offset_polygon(&square(2.0), 2.0 / 2.0, OffsetSide::Outside);
    assert_eq!(out.len(), 5);
    for len in side_lengths(&out) {
        assert!((len - 4.0).abs() < 1e-9, "side {len}");
    }
    assert!(out[0].distance_to(&Point::new(-1.0, -1.0)) < 1e-9);
}

#[test]
fn test_inside_shrinks_each_side() {
    let out = offset_polygon(&square(10.0), 1.5, OffsetSide::Inside);
    for len in side_lengths(&out) {
        assert!((len - 7.0).abs() < 1e-9, "side {len}");
    }
}

#[test]
fn test_result_is_always_closed() {
    let triangle = [Point::new(0.0, 0.0), Point::new(6.0, 0.0), Point::new(0.0, 6.0)];
    let out = offset_polygon(&triangle, 0.5, OffsetSide::Inside);
    assert_eq!(out.len(), 4);
    assert_eq!(out.first(), out.last());
}

#[test]
fn test_concave_polygon_keeps_vertex_count() {
    // L-shape; the reflex corner still yields exactly one vertex.
    let l_shape = [
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 2.0),
        Point::new(2.0, 2.0),
        Point::new(2.0, 4.0),
        Point::new(0.0, 4.0),
    ];
    let out = offset_polygon(&l_shape, 0.5, OffsetSide::Outside);
    assert_eq!(out.len(), 7);
    assert!(out[3].distance_to(&Point::new(2.5, 2.5)) < 1e-9);
    assert!(signed_area(&out[..6]) > signed_area(&l_shape));
}

fn regular_polygon() -> impl Strategy<Value = Vec<Point>> {
    (3usize..12, 10.0f64..50.0, 0.0f64..(2.0 * PI), -20.0f64..20.0, -20.0f64..20.0, any::<bool>())
        .prop_map(|(n, radius, phase, cx, cy, clockwise)| {
            let mut pts: Vec<Point> = (0..n)
                .map(|i| {
                    let a = phase + 2.0 * PI * i as f64 / n as f64;
                    Point::new(cx + radius * a.cos(), cy + radius * a.sin())
                })
                .collect();
            if clockwise {
                pts.reverse();
            }
            pts
        })
}

proptest! {
    #[test]
    fn zero_delta_returns_input(poly in regular_polygon(), inside in any::<bool>()) {
        let side = if inside { OffsetSide::Inside } else { OffsetSide::Outside };
        prop_assert_eq!(offset_polygon(&poly, 0.0, side), poly);
    }

    #[test]
    fn inside_then_outside_recovers_convex_polygon(poly in regular_polygon(), r in 0.1f64..1.0) {
        let shrunk = offset_polygon(&poly, r, OffsetSide::Inside);
        let restored = offset_polygon(&shrunk, r, OffsetSide::Outside);
        prop_assert_eq!(restored.len(), poly.len() + 1);
        for (a, b) in restored.iter().zip(&poly) {
            prop_assert!(a.distance_to(b) < 1e-6, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn outside_offset_increases_area(poly in regular_polygon(), r in 0.1f64..5.0) {
        let grown = offset_polygon(&poly, r, OffsetSide::Outside);
        let n = poly.len();
        prop_assert!(signed_area(&grown[..n]).abs() > signed_area(&poly).abs());
    }
}
