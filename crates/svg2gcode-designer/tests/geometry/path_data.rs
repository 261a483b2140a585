use proptest::prelude::*;
use svg2gcode_core::{PathSyntaxError, Point};
use svg2gcode_designer::{format_path_data, parse_path_data, PathInterpreter};

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn test_closed_square() {
    let parsed = parse_path_data("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
    assert!(parsed.closed);
    assert_eq!(
        parsed.points,
        pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
    );
}

#[test]
fn test_relative_commands() {
    let parsed = parse_path_data("m1,1 l2,0 v2 h-2 z").unwrap();
    assert!(parsed.closed);
    assert_eq!(
        parsed.points,
        pts(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)])
    );
}

#[test]
fn test_absolute_horizontal_vertical() {
    let parsed = parse_path_data("M2 3 H7 V9").unwrap();
    assert_eq!(parsed.points, pts(&[(2.0, 3.0), (7.0, 3.0), (7.0, 9.0)]));
}

#[test]
fn test_implicit_line_after_move() {
    let parsed = parse_path_data("M0 0 10 0 10 10").unwrap();
    assert!(!parsed.closed);
    assert_eq!(parsed.points, pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));

    let parsed = parse_path_data("m1 1 2 0 0 2").unwrap();
    assert_eq!(parsed.points, pts(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0)]));
}

#[test]
fn test_compact_syntax() {
    let parsed = parse_path_data("M0-1L5-1.5e1").unwrap();
    assert_eq!(parsed.points, pts(&[(0.0, -1.0), (5.0, -15.0)]));
}

#[test]
fn test_compact_decimals() {
    let parsed = parse_path_data("M.5.5l.5-.5").unwrap();
    assert_eq!(parsed.points, pts(&[(0.5, 0.5), (1.0, 0.0)]));
}

#[test]
fn test_repeated_curve_groups() {
    let parsed = parse_path_data("M0 0 C0 0 1 0 1 0 C 1 0 2 0 2 0 c0 0 1 0 1 0").unwrap();
    // Straight curves flatten to their end points only.
    assert_eq!(parsed.points, pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]));

    let parsed = parse_path_data("M0 0 C0 0 1 0 1 0 1 0 2 0 2 0").unwrap();
    assert_eq!(parsed.points.len(), 3);
}

#[test]
fn test_multiple_subpaths_share_one_polyline() {
    let parsed = parse_path_data("M0 0 L1 0 M5 5 L6 5").unwrap();
    assert_eq!(parsed.points.len(), 4);
    assert!(!parsed.closed);
}

#[test]
fn test_close_keeps_current_point() {
    // After Z the current point is still (4,4), so the relative line starts there.
    let parsed = parse_path_data("M0 0 L4 4 Z l1 0").unwrap();
    assert_eq!(
        parsed.points,
        pts(&[(0.0, 0.0), (4.0, 4.0), (0.0, 0.0), (5.0, 4.0)])
    );
    assert!(parsed.closed);
}

#[test]
fn test_empty_input() {
    for data in ["", "   ", "Z"] {
        let parsed = parse_path_data(data).unwrap();
        assert!(parsed.is_empty());
        assert!(!parsed.closed);
    }
}

#[test]
fn test_syntax_errors() {
    assert_eq!(parse_path_data("10 10"), Err(PathSyntaxError::MissingCommand));
    assert_eq!(
        parse_path_data("M 0"),
        Err(PathSyntaxError::MissingCoordinates {
            command: 'M',
            expected: 2,
            found: 1
        })
    );
    assert_eq!(
        parse_path_data("M0 0 L H5"),
        Err(PathSyntaxError::MissingCoordinates {
            command: 'L',
            expected: 2,
            found: 0
        })
    );
    assert_eq!(
        parse_path_data("M0 0 v"),
        Err(PathSyntaxError::MissingCoordinates {
            command: 'v',
            expected: 1,
            found: 0
        })
    );
    assert_eq!(
        parse_path_data("M0,0 C1,1 2,2"),
        Err(PathSyntaxError::IncompleteCurve {
            command: 'C',
            found: 4
        })
    );
    assert_eq!(
        parse_path_data("M0 0 L 1..2 3"),
        Err(PathSyntaxError::InvalidNumber {
            token: "1..2".to_string()
        })
    );
    assert!(matches!(
        parse_path_data("M0 0 Z 1 1"),
        Err(PathSyntaxError::UnexpectedCoordinate { command: 'Z', .. })
    ));
}

#[test]
fn test_custom_flatness() {
    let data = "M0 0 C0 20 20 20 20 0";
    let coarse = PathInterpreter::with_flatness(5.0).parse(data).unwrap();
    let fine = PathInterpreter::with_flatness(0.01).parse(data).unwrap();
    assert!(fine.points.len() > coarse.points.len());
    assert_eq!(coarse.points.last(), fine.points.last());
}

#[test]
fn test_format_round_trip_with_curve() {
    let parsed = parse_path_data("M0,0 C0,0 10,0 10,10 L0,10 Z").unwrap();
    let text = format_path_data(&parsed.points, parsed.closed);
    let again = parse_path_data(&text).unwrap();
    assert_eq!(again, parsed);
}

fn polyline() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y)),
        1..20,
    )
}

proptest! {
    #[test]
    fn formatted_path_reparses_to_same_points(mut points in polyline(), closed in any::<bool>()) {
        if closed && points.len() > 1 {
            points.push(points[0]);
        }
        let parsed = parse_path_data(&format_path_data(&points, closed)).unwrap();
        prop_assert_eq!(parsed.points, points);
    }
}
