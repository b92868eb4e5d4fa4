use scene_outline_engine::geom::{
    DEFAULT_RADIUS, Point3, RoundedCornerError, RoundedCornerOptions, Tolerance, round_corners,
    round_corners_uniform, rounded_corner_geometry,
};
use scene_outline_engine::rounded_corner_line;

#[test]
fn flat_api_rounds_right_angle() {
    let coordinates = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
    let positions = rounded_corner_line(&coordinates, &[0.0, 0.2, 0.0], Some(4.0), Some(false))
        .expect("valid polyline");

    assert_eq!(positions.len(), 7 * 3);
    assert_eq!(&positions[..3], &[0.0, 0.0, 0.0]);
    assert_eq!(&positions[positions.len() - 3..], &[1.0, 1.0, 0.0]);

    for xyz in positions[3..18].chunks_exact(3) {
        let dx = f64::from(xyz[0]) - 0.8;
        let dy = f64::from(xyz[1]) - 0.2;
        assert!(((dx * dx + dy * dy).sqrt() - 0.2).abs() < 1e-6);
    }
}

#[test]
fn flat_api_uses_default_smoothness() {
    let coordinates = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0,
    ];
    let positions =
        rounded_corner_line(&coordinates, &[DEFAULT_RADIUS; 4], None, Some(true)).unwrap();

    assert_eq!(positions.len() / 3, 4 * (RoundedCornerOptions::DEFAULT_SMOOTHNESS + 1) + 1);
    assert_eq!(&positions[..3], &positions[positions.len() - 3..]);
}

#[test]
fn flat_api_passes_short_input_through() {
    assert!(rounded_corner_line(&[], &[], None, None).unwrap().is_empty());
    let pair = rounded_corner_line(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[], None, None).unwrap();
    assert_eq!(pair, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn closed_square_scenario() {
    let square = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let (rounded, diag) = round_corners(
        &square,
        &[0.1; 4],
        RoundedCornerOptions::closed(3),
        Tolerance::default_geom(),
    )
    .unwrap();

    assert_eq!(diag.rounded_corner_count, 4);
    assert_eq!(rounded.len(), 17);
    assert_eq!(rounded[0], rounded[16]);
}

#[test]
fn open_endpoints_are_preserved_exactly() {
    let polyline = [
        Point3::new(0.3, -1.7, 2.2),
        Point3::new(1.1, 0.4, 2.0),
        Point3::new(2.9, 0.1, -0.6),
        Point3::new(3.3, 2.5, 0.4),
    ];
    let (rounded, _) = round_corners_uniform(
        &polyline,
        0.35,
        RoundedCornerOptions::open(8),
        Tolerance::default_geom(),
    )
    .unwrap();

    assert_eq!(rounded.first(), polyline.first());
    assert_eq!(rounded.last(), polyline.last());
    assert!(rounded.iter().all(|p| p.is_finite()));
}

#[test]
fn geometry_reports_errors_without_partial_output() {
    let polyline = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    ];
    let result = rounded_corner_geometry(
        &polyline,
        &[0.1],
        RoundedCornerOptions::default(),
        Tolerance::default_geom(),
    );
    match result {
        Err(RoundedCornerError::MissingRadius { index, count }) => {
            assert_eq!(index, 1);
            assert_eq!(count, 1);
        }
        other => panic!("expected MissingRadius, got {other:?}"),
    }
}

#[test]
fn error_messages_name_the_vertex() {
    let err = RoundedCornerError::InvalidRadius {
        index: 2,
        radius: -1.0,
    };
    assert_eq!(
        err.to_string(),
        "radius at vertex 2 must be finite and non-negative: -1"
    );
}
