use super::*;
use nalgebra::{point, Point2};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn zero_normal_is_rejected() {
    assert!(matches!(
        Plane::new(0.0, 0.0, 0.0, 1.0),
        Err(OverlapError::DegenerateGeometry(_))
    ));
    assert!(Plane::new(f64::NAN, 0.0, 1.0, 0.0).is_err());
    assert!(Plane::new(0.0, 0.0, 2.0, -4.0).is_ok());
    assert_eq!(Plane::horizontal(3.0).unwrap().coefficients(), [0.0, 0.0, 1.0, -3.0]);
}

#[test]
fn projection_lands_on_plane_and_is_orthogonal() {
    // Non-unit normal on purpose.
    let plane = Plane::new(1.0, 2.0, -2.0, 3.0).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let p = point![
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0)
        ];
        let q = plane.project(&p);
        assert!(plane.evaluate(&q).abs() < 1e-9);
        // Displacement is parallel to the normal.
        let cross = (p - q).cross(&plane.normal());
        assert!(cross.norm() < 1e-9);
    }
}

#[test]
fn projection_is_idempotent() {
    let plane = Plane::horizontal(-12.5).unwrap();
    let q = plane.project(&point![3.0, 4.0, 7.0]);
    assert_eq!(q, point![3.0, 4.0, -12.5]);
    assert_eq!(plane.project(&q), q);
}

#[test]
fn project_line_preserves_length_and_order() {
    let plane = Plane::horizontal(0.0).unwrap();
    let line = vec![
        point![1.0f32, 2.0, 3.0],
        point![4.0f32, 5.0, -6.0],
        point![7.0f32, 8.0, 9.0],
    ];
    let projected = plane.project_line(&line);
    assert_eq!(projected.len(), 3);
    for (src, dst) in line.iter().zip(&projected) {
        assert_eq!(dst.x, src.x as f64);
        assert_eq!(dst.y, src.y as f64);
        assert_eq!(dst.z, 0.0);
    }
}

#[test]
fn frame_axes_are_orthonormal() {
    let plane = Plane::new(0.3, -0.4, 1.0, 2.0).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let line: Vec<_> = (0..10)
            .map(|_| {
                point![
                    rng.gen_range(-100.0f32..100.0),
                    rng.gen_range(-100.0f32..100.0),
                    rng.gen_range(-20.0f32..0.0)
                ]
            })
            .collect();
        let projected = plane.project_line(&line);
        let frame = LocalFrame::from_line(&projected, &plane).unwrap();
        assert!(frame.orthogonality().abs() < 1e-12);
        assert!((frame.axis_u().norm() - 1.0).abs() < 1e-12);
        assert!((frame.axis_v().norm() - 1.0).abs() < 1e-12);
        // Both axes lie in the plane.
        assert!(frame.axis_u().dot(&plane.normal()).abs() < 1e-9);
        assert!(frame.axis_v().dot(&plane.normal()).abs() < 1e-9);
    }
}

#[test]
fn frame_anchors_on_first_and_last_points() {
    let plane = Plane::horizontal(0.0).unwrap();
    let projected = vec![point![1.0, 1.0, 0.0], point![5.0, 2.0, 0.0], point![4.0, 1.0, 0.0]];
    let frame = LocalFrame::from_line(&projected, &plane).unwrap();
    assert_eq!(frame.origin(), point![1.0, 1.0, 0.0]);
    assert_eq!(frame.to_plane_2d(&projected[0]), Point2::origin());
    let last = frame.to_plane_2d(&projected[2]);
    assert!((last.x - 3.0).abs() < 1e-12);
    assert!(last.y.abs() < 1e-12);
    // z-up normal: v is u rotated +90°.
    assert!((frame.axis_v().y - 1.0).abs() < 1e-12);
}

#[test]
fn coincident_endpoints_are_degenerate() {
    let plane = Plane::horizontal(0.0).unwrap();
    let projected = vec![point![2.0, 3.0, 0.0], point![2.0, 3.0, 0.0]];
    let err = LocalFrame::from_line(&projected, &plane).unwrap_err();
    assert!(matches!(err, OverlapError::DegenerateGeometry(_)));

    let single = vec![point![2.0, 3.0, 0.0]];
    assert!(LocalFrame::from_line(&single, &plane).is_err());
    assert!(LocalFrame::from_line(&[], &plane).is_err());
}

#[test]
fn endpoints_differing_only_along_normal_collapse() {
    // Distinct in 3D, identical once projected.
    let plane = Plane::horizontal(0.0).unwrap();
    let line = vec![point![1.0f32, 1.0, -5.0], point![3.0f32, 0.0, 2.0], point![1.0f32, 1.0, 4.0]];
    let projected = plane.project_line(&line);
    assert!(LocalFrame::from_line(&projected, &plane).is_err());
}

#[test]
fn to_world_inverts_to_plane_2d() {
    let plane = Plane::new(1.0, 1.0, 1.0, -3.0).unwrap();
    let line = vec![point![0.0f32, 0.0, 0.0], point![10.0f32, -2.0, 1.0], point![4.0f32, 5.0, 6.0]];
    let projected = plane.project_line(&line);
    let frame = LocalFrame::from_line(&projected, &plane).unwrap();
    for q in &projected {
        let back = frame.to_world(&frame.to_plane_2d(q));
        assert!((back - *q).norm() < 1e-9);
    }
}
