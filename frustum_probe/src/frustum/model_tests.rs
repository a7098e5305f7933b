use glam::Vec3;
use crate::error::Error;
use super::*;

fn model_with(fov: f32, near: f32, far: f32) -> FrustumModel {
    let config = ProbeConfig {
        field_of_view_degrees: fov,
        near,
        far,
        ..ProbeConfig::default()
    };
    FrustumModel::new(&config).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_default_matches_config_defaults() {
    let model = FrustumModel::default();
    assert_eq!(model.projection_kind(), ProjectionKind::Perspective);
    assert_eq!(model.field_of_view_degrees(), 45.0);
    assert_eq!(model.ortho_side_length(), 2.5);
    assert_eq!(model.near(), 1.0);
    assert_eq!(model.far(), 5.0);
    assert_eq!(model.revision(ProjectionKind::Perspective), 0);
    assert_eq!(model.revision(ProjectionKind::Orthographic), 0);
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = ProbeConfig { near: 6.0, ..ProbeConfig::default() };
    assert!(matches!(FrustumModel::new(&config), Err(Error::InvalidParameter(_))));
}

#[test]
fn test_fov_90_corners() {
    let model = model_with(90.0, 1.0, 10.0);
    assert!((model.perspective_slope() - 1.0).abs() < 1e-6);

    let builder = model.builder();
    let near = builder.corners_at(ProjectionKind::Perspective, 1.0);
    let far = builder.corners_at(ProjectionKind::Perspective, 10.0);
    assert!(near[2].abs_diff_eq(Vec3::new(1.0, 1.0, -1.0), 1e-5));
    assert!(near[0].abs_diff_eq(Vec3::new(-1.0, -1.0, -1.0), 1e-5));
    assert!(far[2].abs_diff_eq(Vec3::new(10.0, 10.0, -10.0), 1e-4));
    assert!(far[0].abs_diff_eq(Vec3::new(-10.0, -10.0, -10.0), 1e-4));
}

// ============================================================================
// near < far invariant
// ============================================================================

#[test]
fn test_near_must_stay_below_far() {
    let mut model = FrustumModel::default();

    assert!(matches!(model.set_near(5.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(model.set_near(7.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(model.set_far(1.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(model.set_far(0.5), Err(Error::InvalidParameter(_))));
    assert_eq!(model.near(), 1.0);
    assert_eq!(model.far(), 5.0);
}

#[test]
fn test_setter_sequence_keeps_invariant() {
    let mut model = FrustumModel::default();
    let edits: [(bool, f32); 8] = [
        (true, 4.0), (false, 3.0), (false, 8.0), (true, 9.0),
        (true, 7.5), (false, 7.0), (true, 0.0), (false, 100.0),
    ];

    for (is_near, value) in edits {
        let _ = if is_near { model.set_near(value) } else { model.set_far(value) };
        assert!(model.near() < model.far());
        assert!(model.near() > 0.0);
    }
    assert_eq!(model.near(), 7.5);
    assert_eq!(model.far(), 100.0);
}

#[test]
fn test_invalid_fov_and_extent_rejected() {
    let mut model = FrustumModel::default();
    assert!(model.set_field_of_view(0.0).is_err());
    assert!(model.set_field_of_view(180.0).is_err());
    assert!(model.set_field_of_view(f32::NAN).is_err());
    assert!(model.set_ortho_half_extent(-1.0).is_err());
    assert!(model.set_ortho_side_length(0.0).is_err());
    assert_eq!(model.field_of_view_degrees(), 45.0);
    assert_eq!(model.ortho_half_extent(), 1.25);
}

// ============================================================================
// Text input
// ============================================================================

#[test]
fn test_from_str_setters() {
    let mut model = FrustumModel::default();
    model.set_field_of_view_from_str(" 60 ").unwrap();
    model.set_far_from_str("12.5").unwrap();
    model.set_near_from_str("2").unwrap();
    model.set_ortho_side_length_from_str("4").unwrap();

    assert_eq!(model.field_of_view_degrees(), 60.0);
    assert_eq!(model.far(), 12.5);
    assert_eq!(model.near(), 2.0);
    assert_eq!(model.ortho_half_extent(), 2.0);
}

#[test]
fn test_from_str_rejects_non_numeric() {
    let mut model = FrustumModel::default();
    assert!(matches!(model.set_near_from_str("abc"), Err(Error::InvalidParameter(_))));
    assert!(matches!(model.set_field_of_view_from_str(""), Err(Error::InvalidParameter(_))));
    assert_eq!(model.near(), 1.0);
}

// ============================================================================
// Projection kind
// ============================================================================

#[test]
fn test_projection_by_name() {
    let mut model = FrustumModel::default();
    assert!(model.set_projection_kind_by_name("ortho"));
    assert_eq!(model.projection_kind(), ProjectionKind::Orthographic);
    assert!(model.set_projection_kind_by_name("Perspective"));
    assert_eq!(model.projection_kind(), ProjectionKind::Perspective);
}

#[test]
fn test_projection_by_unknown_name_is_noop() {
    let mut model = FrustumModel::default();
    assert!(!model.set_projection_kind_by_name("garbage"));
    assert_eq!(model.projection_kind(), ProjectionKind::Perspective);
}

#[test]
fn test_active_camera_follows_kind() {
    let mut model = FrustumModel::default();
    assert_eq!(model.active_camera(), model.camera(ProjectionKind::Perspective));
    model.set_projection_kind(ProjectionKind::Orthographic);
    assert_eq!(model.active_camera(), model.camera(ProjectionKind::Orthographic));
}

// ============================================================================
// Regeneration
// ============================================================================

#[test]
fn test_fov_regenerates_perspective_only() {
    let mut model = FrustumModel::default();
    let ortho_before = *model.camera(ProjectionKind::Orthographic);

    model.set_field_of_view(60.0).unwrap();

    assert_eq!(model.revision(ProjectionKind::Perspective), 1);
    assert_eq!(model.revision(ProjectionKind::Orthographic), 0);
    assert_eq!(*model.camera(ProjectionKind::Orthographic), ortho_before);
    assert!((model.perspective_slope() - 30f32.to_radians().tan()).abs() < 1e-6);
}

#[test]
fn test_extent_regenerates_orthographic_only() {
    let mut model = FrustumModel::default();
    model.set_ortho_half_extent(2.0).unwrap();

    assert_eq!(model.revision(ProjectionKind::Perspective), 0);
    assert_eq!(model.revision(ProjectionKind::Orthographic), 1);
    assert_eq!(model.extent_at(ProjectionKind::Orthographic, 3.0), 2.0);
}

#[test]
fn test_near_far_regenerate_both() {
    let mut model = FrustumModel::default();
    model.set_far(8.0).unwrap();
    model.set_near(2.0).unwrap();

    assert_eq!(model.revision(ProjectionKind::Perspective), 2);
    assert_eq!(model.revision(ProjectionKind::Orthographic), 2);

    let visual = model.visual(ProjectionKind::Orthographic);
    assert!(visual.side_edges.positions().iter().all(|p| p.z == -2.0 || p.z == -8.0));
}

#[test]
fn test_rejected_edit_keeps_revision() {
    let mut model = FrustumModel::default();
    let _ = model.set_near(-1.0);
    assert_eq!(model.revision(ProjectionKind::Perspective), 0);
}

#[test]
fn test_projection_switch_does_not_regenerate() {
    let mut model = FrustumModel::default();
    model.set_projection_kind(ProjectionKind::Orthographic);
    assert_eq!(model.revision(ProjectionKind::Perspective), 0);
    assert_eq!(model.revision(ProjectionKind::Orthographic), 0);
}
