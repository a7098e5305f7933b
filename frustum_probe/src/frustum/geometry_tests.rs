use glam::Vec3;
use super::*;

fn fov90_builder() -> FrustumGeometryBuilder {
    FrustumGeometryBuilder::new(1.0, 1.25, 1.0, 10.0)
}

// ============================================================================
// Side and tip edges
// ============================================================================

#[test]
fn test_perspective_side_edges() {
    let edges = fov90_builder().build_side_edges(ProjectionKind::Perspective);
    let positions = edges.positions();

    assert_eq!(positions.len(), 8);
    assert_eq!(positions[0], Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(positions[1], Vec3::new(-10.0, -10.0, -10.0));
    assert_eq!(positions[4], Vec3::new(1.0, 1.0, -1.0));
    assert_eq!(positions[5], Vec3::new(10.0, 10.0, -10.0));
}

#[test]
fn test_orthographic_side_edges_are_parallel() {
    let edges = fov90_builder().build_side_edges(ProjectionKind::Orthographic);
    for segment in edges.positions().chunks(2) {
        assert_eq!(segment[0].x, segment[1].x);
        assert_eq!(segment[0].y, segment[1].y);
        assert_eq!(segment[0].x.abs(), 1.25);
        assert_eq!(segment[0].z, -1.0);
        assert_eq!(segment[1].z, -10.0);
    }
}

#[test]
fn test_tip_edges_only_for_perspective() {
    let builder = fov90_builder();
    assert!(builder.build_tip_edges(ProjectionKind::Orthographic).is_none());

    let tip = builder.build_tip_edges(ProjectionKind::Perspective).unwrap();
    assert_eq!(tip.vertex_count(), 8);
    for segment in tip.positions().chunks(2) {
        assert_eq!(segment[0], Vec3::ZERO);
        assert_eq!(segment[1].z, -1.0);
    }
}

// ============================================================================
// Planes
// ============================================================================

#[test]
fn test_plane_outline_is_closed_loop() {
    let plane = FrustumGeometryBuilder::build_plane(2.0, -3.0);
    let outline = plane.outline.positions();

    assert_eq!(outline.len(), 8);
    for i in 0..4 {
        assert_eq!(outline[i * 2 + 1], outline[(i * 2 + 2) % 8]);
    }
    assert!(outline.iter().all(|p| p.z == -3.0 && p.x.abs() == 2.0 && p.y.abs() == 2.0));
}

#[test]
fn test_plane_quad_two_triangles_facing_z() {
    let plane = FrustumGeometryBuilder::build_plane(1.0, 0.5);
    let quad = &plane.quad;

    assert_eq!(quad.triangles().len(), 2);
    assert!(quad.normals().unwrap().iter().all(|n| *n == Vec3::Z));

    for [a, b, c] in quad.triangles() {
        let p = quad.positions();
        let normal = (p[b] - p[a]).cross(p[c] - p[a]);
        assert!(normal.z > 0.0);
    }
}

#[test]
fn test_build_is_deterministic() {
    let builder = FrustumGeometryBuilder::new(0.4142, 1.25, 1.0, 5.0);
    for kind in ProjectionKind::ALL {
        assert_eq!(builder.build(kind), builder.build(kind));
    }
    assert_eq!(
        FrustumGeometryBuilder::build_plane(0.3, -2.0),
        FrustumGeometryBuilder::build_plane(0.3, -2.0)
    );
}

#[test]
fn test_build_plane_extents() {
    let visual = fov90_builder().build(ProjectionKind::Perspective);
    assert!(visual.near_plane.outline.positions().iter().all(|p| p.x.abs() == 1.0));
    assert!(visual.far_plane.outline.positions().iter().all(|p| p.x.abs() == 10.0));
}

// ============================================================================
// Nodes
// ============================================================================

#[test]
fn test_to_nodes_names_and_layers() {
    let builder = fov90_builder();

    let perspective = builder.build(ProjectionKind::Perspective).to_nodes(Layers::PERSPECTIVE_FRUSTUM);
    let names: Vec<&str> = perspective.iter().map(|n| n.name()).collect();
    assert_eq!(names, ["side_edges", "tip_edges", "near_outline", "near_quad", "far_outline", "far_quad"]);
    assert!(perspective.iter().all(|n| n.layers() == Layers::PERSPECTIVE_FRUSTUM));

    let orthographic = builder.build(ProjectionKind::Orthographic).to_nodes(Layers::ORTHOGRAPHIC_FRUSTUM);
    assert_eq!(orthographic.len(), 5);
}

// ============================================================================
// Image space / axes
// ============================================================================

#[test]
fn test_image_space_frustum_is_half_cube() {
    let visual = FrustumGeometryBuilder::build_image_space_frustum();

    assert!(visual.tip_edges.is_none());
    for p in visual.side_edges.positions() {
        assert_eq!(p.x.abs(), 1.0);
        assert_eq!(p.y.abs(), 1.0);
        assert!(p.z == 0.0 || p.z == 1.0);
    }
    assert!(visual.near_plane.outline.positions().iter().all(|p| p.z == 0.0));
    assert!(visual.far_plane.outline.positions().iter().all(|p| p.z == 1.0));
}

#[test]
fn test_axes_default_flip_points_z_backwards() {
    let axes = FrustumGeometryBuilder::build_axes(2.0, DEFAULT_AXES_FLIP);
    let p = axes.positions();

    assert_eq!(p.len(), 6);
    assert_eq!(p[1], Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(p[3], Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(p[5], Vec3::new(0.0, 0.0, -2.0));
}
