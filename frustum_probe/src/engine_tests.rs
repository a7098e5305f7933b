use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::distortion::ManualClock;
use crate::error::Error;
use crate::scene::{Geometry, Transform};
use super::*;

fn engine() -> (DistortionEngine, ManualClock) {
    let clock = ManualClock::new(0.0);
    let engine = DistortionEngine::new(ProbeConfig::default(), Arc::new(clock.clone())).unwrap();
    (engine, clock)
}

fn child_names(scene: &Scene, key: NodeKey) -> Vec<String> {
    scene
        .children(key)
        .iter()
        .map(|k| scene.node(*k).unwrap().name().to_string())
        .collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_rejects_invalid_config() {
    let config = ProbeConfig { transition_duration_ms: 0.0, ..ProbeConfig::default() };
    let result = DistortionEngine::new(config, Arc::new(ManualClock::default()));
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
}

#[test]
fn test_with_defaults() {
    let engine = DistortionEngine::with_defaults();
    assert_eq!(engine.projection_kind(), ProjectionKind::Perspective);
    assert_eq!(engine.field_of_view_degrees(), 45.0);
    assert_eq!(engine.ortho_side_length(), 2.5);
    assert_eq!(engine.distort_mode(), DistortMode::Standard);
    assert_eq!(engine.current_distortion(), Mat4::IDENTITY);
    assert!(!engine.is_transitioning());
}

#[test]
fn test_new_starts_at_mode_endpoint() {
    let config = ProbeConfig { distort_mode: DistortMode::KeepNearConstant, ..ProbeConfig::default() };
    let engine = DistortionEngine::new(config, Arc::new(ManualClock::default())).unwrap();

    let corner = engine.apply_to_vector(Vec3::new(engine.model().perspective_slope(), 0.0, -1.0));
    assert!(corner.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
}

// ============================================================================
// Parameters
// ============================================================================

#[test]
fn test_setters_delegate_to_model() {
    let (mut engine, _) = engine();
    engine.set_far(20.0).unwrap();
    engine.set_near_from_str("2.5").unwrap();
    engine.set_field_of_view(70.0).unwrap();
    engine.set_ortho_half_extent(3.0).unwrap();

    assert_eq!(engine.far(), 20.0);
    assert_eq!(engine.near(), 2.5);
    assert_eq!(engine.field_of_view_degrees(), 70.0);
    assert_eq!(engine.ortho_side_length(), 6.0);
    assert!(engine.set_far(1.0).is_err());
    assert!(engine.set_far_from_str("x").is_err());
}

#[test]
fn test_projection_by_name() {
    let (mut engine, _) = engine();
    assert!(!engine.set_projection_kind_by_name("garbage"));
    assert_eq!(engine.projection_kind(), ProjectionKind::Perspective);
    assert!(engine.set_projection_kind_by_name("orthographic"));
    assert_eq!(engine.active_camera(), engine.camera(ProjectionKind::Orthographic));
}

// ============================================================================
// Visual frustum
// ============================================================================

#[test]
fn test_add_visual_frustum() {
    let (mut engine, _) = engine();
    let mut scene = Scene::new();

    let handle = engine.add_visual_frustum_to_scene(&mut scene, None).unwrap();

    assert_eq!(engine.visual_frustum(), Some(handle));
    assert_eq!(
        child_names(&scene, handle.perspective_group),
        ["side_edges", "tip_edges", "near_outline", "near_quad", "far_outline", "far_quad"]
    );
    assert_eq!(child_names(&scene, handle.orthographic_group).len(), 5);

    assert!(scene.node(handle.perspective_group).unwrap().is_visible());
    assert!(!scene.node(handle.orthographic_group).unwrap().is_visible());
    assert_eq!(scene.node(handle.orthographic_group).unwrap().layers(), Layers::ORTHOGRAPHIC_FRUSTUM);

    let drawn = scene.visible_in_layers(Layers::PERSPECTIVE_FRUSTUM | Layers::ORTHOGRAPHIC_FRUSTUM);
    assert!(drawn.iter().all(|k| scene.parent(*k) == Some(handle.perspective_group)
        || *k == handle.perspective_group));
}

#[test]
fn test_add_under_missing_parent_fails() {
    let (mut engine, _) = engine();
    let mut scene = Scene::new();
    let parent = scene.add(Node::group("gone"), None).unwrap();
    scene.remove(parent);

    let result = engine.add_visual_frustum_to_scene(&mut scene, Some(parent));
    assert!(matches!(result, Err(Error::InvalidNode(_))));
    assert!(engine.visual_frustum().is_none());
}

#[test]
fn test_re_adding_replaces_previous() {
    let (mut engine, _) = engine();
    let mut scene = Scene::new();

    engine.add_visual_frustum_to_scene(&mut scene, None).unwrap();
    let count = scene.len();
    engine.add_visual_frustum_to_scene(&mut scene, None).unwrap();
    assert_eq!(scene.len(), count);
}

#[test]
fn test_remove_visual_frustum() {
    let (mut engine, _) = engine();
    let mut scene = Scene::new();
    scene.add(Node::group("other"), None).unwrap();

    engine.add_visual_frustum_to_scene(&mut scene, None).unwrap();
    assert!(engine.remove_visual_frustum_from_scene(&mut scene));
    assert!(!engine.remove_visual_frustum_from_scene(&mut scene));
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_refresh_replaces_changed_kind() {
    let (mut engine, _) = engine();
    let mut scene = Scene::new();
    let handle = engine.add_visual_frustum_to_scene(&mut scene, None).unwrap();
    let ortho_children = scene.children(handle.orthographic_group).to_vec();

    engine.set_field_of_view(90.0).unwrap();
    engine.refresh_visual_frustum(&mut scene);

    // Orthographic untouched, perspective rebuilt at the new slope
    assert_eq!(scene.children(handle.orthographic_group), ortho_children.as_slice());
    let near = scene.find_by_name("near_outline").unwrap();
    let positions = scene.node(near).unwrap().geometry().unwrap().positions().to_vec();
    assert!(positions.iter().all(|p| (p.x.abs() - 1.0).abs() < 1e-5));
}

#[test]
fn test_refresh_syncs_visibility() {
    let (mut engine, _) = engine();
    let mut scene = Scene::new();
    let handle = engine.add_visual_frustum_to_scene(&mut scene, None).unwrap();

    engine.set_projection_kind(ProjectionKind::Orthographic);
    engine.refresh_visual_frustum(&mut scene);

    assert!(!scene.node(handle.perspective_group).unwrap().is_visible());
    assert!(scene.node(handle.orthographic_group).unwrap().is_visible());
}

#[test]
fn test_refresh_after_external_removal_detaches() {
    let (mut engine, _) = engine();
    let mut scene = Scene::new();
    let handle = engine.add_visual_frustum_to_scene(&mut scene, None).unwrap();

    scene.remove(handle.root);
    engine.refresh_visual_frustum(&mut scene);
    assert!(engine.visual_frustum().is_none());
}

#[test]
fn test_static_image_space_nodes() {
    let (engine, _) = engine();
    let nodes = engine.image_space_frustum_nodes();
    assert!(nodes.iter().all(|n| n.layers() == Layers::IMAGE_SPACE));

    let axes = engine.axes_node();
    assert_eq!(axes.layers(), Layers::AXES);
    assert_eq!(axes.geometry().unwrap().positions()[5], Vec3::new(0.0, 0.0, -1.0));
}

// ============================================================================
// Transition
// ============================================================================

#[test]
fn test_transition_round_trip() {
    let (mut engine, clock) = engine();
    engine.activate_transition();
    assert!(engine.is_transitioning());

    clock.advance_ms(1000.0);
    engine.tick();
    assert!(!engine.is_transitioning());
    assert!(engine.is_toward_image_space());
    assert_eq!(engine.image_space_origin_position(), None);

    engine.activate_transition();
    clock.advance_ms(1000.0);
    engine.tick();
    assert_eq!(engine.current_distortion(), Mat4::IDENTITY);
    assert_eq!(engine.image_space_origin_position(), Some(Vec3::ZERO));
}

#[test]
fn test_set_distort_mode_applies_on_tick() {
    let (mut engine, _) = engine();
    engine.set_distort_mode(DistortMode::KeepNearConstant);
    assert_eq!(engine.current_distortion(), Mat4::IDENTITY);
    engine.tick();
    assert_ne!(engine.current_distortion(), Mat4::IDENTITY);
}

// ============================================================================
// apply_to_object / clipping
// ============================================================================

#[test]
fn test_apply_to_object_copies_subtree() {
    let (engine, _) = engine();
    let mut scene = Scene::new();
    let parent = scene
        .add(Node::group("parent").with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, -3.0))), None)
        .unwrap();
    let child = scene
        .add(Node::lines("child", Geometry::from_positions(vec![Vec3::ZERO, Vec3::X])), Some(parent))
        .unwrap();
    scene.node_mut(parent).unwrap().set_visible(false);

    let copies = engine.apply_to_object(&scene, parent).unwrap();

    // The group only contributes its transform
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].name(), "child");
    assert!(copies[0].transform().is_identity());
    assert!(!copies[0].is_visible());
    assert_eq!(copies[0].geometry().unwrap().positions(), &[Vec3::new(0.0, 0.0, -3.0), Vec3::new(1.0, 0.0, -3.0)]);

    // Scene untouched
    assert_eq!(scene.node(child).unwrap().geometry().unwrap().positions()[0], Vec3::ZERO);
    assert!(!scene.node(parent).unwrap().transform().is_identity());
}

#[test]
fn test_apply_to_unknown_object_fails() {
    let (engine, _) = engine();
    let mut scene = Scene::new();
    let key = scene.add(Node::group("temp"), None).unwrap();
    scene.remove(key);

    assert!(matches!(engine.apply_to_object(&scene, key), Err(Error::InvalidNode(_))));
}

#[test]
fn test_derive_planes_follow_active_kind() {
    let (mut engine, _) = engine();
    let midpoint = Vec3::new(0.0, 0.0, -(engine.near() + engine.far()) / 2.0);

    assert!(engine.derive_planes().contains_point(midpoint, 0.0));
    assert!(!engine.derive_planes().contains_point(Vec3::new(2.3, 0.0, -3.0), 0.0));

    engine.set_projection_kind(ProjectionKind::Orthographic);
    engine.tick();
    assert!(engine.derive_planes().contains_point(Vec3::new(1.2, 0.0, -3.0), 0.0));
    assert_eq!(engine.derive_planes(), engine.derive_planes_for(ProjectionKind::Orthographic));
}

#[test]
fn test_corners_under_full_distortion() {
    let (mut engine, clock) = engine();
    engine.activate_transition();
    clock.advance_ms(1000.0);
    engine.tick();

    let corners = engine.frustum_corners();
    assert!(corners[0].abs_diff_eq(Vec3::new(-1.0, -1.0, 0.0), 1e-4));
    assert!(corners[6].abs_diff_eq(Vec3::new(1.0, 1.0, 1.0), 1e-4));

    let midpoint = engine.apply_to_vector(Vec3::new(0.0, 0.0, -3.0));
    assert!(engine.derive_planes().contains_point(midpoint, 0.0));
}
