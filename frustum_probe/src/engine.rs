/// Distortion engine
///
/// Facade the host drives once per frame. It owns the frustum model and the
/// distortion transform, keeps the visual frustum attached to a scene in
/// sync with the model, produces distorted copies of scene objects and
/// derives the clipping planes for the image-space view.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::clipping::{self, ClippingPlanes};
use crate::config::ProbeConfig;
use crate::distortion::{DistortMode, DistortionTransform, SystemClock, TransitionClock};
use crate::error::Result;
use crate::frustum::{FrustumGeometryBuilder, FrustumModel, ProjectionKind, DEFAULT_AXES_FLIP};
use crate::scene::{Layers, Node, NodeKey, Scene};
use crate::{engine_bail, engine_debug, engine_info, engine_warn};

const SOURCE: &str = "probe::DistortionEngine";

/// Keys of the visual frustum nodes added to a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualFrustumHandle {
    /// Group holding both projection groups
    pub root: NodeKey,
    pub perspective_group: NodeKey,
    pub orthographic_group: NodeKey,
}

impl VisualFrustumHandle {
    /// Group of the given projection kind
    pub fn group(&self, kind: ProjectionKind) -> NodeKey {
        match kind {
            ProjectionKind::Perspective => self.perspective_group,
            ProjectionKind::Orthographic => self.orthographic_group,
        }
    }
}

struct AttachedFrustum {
    handle: VisualFrustumHandle,
    /// Model revision of each group's current children
    revisions: [u64; 2],
}

/// Frustum distortion engine
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use frustum_probe::probe::{DistortionEngine, ProbeConfig, Scene, SystemClock};
///
/// let mut engine = DistortionEngine::new(ProbeConfig::default(), Arc::new(SystemClock::new()))?;
/// let mut scene = Scene::new();
/// engine.add_visual_frustum_to_scene(&mut scene, None)?;
///
/// engine.set_near(2.0)?;
/// engine.refresh_visual_frustum(&mut scene);
///
/// engine.activate_transition();
/// engine.tick();
/// # Ok::<(), frustum_probe::probe::Error>(())
/// ```
pub struct DistortionEngine {
    config: ProbeConfig,
    model: FrustumModel,
    transform: DistortionTransform,
    attached: Option<AttachedFrustum>,
}

impl DistortionEngine {
    /// Create an engine from a configuration and a transition clock.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the configuration is invalid.
    pub fn new(config: ProbeConfig, clock: Arc<dyn TransitionClock>) -> Result<Self> {
        let model = FrustumModel::new(&config)?;
        let transform = DistortionTransform::new(
            config.distort_mode,
            config.transition_duration_ms,
            config.normal_epsilon,
            clock,
        );

        let mut engine = Self { config, model, transform, attached: None };
        engine.tick();

        engine_info!(SOURCE, "Distortion engine created ({}, {} mode)",
            engine.model.projection_kind(), engine.transform.mode());
        Ok(engine)
    }

    /// Engine with default configuration on the system clock
    pub fn with_defaults() -> Self {
        let config = ProbeConfig::default();
        let transform = DistortionTransform::new(
            config.distort_mode,
            config.transition_duration_ms,
            config.normal_epsilon,
            Arc::new(SystemClock::new()),
        );

        let mut engine = Self {
            config,
            model: FrustumModel::default(),
            transform,
            attached: None,
        };
        engine.tick();
        engine
    }

    /// Configuration the engine was built with
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn model(&self) -> &FrustumModel {
        &self.model
    }

    // ===== FRUSTUM PARAMETERS =====

    pub fn projection_kind(&self) -> ProjectionKind {
        self.model.projection_kind()
    }

    pub fn set_projection_kind(&mut self, kind: ProjectionKind) {
        self.model.set_projection_kind(kind);
    }

    /// See `FrustumModel::set_projection_kind_by_name`
    #[must_use]
    pub fn set_projection_kind_by_name(&mut self, name: &str) -> bool {
        self.model.set_projection_kind_by_name(name)
    }

    pub fn field_of_view_degrees(&self) -> f32 {
        self.model.field_of_view_degrees()
    }

    pub fn set_field_of_view(&mut self, degrees: f32) -> Result<()> {
        self.model.set_field_of_view(degrees)
    }

    pub fn set_field_of_view_from_str(&mut self, text: &str) -> Result<()> {
        self.model.set_field_of_view_from_str(text)
    }

    pub fn near(&self) -> f32 {
        self.model.near()
    }

    pub fn set_near(&mut self, near: f32) -> Result<()> {
        self.model.set_near(near)
    }

    pub fn set_near_from_str(&mut self, text: &str) -> Result<()> {
        self.model.set_near_from_str(text)
    }

    pub fn far(&self) -> f32 {
        self.model.far()
    }

    pub fn set_far(&mut self, far: f32) -> Result<()> {
        self.model.set_far(far)
    }

    pub fn set_far_from_str(&mut self, text: &str) -> Result<()> {
        self.model.set_far_from_str(text)
    }

    pub fn ortho_half_extent(&self) -> f32 {
        self.model.ortho_half_extent()
    }

    pub fn set_ortho_half_extent(&mut self, half_extent: f32) -> Result<()> {
        self.model.set_ortho_half_extent(half_extent)
    }

    pub fn ortho_side_length(&self) -> f32 {
        self.model.ortho_side_length()
    }

    pub fn set_ortho_side_length(&mut self, side_length: f32) -> Result<()> {
        self.model.set_ortho_side_length(side_length)
    }

    pub fn set_ortho_side_length_from_str(&mut self, text: &str) -> Result<()> {
        self.model.set_ortho_side_length_from_str(text)
    }

    pub fn camera(&self, kind: ProjectionKind) -> &Camera {
        self.model.camera(kind)
    }

    pub fn active_camera(&self) -> &Camera {
        self.model.active_camera()
    }

    // ===== VISUAL FRUSTUM =====

    /// Add both projection kinds' visual frustums under `parent`.
    ///
    /// Each kind gets its own group on its own layer; only the active
    /// kind's group is visible. A frustum already attached to a scene is
    /// detached from `scene` first.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidNode` if `parent` is not in `scene`.
    pub fn add_visual_frustum_to_scene(
        &mut self,
        scene: &mut Scene,
        parent: Option<NodeKey>,
    ) -> Result<VisualFrustumHandle> {
        if self.attached.is_some() {
            self.remove_visual_frustum_from_scene(scene);
        }

        let root = scene.add(Node::group("visual_frustum"), parent)?;
        let mut groups = [root; 2];

        for kind in ProjectionKind::ALL {
            let mut group = Node::group(format!("{}_frustum", kind)).with_layers(kind.layer());
            group.set_visible(kind == self.model.projection_kind());

            let key = scene.add(group, Some(root))?;
            for node in self.model.visual(kind).to_nodes(kind.layer()) {
                scene.add(node, Some(key))?;
            }
            groups[kind.slot()] = key;
        }

        let handle = VisualFrustumHandle {
            root,
            perspective_group: groups[0],
            orthographic_group: groups[1],
        };
        self.attached = Some(AttachedFrustum {
            handle,
            revisions: ProjectionKind::ALL.map(|kind| self.model.revision(kind)),
        });

        engine_debug!(SOURCE, "Visual frustum attached");
        Ok(handle)
    }

    /// Remove the attached visual frustum. Returns `false` if none was attached.
    pub fn remove_visual_frustum_from_scene(&mut self, scene: &mut Scene) -> bool {
        match self.attached.take() {
            Some(attached) => {
                scene.remove(attached.handle.root);
                engine_debug!(SOURCE, "Visual frustum detached");
                true
            }
            None => false,
        }
    }

    /// Handle of the attached visual frustum
    pub fn visual_frustum(&self) -> Option<VisualFrustumHandle> {
        self.attached.as_ref().map(|a| a.handle)
    }

    /// Bring the attached visual frustum up to date.
    ///
    /// Replaces the children of every group whose model revision changed
    /// and shows only the active kind's group.
    pub fn refresh_visual_frustum(&mut self, scene: &mut Scene) {
        let Some(attached) = self.attached.as_mut() else {
            return;
        };
        if !scene.contains(attached.handle.root) {
            engine_warn!(SOURCE, "Visual frustum was removed from the scene externally");
            self.attached = None;
            return;
        }

        for kind in ProjectionKind::ALL {
            let group = attached.handle.group(kind);
            let revision = self.model.revision(kind);

            if attached.revisions[kind.slot()] != revision {
                scene.clear_children(group);
                for node in self.model.visual(kind).to_nodes(kind.layer()) {
                    // The group was checked above, so adding under it cannot fail
                    let _ = scene.add(node, Some(group));
                }
                attached.revisions[kind.slot()] = revision;
                engine_debug!(SOURCE, "Refreshed {} frustum (revision {})", kind, revision);
            }

            if let Some(node) = scene.node_mut(group) {
                node.set_visible(kind == self.model.projection_kind());
            }
        }
    }

    /// Static image-space extents (half cube), tagged `Layers::IMAGE_SPACE`
    pub fn image_space_frustum_nodes(&self) -> Vec<Node> {
        FrustumGeometryBuilder::build_image_space_frustum().to_nodes(Layers::IMAGE_SPACE)
    }

    /// Axes indicator with the default Z flip, tagged `Layers::AXES`
    pub fn axes_node(&self) -> Node {
        let geometry = FrustumGeometryBuilder::build_axes(self.config.axes_length, DEFAULT_AXES_FLIP);
        Node::lines("axes", geometry).with_layers(Layers::AXES)
    }

    // ===== TRANSITION =====

    /// Refresh the distortion for this frame
    pub fn tick(&mut self) {
        self.transform.tick(&self.model);
    }

    /// Toggle between real-world and image space (reverses mid-flight)
    pub fn activate_transition(&mut self) {
        self.transform.activate_transition();
    }

    pub fn is_transitioning(&self) -> bool {
        self.transform.is_transitioning()
    }

    pub fn is_toward_image_space(&self) -> bool {
        self.transform.is_toward_image_space()
    }

    pub fn transition_progress(&self) -> f32 {
        self.transform.progress()
    }

    pub fn distort_mode(&self) -> DistortMode {
        self.transform.mode()
    }

    /// Takes effect at the next `tick()`
    pub fn set_distort_mode(&mut self, mode: DistortMode) {
        self.transform.set_mode(mode);
    }

    /// Copy of the current distortion matrix
    pub fn current_distortion(&self) -> Mat4 {
        self.transform.current_distortion()
    }

    // ===== GEOMETRY / CLIPPING =====

    /// Distorted deep copies of `key` and its descendants.
    ///
    /// Only nodes carrying geometry are copied; groups contribute their
    /// transform to the baked world matrix and nothing else. Copies come
    /// back in parent-first order, detached from the scene,
    /// with world transforms baked in, identity local transforms and the
    /// visibility they effectively have in the tree.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidNode` if `key` is not in `scene`.
    pub fn apply_to_object(&self, scene: &Scene, key: NodeKey) -> Result<Vec<Node>> {
        if !scene.contains(key) {
            engine_bail!(SOURCE, InvalidNode, "Node {:?} not found in scene", key);
        }

        let mut copies = Vec::new();
        for k in scene.subtree(key) {
            let (Some(node), Some(world)) = (scene.node(k), scene.world_matrix(k)) else {
                continue;
            };
            if node.geometry().is_none() {
                continue;
            }
            let mut copy = node.clone();
            copy.set_visible(scene.is_visible_in_tree(k));
            self.transform.apply_to_node(&mut copy, &world);
            copies.push(copy);
        }
        Ok(copies)
    }

    pub fn apply_to_vector(&self, point: Vec3) -> Vec3 {
        self.transform.apply_to_vector(point)
    }

    /// Clipping planes of the active frustum under the current distortion
    pub fn derive_planes(&self) -> ClippingPlanes {
        self.derive_planes_for(self.model.projection_kind())
    }

    pub fn derive_planes_for(&self, kind: ProjectionKind) -> ClippingPlanes {
        clipping::derive_planes(&self.model, kind, &self.transform, self.config.clipping_epsilon)
    }

    /// Corners of the active frustum under the current distortion
    pub fn frustum_corners(&self) -> [Vec3; 8] {
        clipping::frustum_corners(&self.model, self.model.projection_kind(), &self.transform)
    }

    /// See `DistortionTransform::image_space_origin_position`
    pub fn image_space_origin_position(&self) -> Option<Vec3> {
        self.transform.image_space_origin_position()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
