/// Image-space pass.
///
/// One frame of the image-space view: refresh the distortion, derive the
/// clipping planes, move the axes to the distorted origin, add distorted copies of the probed objects, render,
/// then remove the copies again whatever the render outcome.

use crate::camera::Camera;
use crate::engine::DistortionEngine;
use crate::error::Result;
use crate::renderer::SceneRenderer;
use crate::engine_trace;
use super::layers::Layers;
use super::node::{Node, Transform};
use super::scene::{NodeKey, Scene};

const SOURCE: &str = "probe::ImageSpacePass";

/// Per-frame image-space render cycle
#[derive(Debug)]
pub struct ImageSpacePass {
    layers: Layers,
    extents: Option<NodeKey>,
    axes: Option<NodeKey>,
}

impl ImageSpacePass {
    /// Pass drawing the image-space layer and the axes indicator
    pub fn new() -> Self {
        Self {
            layers: Layers::IMAGE_SPACE | Layers::AXES,
            extents: None,
            axes: None,
        }
    }

    /// Layer mask passed to the renderer
    pub fn layers(&self) -> Layers {
        self.layers
    }

    pub fn set_layers(&mut self, layers: Layers) {
        self.layers = layers;
    }

    /// Add the static half-cube extents and the axes indicator to `scene`.
    ///
    /// They stay in the scene across frames until `detach_extents`. The
    /// axes follow the distorted real-world origin on every `run`.
    pub fn attach_extents(&mut self, engine: &DistortionEngine, scene: &mut Scene) -> Result<NodeKey> {
        self.detach_extents(scene);

        let group = scene.add(Node::group("image_space_extents").with_layers(Layers::IMAGE_SPACE), None)?;
        for node in engine.image_space_frustum_nodes() {
            scene.add(node, Some(group))?;
        }
        let axes = scene.add(engine.axes_node(), Some(group))?;

        self.extents = Some(group);
        self.axes = Some(axes);
        Ok(group)
    }

    /// Remove the extents added by `attach_extents`. Returns `false` if none.
    pub fn detach_extents(&mut self, scene: &mut Scene) -> bool {
        self.axes = None;
        match self.extents.take() {
            Some(key) => scene.remove(key).is_some(),
            None => false,
        }
    }

    /// Run one frame. Returns the number of distorted copies drawn.
    ///
    /// The copies live in the scene only for the duration of the render
    /// call and are dropped before returning.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidNode` for an unknown object key (nothing is
    /// added in that case) and forwards the renderer's error after cleanup.
    pub fn run(
        &self,
        engine: &mut DistortionEngine,
        scene: &mut Scene,
        objects: &[NodeKey],
        renderer: &mut dyn SceneRenderer,
        camera: &Camera,
    ) -> Result<usize> {
        engine.tick();
        self.place_axes(engine, scene);
        let planes = engine.derive_planes();

        let mut copies = Vec::new();
        for &key in objects {
            copies.extend(engine.apply_to_object(scene, key)?);
        }
        let count = copies.len();

        let group = scene.add(Node::group("image_space_copies").with_layers(Layers::IMAGE_SPACE), None)?;
        let mut result = Ok(());
        for mut copy in copies {
            copy.set_layers(Layers::IMAGE_SPACE);
            if let Err(e) = scene.add(copy, Some(group)) {
                result = Err(e);
                break;
            }
        }

        if result.is_ok() {
            result = renderer.render(scene, camera, planes.as_slice(), self.layers);
        }

        scene.remove(group);
        engine_trace!(SOURCE, "Drew {} distorted copies", count);

        result.map(|_| count)
    }

    /// Put the axes on the distorted origin, or hide them while the origin
    /// sits at infinity
    fn place_axes(&self, engine: &DistortionEngine, scene: &mut Scene) {
        let Some(axes) = self.axes.and_then(|key| scene.node_mut(key)) else {
            return;
        };
        match engine.image_space_origin_position() {
            Some(origin) => {
                axes.set_transform(Transform::from_translation(origin));
                axes.set_visible(true);
            }
            None => axes.set_visible(false),
        }
    }
}

impl Default for ImageSpacePass {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "image_space_pass_tests.rs"]
mod tests;
