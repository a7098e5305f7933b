/// Recording renderer
///
/// Resolves what a real backend would draw (visible nodes, world-space
/// positions, uploaded bytes) and stores it instead of issuing GPU work.

use glam::Vec3;
use crate::camera::Camera;
use crate::clipping::Plane;
use crate::error::Result;
use crate::scene::{Layers, Scene, Topology, AABB};
use crate::{engine_bail, engine_trace};
use super::scene_renderer::SceneRenderer;

/// One node drawn during a render call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub name: String,
    pub topology: Topology,
    /// Positions after applying the node's world matrix
    pub world_positions: Vec<Vec3>,
    /// Cached bounding box moved to world space, if the node had one
    pub world_bounds: Option<AABB>,
    /// Size of the position buffer a backend would upload
    pub uploaded_bytes: usize,
}

/// One `render()` call
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub camera: Camera,
    pub clipping_planes: Vec<Plane>,
    pub layers: Layers,
    pub draws: Vec<RecordedDraw>,
}

impl RenderCall {
    /// Draw with the given node name, if any
    pub fn draw(&self, name: &str) -> Option<&RecordedDraw> {
        self.draws.iter().find(|d| d.name == name)
    }
}

/// Renderer that records every call
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    fail_next: Option<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `render()` fail with `Error::RenderFailed(message)`
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.fail_next = Some(message.into());
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn last_call(&self) -> Option<&RenderCall> {
        self.calls.last()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SceneRenderer for RecordingRenderer {
    fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        clipping_planes: &[Plane],
        layers: Layers,
    ) -> Result<()> {
        if let Some(message) = self.fail_next.take() {
            engine_bail!("probe::RecordingRenderer", RenderFailed, "{}", message);
        }

        let mut draws = Vec::new();
        for key in scene.visible_in_layers(layers) {
            let (Some(node), Some(world)) = (scene.node(key), scene.world_matrix(key)) else {
                continue;
            };
            let Some(geometry) = node.geometry() else {
                continue; // groups draw nothing
            };

            draws.push(RecordedDraw {
                name: node.name().to_string(),
                topology: node.topology(),
                world_positions: geometry.positions().iter().map(|p| world.transform_point3(*p)).collect(),
                world_bounds: geometry.bounding_box().map(|b| b.transformed(&world)),
                uploaded_bytes: geometry.position_bytes().len(),
            });
        }

        engine_trace!("probe::RecordingRenderer", "Recorded {} draw(s), {} clipping plane(s)",
            draws.len(), clipping_planes.len());

        self.calls.push(RenderCall {
            camera: *camera,
            clipping_planes: clipping_planes.to_vec(),
            layers,
            draws,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "recording_renderer_tests.rs"]
mod tests;
