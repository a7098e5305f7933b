//! Distortion transform.
//!
//! Maps real-world geometry into image space through the active camera's
//! projection, and animates a reversible blend between the undistorted and
//! fully distorted matrices.
//!
//! ```text
//!   full = CONVENTION_CORRECTION * P * V
//!   no   = I                          (Standard)
//!        = T(0, 0, near * s) * S(s)   (KeepNearConstant)
//!   current = no * (1 - w) + full * w
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use glam::{Mat4, Vec3, Vec4};
use crate::error::Error;
use crate::frustum::{FrustumModel, ProjectionKind};
use crate::scene::{Node, Topology, Transform};
use crate::{engine_debug, engine_error, engine_warn};
use super::clock::TransitionClock;

const SOURCE: &str = "probe::DistortionTransform";

/// Maps clip-space z in [-1, 1] to image-space z in [0, 1]: `z' = z/2 + w/2`
pub const CONVENTION_CORRECTION: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 1.0),
);

// ===== DISTORT MODE =====

/// Reference framing of the undistorted endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistortMode {
    /// Undistorted endpoint is real-world space as-is
    #[default]
    Standard,
    /// Undistorted endpoint is scaled so the near plane already has its
    /// image-space size and depth
    KeepNearConstant,
}

impl DistortMode {
    pub fn name(self) -> &'static str {
        match self {
            DistortMode::Standard => "standard",
            DistortMode::KeepNearConstant => "keep_near_constant",
        }
    }
}

impl fmt::Display for DistortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "standard" => Ok(DistortMode::Standard),
            "keepnearconstant" => Ok(DistortMode::KeepNearConstant),
            _ => Err(Error::InvalidParameter(format!("unknown distort mode '{}'", s))),
        }
    }
}

// ===== DISTORTION TRANSFORM =====

/// Current distortion matrix and its transition state
pub struct DistortionTransform {
    mode: DistortMode,
    current: Mat4,

    transitioning: bool,
    toward_image_space: bool,
    t: f32,
    start_ms: f64,
    duration_ms: f64,

    normal_epsilon: f32,
    clock: Arc<dyn TransitionClock>,
}

impl DistortionTransform {
    /// Idle transform in real-world space.
    ///
    /// `current_distortion()` is the identity until the first `tick()`.
    pub fn new(
        mode: DistortMode,
        duration_ms: f64,
        normal_epsilon: f32,
        clock: Arc<dyn TransitionClock>,
    ) -> Self {
        Self {
            mode,
            current: Mat4::IDENTITY,
            transitioning: false,
            toward_image_space: false,
            t: 0.0,
            start_ms: 0.0,
            duration_ms,
            normal_epsilon,
            clock,
        }
    }

    // ===== MATRICES =====

    /// `CONVENTION_CORRECTION * P * V` of the active projection
    pub fn full_distortion_matrix(&self, model: &FrustumModel) -> Mat4 {
        let camera = model.active_camera();
        CONVENTION_CORRECTION * *camera.projection_matrix() * *camera.view_matrix()
    }

    /// Undistorted endpoint for the current mode
    pub fn no_distortion_matrix(&self, model: &FrustumModel) -> Mat4 {
        match self.mode {
            DistortMode::Standard => Mat4::IDENTITY,
            DistortMode::KeepNearConstant => {
                let near = model.near();
                let s = match model.projection_kind() {
                    ProjectionKind::Perspective => 1.0 / (model.perspective_slope() * near),
                    ProjectionKind::Orthographic => 1.0 / model.ortho_half_extent(),
                };
                Mat4::from_translation(Vec3::new(0.0, 0.0, near * s)) * Mat4::from_scale(Vec3::splat(s))
            }
        }
    }

    /// Copy of the matrix applied by `apply_to_vector` and `apply_to_node`
    pub fn current_distortion(&self) -> Mat4 {
        self.current
    }

    // ===== TRANSITION =====

    /// Refresh `current_distortion` for this frame.
    ///
    /// Idle: the endpoint matching the direction. Transitioning: the blend
    /// at the clock's elapsed fraction, ending the transition once it
    /// reaches 1.
    pub fn tick(&mut self, model: &FrustumModel) {
        let no = self.no_distortion_matrix(model);
        let full = self.full_distortion_matrix(model);

        if !self.transitioning {
            self.current = if self.toward_image_space { full } else { no };
            return;
        }

        let fraction = self.clock.elapsed_fraction(self.start_ms, self.duration_ms);
        if fraction >= 1.0 {
            self.t = 1.0;
            self.transitioning = false;
            engine_debug!(SOURCE, "Transition complete ({})",
                if self.toward_image_space { "image space" } else { "real-world space" });
        } else {
            self.t = fraction.max(0.0) as f32;
        }

        let w = if self.toward_image_space { self.t } else { 1.0 - self.t };
        self.current = no * (1.0 - w) + full * w;
    }

    /// Start a transition toward the opposite endpoint.
    ///
    /// Mid-flight this is a reversal: the start time is shifted so the
    /// blend weight continues from where it is now. A transition whose
    /// duration has already elapsed counts as finished even if no `tick()`
    /// observed it, so a fresh transition starts instead.
    pub fn activate_transition(&mut self) {
        let now = self.clock.now_ms();

        if self.transitioning && self.clock.elapsed_fraction(self.start_ms, self.duration_ms) >= 1.0 {
            self.t = 1.0;
            self.transitioning = false;
        }

        if self.transitioning {
            self.start_ms = 2.0 * now - self.duration_ms - self.start_ms;
            self.t = self.clock.elapsed_fraction(self.start_ms, self.duration_ms).clamp(0.0, 1.0) as f32;
        } else {
            self.start_ms = now;
            self.t = 0.0;
            self.transitioning = true;
        }
        self.toward_image_space = !self.toward_image_space;

        engine_debug!(SOURCE, "Transition toward {} (t = {:.3})",
            if self.toward_image_space { "image space" } else { "real-world space" }, self.t);
    }

    /// True while a transition is running; false once its duration has
    /// elapsed, even before the next `tick()`
    pub fn is_transitioning(&self) -> bool {
        self.transitioning && self.clock.elapsed_fraction(self.start_ms, self.duration_ms) < 1.0
    }

    pub fn is_toward_image_space(&self) -> bool {
        self.toward_image_space
    }

    /// Progress of the running (or last) transition in [0, 1]
    pub fn progress(&self) -> f32 {
        self.t
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn mode(&self) -> DistortMode {
        self.mode
    }

    /// Takes effect at the next `tick()`
    pub fn set_mode(&mut self, mode: DistortMode) {
        self.mode = mode;
    }

    // ===== APPLICATION =====

    /// Transform a point by the current distortion, with perspective divide
    pub fn apply_to_vector(&self, point: Vec3) -> Vec3 {
        self.current.project_point3(point)
    }

    /// Real-world origin under the current distortion.
    ///
    /// `None` when the origin maps to the plane at infinity, which is the
    /// case for the perspective apex once fully distorted.
    pub fn image_space_origin_position(&self) -> Option<Vec3> {
        let clip = self.current * Vec4::W;
        if clip.w.abs() <= f32::EPSILON {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Bake `world` and the current distortion into a detached node copy.
    ///
    /// Positions are transformed (with divide), flat face normals are
    /// recomputed for triangle meshes carrying normals, the bounding box is
    /// recomputed and the local transform is reset to identity.
    /// Degenerate faces keep their previous normal. A failed bounding box is
    /// logged and leaves the box unset.
    pub fn apply_to_node(&self, node: &mut Node, world: &Mat4) {
        let matrix = self.current * *world;
        let name = node.name().to_string();
        let topology = node.topology();

        if let Some(geometry) = node.geometry_mut() {
            for position in geometry.positions_mut() {
                *position = matrix.project_point3(*position);
            }

            if topology == Topology::TriangleList && geometry.normals().is_some() {
                let positions = geometry.positions();
                let mut updates = Vec::new();
                let mut degenerate = 0usize;

                for [a, b, c] in geometry.triangles() {
                    let normal = (positions[b] - positions[a])
                        .cross(positions[c] - positions[a])
                        .normalize_or_zero();
                    if (normal.length_squared() - 1.0).abs() > self.normal_epsilon {
                        degenerate += 1;
                        continue;
                    }
                    updates.push(([a, b, c], normal));
                }

                // Shared vertices of indexed meshes take the last face written
                if let Some(normals) = geometry.normals_mut() {
                    for (triangle, normal) in updates {
                        for vertex in triangle {
                            normals[vertex] = normal;
                        }
                    }
                }

                if degenerate > 0 {
                    engine_warn!(SOURCE, "'{}': {} degenerate face(s) kept their previous normal",
                        name, degenerate);
                }
            }

            if let Err(e) = geometry.compute_bounding_box() {
                engine_error!(SOURCE, "Bounding box failed for '{}': {}", name, e);
            }
        }

        node.set_transform(Transform::IDENTITY);
    }
}

impl fmt::Debug for DistortionTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistortionTransform")
            .field("mode", &self.mode)
            .field("current", &self.current)
            .field("transitioning", &self.transitioning)
            .field("toward_image_space", &self.toward_image_space)
            .field("t", &self.t)
            .field("start_ms", &self.start_ms)
            .field("duration_ms", &self.duration_ms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
