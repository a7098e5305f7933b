//! Frustum model.
//!
//! Holds the frustum parameters and everything derived from them: the
//! perspective slope, one camera per projection kind and the visual
//! geometry of each kind. Setters validate first and never leave the model
//! half-updated.

use crate::camera::Camera;
use crate::config::ProbeConfig;
use crate::error::Result;
use crate::{engine_debug, engine_reject};
use super::geometry::{FrustumGeometryBuilder, FrustumVisual};
use super::kind::ProjectionKind;

const SOURCE: &str = "probe::FrustumModel";

/// Parameters of the probed camera and their derived state
#[derive(Debug, Clone)]
pub struct FrustumModel {
    projection: ProjectionKind,
    field_of_view_degrees: f32,
    ortho_half_extent: f32,
    near: f32,
    far: f32,

    // Derived, refreshed by regenerate()
    perspective_slope: f32,
    cameras: [Camera; 2],
    visuals: [FrustumVisual; 2],
    revisions: [u64; 2],
}

impl FrustumModel {
    /// Build a model from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `config` fails validation.
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            config.projection,
            config.field_of_view_degrees,
            config.ortho_half_extent(),
            config.near,
            config.far,
        ))
    }

    fn from_parts(
        projection: ProjectionKind,
        field_of_view_degrees: f32,
        ortho_half_extent: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let perspective_slope = (field_of_view_degrees.to_radians() / 2.0).tan();
        let builder = FrustumGeometryBuilder::new(perspective_slope, ortho_half_extent, near, far);

        Self {
            projection,
            field_of_view_degrees,
            ortho_half_extent,
            near,
            far,
            perspective_slope,
            cameras: [
                Camera::perspective(field_of_view_degrees.to_radians(), near, far),
                Camera::orthographic(ortho_half_extent, near, far),
            ],
            visuals: [
                builder.build(ProjectionKind::Perspective),
                builder.build(ProjectionKind::Orthographic),
            ],
            revisions: [0, 0],
        }
    }

    // ===== PROJECTION KIND =====

    /// Currently active projection
    pub fn projection_kind(&self) -> ProjectionKind {
        self.projection
    }

    /// Switch the active projection. Both kinds are always up to date, so
    /// nothing is regenerated.
    pub fn set_projection_kind(&mut self, kind: ProjectionKind) {
        if self.projection != kind {
            engine_debug!(SOURCE, "Projection: {} -> {}", self.projection, kind);
            self.projection = kind;
        }
    }

    /// Switch the active projection from a UI string.
    ///
    /// Returns `false` and changes nothing when `name` is not a known kind.
    #[must_use]
    pub fn set_projection_kind_by_name(&mut self, name: &str) -> bool {
        match name.parse::<ProjectionKind>() {
            Ok(kind) => {
                self.set_projection_kind(kind);
                true
            }
            Err(_) => false,
        }
    }

    // ===== PARAMETER SETTERS =====

    /// Set the perspective field of view, in degrees (0, 180).
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` when out of range; the model is unchanged.
    pub fn set_field_of_view(&mut self, degrees: f32) -> Result<()> {
        if !degrees.is_finite() || degrees <= 0.0 || degrees >= 180.0 {
            engine_reject!(SOURCE, "field of view ({}) must be in (0, 180)", degrees);
        }
        self.field_of_view_degrees = degrees;
        self.regenerate(&[ProjectionKind::Perspective]);
        Ok(())
    }

    /// Set the near plane distance. Must stay in `(0, far)`.
    pub fn set_near(&mut self, near: f32) -> Result<()> {
        if !near.is_finite() || near <= 0.0 {
            engine_reject!(SOURCE, "near ({}) must be positive", near);
        }
        if near >= self.far {
            engine_reject!(SOURCE, "near ({}) must be less than far ({})", near, self.far);
        }
        self.near = near;
        self.regenerate(&ProjectionKind::ALL);
        Ok(())
    }

    /// Set the far plane distance. Must stay greater than near.
    pub fn set_far(&mut self, far: f32) -> Result<()> {
        if !far.is_finite() || far <= self.near {
            engine_reject!(SOURCE, "far ({}) must be greater than near ({})", far, self.near);
        }
        self.far = far;
        self.regenerate(&ProjectionKind::ALL);
        Ok(())
    }

    /// Set half the side length of the orthographic cross-section.
    pub fn set_ortho_half_extent(&mut self, half_extent: f32) -> Result<()> {
        if !half_extent.is_finite() || half_extent <= 0.0 {
            engine_reject!(SOURCE, "orthographic half extent ({}) must be positive", half_extent);
        }
        self.ortho_half_extent = half_extent;
        self.regenerate(&[ProjectionKind::Orthographic]);
        Ok(())
    }

    /// Set the full side length of the orthographic cross-section.
    pub fn set_ortho_side_length(&mut self, side_length: f32) -> Result<()> {
        if !side_length.is_finite() || side_length <= 0.0 {
            engine_reject!(SOURCE, "orthographic side length ({}) must be positive", side_length);
        }
        self.set_ortho_half_extent(side_length / 2.0)
    }

    // ===== TEXT INPUT =====

    pub fn set_field_of_view_from_str(&mut self, text: &str) -> Result<()> {
        let value = parse_number("field of view", text)?;
        self.set_field_of_view(value)
    }

    pub fn set_near_from_str(&mut self, text: &str) -> Result<()> {
        let value = parse_number("near", text)?;
        self.set_near(value)
    }

    pub fn set_far_from_str(&mut self, text: &str) -> Result<()> {
        let value = parse_number("far", text)?;
        self.set_far(value)
    }

    pub fn set_ortho_side_length_from_str(&mut self, text: &str) -> Result<()> {
        let value = parse_number("orthographic side length", text)?;
        self.set_ortho_side_length(value)
    }

    // ===== ACCESSORS =====

    pub fn field_of_view_degrees(&self) -> f32 {
        self.field_of_view_degrees
    }

    pub fn ortho_half_extent(&self) -> f32 {
        self.ortho_half_extent
    }

    pub fn ortho_side_length(&self) -> f32 {
        self.ortho_half_extent * 2.0
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// `tan(fov / 2)`
    pub fn perspective_slope(&self) -> f32 {
        self.perspective_slope
    }

    /// Half side length of `kind`'s cross-section at `distance` from the camera
    pub fn extent_at(&self, kind: ProjectionKind, distance: f32) -> f32 {
        self.builder().extent_at(kind, distance)
    }

    /// Geometry builder for the current parameters
    pub fn builder(&self) -> FrustumGeometryBuilder {
        FrustumGeometryBuilder::new(self.perspective_slope, self.ortho_half_extent, self.near, self.far)
    }

    pub fn camera(&self, kind: ProjectionKind) -> &Camera {
        &self.cameras[kind.slot()]
    }

    /// Camera of the active projection
    pub fn active_camera(&self) -> &Camera {
        self.camera(self.projection)
    }

    pub fn visual(&self, kind: ProjectionKind) -> &FrustumVisual {
        &self.visuals[kind.slot()]
    }

    /// Bumped every time `kind`'s camera and visual are regenerated
    pub fn revision(&self, kind: ProjectionKind) -> u64 {
        self.revisions[kind.slot()]
    }

    // ===== REGENERATION =====

    fn regenerate(&mut self, kinds: &[ProjectionKind]) {
        self.perspective_slope = (self.field_of_view_degrees.to_radians() / 2.0).tan();
        let builder = self.builder();

        for &kind in kinds {
            let slot = kind.slot();
            self.cameras[slot] = match kind {
                ProjectionKind::Perspective => Camera::perspective(
                    self.field_of_view_degrees.to_radians(),
                    self.near,
                    self.far,
                ),
                ProjectionKind::Orthographic => {
                    Camera::orthographic(self.ortho_half_extent, self.near, self.far)
                }
            };
            self.visuals[slot] = builder.build(kind);
            self.revisions[slot] += 1;

            engine_debug!(SOURCE, "Regenerated {} frustum (revision {})", kind, self.revisions[slot]);
        }
    }
}

impl Default for FrustumModel {
    fn default() -> Self {
        let config = ProbeConfig::default();
        Self::from_parts(
            config.projection,
            config.field_of_view_degrees,
            config.ortho_half_extent(),
            config.near,
            config.far,
        )
    }
}

fn parse_number(field: &str, text: &str) -> Result<f32> {
    match text.trim().parse::<f32>() {
        Ok(value) => Ok(value),
        Err(_) => engine_reject!(SOURCE, "{}: '{}' is not a number", field, text),
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
