//! Probe configuration
//!
//! Start-up values for the frustum and the distortion engine. Every field
//! mirrors a live-editable parameter; the engine only reads the config once,
//! at construction.

use crate::error::Result;
use crate::engine_reject;
use crate::frustum::ProjectionKind;
use crate::distortion::DistortMode;

/// Probe configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Projection active at start-up
    pub projection: ProjectionKind,
    /// Perspective field of view, in degrees (0, 180)
    pub field_of_view_degrees: f32,
    /// Full side length of the square orthographic cross-section
    pub ortho_side_length: f32,
    /// Near plane distance (> 0)
    pub near: f32,
    /// Far plane distance (> near)
    pub far: f32,
    /// Reference framing used as the undistorted endpoint
    pub distort_mode: DistortMode,
    /// Duration of one real-world/image-space transition, in milliseconds
    pub transition_duration_ms: f64,
    /// Outward offset applied to every derived clipping plane
    pub clipping_epsilon: f32,
    /// Tolerance on |len² - 1| for recomputed face normals
    pub normal_epsilon: f32,
    /// Length of each arm of the axes indicator
    pub axes_length: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Perspective,
            field_of_view_degrees: 45.0,
            ortho_side_length: 2.5,
            near: 1.0,
            far: 5.0,
            distort_mode: DistortMode::Standard,
            transition_duration_ms: 1000.0,
            clipping_epsilon: 1e-3,
            normal_epsilon: 1e-4,
            axes_length: 1.0,
        }
    }
}

impl ProbeConfig {
    /// Half side length of the orthographic cross-section
    pub fn ortho_half_extent(&self) -> f32 {
        self.ortho_side_length / 2.0
    }

    /// Check every range constraint.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        const SOURCE: &str = "probe::ProbeConfig";

        let fov = self.field_of_view_degrees;
        if !fov.is_finite() || fov <= 0.0 || fov >= 180.0 {
            engine_reject!(SOURCE, "field_of_view_degrees ({}) must be in (0, 180)", fov);
        }
        if !self.ortho_side_length.is_finite() || self.ortho_side_length <= 0.0 {
            engine_reject!(SOURCE, "ortho_side_length ({}) must be positive", self.ortho_side_length);
        }
        if !self.near.is_finite() || self.near <= 0.0 {
            engine_reject!(SOURCE, "near ({}) must be positive", self.near);
        }
        if !self.far.is_finite() || self.far <= self.near {
            engine_reject!(SOURCE, "far ({}) must be greater than near ({})", self.far, self.near);
        }
        if !self.transition_duration_ms.is_finite() || self.transition_duration_ms <= 0.0 {
            engine_reject!(SOURCE, "transition_duration_ms ({}) must be positive",
                self.transition_duration_ms);
        }
        if !self.clipping_epsilon.is_finite() || self.clipping_epsilon < 0.0 {
            engine_reject!(SOURCE, "clipping_epsilon ({}) must be non-negative", self.clipping_epsilon);
        }
        if !self.normal_epsilon.is_finite() || self.normal_epsilon <= 0.0 {
            engine_reject!(SOURCE, "normal_epsilon ({}) must be positive", self.normal_epsilon);
        }
        if !self.axes_length.is_finite() || self.axes_length <= 0.0 {
            engine_reject!(SOURCE, "axes_length ({}) must be positive", self.axes_length);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
