//! Clipping planes.
//!
//! Corner numbering (x, y signs; near first):
//!
//! ```text
//!   near: 0 (-,-)  1 (+,-)  2 (+,+)  3 (-,+)
//!   far:  4 (-,-)  5 (+,-)  6 (+,+)  7 (-,+)
//! ```
//!
//! Each plane is built from a fixed corner triple so that its normal
//! points out of the frustum. A point is inside when
//! `dot(normal, p) + constant <= 0` for all six planes.

use glam::{Vec3, Vec4};
use crate::distortion::DistortionTransform;
use crate::frustum::{FrustumModel, ProjectionKind};

pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Corner triples in plane-index order, wound for the undistorted frame
const PLANE_CORNERS: [[usize; 3]; 6] = [
    [0, 3, 4], // left
    [1, 5, 2], // right
    [0, 4, 1], // bottom
    [3, 2, 7], // top
    [0, 1, 3], // near
    [4, 7, 5], // far
];

// ===== PLANE =====

/// Plane `dot(normal, p) + constant = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    /// Plane through `a`, `b`, `c`, normal `(b - a) x (c - a)` normalized.
    ///
    /// Collinear points give a zero normal.
    pub fn from_coplanar_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self { normal, constant: -normal.dot(a) }
    }

    /// Signed distance, positive on the normal side
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Move the plane `distance` along its normal
    pub fn offset(self, distance: f32) -> Self {
        Self { normal: self.normal, constant: self.constant - distance }
    }

    /// `(normal, constant)`, the layout renderers upload
    pub fn as_vec4(&self) -> Vec4 {
        self.normal.extend(self.constant)
    }
}

// ===== CLIPPING PLANES =====

/// Left, right, bottom, top, near and far planes, indexed by `PLANE_*`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippingPlanes {
    planes: [Plane; 6],
}

impl ClippingPlanes {
    /// Build the six planes from the eight frustum corners.
    ///
    /// When the corner frame is mirrored relative to the undistorted one
    /// (as after a full perspective distortion, which flips depth
    /// handedness) every triple is taken with its last two corners swapped
    /// so normals still point outward. Each plane is then pushed outward by
    /// `epsilon`.
    pub fn from_corners(corners: &[Vec3; 8], epsilon: f32) -> Self {
        let mirrored = is_mirrored(corners);

        let planes = PLANE_CORNERS.map(|[a, b, c]| {
            let (b, c) = if mirrored { (c, b) } else { (b, c) };
            Plane::from_coplanar_points(corners[a], corners[b], corners[c]).offset(epsilon)
        });

        Self { planes }
    }

    pub fn plane(&self, index: usize) -> Option<&Plane> {
        self.planes.get(index)
    }

    pub fn as_slice(&self) -> &[Plane] {
        &self.planes
    }

    /// True if no plane has `point` on its outer side beyond `tolerance`
    pub fn contains_point(&self, point: Vec3, tolerance: f32) -> bool {
        self.planes.iter().all(|p| p.distance_to_point(point) <= tolerance)
    }
}

/// Undistorted corners form a negative basis `(c1 - c0, c3 - c0, c4 - c0)`
fn is_mirrored(corners: &[Vec3; 8]) -> bool {
    let x = corners[1] - corners[0];
    let y = corners[3] - corners[0];
    let z = corners[4] - corners[0];
    x.dot(y.cross(z)) > 0.0
}

// ===== DERIVATION =====

/// Eight corners of `kind`'s frustum, passed through the current distortion
pub fn frustum_corners(
    model: &FrustumModel,
    kind: ProjectionKind,
    transform: &DistortionTransform,
) -> [Vec3; 8] {
    let builder = model.builder();
    let near = builder.corners_at(kind, model.near());
    let far = builder.corners_at(kind, model.far());

    let mut corners = [Vec3::ZERO; 8];
    for (slot, corner) in corners.iter_mut().zip(near.iter().chain(far.iter())) {
        *slot = transform.apply_to_vector(*corner);
    }
    corners
}

/// Clipping planes bounding `kind`'s frustum under the current distortion
pub fn derive_planes(
    model: &FrustumModel,
    kind: ProjectionKind,
    transform: &DistortionTransform,
    epsilon: f32,
) -> ClippingPlanes {
    ClippingPlanes::from_corners(&frustum_corners(model, kind, transform), epsilon)
}

#[cfg(test)]
#[path = "planes_tests.rs"]
mod tests;
