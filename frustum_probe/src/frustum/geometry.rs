//! Visual frustum geometry.
//!
//! Builds the line lists and plane meshes that draw the frustum in
//! real-world space, plus the fixed half-cube drawn in image space.
//! Camera convention: the apex sits at the origin and the camera looks
//! down -Z, so the near plane is at `z = -near` and the far plane at
//! `z = -far`.
//!
//! Everything here is a pure function of the builder's parameters: the
//! same parameters always yield the same coordinates.

use glam::Vec3;
use crate::scene::{Geometry, Layers, Node};
use super::kind::ProjectionKind;

/// Default axis flips for the axes indicator: Z points away from the
/// viewing direction, matching the camera convention.
pub const DEFAULT_AXES_FLIP: [bool; 3] = [false, false, true];

/// Corner signs of a square cross-section, in outline order
const CORNER_SIGNS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

// ============================================================================
// PLANE GEOMETRY
// ============================================================================

/// Near or far plane: a closed outline and a filled quad at the same depth.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    /// Four line segments forming a closed loop
    pub outline: Geometry,
    /// Two triangles covering the square, normals +Z
    pub quad: Geometry,
}

// ============================================================================
// FRUSTUM VISUAL
// ============================================================================

/// Complete visual representation of one projection kind's frustum.
#[derive(Debug, Clone, PartialEq)]
pub struct FrustumVisual {
    pub kind: ProjectionKind,
    pub side_edges: Geometry,
    /// Apex lines; perspective only
    pub tip_edges: Option<Geometry>,
    pub near_plane: PlaneGeometry,
    pub far_plane: PlaneGeometry,
}

impl FrustumVisual {
    /// Scene nodes for every part, all tagged with `layers`.
    ///
    /// Node names: `side_edges`, `tip_edges` (perspective only),
    /// `near_outline`, `near_quad`, `far_outline`, `far_quad`.
    pub fn to_nodes(&self, layers: Layers) -> Vec<Node> {
        let mut nodes = vec![Node::lines("side_edges", self.side_edges.clone())];
        if let Some(tip) = &self.tip_edges {
            nodes.push(Node::lines("tip_edges", tip.clone()));
        }
        nodes.push(Node::lines("near_outline", self.near_plane.outline.clone()));
        nodes.push(Node::mesh("near_quad", self.near_plane.quad.clone()));
        nodes.push(Node::lines("far_outline", self.far_plane.outline.clone()));
        nodes.push(Node::mesh("far_quad", self.far_plane.quad.clone()));

        nodes.into_iter().map(|n| n.with_layers(layers)).collect()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Frustum geometry builder for one parameter snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumGeometryBuilder {
    perspective_slope: f32,
    ortho_half_extent: f32,
    near: f32,
    far: f32,
}

impl FrustumGeometryBuilder {
    /// `perspective_slope` is `tan(fov / 2)`.
    pub fn new(perspective_slope: f32, ortho_half_extent: f32, near: f32, far: f32) -> Self {
        Self {
            perspective_slope,
            ortho_half_extent,
            near,
            far,
        }
    }

    /// Half side length of the cross-section at `distance` in front of the camera
    pub fn extent_at(&self, kind: ProjectionKind, distance: f32) -> f32 {
        match kind {
            ProjectionKind::Perspective => self.perspective_slope * distance,
            ProjectionKind::Orthographic => self.ortho_half_extent,
        }
    }

    /// Four corners of the cross-section at `distance`, in outline order
    pub fn corners_at(&self, kind: ProjectionKind, distance: f32) -> [Vec3; 4] {
        let e = self.extent_at(kind, distance);
        CORNER_SIGNS.map(|(sx, sy)| Vec3::new(sx * e, sy * e, -distance))
    }

    /// Four edges joining the near corners to the matching far corners
    pub fn build_side_edges(&self, kind: ProjectionKind) -> Geometry {
        let near = self.corners_at(kind, self.near);
        let far = self.corners_at(kind, self.far);

        let points = near
            .iter()
            .zip(far.iter())
            .flat_map(|(n, f)| [*n, *f])
            .collect();
        Geometry::from_positions(points)
    }

    /// Four edges from the apex to the near corners.
    ///
    /// `None` for orthographic projection, which has no apex.
    pub fn build_tip_edges(&self, kind: ProjectionKind) -> Option<Geometry> {
        match kind {
            ProjectionKind::Perspective => {
                let points = self
                    .corners_at(kind, self.near)
                    .iter()
                    .flat_map(|c| [Vec3::ZERO, *c])
                    .collect();
                Some(Geometry::from_positions(points))
            }
            ProjectionKind::Orthographic => None,
        }
    }

    /// Outline and filled quad of side `2 * extent` at depth `z`
    pub fn build_plane(extent: f32, z: f32) -> PlaneGeometry {
        let corners = CORNER_SIGNS.map(|(sx, sy)| Vec3::new(sx * extent, sy * extent, z));

        let outline = (0..4)
            .flat_map(|i| [corners[i], corners[(i + 1) % 4]])
            .collect();

        PlaneGeometry {
            outline: Geometry::from_positions(outline),
            quad: Geometry::quad(corners, Vec3::Z),
        }
    }

    /// All parts for one projection kind
    pub fn build(&self, kind: ProjectionKind) -> FrustumVisual {
        FrustumVisual {
            kind,
            side_edges: self.build_side_edges(kind),
            tip_edges: self.build_tip_edges(kind),
            near_plane: Self::build_plane(self.extent_at(kind, self.near), -self.near),
            far_plane: Self::build_plane(self.extent_at(kind, self.far), -self.far),
        }
    }

    /// Fixed image-space extents: the half cube x, y in [-1, 1], z in [0, 1].
    ///
    /// Near plane at z = 0, far plane at z = 1. Reported as orthographic
    /// since the cross-section no longer depends on depth.
    pub fn build_image_space_frustum() -> FrustumVisual {
        let points = CORNER_SIGNS
            .iter()
            .flat_map(|(sx, sy)| [Vec3::new(*sx, *sy, 0.0), Vec3::new(*sx, *sy, 1.0)])
            .collect();

        FrustumVisual {
            kind: ProjectionKind::Orthographic,
            side_edges: Geometry::from_positions(points),
            tip_edges: None,
            near_plane: Self::build_plane(1.0, 0.0),
            far_plane: Self::build_plane(1.0, 1.0),
        }
    }

    /// Axes indicator: one segment per axis from the origin, each optionally flipped
    pub fn build_axes(length: f32, flip: [bool; 3]) -> Geometry {
        let points = [Vec3::X, Vec3::Y, Vec3::Z]
            .iter()
            .zip(flip)
            .flat_map(|(axis, flipped)| {
                let sign = if flipped { -1.0 } else { 1.0 };
                [Vec3::ZERO, *axis * sign * length]
            })
            .collect();
        Geometry::from_positions(points)
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
