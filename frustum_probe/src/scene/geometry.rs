//! Vertex geometry for scene nodes.
//!
//! A `Geometry` owns its buffers outright, so cloning it is a deep copy:
//! distorting the clone never touches the source object.

use glam::{Mat4, Vec3};
use crate::error::{Error, Result};
use crate::engine_bail;

// ============================================================================
// TOPOLOGY
// ============================================================================

/// How consecutive vertices (or indices) form primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every three vertices form a triangle
    TriangleList,
    /// Every two vertices form a line segment
    LineList,
}

// ============================================================================
// AABB
// ============================================================================

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Smallest box containing all points. `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<AABB> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(min, max), p| {
            (min.min(*p), max.max(*p))
        });
        Some(AABB { min, max })
    }

    /// Transform this AABB by an affine matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of the box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Test if a point lies inside or on the box
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Position buffer plus optional normal and index buffers.
///
/// Line geometry carries no normals. Mesh geometry may carry one normal per
/// vertex; the distortion pass checks for that capability instead of
/// branching on the node type.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    indices: Option<Vec<u32>>,
    bounding_box: Option<AABB>,
}

impl Geometry {
    /// Non-indexed geometry without normals (line lists)
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            normals: None,
            indices: None,
            bounding_box: None,
        }
    }

    /// Geometry with one normal per vertex.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateGeometry` if the buffer lengths differ.
    pub fn with_normals(positions: Vec<Vec3>, normals: Vec<Vec3>) -> Result<Self> {
        if positions.len() != normals.len() {
            engine_bail!("probe::Geometry", DegenerateGeometry,
                "{} positions but {} normals", positions.len(), normals.len());
        }
        Ok(Self {
            positions,
            normals: Some(normals),
            indices: None,
            bounding_box: None,
        })
    }

    /// Attach an index buffer.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateGeometry` if an index is out of range.
    pub fn indexed(mut self, indices: Vec<u32>) -> Result<Self> {
        let vertex_count = self.positions.len();
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            engine_bail!("probe::Geometry", DegenerateGeometry,
                "index {} out of range for {} vertices", bad, vertex_count);
        }
        self.indices = Some(indices);
        Ok(self)
    }

    /// Single quad from four corners in winding order, split along the
    /// 0-2 diagonal. Every vertex carries `normal`.
    pub fn quad(corners: [Vec3; 4], normal: Vec3) -> Self {
        Self {
            positions: corners.to_vec(),
            normals: Some(vec![normal; 4]),
            indices: Some(vec![0, 1, 2, 0, 2, 3]),
            bounding_box: None,
        }
    }

    /// Axis-aligned box mesh centered on the origin (24 vertices, 36 indices).
    pub fn box_mesh(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width, height, depth) * 0.5;
        // (normal, tangent u, tangent v) per face; u x v == normal
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in faces {
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push((normal + u * su + v * sv) * h);
                normals.push(normal);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            positions,
            normals: Some(normals),
            indices: Some(indices),
            bounding_box: None,
        }
    }

    // ===== BUFFER ACCESS =====

    /// Vertex positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable vertex positions. Invalidates the cached bounding box.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        self.bounding_box = None;
        &mut self.positions
    }

    /// Vertex normals, if this geometry carries them
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// Mutable vertex normals, if this geometry carries them
    pub fn normals_mut(&mut self) -> Option<&mut [Vec3]> {
        self.normals.as_deref_mut()
    }

    /// Index buffer, if indexed
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Raw position bytes for upload by the renderer collaborator
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions.as_slice())
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Triangles as vertex index triples (indexed or sequential).
    ///
    /// Trailing indices that do not fill a whole triangle are ignored.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        match &self.indices {
            Some(indices) => indices
                .chunks_exact(3)
                .map(|c| [c[0] as usize, c[1] as usize, c[2] as usize])
                .collect(),
            None => (0..self.positions.len() / 3)
                .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
                .collect(),
        }
    }

    // ===== BOUNDING VOLUME =====

    /// Cached bounding box from the last `compute_bounding_box()`
    pub fn bounding_box(&self) -> Option<&AABB> {
        self.bounding_box.as_ref()
    }

    /// Recompute and cache the bounding box.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateGeometry` for empty geometry or when any
    /// position is non-finite (e.g. a vertex projected through the camera
    /// plane). Nothing is logged here; the caller knows which node failed.
    pub fn compute_bounding_box(&mut self) -> Result<AABB> {
        if let Some(index) = self.positions.iter().position(|p| !p.is_finite()) {
            self.bounding_box = None;
            return Err(Error::DegenerateGeometry(format!("non-finite position at vertex {}", index)));
        }
        let Some(aabb) = AABB::from_points(&self.positions) else {
            self.bounding_box = None;
            return Err(Error::DegenerateGeometry("geometry has no positions".to_string()));
        };
        self.bounding_box = Some(aabb);
        Ok(aabb)
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
