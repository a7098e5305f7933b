/// Scene nodes.
///
/// A Node is a named transform with optional geometry. Parent/child links
/// are owned by the Scene, so a cloned Node is a detached deep copy.

use glam::{Mat4, Quat, Vec3};
use super::geometry::{Geometry, Topology};
use super::layers::Layers;

// ===== TRANSFORM =====

/// Local translation / rotation / scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// No translation, no rotation, unit scale
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Pure translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    /// Local matrix (scale, then rotation, then translation)
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// True if this transform leaves points unchanged
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ===== NODE =====

/// A scene node: group, mesh, or line list.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    transform: Transform,
    geometry: Option<Geometry>,
    topology: Topology,
    layers: Layers,
    visible: bool,
}

impl Node {
    /// Node without geometry, used to group children
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            geometry: None,
            topology: Topology::TriangleList,
            layers: Layers::DEFAULT,
            visible: true,
        }
    }

    /// Triangle mesh node
    pub fn mesh(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::group(name)
        }
    }

    /// Line segment node
    pub fn lines(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            topology: Topology::LineList,
            ..Self::group(name)
        }
    }

    /// Builder: set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: set the layer membership
    pub fn with_layers(mut self, layers: Layers) -> Self {
        self.layers = layers;
        self
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn geometry_mut(&mut self) -> Option<&mut Geometry> {
        self.geometry.as_mut()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn layers(&self) -> Layers {
        self.layers
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // ===== SETTERS =====

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Replace the geometry, discarding the old buffers
    pub fn set_geometry(&mut self, geometry: Option<Geometry>) {
        self.geometry = geometry;
    }

    pub fn set_layers(&mut self, layers: Layers) {
        self.layers = layers;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
