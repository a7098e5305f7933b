/// Projection kinds.

use std::fmt;
use std::str::FromStr;
use crate::error::Error;
use crate::scene::Layers;

/// Which camera the frustum models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    /// Truncated pyramid with its apex at the camera
    Perspective,
    /// Box with a square cross-section
    Orthographic,
}

impl ProjectionKind {
    /// Both kinds, in revision-slot order
    pub const ALL: [ProjectionKind; 2] = [ProjectionKind::Perspective, ProjectionKind::Orthographic];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            ProjectionKind::Perspective => "perspective",
            ProjectionKind::Orthographic => "orthographic",
        }
    }

    /// Layer holding this kind's visual frustum
    pub fn layer(self) -> Layers {
        match self {
            ProjectionKind::Perspective => Layers::PERSPECTIVE_FRUSTUM,
            ProjectionKind::Orthographic => Layers::ORTHOGRAPHIC_FRUSTUM,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            ProjectionKind::Perspective => 0,
            ProjectionKind::Orthographic => 1,
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionKind {
    type Err = Error;

    /// Accepts "perspective", "orthographic" and the UI shorthand "ortho"
    /// (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perspective" => Ok(ProjectionKind::Perspective),
            "orthographic" | "ortho" => Ok(ProjectionKind::Orthographic),
            _ => Err(Error::UnknownProjection(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
