/*!
# Frustum Probe

Frustum distortion engine for visualizing camera projection.

A scene is drawn twice: once in real-world space, with the camera's view
frustum shown as a truncated pyramid (or a box for orthographic
projection), and once in image space, with the same geometry warped into
normalized device coordinates. This crate models the frustum, derives the
distortion transform from its projection, applies it to scene geometry,
animates the transition between the two spaces and derives the clipping
planes for the image-space view.

## Architecture

- **FrustumModel**: frustum parameters, derived cameras and visual geometry
- **DistortionTransform**: current distortion matrix and its transition
- **ClippingPlanes**: six planes from the frustum's distorted corners
- **DistortionEngine**: per-frame facade driven by the host
- **Scene / SceneRenderer**: minimal host substrate to exercise the engine

The crate is backend-agnostic: hosts plug their renderer in through the
`SceneRenderer` trait.
*/

// Internal modules
mod error;
mod engine;
mod config;
pub mod log;
pub mod camera;
pub mod clipping;
pub mod distortion;
pub mod frustum;
pub mod renderer;
pub mod scene;

// Main probe namespace module
pub mod probe {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine facade and configuration
    pub use crate::engine::{DistortionEngine, VisualFrustumHandle};
    pub use crate::config::ProbeConfig;

    // Frequently used types
    pub use crate::camera::Camera;
    pub use crate::clipping::{ClippingPlanes, Plane};
    pub use crate::distortion::{DistortMode, ManualClock, SystemClock, TransitionClock};
    pub use crate::frustum::{FrustumModel, ProjectionKind};
    pub use crate::renderer::{RecordingRenderer, SceneRenderer};
    pub use crate::scene::{Geometry, ImageSpacePass, Layers, Node, NodeKey, Scene, Transform};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Frustum sub-module
    pub mod frustum {
        pub use crate::frustum::*;
    }

    // Distortion sub-module
    pub mod distortion {
        pub use crate::distortion::*;
    }

    // Clipping sub-module
    pub mod clipping {
        pub use crate::clipping::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
