//! Renderer collaborator.
//!
//! The probe never talks to a GPU. Hosts implement `SceneRenderer` over
//! their backend; `RecordingRenderer` captures calls for tests and headless
//! runs.

mod scene_renderer;
mod recording_renderer;

pub use scene_renderer::SceneRenderer;
pub use recording_renderer::{RecordingRenderer, RenderCall, RecordedDraw};
