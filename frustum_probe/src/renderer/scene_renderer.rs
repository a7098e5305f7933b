/// Scene renderer trait.

use crate::camera::Camera;
use crate::clipping::Plane;
use crate::error::Result;
use crate::scene::{Layers, Scene};

/// Draws one view of a scene.
///
/// `clipping_planes` are in the space of the drawn geometry; fragments on
/// the positive side of any plane are discarded. An empty slice disables
/// clipping. Only visible nodes whose layers intersect `layers` are drawn.
pub trait SceneRenderer: Send + Sync {
    /// Render the scene from `camera`
    fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        clipping_planes: &[Plane],
        layers: Layers,
    ) -> Result<()>;
}
