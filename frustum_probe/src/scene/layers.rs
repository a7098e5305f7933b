/// Visibility layers.
///
/// The host renders each view with a layer mask; only nodes whose layers
/// intersect the mask are drawn. The two visual frustum groups live on
/// separate layers so exactly one projection kind is shown at a time.

use bitflags::bitflags;

bitflags! {
    /// Layer membership bitfield for scene nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Layers: u32 {
        /// Ordinary scene content (probed objects, lights)
        const DEFAULT              = 1 << 0;
        /// Visual frustum of the perspective camera
        const PERSPECTIVE_FRUSTUM  = 1 << 1;
        /// Visual frustum of the orthographic camera
        const ORTHOGRAPHIC_FRUSTUM = 1 << 2;
        /// Distorted copies and the half-cube extents drawn in image space
        const IMAGE_SPACE          = 1 << 3;
        /// Axes indicator
        const AXES                 = 1 << 4;
    }
}

impl Default for Layers {
    fn default() -> Self {
        Layers::DEFAULT
    }
}
