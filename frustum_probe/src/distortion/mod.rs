//! Distortion module: the real-world to image-space transform and the
//! clock that drives its animated transition.

mod clock;
mod transform;

pub use clock::{TransitionClock, SystemClock, ManualClock};
pub use transform::{DistortMode, DistortionTransform, CONVENTION_CORRECTION};
