//! Camera module: projection camera records.
//!
//! The probe derives one camera per projection kind from the frustum
//! parameters. Hosts may also build free viewer cameras (real-world view,
//! image-space view) with the same record type.

mod camera;

pub use camera::{Camera, CAMERA_EYE, CAMERA_FORWARD, CAMERA_UP};
