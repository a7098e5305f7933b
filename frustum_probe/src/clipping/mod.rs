//! Clipping module: six bounding planes derived from the frustum's
//! actual (possibly distorted) corners.

mod planes;

pub use planes::{
    Plane, ClippingPlanes, frustum_corners, derive_planes,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
