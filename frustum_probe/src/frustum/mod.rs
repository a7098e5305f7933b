//! Frustum module: parameters, derived cameras, and visual geometry.
//!
//! `FrustumModel` is the single source of truth for the probed camera.
//! Every setter regenerates the cameras and visual geometry of the
//! projection kinds it affects.

mod kind;
mod model;
mod geometry;

pub use kind::ProjectionKind;
pub use model::FrustumModel;
pub use geometry::{FrustumGeometryBuilder, FrustumVisual, PlaneGeometry, DEFAULT_AXES_FLIP};
