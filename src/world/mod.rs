//! World module - scene model
//!
//! - Immutable scene objects (cube, ground plane, vertical plane, axes)
//! - Procedural world-space meshes per object
//! - RON scene files

mod geometry;
mod scene;

pub use geometry::*;
pub use scene::*;
