//! Software rasterizer
//!
//! Features:
//! - Look-at camera with orbit animation
//! - Direct or matrix-pipeline perspective projection
//! - Barycentric triangle fill with optional z-buffer
//! - Bresenham lines and filled markers for wireframe overlays

mod math;
mod types;
mod camera;
mod projection;
mod render;

pub use math::*;
pub use types::*;
pub use camera::*;
pub use projection::*;
pub use render::*;

/// Default framebuffer dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
