//! Core types for the rasterizer

use serde::{Serialize, Deserialize};

/// Default strength of a per-instance color tint
pub const TINT_INTENSITY: f32 = 0.3;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Blend toward `tint` channel-wise: base * (1 - intensity) + tint * intensity
    pub fn tint(self, tint: Color, intensity: f32) -> Self {
        let blend = |base: u8, t: u8| -> u8 {
            let v = base as f32 * (1.0 - intensity) + t as f32 * intensity;
            v.clamp(0.0, 255.0) as u8
        };
        Self {
            r: blend(self.r, tint.r),
            g: blend(self.g, tint.g),
            b: blend(self.b, tint.b),
            a: self.a,
        }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Integer pixel coordinate plus the depth used for z-buffering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32, depth: f32) -> Self {
        Self { x, y, depth }
    }
}

/// How world points are mapped to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionStrategy {
    /// Analytic camera basis and perspective divide
    #[default]
    Direct,
    /// Combined viewport * projection * view matrix
    Matrix,
}

impl ProjectionStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectionStrategy::Direct => "direct",
            ProjectionStrategy::Matrix => "matrix",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ProjectionStrategy::Direct => ProjectionStrategy::Matrix,
            ProjectionStrategy::Matrix => ProjectionStrategy::Direct,
        }
    }
}

/// Rasterizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    /// Stroke object edges (cube outlines, ground grid)
    pub wireframe: bool,
    /// Fill triangles
    pub triangles: bool,
    /// Depth-test filled triangles against the z-buffer
    pub z_buffer: bool,
    /// Projection used for every vertex this frame
    pub projection: ProjectionStrategy,
    /// Clear color
    pub background: Color,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            wireframe: true,
            triangles: true,
            z_buffer: true,
            projection: ProjectionStrategy::Direct,
            background: Color::new(10, 10, 14),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_blend() {
        let base = Color::new(100, 100, 255);
        let tinted = base.tint(Color::new(255, 255, 255), TINT_INTENSITY);
        // 100 * 0.7 + 255 * 0.3 = 146.5
        assert_eq!(tinted.r, 146);
        assert_eq!(tinted.b, 255);
        assert_eq!(tinted.a, 255);
    }

    #[test]
    fn test_tint_extremes() {
        let base = Color::new(10, 20, 30);
        assert_eq!(base.tint(Color::WHITE, 0.0), base);
        assert_eq!(base.tint(Color::new(1, 2, 3), 1.0), Color::new(1, 2, 3));
    }

    #[test]
    fn test_strategy_toggle() {
        assert_eq!(ProjectionStrategy::Direct.toggled(), ProjectionStrategy::Matrix);
        assert_eq!(ProjectionStrategy::Matrix.toggled(), ProjectionStrategy::Direct);
    }
}
