//! Vector and matrix math for the 3D pipeline

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy of the vector. A zero vector comes back unchanged.
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return self;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// 2D Vector (screen-space points for the rasterizer)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Row-major 4x4 matrix
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub fn identity_matrix() -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Multiply two 4x4 matrices (a * b)
pub fn mat_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Transform a homogeneous point (x, y, z, 1) and return all four components
pub fn transform_homogeneous(m: &Mat4, p: Vec3) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (i, row) in m.iter().enumerate() {
        out[i] = row[0] * p.x + row[1] * p.y + row[2] * p.z + row[3];
    }
    out
}

/// Barycentric weights of (px, py) in triangle (p1, p2, p3).
/// Returns None for a degenerate (zero-area) triangle.
pub fn barycentric(px: f32, py: f32, p1: Vec2, p2: Vec2, p3: Vec2) -> Option<(f32, f32, f32)> {
    let d = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);

    if d.abs() < 1e-10 {
        return None;
    }

    let a = ((p2.y - p3.y) * (px - p3.x) + (p3.x - p2.x) * (py - p3.y)) / d;
    let b = ((p3.y - p1.y) * (px - p3.x) + (p1.x - p3.x) * (py - p3.y)) / d;
    let c = 1.0 - a - b;

    Some((a, b, c))
}

/// Inclusive point-in-triangle test: points exactly on an edge count as inside
pub fn point_in_triangle(px: f32, py: f32, p1: Vec2, p2: Vec2, p3: Vec2) -> bool {
    match barycentric(px, py, p1, p2, p3) {
        Some((a, b, c)) => a >= 0.0 && b >= 0.0 && c >= 0.0,
        None => false,
    }
}
