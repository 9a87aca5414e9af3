//! Look-at camera with orbit animation

use serde::{Serialize, Deserialize};
use super::math::Vec3;

/// Camera state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
    pub focal_length: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, focal_length: f32) -> Self {
        Self {
            position,
            target,
            focal_length,
        }
    }

    /// Place the camera on a circle of `radius` at `height`, at `angle` radians.
    /// Target and focal length are left alone.
    pub fn orbit(&mut self, angle: f32, radius: f32, height: f32) {
        self.position = Vec3::new(radius * angle.cos(), height, radius * angle.sin());
    }

    /// Right/up/forward basis looking from position toward target
    pub fn basis(&self) -> CameraBasis {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(Vec3::UP).normalize();
        let up = forward.cross(right);

        CameraBasis {
            origin: self.position,
            right,
            up,
            forward,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec3::new(-500.0, -300.0, 500.0),
            Vec3::new(0.0, 50.0, 0.0),
            500.0,
        )
    }
}

/// Camera coordinate frame.
/// `up` points toward increasing pixel rows, so no flip is needed at projection time.
#[derive(Debug, Clone, Copy)]
pub struct CameraBasis {
    pub origin: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl CameraBasis {
    /// Express a world point in camera space (x right, y up, z forward)
    pub fn to_camera_space(&self, point: Vec3) -> Vec3 {
        let rel = point - self.origin;
        Vec3::new(rel.dot(self.right), rel.dot(self.up), rel.dot(self.forward))
    }
}
