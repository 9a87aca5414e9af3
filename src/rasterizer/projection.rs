//! World-to-screen projection
//!
//! Two interchangeable strategies share one contract: a world point either
//! projects to a pixel plus camera-space depth, or is culled.
//! - Direct: dot the point against the camera basis and divide by depth
//! - Matrix: viewport * projection * view, then divide by W

use super::camera::{Camera, CameraBasis};
use super::math::{identity_matrix, mat_mul, transform_homogeneous, Mat4, Vec3};
use super::types::{ProjectionStrategy, ScreenPoint};

/// Points at or closer than this camera-space depth are culled
pub const NEAR_EPSILON: f32 = 0.1;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// View matrix: basis vectors as rows, translation by negative dot products
pub fn view_matrix(basis: &CameraBasis) -> Mat4 {
    let (r, u, f, p) = (basis.right, basis.up, basis.forward, basis.origin);
    [
        [r.x, r.y, r.z, -r.dot(p)],
        [u.x, u.y, u.z, -u.dot(p)],
        [f.x, f.y, f.z, -f.dot(p)],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Perspective projection for a camera looking down +Z.
///
/// W comes out equal to camera-space Z, so the divide and the depth test
/// both work on the same linear distance as the direct strategy. The Y row
/// is negated to cancel the viewport flip, since camera-space Y already
/// grows toward increasing pixel rows.
pub fn projection_matrix(focal_length: f32, width: usize, height: usize, near: f32, far: f32) -> Mat4 {
    let sx = focal_length / (width as f32 / 2.0);
    let sy = focal_length / (height as f32 / 2.0);
    [
        [sx, 0.0, 0.0, 0.0],
        [0.0, -sy, 0.0, 0.0],
        [0.0, 0.0, (far + near) / (far - near), -2.0 * far * near / (far - near)],
        [0.0, 0.0, 1.0, 0.0],
    ]
}

/// Map normalized device coordinates to pixels (row 0 at the top)
pub fn viewport_matrix(width: usize, height: usize) -> Mat4 {
    let hw = width as f32 / 2.0;
    let hh = height as f32 / 2.0;
    [
        [hw, 0.0, 0.0, hw],
        [0.0, -hh, 0.0, hh],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Per-frame projection state. Build once per frame, then project every vertex.
#[derive(Debug, Clone)]
pub struct Projector {
    strategy: ProjectionStrategy,
    basis: CameraBasis,
    focal_length: f32,
    combined: Mat4,
    width: usize,
    height: usize,
}

impl Projector {
    pub fn new(strategy: ProjectionStrategy, camera: &Camera, width: usize, height: usize) -> Self {
        let basis = camera.basis();
        let combined = match strategy {
            ProjectionStrategy::Direct => identity_matrix(),
            ProjectionStrategy::Matrix => {
                let view = view_matrix(&basis);
                let proj = projection_matrix(camera.focal_length, width, height, NEAR_PLANE, FAR_PLANE);
                let viewport = viewport_matrix(width, height);
                mat_mul(&viewport, &mat_mul(&proj, &view))
            }
        };

        Self {
            strategy,
            basis,
            focal_length: camera.focal_length,
            combined,
            width,
            height,
        }
    }

    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        match self.strategy {
            ProjectionStrategy::Direct => self.project_direct(point),
            ProjectionStrategy::Matrix => self.project_matrix(point),
        }
    }

    fn project_direct(&self, point: Vec3) -> Option<ScreenPoint> {
        let cam = self.basis.to_camera_space(point);

        if cam.z <= NEAR_EPSILON {
            return None;
        }

        let sx = self.focal_length * cam.x / cam.z + self.width as f32 / 2.0;
        let sy = self.focal_length * cam.y / cam.z + self.height as f32 / 2.0;

        Some(ScreenPoint::new(sx.round() as i32, sy.round() as i32, cam.z))
    }

    fn project_matrix(&self, point: Vec3) -> Option<ScreenPoint> {
        let [x, y, _z, w] = transform_homogeneous(&self.combined, point);

        // W is camera-space depth; anything behind the near epsilon is culled
        if w <= NEAR_EPSILON {
            return None;
        }

        Some(ScreenPoint::new((x / w).round() as i32, (y / w).round() as i32, w))
    }
}

/// Project with the analytic camera basis
pub fn project_direct(point: Vec3, camera: &Camera, width: usize, height: usize) -> Option<ScreenPoint> {
    Projector::new(ProjectionStrategy::Direct, camera, width, height).project(point)
}

/// Project through the combined viewport/projection/view matrix
pub fn project_matrix(point: Vec3, camera: &Camera, width: usize, height: usize) -> Option<ScreenPoint> {
    Projector::new(ProjectionStrategy::Matrix, camera, width, height).project(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 800;
    const H: usize = 600;

    fn front_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, -550.0), Vec3::ZERO, 500.0)
    }

    #[test]
    fn test_target_projects_to_center() {
        for cam in [front_camera(), Camera::default()] {
            for strategy in [ProjectionStrategy::Direct, ProjectionStrategy::Matrix] {
                let p = Projector::new(strategy, &cam, W, H).project(cam.target).unwrap();
                assert_eq!((p.x, p.y), (400, 300), "{:?}", strategy);
            }
        }
    }

    #[test]
    fn test_culls_behind_and_near() {
        let cam = front_camera();
        let behind = Vec3::new(10.0, 10.0, -600.0);
        let on_plane = Vec3::new(0.0, 0.0, -550.0);
        let near = Vec3::new(0.0, 0.0, -549.95);
        for strategy in [ProjectionStrategy::Direct, ProjectionStrategy::Matrix] {
            let proj = Projector::new(strategy, &cam, W, H);
            assert!(proj.project(behind).is_none());
            assert!(proj.project(on_plane).is_none());
            assert!(proj.project(near).is_none());
            assert!(proj.project(Vec3::new(0.0, 0.0, -549.0)).is_some());
        }
    }

    #[test]
    fn test_near_epsilon_boundary() {
        let cam = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 500.0);
        for strategy in [ProjectionStrategy::Direct, ProjectionStrategy::Matrix] {
            let proj = Projector::new(strategy, &cam, W, H);
            assert!(proj.project(Vec3::new(0.0, 0.0, NEAR_EPSILON)).is_none(), "{:?}", strategy);
            let p = proj.project(Vec3::new(0.0, 0.0, 0.1001)).unwrap();
            assert_eq!((p.x, p.y), (400, 300));
            assert!((p.depth - 0.1001).abs() < 1e-5);
        }
    }

    #[test]
    fn test_direct_depth_is_camera_z() {
        let cam = front_camera();
        let p = project_direct(Vec3::new(50.0, 50.0, 50.0), &cam, W, H).unwrap();
        assert!((p.depth - 600.0).abs() < 1e-3);
        // +X is on the left, +Y is toward the top row
        assert!(p.x < 400);
        assert!(p.y < 300);
    }

    #[test]
    fn test_strategies_agree() {
        let cam = Camera::default();
        for &(x, y, z) in &[
            (0.0, 0.0, 0.0),
            (50.0, 50.0, 50.0),
            (-100.0, 15.0, -50.0),
            (400.0, 0.0, -400.0),
            (-400.0, 0.0, 400.0),
            (80.0, 180.0, -120.0),
        ] {
            let p = Vec3::new(x, y, z);
            let a = project_direct(p, &cam, W, H).unwrap();
            let b = project_matrix(p, &cam, W, H).unwrap();
            assert!((a.x - b.x).abs() <= 1, "x mismatch for {:?}: {:?} vs {:?}", p, a, b);
            assert!((a.y - b.y).abs() <= 1, "y mismatch for {:?}: {:?} vs {:?}", p, a, b);
            assert!((a.depth - b.depth).abs() < 1e-2 * a.depth.max(1.0));
        }
    }

    #[test]
    fn test_projection_matrix_depth_range() {
        let m = projection_matrix(500.0, W, H, NEAR_PLANE, FAR_PLANE);
        let near = transform_homogeneous(&m, Vec3::new(0.0, 0.0, NEAR_PLANE));
        let far = transform_homogeneous(&m, Vec3::new(0.0, 0.0, FAR_PLANE));
        assert!((near[2] / near[3] + 1.0).abs() < 1e-3);
        assert!((far[2] / far[3] - 1.0).abs() < 1e-3);
    }
}
