//! Per-frame render orchestration
//!
//! Clears the framebuffer, advances the camera orbit, then walks the scene
//! in list order: mesh -> project -> fill and/or stroke.

use crate::rasterizer::{
    rasterize_triangle, rasterize_triangle_with_depth, Camera, Framebuffer, ProjectionStrategy,
    Projector, RasterSettings, ScreenPoint,
};
use crate::world::{Edge, Mesh, Scene, SceneObject};

/// Counters for the last rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub objects: usize,
    pub triangles_generated: usize,
    pub triangles_drawn: usize,
    /// Skipped because a vertex failed projection
    pub triangles_culled: usize,
    pub edges_drawn: usize,
    pub pixels_written: usize,
}

/// Render orchestrator
pub struct Renderer {
    pub settings: RasterSettings,
    stats: FrameStats,
}

impl Renderer {
    pub fn new(settings: RasterSettings) -> Self {
        Self {
            settings,
            stats: FrameStats::default(),
        }
    }

    /// Select rendering modes and projection strategy
    pub fn configure(&mut self, wireframe: bool, triangles: bool, z_buffer: bool, projection: ProjectionStrategy) {
        self.settings.wireframe = wireframe;
        self.settings.triangles = triangles;
        self.settings.z_buffer = z_buffer;
        self.settings.projection = projection;
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Draw one full frame of `scene` into `fb`.
    /// `elapsed` is simulation time in seconds and drives the camera orbit.
    pub fn render_frame(&mut self, fb: &mut Framebuffer, scene: &Scene, camera: &mut Camera, elapsed: f32) -> FrameStats {
        self.stats = FrameStats::default();
        fb.clear(self.settings.background);

        if scene.orbit.enabled {
            camera.orbit(elapsed * scene.orbit.speed, scene.orbit.radius, scene.orbit.height);
        }

        let projector = Projector::new(self.settings.projection, camera, fb.width, fb.height);

        for object in &scene.objects {
            self.draw_object(fb, &projector, object);
        }

        self.stats
    }

    fn draw_object(&mut self, fb: &mut Framebuffer, projector: &Projector, object: &SceneObject) {
        let mesh = object.mesh();
        let projected: Vec<Option<ScreenPoint>> = mesh.vertices.iter().map(|&v| projector.project(v)).collect();

        self.stats.objects += 1;
        self.stats.triangles_generated += mesh.triangles.len();

        if self.settings.triangles {
            self.fill_triangles(fb, &mesh, &projected);
        }
        if self.settings.wireframe {
            self.stroke_edges(fb, &mesh.edges, &projected);
        }
        self.stroke_edges(fb, &mesh.overlay, &projected);

        for marker in &mesh.markers {
            if let Some(p) = projected[marker.vertex] {
                fb.draw_circle(p.x, p.y, marker.radius, marker.color);
            }
        }
    }

    fn fill_triangles(&mut self, fb: &mut Framebuffer, mesh: &Mesh, projected: &[Option<ScreenPoint>]) {
        for tri in &mesh.triangles {
            let [i0, i1, i2] = tri.indices;
            let (Some(p1), Some(p2), Some(p3)) = (projected[i0], projected[i1], projected[i2]) else {
                self.stats.triangles_culled += 1;
                continue;
            };

            let written = if self.settings.z_buffer {
                rasterize_triangle_with_depth(fb, p1, p2, p3, p1.depth, p2.depth, p3.depth, tri.color)
            } else {
                rasterize_triangle(fb, p1, p2, p3, tri.color)
            };

            self.stats.triangles_drawn += 1;
            self.stats.pixels_written += written;
        }
    }

    fn stroke_edges(&mut self, fb: &mut Framebuffer, edges: &[Edge], projected: &[Option<ScreenPoint>]) {
        for edge in edges {
            if let (Some(a), Some(b)) = (projected[edge.a], projected[edge.b]) {
                fb.draw_line(a.x, a.y, b.x, b.y, edge.color);
                self.stats.edges_drawn += 1;
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RasterSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, Vec3, TINT_INTENSITY, HEIGHT, WIDTH};
    use crate::world::{demo_scene, OrbitSettings, CUBE_FACE_COLORS};

    fn still_scene(objects: Vec<SceneObject>) -> Scene {
        let mut scene = Scene::new("test");
        scene.orbit = OrbitSettings { enabled: false, ..OrbitSettings::default() };
        scene.objects = objects;
        scene
    }

    fn front_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, -550.0), Vec3::ZERO, 500.0)
    }

    fn unit_cube_scene() -> Scene {
        still_scene(vec![SceneObject::cube("c", Vec3::ZERO, 50.0, Color::WHITE)])
    }

    #[test]
    fn test_cube_silhouette_is_centered_and_symmetric() {
        let cam = front_camera();
        let mesh = SceneObject::cube("c", Vec3::ZERO, 50.0, Color::WHITE).mesh();

        for strategy in [ProjectionStrategy::Direct, ProjectionStrategy::Matrix] {
            let projector = Projector::new(strategy, &cam, WIDTH, HEIGHT);
            for v in &mesh.vertices {
                let p = projector.project(*v).unwrap();
                assert!(p.x >= 0 && p.x < WIDTH as i32 && p.y >= 0 && p.y < HEIGHT as i32);

                let mirror = projector.project(Vec3::new(-v.x, -v.y, v.z)).unwrap();
                assert!((p.x - 400 + mirror.x - 400).abs() <= 1, "{:?} vs {:?}", p, mirror);
                assert!((p.y - 300 + mirror.y - 300).abs() <= 1, "{:?} vs {:?}", p, mirror);
            }
        }
    }

    #[test]
    fn test_zbuffer_keeps_nearest_face() {
        let scene = unit_cube_scene();
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let mut cam = front_camera();
        let near_face = CUBE_FACE_COLORS[0].tint(Color::WHITE, TINT_INTENSITY);
        let far_face = CUBE_FACE_COLORS[1].tint(Color::WHITE, TINT_INTENSITY);

        for strategy in [ProjectionStrategy::Direct, ProjectionStrategy::Matrix] {
            let mut renderer = Renderer::default();
            renderer.configure(false, true, true, strategy);
            renderer.render_frame(&mut fb, &scene, &mut cam, 0.0);
            assert_eq!(fb.get_pixel(400, 300), Some(near_face));
            assert!((fb.depth_at(400, 300).unwrap() - 500.0).abs() < 1.0);

            // Painter order without depth test: the far face is drawn last
            renderer.configure(false, true, false, strategy);
            renderer.render_frame(&mut fb, &scene, &mut cam, 0.0);
            assert_eq!(fb.get_pixel(400, 300), Some(far_face));
        }
    }

    #[test]
    fn test_mode_combinations() {
        let scene = still_scene(demo_scene().objects);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let mut renderer = Renderer::default();

        let mut run = |wire: bool, tris: bool| {
            let mut cam = Camera::default();
            renderer.configure(wire, tris, true, ProjectionStrategy::Direct);
            renderer.render_frame(&mut fb, &scene, &mut cam, 0.0)
        };

        let both = run(true, true);
        let wire_only = run(true, false);
        let fill_only = run(false, true);
        let neither = run(false, false);

        assert!(both.triangles_drawn > 0 && both.edges_drawn > fill_only.edges_drawn);
        assert_eq!(wire_only.triangles_drawn, 0);
        assert_eq!(wire_only.pixels_written, 0);
        assert!(wire_only.edges_drawn > 0);
        assert_eq!(fill_only.triangles_drawn, both.triangles_drawn);
        // Axis arms are overlay lines and survive with every mode off
        assert_eq!(neither.triangles_drawn, 0);
        assert_eq!(neither.edges_drawn, 3);
        assert_eq!(neither.objects, 9);
    }

    #[test]
    fn test_ground_plane_triangles_per_frame() {
        let scene = still_scene(vec![SceneObject::ground_plane(400.0, 50.0)]);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let mut cam = Camera::new(Vec3::new(0.0, 600.0, -700.0), Vec3::ZERO, 500.0);
        let mut renderer = Renderer::default();
        let stats = renderer.render_frame(&mut fb, &scene, &mut cam, 0.0);
        assert_eq!(stats.triangles_generated, 512);
        assert_eq!(stats.triangles_drawn + stats.triangles_culled, 512);
        assert_eq!(renderer.stats(), stats);
    }

    #[test]
    fn test_object_behind_camera_is_culled() {
        let scene = still_scene(vec![SceneObject::cube("behind", Vec3::new(0.0, 0.0, -1000.0), 50.0, Color::WHITE)]);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let mut cam = front_camera();
        let mut renderer = Renderer::default();
        let stats = renderer.render_frame(&mut fb, &scene, &mut cam, 0.0);
        assert_eq!(stats.triangles_culled, 12);
        assert_eq!(stats.triangles_drawn, 0);
        assert_eq!(stats.edges_drawn, 0);
        assert_eq!(stats.pixels_written, 0);
    }

    #[test]
    fn test_far_off_axis_object_near_camera() {
        // Vertices sit just past the near epsilon, so they project billions of pixels away
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let mut cam = front_camera();
        let mut renderer = Renderer::default();

        for x in [400_000.0, 3_000_000.0, -3_000_000.0] {
            let scene = still_scene(vec![SceneObject::cube("far", Vec3::new(x, 0.0, -548.15), 1.0, Color::WHITE)]);
            let stats = renderer.render_frame(&mut fb, &scene, &mut cam, 0.0);
            assert_eq!(stats.triangles_drawn, 12);
            assert_eq!(stats.pixels_written, 0);
            let background = renderer.settings.background.to_bytes();
            assert!(fb.pixels.chunks_exact(4).all(|p| p == background));
        }
    }

    #[test]
    fn test_orbit_moves_camera() {
        let mut scene = unit_cube_scene();
        scene.orbit = OrbitSettings { enabled: true, speed: 0.5, radius: 600.0, height: 200.0 };
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let mut cam = front_camera();
        let mut renderer = Renderer::default();

        renderer.render_frame(&mut fb, &scene, &mut cam, std::f32::consts::PI);
        // angle = pi * 0.5
        assert!(cam.position.x.abs() < 1e-3);
        assert!((cam.position.y - 200.0).abs() < 1e-3);
        assert!((cam.position.z - 600.0).abs() < 1e-3);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn test_frame_clears_previous_contents() {
        let scene = still_scene(Vec::new());
        let mut fb = Framebuffer::new(16, 16);
        fb.set_pixel_with_depth(3, 3, 1.0, Color::RED);
        let mut renderer = Renderer::default();
        let mut cam = Camera::default();
        renderer.render_frame(&mut fb, &scene, &mut cam, 0.0);
        assert_eq!(fb.get_pixel(3, 3), Some(renderer.settings.background));
        assert_eq!(fb.depth_at(3, 3), Some(f32::INFINITY));
    }
}
