//! Scene objects and their procedural meshes
//!
//! Objects are plain data. Each one expands into a world-space [`Mesh`]
//! (shared vertex list + indexed triangles, edges and markers) that the
//! renderer projects and draws.

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Color, Vec3, TINT_INTENSITY};

/// Cube face colors before tinting: back, front, bottom, top, left, right
pub const CUBE_FACE_COLORS: [Color; 6] = [
    Color::new(100, 100, 255),
    Color::new(255, 100, 100),
    Color::new(100, 255, 100),
    Color::new(255, 255, 100),
    Color::new(255, 100, 255),
    Color::new(100, 255, 255),
];
pub const CUBE_EDGE_COLOR: Color = Color::new(200, 200, 200);

pub const GROUND_PALETTE: [Color; 2] = [Color::new(70, 70, 78), Color::new(110, 110, 120)];
pub const GRID_COLOR: Color = Color::new(80, 80, 80);
pub const GRID_CENTER_COLOR: Color = Color::new(120, 120, 120);

pub const VERTICAL_PLANE_COLORS: [Color; 2] = [Color::new(180, 140, 90), Color::new(150, 110, 70)];
pub const VERTICAL_PLANE_EDGE_COLOR: Color = Color::new(220, 200, 170);

pub const AXIS_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];
pub const AXIS_MARKER_RADIUS: i32 = 3;

/// Unit cube corners (back face z=-1, front face z=+1)
const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0), // 0: back bottom left
    Vec3::new(1.0, -1.0, -1.0),  // 1: back bottom right
    Vec3::new(1.0, 1.0, -1.0),   // 2: back top right
    Vec3::new(-1.0, 1.0, -1.0),  // 3: back top left
    Vec3::new(-1.0, -1.0, 1.0),  // 4: front bottom left
    Vec3::new(1.0, -1.0, 1.0),   // 5: front bottom right
    Vec3::new(1.0, 1.0, 1.0),    // 6: front top right
    Vec3::new(-1.0, 1.0, 1.0),   // 7: front top left
];

/// Quads in the same order as CUBE_FACE_COLORS, split as (a, b, c) + (a, c, d)
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
];

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0), // back
    (4, 5), (5, 6), (6, 7), (7, 4), // front
    (0, 4), (1, 5), (2, 6), (3, 7), // connecting
];

/// A filled triangle referencing three mesh vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub indices: [usize; 3],
    pub color: Color,
}

/// A line segment between two mesh vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub color: Color,
}

/// A filled screen-space circle centered on a mesh vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub vertex: usize,
    pub radius: i32,
    pub color: Color,
}

/// World-space geometry for one object for one frame
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    /// Filled when triangle rendering is on
    pub triangles: Vec<Triangle>,
    /// Stroked when wireframe rendering is on
    pub edges: Vec<Edge>,
    /// Stroked in every mode (axis arms)
    pub overlay: Vec<Edge>,
    /// Drawn alongside the overlay
    pub markers: Vec<Marker>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, v: Vec3) -> usize {
        self.vertices.push(v);
        self.vertices.len() - 1
    }

    pub fn add_triangle(&mut self, v0: usize, v1: usize, v2: usize, color: Color) {
        debug_assert!(
            v0 < self.vertices.len() && v1 < self.vertices.len() && v2 < self.vertices.len(),
            "triangle references vertex out of range"
        );
        self.triangles.push(Triangle { indices: [v0, v1, v2], color });
    }

    /// Add a quad as two triangles: (v0, v1, v2) and (v0, v2, v3)
    pub fn add_quad(&mut self, v0: usize, v1: usize, v2: usize, v3: usize, colors: [Color; 2]) {
        self.add_triangle(v0, v1, v2, colors[0]);
        self.add_triangle(v0, v2, v3, colors[1]);
    }

    pub fn add_edge(&mut self, a: usize, b: usize, color: Color) {
        debug_assert!(a < self.vertices.len() && b < self.vertices.len(), "edge references vertex out of range");
        self.edges.push(Edge { a, b, color });
    }

    pub fn add_overlay_line(&mut self, a: usize, b: usize, color: Color) {
        debug_assert!(a < self.vertices.len() && b < self.vertices.len(), "line references vertex out of range");
        self.overlay.push(Edge { a, b, color });
    }

    pub fn add_marker(&mut self, vertex: usize, radius: i32, color: Color) {
        debug_assert!(vertex < self.vertices.len(), "marker references vertex out of range");
        self.markers.push(Marker { vertex, radius, color });
    }
}

/// Variant-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Cube of half-size `size`
    Cube,
    /// Checkerboard/grid on the XZ plane, half-extent `size`
    GroundPlane { spacing: f32 },
    /// Quad in the XY plane, half-extent `size`
    VerticalPlane,
    /// Arms of length `size` along +X, +Y, +Z
    Axes {
        #[serde(default = "default_axis_colors")]
        colors: [Color; 3],
    },
}

fn default_axis_colors() -> [Color; 3] {
    AXIS_COLORS
}

fn default_tint() -> Color {
    Color::WHITE
}

/// An immutable object placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(default)]
    pub name: String,
    pub position: Vec3,
    /// Scale for cubes, half-extent for planes, arm length for axes
    pub size: f32,
    #[serde(default = "default_tint")]
    pub tint: Color,
    pub kind: ObjectKind,
}

impl SceneObject {
    pub fn cube(name: &str, position: Vec3, scale: f32, tint: Color) -> Self {
        Self {
            name: name.to_string(),
            position,
            size: scale,
            tint,
            kind: ObjectKind::Cube,
        }
    }

    pub fn ground_plane(size: f32, spacing: f32) -> Self {
        Self {
            name: "ground".to_string(),
            position: Vec3::ZERO,
            size,
            tint: Color::WHITE,
            kind: ObjectKind::GroundPlane { spacing },
        }
    }

    pub fn vertical_plane(name: &str, position: Vec3, size: f32, tint: Color) -> Self {
        Self {
            name: name.to_string(),
            position,
            size,
            tint,
            kind: ObjectKind::VerticalPlane,
        }
    }

    pub fn axes(position: Vec3, axis_length: f32) -> Self {
        Self {
            name: "axes".to_string(),
            position,
            size: axis_length,
            tint: Color::WHITE,
            kind: ObjectKind::Axes { colors: AXIS_COLORS },
        }
    }

    /// Short type name for logs
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            ObjectKind::Cube => "cube",
            ObjectKind::GroundPlane { .. } => "ground",
            ObjectKind::VerticalPlane => "vertical plane",
            ObjectKind::Axes { .. } => "axes",
        }
    }

    fn tinted(&self, base: Color) -> Color {
        base.tint(self.tint, TINT_INTENSITY)
    }

    /// Expand into world-space geometry
    pub fn mesh(&self) -> Mesh {
        match &self.kind {
            ObjectKind::Cube => self.cube_mesh(),
            ObjectKind::GroundPlane { spacing } => self.ground_mesh(*spacing),
            ObjectKind::VerticalPlane => self.vertical_plane_mesh(),
            ObjectKind::Axes { colors } => self.axes_mesh(*colors),
        }
    }

    fn cube_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        for v in CUBE_VERTICES {
            mesh.add_vertex(v * self.size + self.position);
        }

        for (face, base) in CUBE_FACES.iter().zip(CUBE_FACE_COLORS) {
            let color = self.tinted(base);
            mesh.add_quad(face[0], face[1], face[2], face[3], [color, color]);
        }

        for (a, b) in CUBE_EDGES {
            mesh.add_edge(a, b, CUBE_EDGE_COLOR);
        }

        mesh
    }

    /// Grid of `spacing` cells covering [-size, size] on both X and Z at Y=0
    fn ground_mesh(&self, spacing: f32) -> Mesh {
        let mut mesh = Mesh::new();
        let size = self.size;
        if spacing <= 0.0 || size <= 0.0 {
            return mesh;
        }

        let cells = ((2.0 * size) / spacing).round().max(1.0) as usize;
        let at = |i: usize| -size + i as f32 * spacing;

        // (cells + 1)^2 lattice, row-major over z then x
        for iz in 0..=cells {
            for ix in 0..=cells {
                mesh.add_vertex(Vec3::new(at(ix), 0.0, at(iz)) + self.position);
            }
        }
        let idx = |ix: usize, iz: usize| iz * (cells + 1) + ix;

        let palette = [self.tinted(GROUND_PALETTE[0]), self.tinted(GROUND_PALETTE[1])];
        for iz in 0..cells {
            for ix in 0..cells {
                let color = palette[(ix + iz) % 2];
                mesh.add_quad(
                    idx(ix, iz),
                    idx(ix + 1, iz),
                    idx(ix + 1, iz + 1),
                    idx(ix, iz + 1),
                    [color, color],
                );
            }
        }

        // Grid lines along X, then along Z
        for i in 0..=cells {
            mesh.add_edge(idx(0, i), idx(cells, i), GRID_COLOR);
            mesh.add_edge(idx(i, 0), idx(i, cells), GRID_COLOR);
        }

        // Brighter center lines through the plane origin
        let x0 = mesh.add_vertex(Vec3::new(-size, 0.0, 0.0) + self.position);
        let x1 = mesh.add_vertex(Vec3::new(size, 0.0, 0.0) + self.position);
        let z0 = mesh.add_vertex(Vec3::new(0.0, 0.0, -size) + self.position);
        let z1 = mesh.add_vertex(Vec3::new(0.0, 0.0, size) + self.position);
        mesh.add_edge(x0, x1, GRID_CENTER_COLOR);
        mesh.add_edge(z0, z1, GRID_CENTER_COLOR);

        mesh
    }

    fn vertical_plane_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        let s = self.size;
        let v0 = mesh.add_vertex(Vec3::new(-s, -s, 0.0) + self.position);
        let v1 = mesh.add_vertex(Vec3::new(s, -s, 0.0) + self.position);
        let v2 = mesh.add_vertex(Vec3::new(s, s, 0.0) + self.position);
        let v3 = mesh.add_vertex(Vec3::new(-s, s, 0.0) + self.position);

        let colors = [
            self.tinted(VERTICAL_PLANE_COLORS[0]),
            self.tinted(VERTICAL_PLANE_COLORS[1]),
        ];
        mesh.add_quad(v0, v1, v2, v3, colors);

        mesh.add_edge(v0, v1, VERTICAL_PLANE_EDGE_COLOR);
        mesh.add_edge(v1, v2, VERTICAL_PLANE_EDGE_COLOR);
        mesh.add_edge(v2, v3, VERTICAL_PLANE_EDGE_COLOR);
        mesh.add_edge(v3, v0, VERTICAL_PLANE_EDGE_COLOR);

        mesh
    }

    fn axes_mesh(&self, colors: [Color; 3]) -> Mesh {
        let mut mesh = Mesh::new();
        let origin = mesh.add_vertex(self.position);
        let dirs = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];

        for (dir, color) in dirs.into_iter().zip(colors) {
            let tip = mesh.add_vertex(self.position + dir * self.size);
            mesh.add_overlay_line(origin, tip, color);
            mesh.add_marker(tip, AXIS_MARKER_RADIUS, color);
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_mesh() {
        let cube = SceneObject::cube("c", Vec3::new(10.0, 20.0, 30.0), 50.0, Color::WHITE);
        let mesh = cube.mesh();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangles.len(), 12);
        assert_eq!(mesh.edges.len(), 12);
        assert!(mesh.overlay.is_empty());
        assert_eq!(mesh.vertices[0], Vec3::new(-40.0, -30.0, -20.0));
        assert_eq!(mesh.vertices[6], Vec3::new(60.0, 70.0, 80.0));
    }

    #[test]
    fn test_cube_winding_preserved() {
        let mesh = SceneObject::cube("c", Vec3::ZERO, 1.0, Color::WHITE).mesh();
        // Back face split as (0, 1, 2) + (0, 2, 3)
        assert_eq!(mesh.triangles[0].indices, [0, 1, 2]);
        assert_eq!(mesh.triangles[1].indices, [0, 2, 3]);
        // Right face is last
        assert_eq!(mesh.triangles[11].indices, [1, 6, 5]);
    }

    #[test]
    fn test_cube_face_tint() {
        let tint = Color::new(200, 200, 255);
        let mesh = SceneObject::cube("c", Vec3::ZERO, 1.0, tint).mesh();
        let expected = CUBE_FACE_COLORS[0].tint(tint, TINT_INTENSITY);
        assert_eq!(mesh.triangles[0].color, expected);
        assert_eq!(mesh.triangles[1].color, expected);
        assert_eq!(mesh.edges[0].color, CUBE_EDGE_COLOR);
    }

    #[test]
    fn test_ground_plane_counts() {
        let mesh = SceneObject::ground_plane(400.0, 50.0).mesh();
        // 16 x 16 cells, two triangles each
        assert_eq!(mesh.triangles.len(), (2 * 400 / 50) * (2 * 400 / 50) * 2);
        assert_eq!(mesh.triangles.len(), 512);
        // 17 lines each way plus two center lines
        assert_eq!(mesh.edges.len(), 17 * 2 + 2);
        assert!(mesh.vertices.iter().all(|v| v.y == 0.0));
        assert!(mesh.vertices.iter().all(|v| v.x.abs() <= 400.0 && v.z.abs() <= 400.0));
    }

    #[test]
    fn test_ground_plane_checkerboard() {
        let mesh = SceneObject::ground_plane(100.0, 50.0).mesh();
        assert_eq!(mesh.triangles.len(), 4 * 4 * 2);
        let first = mesh.triangles[0].color;
        let second = mesh.triangles[2].color;
        assert_ne!(first, second);
        assert_eq!(mesh.triangles[1].color, first);
    }

    #[test]
    fn test_ground_plane_invalid_spacing() {
        let mesh = SceneObject::ground_plane(100.0, 0.0).mesh();
        assert!(mesh.vertices.is_empty() && mesh.triangles.is_empty());
    }

    #[test]
    fn test_vertical_plane() {
        let mesh = SceneObject::vertical_plane("wall", Vec3::new(0.0, 100.0, -300.0), 100.0, Color::WHITE).mesh();
        assert_eq!(mesh.triangles.len(), 2);
        assert_eq!(mesh.edges.len(), 4);
        assert!(mesh.vertices.iter().all(|v| v.z == -300.0));
        assert_ne!(mesh.triangles[0].color, mesh.triangles[1].color);
    }

    #[test]
    fn test_axes_are_overlay() {
        let mesh = SceneObject::axes(Vec3::new(1.0, 2.0, 3.0), 100.0).mesh();
        assert!(mesh.triangles.is_empty());
        assert!(mesh.edges.is_empty());
        assert_eq!(mesh.overlay.len(), 3);
        assert_eq!(mesh.markers.len(), 3);
        assert_eq!(mesh.vertices[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices[1], Vec3::new(101.0, 2.0, 3.0));
        assert_eq!(mesh.overlay[1].color, Color::GREEN);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_bad_index_fails_fast() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vec3::ZERO);
        mesh.add_triangle(0, 1, 2, Color::WHITE);
    }
}
