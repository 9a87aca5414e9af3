//! Scene description and loading/saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::rasterizer::{Camera, Color, RasterSettings, Vec3, HEIGHT, WIDTH};
use super::SceneObject;

/// Camera orbit driven by elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitSettings {
    pub enabled: bool,
    /// Radians per second
    pub speed: f32,
    pub radius: f32,
    pub height: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 0.5,
            radius: 700.0,
            height: 300.0,
        }
    }
}

/// Everything needed to render: framebuffer size, camera, modes and objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub orbit: OrbitSettings,
    #[serde(default)]
    pub render: RasterSettings,
    pub objects: Vec<SceneObject>,
}

fn default_width() -> usize {
    WIDTH
}

fn default_height() -> usize {
    HEIGHT
}

impl Scene {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            width: WIDTH,
            height: HEIGHT,
            camera: Camera::default(),
            orbit: OrbitSettings::default(),
            render: RasterSettings::default(),
            objects: Vec::new(),
        }
    }

    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Check values that serde accepts but the renderer cannot use
    pub fn validate(&self) -> Result<(), SceneError> {
        let valid = |side: usize| (1..=MAX_DIMENSION).contains(&side);
        if !valid(self.width) || !valid(self.height) {
            return Err(SceneError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Built-in scene: ground grid, axes, a wall and six tinted cubes
pub fn demo_scene() -> Scene {
    let cubes = [
        ("center", Vec3::new(0.0, 25.0, 0.0), 50.0, Color::new(255, 255, 255)),
        ("large", Vec3::new(120.0, 40.0, 80.0), 80.0, Color::new(255, 200, 200)),
        ("small", Vec3::new(-100.0, 15.0, -50.0), 30.0, Color::new(200, 255, 200)),
        ("big", Vec3::new(80.0, 60.0, -120.0), 120.0, Color::new(200, 200, 255)),
        ("medium", Vec3::new(-80.0, 20.0, 100.0), 40.0, Color::new(255, 255, 200)),
        ("tiny", Vec3::new(0.0, 10.0, -200.0), 20.0, Color::new(255, 200, 255)),
    ];

    let mut scene = Scene::new("demo")
        .with_object(SceneObject::ground_plane(400.0, 50.0))
        .with_object(SceneObject::axes(Vec3::ZERO, 100.0))
        .with_object(SceneObject::vertical_plane(
            "wall",
            Vec3::new(-250.0, 100.0, -350.0),
            100.0,
            Color::new(255, 230, 200),
        ));

    for (name, pos, scale, tint) in cubes {
        scene.objects.push(SceneObject::cube(name, pos, scale, tint));
    }

    scene
}

/// Largest framebuffer side the host can upload as a texture
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    /// Framebuffer size outside 1..=MAX_DIMENSION
    InvalidSize { width: usize, height: usize },
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            SceneError::InvalidSize { width, height } => write!(
                f,
                "Invalid framebuffer size {}x{} (each side must be 1..={})",
                width, height, MAX_DIMENSION
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    let scene: Scene = ron::from_str(s)?;
    scene.validate()?;
    Ok(scene)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    fs::write(path, scene_to_string(scene)?)?;
    Ok(())
}

pub fn scene_to_string(scene: &Scene) -> Result<String, SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    Ok(ron::ser::to_string_pretty(scene, config)?)
}
