//! raster3d: software 3D rasterization pipeline
//!
//! Renders a scene of cubes, planes and axes through an orbiting camera
//! into a CPU framebuffer, then shows it in a window:
//! - Direct or matrix projection
//! - Filled triangles with optional z-buffer
//! - Wireframe overlay

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod world;
mod renderer;
mod fps;

use std::path::{Path, PathBuf};
use macroquad::prelude::{
    clear_background, draw_text, draw_texture_ex, get_frame_time, get_time, is_key_pressed,
    next_frame, screen_height, screen_width, vec2, Conf, DrawTextureParams, FilterMode, KeyCode,
    Texture2D, BLACK, LIGHTGRAY, WHITE,
};
use rasterizer::{Framebuffer, HEIGHT, WIDTH};
use renderer::Renderer;
use world::{demo_scene, load_scene, save_scene, Scene};
use fps::FpsCounter;

const DEFAULT_SCENE: &str = "assets/scenes/demo.ron";
const EXPORT_SCENE: &str = "scene_export.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("raster3d v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Scene from the first argument, else the bundled file, else the built-in demo
fn pick_scene() -> Scene {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from(DEFAULT_SCENE)).filter(|p| p.exists()));

    let Some(path) = path else {
        log::info!("No scene file found, using built-in demo scene");
        return demo_scene();
    };

    match load_scene(&path) {
        Ok(scene) => {
            log::info!("Loaded scene {:?} from {}", scene.name, path.display());
            scene
        }
        Err(e) => {
            log::error!("Failed to load scene {}: {}", path.display(), e);
            log::warn!("Falling back to built-in demo scene");
            demo_scene()
        }
    }
}

fn on_off(b: bool) -> &'static str {
    if b { "on" } else { "off" }
}

/// Apply keyboard toggles to the renderer. Returns false when the app should exit.
fn handle_input(renderer: &mut Renderer, orbit_paused: &mut bool, fb: &Framebuffer, frame: u64) -> bool {
    if is_key_pressed(KeyCode::Escape) {
        return false;
    }

    let s = &mut renderer.settings;
    if is_key_pressed(KeyCode::Key1) {
        s.wireframe = !s.wireframe;
        log::info!("Wireframe {}", on_off(s.wireframe));
    }
    if is_key_pressed(KeyCode::Key2) {
        s.triangles = !s.triangles;
        log::info!("Filled triangles {}", on_off(s.triangles));
    }
    if is_key_pressed(KeyCode::Key3) {
        s.z_buffer = !s.z_buffer;
        log::info!("Z-buffer {}", on_off(s.z_buffer));
    }
    if is_key_pressed(KeyCode::P) {
        s.projection = s.projection.toggled();
        log::info!("Projection: {}", s.projection.label());
    }
    if is_key_pressed(KeyCode::O) {
        *orbit_paused = !*orbit_paused;
        log::info!("Orbit {}", if *orbit_paused { "paused" } else { "resumed" });
    }
    if is_key_pressed(KeyCode::F12) {
        let path = format!("screenshot_{:05}.png", frame);
        match fb.save_png(Path::new(&path)) {
            Ok(()) => log::info!("Saved {}", path),
            Err(e) => log::error!("Failed to save screenshot {}: {}", path, e),
        }
    }

    true
}

/// Blit the framebuffer to the window, letterboxed to keep its aspect ratio
fn present(fb: &Framebuffer) {
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Nearest);

    let (sw, sh) = (screen_width(), screen_height());
    let fb_aspect = fb.width as f32 / fb.height as f32;
    let (w, h) = if sw / sh > fb_aspect {
        (sh * fb_aspect, sh)
    } else {
        (sw, sw / fb_aspect)
    };

    draw_texture_ex(
        &texture,
        (sw - w) * 0.5,
        (sh - h) * 0.5,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(w, h)),
            ..Default::default()
        },
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = pick_scene();
    let mut fb = Framebuffer::new(scene.width, scene.height);
    let mut camera = scene.camera;
    let mut renderer = Renderer::new(scene.render.clone());

    log::info!(
        "=== raster3d v{} === {}x{}, {} objects, {} projection",
        VERSION,
        fb.width,
        fb.height,
        scene.objects.len(),
        renderer.settings.projection.label(),
    );
    for object in &scene.objects {
        log::debug!("  {} ({}) at {:?}", object.name, object.kind_label(), object.position);
    }

    let mut fps = FpsCounter::new(get_time());
    let mut orbit_time = 0.0f64;
    let mut orbit_paused = false;
    let mut frame: u64 = 0;

    loop {
        if !handle_input(&mut renderer, &mut orbit_paused, &fb, frame) {
            break;
        }

        // Snapshot the current camera and modes as a scene file
        if is_key_pressed(KeyCode::F5) {
            let mut snapshot = scene.clone();
            snapshot.camera = camera;
            snapshot.render = renderer.settings.clone();
            match save_scene(&snapshot, EXPORT_SCENE) {
                Ok(()) => log::info!("Saved scene to {}", EXPORT_SCENE),
                Err(e) => log::error!("Failed to save scene: {}", e),
            }
        }

        if !orbit_paused {
            orbit_time += get_frame_time() as f64;
        }

        let stats = renderer.render_frame(&mut fb, &scene, &mut camera, orbit_time as f32);

        clear_background(BLACK);
        present(&fb);

        if fps.update(get_time()) {
            log::debug!("{:.1} fps, {:?}", fps.fps(), stats);
        }

        let s = &renderer.settings;
        draw_text(
            &format!(
                "{:.0} fps | [1] wire {} [2] fill {} [3] zbuf {} [P] {} [O] orbit [F5] save [F12] shot",
                fps.fps(),
                on_off(s.wireframe),
                on_off(s.triangles),
                on_off(s.z_buffer),
                s.projection.label(),
            ),
            8.0,
            20.0,
            20.0,
            LIGHTGRAY,
        );

        frame += 1;
        next_frame().await;
    }

    log::info!("Exiting after {} frames", frame);
}
