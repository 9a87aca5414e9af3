//! Framebuffer and triangle rasterization

use std::path::Path;
use super::math::{barycentric, point_in_triangle, Vec2};
use super::types::{Color, ScreenPoint};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,  // Nearest depth written this frame
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::INFINITY; width * height],
            width,
            height,
        }
    }

    /// Fill every pixel with `color` and reset depth to +infinity
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.clear_depth();
    }

    pub fn clear_depth(&mut self) {
        self.zbuffer.fill(f32::INFINITY);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Write the pixel only if `z` is strictly nearer than what is stored.
    /// Equal depths keep the earlier pixel.
    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                let pixel_idx = idx * 4;
                self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
                return true;
            }
        }
        false
    }

    /// Read back a pixel (None outside the framebuffer)
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let p = &self.pixels[idx..idx + 4];
            Some(Color { r: p[0], g: p[1], b: p[2], a: p[3] })
        } else {
            None
        }
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.zbuffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Draw a filled circle at (cx, cy) with given radius and color
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        // i64 so centers saturated at i32::MIN/MAX by projection cannot overflow
        let (cx, cy, radius) = (cx as i64, cy as i64, radius as i64);
        let r_sq = radius * radius;
        for y in (cy - radius).max(0)..=(cy + radius).min(self.height as i64 - 1) {
            for x in (cx - radius).max(0)..=(cx + radius).min(self.width as i64 - 1) {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(x as usize, y as usize, color);
                }
            }
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm.
    /// The segment is clipped to the framebuffer first, so only visible pixels are walked.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip_line(x0, y0, x1, y1) else {
            return;
        };

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
                self.set_pixel(x as usize, y as usize, color);
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Liang-Barsky clip of a segment against [0, width-1] x [0, height-1].
    /// None when the segment misses the framebuffer entirely.
    fn clip_line(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i32, i32, i32, i32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let (fx, fy) = (x0 as f64, y0 as f64);
        let dx = x1 as f64 - fx;
        let dy = y1 as f64 - fy;
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;

        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        for (p, q) in [(-dx, fx), (dx, max_x - fx), (-dy, fy), (dy, max_y - fy)] {
            if p == 0.0 {
                // Parallel to this edge and outside it
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let at = |t: f64| {
            let x = (fx + t * dx).round().clamp(0.0, max_x);
            let y = (fy + t * dy).round().clamp(0.0, max_y);
            (x as i32, y as i32)
        };
        let (ax, ay) = at(t0);
        let (bx, by) = at(t1);
        Some((ax, ay, bx, by))
    }

    /// Save the current color buffer as a PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
        )
    }

    /// Integer bounding box of three points clipped to the framebuffer (inclusive).
    /// None when the box lies entirely off-screen.
    fn clipped_bounds(&self, p1: ScreenPoint, p2: ScreenPoint, p3: ScreenPoint) -> Option<(usize, usize, usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let min_x = p1.x.min(p2.x).min(p3.x).max(0);
        let max_x = p1.x.max(p2.x).max(p3.x).min(self.width as i32 - 1);
        let min_y = p1.y.min(p2.y).min(p3.y).max(0);
        let max_y = p1.y.max(p2.y).max(p3.y).min(self.height as i32 - 1);

        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some((min_x as usize, max_x as usize, min_y as usize, max_y as usize))
    }
}

fn to_vec2(p: ScreenPoint) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

/// Fill every pixel of the triangle's bounding box that passes the
/// point-in-triangle test. No depth test. Returns the number of pixels written.
pub fn rasterize_triangle(
    fb: &mut Framebuffer,
    p1: ScreenPoint,
    p2: ScreenPoint,
    p3: ScreenPoint,
    color: Color,
) -> usize {
    let Some((min_x, max_x, min_y, max_y)) = fb.clipped_bounds(p1, p2, p3) else {
        return 0;
    };
    let (v1, v2, v3) = (to_vec2(p1), to_vec2(p2), to_vec2(p3));
    let mut written = 0;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if point_in_triangle(x as f32, y as f32, v1, v2, v3) {
                fb.set_pixel(x, y, color);
                written += 1;
            }
        }
    }

    written
}

/// Same scan as [`rasterize_triangle`], but interpolates depth from the
/// barycentric weights and only writes pixels strictly nearer than the z-buffer.
pub fn rasterize_triangle_with_depth(
    fb: &mut Framebuffer,
    p1: ScreenPoint,
    p2: ScreenPoint,
    p3: ScreenPoint,
    z1: f32,
    z2: f32,
    z3: f32,
    color: Color,
) -> usize {
    let Some((min_x, max_x, min_y, max_y)) = fb.clipped_bounds(p1, p2, p3) else {
        return 0;
    };
    let (v1, v2, v3) = (to_vec2(p1), to_vec2(p2), to_vec2(p3));
    let mut written = 0;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let Some((a, b, c)) = barycentric(x as f32, y as f32, v1, v2, v3) else {
                // Degenerate triangle covers nothing
                return written;
            };
            if a >= 0.0 && b >= 0.0 && c >= 0.0 {
                let depth = a * z1 + b * z2 + c * z3;
                if fb.set_pixel_with_depth(x, y, depth, color) {
                    written += 1;
                }
            }
        }
    }

    written
}
