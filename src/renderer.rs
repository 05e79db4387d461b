use std::f32::consts::{PI, TAU};

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::texture::{Color, Texture};
use crate::vector::Vector2;
use crate::world::{Cell, SpriteKind};

/// Rows of sky above a wall of perpendicular `distance`. Negative when the wall is
/// taller than the screen.
#[inline]
pub fn ceiling_size(pixheight: usize, screen_distance: f32, distance: f32) -> i32 {
    (pixheight as f32 * (1.0 - screen_distance / distance) / 2.0).floor() as i32
}

/// Colour buffer plus a parallel depth buffer, both row-major.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Packed 0RGB pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        Color::unpack(self.pixels[y * self.width + x])
    }

    #[inline]
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[y * self.width + x]
    }

    /// Black picture, every depth at +infinity.
    pub fn begin_frame(&mut self) {
        self.pixels.fill(0);
        self.depth.fill(f32::INFINITY);
    }

    /// Depth-tested write. `None` is a transparent pixel and never writes.
    /// Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, z: f32, brightness: f32, color: Option<Color>) -> bool {
        let Some(mut color) = color else {
            return false;
        };
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y * self.width + x;
        if !(z < self.depth[idx]) {
            return false;
        }
        self.depth[idx] = z;
        if z > 0.0 && brightness != 1.0 {
            color = color.scaled(brightness);
        }
        self.pixels[idx] = color.pack();
        true
    }

    /// Rows a wall column covers: [max(0, ceiling), pixheight - max(0, ceiling)).
    #[inline]
    fn column_span(&self, ceiling: i32) -> std::ops::Range<usize> {
        let start = ceiling.max(0) as usize;
        let end = self.height.saturating_sub(start);
        start..end.max(start)
    }

    /// Textured wall slice; one brightness for the whole column.
    pub fn draw_wall_column(
        &mut self,
        x: usize,
        ceiling: i32,
        distance: f32,
        brightness: f32,
        texture: &Texture,
        texture_u: f32,
    ) {
        let wall_height = (self.height as i64 - 2 * ceiling as i64) as f32;
        for y in self.column_span(ceiling) {
            let v = (y as f32 - ceiling as f32) / wall_height;
            self.set_pixel(x, y, distance, brightness, Some(texture.sample(texture_u, v)));
        }
    }

    /// Miss column: transparent over the wall span, so colour and depth stay open to
    /// the floor, ceiling and sprite passes.
    pub fn draw_black_column(&mut self, x: usize, ceiling: i32, distance: f32) {
        for y in self.column_span(ceiling) {
            self.set_pixel(x, y, distance, 1.0, None);
        }
    }

    /// Opaque single-colour slice, used for the off-map boundary.
    pub fn draw_solid_column(&mut self, x: usize, ceiling: i32, distance: f32, brightness: f32, color: Color) {
        for y in self.column_span(ceiling) {
            self.set_pixel(x, y, distance, brightness, Some(color));
        }
    }

    /// Fills rows above and below each wall slice. Ceiling and floor share the ray of
    /// row `y`: the ceiling is drawn at `y`, the floor at `pixheight - y - 1`.
    pub fn draw_floor_and_ceiling(
        &mut self,
        ceiling_sizes: &[i32],
        screen_distance: f32,
        camera: &Camera,
        config: &RenderConfig,
        floor: &Texture,
        ceiling: &Texture,
    ) {
        let tallest = ceiling_sizes.iter().copied().max().unwrap_or(0);
        if tallest <= 0 {
            return;
        }
        let deepest = ceiling_size(self.height, screen_distance, config.black_distance);
        let rows = tallest.min(deepest).max(0) as usize;
        let origin = camera.position();

        for y in 0..rows {
            let sy = 0.5 - y as f32 / self.height as f32;
            let d_ground = 0.5 * screen_distance / sy;
            let brightness = config.brightness(d_ground);
            for (x, &h) in ceiling_sizes.iter().enumerate() {
                if (y as i32) < h && d_ground < self.depth_at(x, y) {
                    let ray = origin + camera.ray_direction(x, self.width) * d_ground;
                    self.set_pixel(x, y, d_ground, brightness, Some(ceiling.sample(ray.x, ray.y)));
                    self.set_pixel(
                        x,
                        self.height - y - 1,
                        d_ground,
                        brightness,
                        Some(floor.sample(ray.x, ray.y)),
                    );
                }
            }
        }
    }

    /// Draws one billboard standing in `cell`. Returns false when it was culled.
    pub fn draw_sprite(
        &mut self,
        camera: &Camera,
        config: &RenderConfig,
        screen_distance: f32,
        cell: Cell,
        kind: SpriteKind,
        texture: &Texture,
    ) -> bool {
        let center = Vector2::new(cell.0 as f32 + 0.5, cell.1 as f32 + 0.5);
        let to_sprite = center - camera.position();
        let distance = to_sprite.magnitude();
        let bearing = normalize_bearing(camera.angle() - to_sprite.angle());
        let half_fov = camera.fov() / 2.0;
        if distance >= config.black_distance || bearing.abs() >= half_fov {
            return false;
        }

        let middle = ((0.5 * (bearing / half_fov) + 0.5) * self.width as f32).floor();
        let perpendicular = distance * bearing.cos();
        let mut ceiling = ceiling_size(self.height, screen_distance, perpendicular);
        if ceiling < 0 {
            // TODO: clip near sprites vertically instead of dropping them
            return false;
        }
        let brightness = config.brightness(perpendicular);
        let size = kind.size_factor();
        let full_height = (self.height as i64 - 2 * ceiling as i64) as f32;
        ceiling += ((1.0 - size) * full_height).floor() as i32;
        let pixel_height = (size * full_height).floor();
        let pixel_width = pixel_height;
        if pixel_height < 1.0 {
            return false;
        }

        let x0 = (middle - pixel_width / 2.0).floor().max(0.0) as usize;
        let x1 = ((middle + pixel_width / 2.0).floor().max(0.0) as usize).min(self.width);
        for y in 0..pixel_height as usize {
            let v = y as f32 / pixel_height;
            let sy = y + ceiling as usize;
            for x in x0..x1 {
                let u = (x as f32 - middle) / pixel_width + 0.5;
                let texel = texture.sample(u, v);
                if texel.a > config.alpha_threshold {
                    self.set_pixel(x, sy, perpendicular, brightness, Some(texel));
                }
            }
        }
        true
    }
}

/// Wraps an angle difference into (-pi, pi].
#[inline]
fn normalize_bearing(mut a: f32) -> f32 {
    while a <= -PI {
        a += TAU;
    }
    while a > PI {
        a -= TAU;
    }
    a
}
