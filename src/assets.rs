//! Texture loading: PNG files from a directory, with procedural stand-ins for anything
//! missing or malformed.

use std::collections::HashMap;
use std::path::Path;

use image::DynamicImage;
use log::{info, warn};

use crate::error::EngineError;
use crate::texture::{Color, ColorMode, RawImage, TEXTURE_SIZE, Texture, TextureId, TextureSet};

/// Converts a decoded image, keeping an alpha channel only if the source has one.
pub fn raw_image(img: &DynamicImage) -> RawImage {
    let (width, height) = (img.width(), img.height());
    if img.color().has_alpha() {
        RawImage {
            width,
            height,
            mode: ColorMode::Rgba,
            data: img.to_rgba8().into_raw(),
        }
    } else {
        RawImage {
            width,
            height,
            mode: ColorMode::Rgb,
            data: img.to_rgb8().into_raw(),
        }
    }
}

/// Decodes an encoded image (PNG) for use as `id`.
pub fn decode_texture(bytes: &[u8], id: TextureId) -> Result<Texture, EngineError> {
    let img = image::load_from_memory(bytes)?;
    Texture::new(raw_image(&img), id.mode())
}

pub fn load_texture(path: &Path, id: TextureId) -> Result<Texture, EngineError> {
    let bytes = std::fs::read(path)?;
    decode_texture(&bytes, id)
}

/// Loads `<dir>/<id.file_name()>` for every texture. Files that are missing or fail
/// validation are replaced by the procedural texture and logged.
pub fn load_texture_set(dir: Option<&Path>) -> Result<TextureSet, EngineError> {
    let mut textures = HashMap::new();
    let mut loaded = 0;
    for id in TextureId::ALL {
        let tex = match dir {
            Some(dir) => {
                let path = dir.join(id.file_name());
                match load_texture(&path, id) {
                    Ok(tex) => {
                        loaded += 1;
                        tex
                    }
                    Err(e) => {
                        warn!("{}: {e}; using built-in {id:?}", path.display());
                        procedural(id)
                    }
                }
            }
            None => procedural(id),
        };
        textures.insert(id, tex);
    }
    info!("textures: {loaded} loaded, {} built-in", TextureId::ALL.len() - loaded);
    TextureSet::new(textures)
}

/// Every texture generated in code.
pub fn procedural_texture_set() -> Result<TextureSet, EngineError> {
    TextureSet::new(TextureId::ALL.iter().map(|&id| (id, procedural(id))).collect())
}

/// Built-in stand-in for `id`, in the colour mode `id` expects.
pub fn procedural(id: TextureId) -> Texture {
    let mode = id.mode();
    match id {
        TextureId::Floor => Texture::from_fn(mode, |x, y| {
            if (x / 16 + y / 16) % 2 == 0 {
                shade(Color::rgb(120, 110, 95), noise(x, y, 1), 0.15)
            } else {
                shade(Color::rgb(80, 72, 60), noise(x, y, 1), 0.15)
            }
        }),
        TextureId::Ceiling => Texture::from_fn(mode, |x, y| {
            // planks running along x
            if y % 16 == 0 {
                Color::rgb(30, 24, 18)
            } else {
                shade(Color::rgb(92, 70, 48), noise(x / 4, y, 2), 0.2)
            }
        }),
        TextureId::WallBricks => Texture::from_fn(mode, |x, y| {
            let row = y / 8;
            let offset = if row % 2 == 0 { 0 } else { 8 };
            if y % 8 == 7 || (x + offset) % 16 == 15 {
                Color::rgb(170, 165, 150)
            } else {
                shade(Color::rgb(150, 58, 40), noise(x, y, 3), 0.25)
            }
        }),
        TextureId::WallStone => Texture::from_fn(mode, |x, y| {
            if x % 32 == 0 || y % 21 == 0 {
                Color::rgb(40, 40, 44)
            } else {
                shade(Color::rgb(118, 118, 124), noise(x / 2, y / 2, 4), 0.3)
            }
        }),
        TextureId::Gargoyle => Texture::from_fn(mode, |x, y| {
            let (fx, fy) = centered(x, y);
            let body = ellipse(fx, fy + 0.1, 0.22, 0.3);
            let head = ellipse(fx, fy - 0.3, 0.13, 0.13);
            let wings = fy.abs() < 0.2 && fx.abs() < 0.45 && fy > -fx.abs() * 0.6;
            if body || head || wings {
                shade(Color::rgb(90, 96, 100), noise(x, y, 5), 0.2)
            } else {
                Color::TRANSPARENT
            }
        }),
        TextureId::Hero => Texture::from_fn(mode, |x, y| {
            let (fx, fy) = centered(x, y);
            if ellipse(fx, fy - 0.32, 0.1, 0.12) {
                Color::rgb(240, 200, 80)
            } else if ellipse(fx, fy - 0.05, 0.18, 0.3) {
                Color::rgb(200, 30, 30)
            } else if fy < -0.3 && fy > -0.48 && ((fx - 0.08).abs() < 0.05 || (fx + 0.08).abs() < 0.05) {
                Color::rgb(40, 50, 160)
            } else {
                Color::TRANSPARENT
            }
        }),
        TextureId::Treasure => Texture::from_fn(mode, |x, y| {
            let (fx, fy) = centered(x, y);
            let chest = fx.abs() < 0.35 && fy < -0.05 && fy > -0.45;
            let lid = ellipse(fx, fy + 0.05, 0.35, 0.14) && fy > -0.05;
            if chest && fy.abs() > 0.2 && fy.abs() < 0.24 {
                Color::rgb(250, 215, 60)
            } else if chest || lid {
                shade(Color::rgb(150, 95, 35), noise(x, y, 6), 0.2)
            } else {
                Color::TRANSPARENT
            }
        }),
    }
}

/// Texel centre in [-0.5, 0.5], y pointing up.
fn centered(x: u32, y: u32) -> (f32, f32) {
    let s = TEXTURE_SIZE as f32;
    ((x as f32 + 0.5) / s - 0.5, 0.5 - (y as f32 + 0.5) / s)
}

fn ellipse(x: f32, y: f32, rx: f32, ry: f32) -> bool {
    (x / rx).powi(2) + (y / ry).powi(2) <= 1.0
}

/// Deterministic hash noise in [0, 1).
fn noise(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263) ^ seed.wrapping_mul(2_246_822_519);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    (h ^ (h >> 16)) as f32 / (u32::MAX as f32 + 1.0)
}

fn shade(c: Color, n: f32, amount: f32) -> Color {
    c.scaled(1.0 - amount + 2.0 * amount * n)
}
