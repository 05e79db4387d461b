use std::collections::HashMap;

use crate::error::EngineError;
use crate::world::WallId;

/// Side length, in texels, of every texture.
pub const TEXTURE_SIZE: u32 = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies r, g and b by `brightness` (0 = black, 1 = unchanged). Alpha is kept.
    #[inline]
    pub fn scaled(self, brightness: f32) -> Self {
        let s = |c: u8| (c as f32 * brightness) as u8;
        Self::rgba(s(self.r), s(self.g), s(self.b), self.a)
    }

    /// 0RGB in a u32, the softbuffer pixel layout.
    #[inline]
    pub fn pack(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }

    #[inline]
    pub fn unpack(px: u32) -> Self {
        Self::rgb((px >> 16) as u8, (px >> 8) as u8, px as u8)
    }
}

/// Channel layout of a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Opaque, 3 bytes per pixel.
    Rgb,
    /// With alpha, 4 bytes per pixel.
    Rgba,
}

impl ColorMode {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }
}

/// Decoded image handed over by a texture loader.
#[derive(Clone, Debug)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    pub mode: ColorMode,
    pub data: Vec<u8>,
}

/// Fixed-size square image sampled in normalised, wrapping texture space.
#[derive(Clone, Debug)]
pub struct Texture {
    mode: ColorMode,
    texels: Vec<Color>,
}

impl Texture {
    /// Validates size and colour mode against what the texture will be used for.
    pub fn new(image: RawImage, expected: ColorMode) -> Result<Self, EngineError> {
        let format_error = |detail: Option<String>| EngineError::TextureFormat {
            expected_size: TEXTURE_SIZE,
            width: image.width,
            height: image.height,
            expected_mode: expected,
            mode: image.mode,
            detail,
        };
        if image.width != TEXTURE_SIZE || image.height != TEXTURE_SIZE || image.mode != expected {
            return Err(format_error(None));
        }
        let bpp = image.mode.bytes_per_pixel();
        let expected_len = (TEXTURE_SIZE * TEXTURE_SIZE) as usize * bpp;
        if image.data.len() != expected_len {
            return Err(format_error(Some(format!(
                "{} bytes of pixel data, expected {expected_len}",
                image.data.len()
            ))));
        }

        let texels = image
            .data
            .chunks_exact(bpp)
            .map(|px| match image.mode {
                ColorMode::Rgb => Color::rgb(px[0], px[1], px[2]),
                ColorMode::Rgba => Color::rgba(px[0], px[1], px[2], px[3]),
            })
            .collect();
        Ok(Self {
            mode: image.mode,
            texels,
        })
    }

    /// Procedural texture; `f` receives texel (x, y). Opaque textures ignore its alpha.
    pub fn from_fn(mode: ColorMode, f: impl Fn(u32, u32) -> Color) -> Self {
        let mut texels = Vec::with_capacity((TEXTURE_SIZE * TEXTURE_SIZE) as usize);
        for y in 0..TEXTURE_SIZE {
            for x in 0..TEXTURE_SIZE {
                let c = f(x, y);
                texels.push(match mode {
                    ColorMode::Rgb => Color::rgb(c.r, c.g, c.b),
                    ColorMode::Rgba => c,
                });
            }
        }
        Self { mode, texels }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn has_alpha(&self) -> bool {
        self.mode == ColorMode::Rgba
    }

    /// Colour at (u, v). Both wrap with mod-1 semantics, so 1.0 samples like 0.0 and
    /// -0.25 like 0.75.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let ix = texel_index(u);
        let iy = texel_index(v);
        self.texels[(iy * TEXTURE_SIZE + ix) as usize]
    }
}

#[inline]
fn texel_index(t: f32) -> u32 {
    let frac = t - t.floor();
    let i = (frac * TEXTURE_SIZE as f32).floor() as i64;
    i.clamp(0, TEXTURE_SIZE as i64 - 1) as u32
}

/// Every texture the renderer draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureId {
    Floor,
    Ceiling,
    WallBricks,
    WallStone,
    Gargoyle,
    Hero,
    Treasure,
}

impl TextureId {
    pub const ALL: [TextureId; 7] = [
        TextureId::Floor,
        TextureId::Ceiling,
        TextureId::WallBricks,
        TextureId::WallStone,
        TextureId::Gargoyle,
        TextureId::Hero,
        TextureId::Treasure,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Walls and the floor/ceiling are opaque; sprites carry alpha.
    pub fn mode(self) -> ColorMode {
        match self {
            TextureId::Floor | TextureId::Ceiling | TextureId::WallBricks | TextureId::WallStone => {
                ColorMode::Rgb
            }
            TextureId::Gargoyle | TextureId::Hero | TextureId::Treasure => ColorMode::Rgba,
        }
    }

    /// Texture drawn for a wall id.
    pub fn for_wall(id: WallId) -> Option<TextureId> {
        match id {
            1 => Some(TextureId::WallBricks),
            2 => Some(TextureId::WallStone),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            TextureId::Floor => "floor.png",
            TextureId::Ceiling => "ceiling.png",
            TextureId::WallBricks => "wall-bricks.png",
            TextureId::WallStone => "wall-stone.png",
            TextureId::Gargoyle => "gargoyle.png",
            TextureId::Hero => "hero.png",
            TextureId::Treasure => "treasure.png",
        }
    }
}

/// Complete, immutable texture table keyed by `TextureId`.
#[derive(Clone, Debug)]
pub struct TextureSet {
    textures: Vec<Texture>,
}

impl TextureSet {
    /// Fails unless every `TextureId` is present with its expected colour mode.
    pub fn new(mut textures: HashMap<TextureId, Texture>) -> Result<Self, EngineError> {
        let mut ordered = Vec::with_capacity(TextureId::ALL.len());
        for id in TextureId::ALL {
            let tex = textures.remove(&id).ok_or(EngineError::MissingTexture(id))?;
            if tex.mode() != id.mode() {
                return Err(EngineError::TextureFormat {
                    expected_size: TEXTURE_SIZE,
                    width: TEXTURE_SIZE,
                    height: TEXTURE_SIZE,
                    expected_mode: id.mode(),
                    mode: tex.mode(),
                    detail: Some(format!("{id:?}")),
                });
            }
            ordered.push(tex);
        }
        Ok(Self { textures: ordered })
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> &Texture {
        &self.textures[id.index()]
    }

    #[inline]
    pub fn wall(&self, id: WallId) -> Option<&Texture> {
        TextureId::for_wall(id).map(|t| self.get(t))
    }
}
