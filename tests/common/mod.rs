#![allow(dead_code)]

use std::collections::HashMap;

use gridcaster::{Color, GridMap, Raycaster, RenderConfig, Texture, TextureId, TextureSet};

pub const WALL: Color = Color::rgb(0, 255, 0);
pub const FLOOR: Color = Color::rgb(0, 0, 255);
pub const SPRITE: Color = Color::rgb(255, 0, 255);

/// Single-colour textures so each pass is recognisable in the framebuffer.
pub fn flat_textures() -> TextureSet {
    let textures: HashMap<TextureId, Texture> = TextureId::ALL
        .iter()
        .map(|&id| {
            let color = match id {
                TextureId::WallBricks | TextureId::WallStone => WALL,
                TextureId::Floor | TextureId::Ceiling => FLOOR,
                TextureId::Gargoyle | TextureId::Hero | TextureId::Treasure => SPRITE,
            };
            (id, Texture::from_fn(id.mode(), move |_, _| color))
        })
        .collect();
    TextureSet::new(textures).unwrap()
}

pub fn engine(rows: &[&str]) -> Raycaster {
    let map = GridMap::parse(rows).unwrap();
    Raycaster::new(RenderConfig::new(320, 200), map, flat_textures()).unwrap()
}

/// Straight corridor, start at the bottom, `extra` rows placed just above the start.
pub fn corridor(len: usize, extra: &[&'static str]) -> Vec<&'static str> {
    let mut rows = vec!["111"];
    for _ in 0..len.saturating_sub(extra.len()) {
        rows.push("1.1");
    }
    rows.extend_from_slice(extra);
    rows.push("1s1");
    rows.push("111");
    rows
}

pub fn is_sprite_pixel(c: Color) -> bool {
    c.r > 0 && c.g == 0 && c.r == c.b
}
