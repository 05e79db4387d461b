use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::texture::TextureId;
use crate::vector::Vector2;

/// Wall texture index of a grid cell. 0 is empty floor.
pub type WallId = u8;

pub const EMPTY: WallId = 0;
/// Returned for every query outside the grid. Treated as solid.
pub const OUT_OF_BOUNDS: WallId = 255;

/// Integer grid coordinate (x, y). (0, 0) is the bottom-left cell.
pub type Cell = (i32, i32);

/// Map used by the demo binary. `1`/`2` are walls, `s` the start cell,
/// `g`/`h`/`t` sprites, `.` empty floor.
pub const DEMO_MAP: [&str; 10] = [
    "11111111111111111111",
    "1..................1",
    "1..111111222222.2221",
    "1.....1.....2.....t1",
    "1.g...1.gh..2..h...1",
    "1...111t....2222...1",
    "1....t1222..2......1",
    "1....g.222..2.1.2.11",
    "1.h.......s........1",
    "11111111111111111111",
];

const START_MARKER: char = 's';

/// Billboard kind placed on an empty floor cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKind {
    Gargoyle,
    Hero,
    Treasure,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 3] = [SpriteKind::Gargoyle, SpriteKind::Hero, SpriteKind::Treasure];

    pub fn from_marker(c: char) -> Result<Self, EngineError> {
        match c {
            'g' => Ok(SpriteKind::Gargoyle),
            'h' => Ok(SpriteKind::Hero),
            't' => Ok(SpriteKind::Treasure),
            other => Err(EngineError::UnknownSpriteKind(other)),
        }
    }

    pub fn marker(self) -> char {
        match self {
            SpriteKind::Gargoyle => 'g',
            SpriteKind::Hero => 'h',
            SpriteKind::Treasure => 't',
        }
    }

    /// Fraction of a wall's screen height the billboard occupies.
    pub fn size_factor(self) -> f32 {
        match self {
            SpriteKind::Gargoyle => 0.8,
            SpriteKind::Hero => 0.7,
            SpriteKind::Treasure => 0.6,
        }
    }

    pub fn texture(self) -> TextureId {
        match self {
            SpriteKind::Gargoyle => TextureId::Gargoyle,
            SpriteKind::Hero => TextureId::Hero,
            SpriteKind::Treasure => TextureId::Treasure,
        }
    }
}

/// Immutable wall grid plus the sprite roster and the player start cell.
#[derive(Clone, Debug)]
pub struct GridMap {
    width: i32,
    height: i32,
    cells: Vec<WallId>, // row-major, row 0 at the bottom
    sprites: BTreeMap<Cell, SpriteKind>,
    player_start: Cell,
}

impl GridMap {
    /// Builds a map from row-major cells (row 0 is the bottom row).
    pub fn new(
        width: usize,
        height: usize,
        cells: Vec<WallId>,
        sprites: BTreeMap<Cell, SpriteKind>,
        player_start: Cell,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::MapFormat("map has no cells".into()));
        }
        if cells.len() != width * height {
            return Err(EngineError::MapFormat(format!(
                "expected {} cells for {width}x{height}, got {}",
                width * height,
                cells.len()
            )));
        }
        if cells.contains(&OUT_OF_BOUNDS) {
            return Err(EngineError::MapFormat(format!(
                "wall id {OUT_OF_BOUNDS} is reserved for off-map queries"
            )));
        }
        let map = Self {
            width: width as i32,
            height: height as i32,
            cells,
            sprites,
            player_start,
        };
        if map.wall(player_start.0, player_start.1) != EMPTY {
            return Err(EngineError::MapFormat(format!(
                "start cell {player_start:?} is not empty floor"
            )));
        }
        if let Some((cell, _)) = map.sprites.iter().find(|(c, _)| map.wall(c.0, c.1) != EMPTY) {
            return Err(EngineError::MapFormat(format!(
                "sprite cell {cell:?} is not empty floor"
            )));
        }
        Ok(map)
    }

    /// Parses text rows, top row first. Digits are wall ids, `.` and space are floor,
    /// `s` marks the start and any other character must be a sprite marker.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        let mut sprites = BTreeMap::new();
        let mut start = None;

        // flip so that y grows upwards
        for (y, row) in rows.iter().rev().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(EngineError::MapFormat(format!(
                    "row {} has {} columns, expected {width}",
                    height - 1 - y,
                    row.chars().count()
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let cell = (x as i32, y as i32);
                let id = match c {
                    '0'..='9' => c as u8 - b'0',
                    '.' | ' ' => EMPTY,
                    START_MARKER => {
                        if start.replace(cell).is_some() {
                            return Err(EngineError::MapFormat("more than one start marker".into()));
                        }
                        EMPTY
                    }
                    marker => {
                        sprites.insert(cell, SpriteKind::from_marker(marker)?);
                        EMPTY
                    }
                };
                cells.push(id);
            }
        }

        let start = start.ok_or_else(|| EngineError::MapFormat("no start marker 's'".into()))?;
        Self::new(width, height, cells, sprites, start)
    }

    /// Parses newline-separated map text, ignoring blank lines.
    pub fn parse_str(text: &str) -> Result<Self, EngineError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        Self::parse(&rows)
    }

    pub fn demo() -> Result<Self, EngineError> {
        Self::parse(&DEMO_MAP)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Wall id at an integer cell, or `OUT_OF_BOUNDS` off the grid.
    #[inline]
    pub fn wall(&self, x: i32, y: i32) -> WallId {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return OUT_OF_BOUNDS;
        }
        self.cells[(y * self.width + x) as usize]
    }

    /// Wall id of the cell containing a world point.
    #[inline]
    pub fn wall_at(&self, x: f32, y: f32) -> WallId {
        self.wall(x.floor() as i32, y.floor() as i32)
    }

    #[inline]
    pub fn is_solid_at(&self, x: f32, y: f32) -> bool {
        self.wall_at(x, y) != EMPTY
    }

    pub fn sprite_at(&self, cell: Cell) -> Option<SpriteKind> {
        self.sprites.get(&cell).copied()
    }

    /// Sprites in a fixed (cell) order.
    pub fn sprites(&self) -> impl Iterator<Item = (Cell, SpriteKind)> + '_ {
        self.sprites.iter().map(|(c, k)| (*c, *k))
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn player_start(&self) -> Cell {
        self.player_start
    }

    /// World-space centre of the start cell.
    pub fn player_start_position(&self) -> Vector2 {
        Vector2::new(self.player_start.0 as f32 + 0.5, self.player_start.1 as f32 + 0.5)
    }

    /// Distinct non-empty wall ids, ascending.
    pub fn wall_ids(&self) -> Vec<WallId> {
        let mut ids: Vec<WallId> = self.cells.iter().copied().filter(|&id| id != EMPTY).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
