//! Grid-map raycasting renderer.
//!
//! A [`Raycaster`] owns a [`GridMap`], a [`TextureSet`] and a framebuffer. Each
//! [`Raycaster::tick`] marches one ray per screen column, draws the textured wall
//! slices, fills floor and ceiling, then composites billboard sprites, with a per-pixel
//! depth buffer deciding what is visible. The player is moved and turned between ticks.

pub mod assets;
pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod raycast;
pub mod renderer;
pub mod scaler;
pub mod texture;
pub mod vector;
pub mod world;

pub use camera::Camera;
pub use config::{IntersectionMethod, RenderConfig};
pub use engine::Raycaster;
pub use error::EngineError;
pub use raycast::{Edge, RayHit};
pub use renderer::Framebuffer;
pub use texture::{Color, ColorMode, RawImage, Texture, TextureId, TextureSet};
pub use vector::Vector2;
pub use world::{GridMap, SpriteKind, WallId};
