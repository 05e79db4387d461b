use log::{info, trace};

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::EngineError;
use crate::raycast::{RayHit, cast_ray};
use crate::renderer::{Framebuffer, ceiling_size};
use crate::texture::{Color, TextureId, TextureSet};
use crate::vector::Vector2;
use crate::world::{EMPTY, GridMap};

/// The rendering engine: immutable map, textures and config, plus the per-frame state
/// (player camera and framebuffer) it mutates.
pub struct Raycaster {
    config: RenderConfig,
    map: GridMap,
    textures: TextureSet,
    camera: Camera,
    framebuffer: Framebuffer,
    ceiling_sizes: Vec<i32>,
    frame: u64,
    walltime_ms: f64,
}

impl Raycaster {
    /// Places the player at the centre of the map's start cell, facing +y.
    pub fn new(config: RenderConfig, map: GridMap, textures: TextureSet) -> Result<Self, EngineError> {
        config.validate()?;
        if let Some(id) = map.wall_ids().into_iter().find(|&id| textures.wall(id).is_none()) {
            return Err(EngineError::UnknownWallId(id));
        }

        let camera = Camera::at_start(&map, config.initial_fov);
        info!(
            "raycaster {}x{}: map {}x{}, {} sprites, fov {:.0} deg",
            config.pixwidth,
            config.pixheight,
            map.width(),
            map.height(),
            map.sprite_count(),
            config.initial_fov.to_degrees()
        );

        Ok(Self {
            framebuffer: Framebuffer::new(config.pixwidth, config.pixheight),
            ceiling_sizes: vec![0; config.pixwidth],
            config,
            map,
            textures,
            camera,
            frame: 0,
            walltime_ms: 0.0,
        })
    }

    /// Renders one frame into the framebuffer: walls, then floor and ceiling, then
    /// sprites. Each pass relies on the depth written by the ones before it.
    pub fn tick(&mut self, walltime_ms: f64) {
        self.frame += 1;
        self.walltime_ms = walltime_ms;
        self.framebuffer.begin_frame();

        let (w, h) = (self.config.pixwidth, self.config.pixheight);
        let screen_distance = self.camera.screen_distance(w, h);

        for x in 0..w {
            let hit = cast_ray(&self.map, &self.camera, &self.config, x);
            let ceiling = ceiling_size(h, screen_distance, hit.distance);
            self.ceiling_sizes[x] = ceiling;

            if hit.wall == EMPTY {
                self.framebuffer.draw_black_column(x, ceiling, hit.distance);
                continue;
            }
            let brightness = self.config.brightness(hit.distance);
            match self.textures.wall(hit.wall) {
                Some(texture) => self.framebuffer.draw_wall_column(
                    x,
                    ceiling,
                    hit.distance,
                    brightness,
                    texture,
                    hit.texture_u,
                ),
                // off-map boundary
                None => self.framebuffer.draw_solid_column(
                    x,
                    ceiling,
                    hit.distance,
                    brightness,
                    Color::BLACK,
                ),
            }
        }

        self.framebuffer.draw_floor_and_ceiling(
            &self.ceiling_sizes,
            screen_distance,
            &self.camera,
            &self.config,
            self.textures.get(TextureId::Floor),
            self.textures.get(TextureId::Ceiling),
        );

        let mut drawn = 0;
        for (cell, kind) in self.map.sprites() {
            if self.framebuffer.draw_sprite(
                &self.camera,
                &self.config,
                screen_distance,
                cell,
                kind,
                self.textures.get(kind.texture()),
            ) {
                drawn += 1;
            }
        }
        trace!("frame {} at {:.0} ms: {drawn} sprites", self.frame, walltime_ms);
    }

    /// Casts the ray for one screen column against the current pose.
    pub fn cast_column(&self, column: usize) -> RayHit {
        cast_ray(&self.map, &self.camera, &self.config, column)
    }

    pub fn move_player_forward_or_back(&mut self, amount: f32) -> Result<bool, EngineError> {
        self.camera.move_forward_or_back(&self.map, amount)
    }

    pub fn move_player_left_or_right(&mut self, amount: f32) -> Result<bool, EngineError> {
        self.camera.move_left_or_right(&self.map, amount)
    }

    pub fn rotate_player(&mut self, delta: f32) {
        self.camera.rotate(delta);
    }

    pub fn rotate_player_to(&mut self, angle: f32) {
        self.camera.rotate_to(angle);
    }

    /// Changes the horizontal field of view, keeping the view direction.
    pub fn set_fov(&mut self, fov: f32) -> Result<(), EngineError> {
        if !(fov > 0.0 && fov < std::f32::consts::PI) {
            return Err(EngineError::InvalidConfig(format!("fov {fov} rad must be in (0, pi)")));
        }
        self.camera.set_fov(fov);
        Ok(())
    }

    /// Puts the player at an open floor position.
    pub fn place_player(&mut self, position: Vector2, angle: f32) -> Result<(), EngineError> {
        if self.map.is_solid_at(position.x, position.y) {
            return Err(EngineError::MapFormat(format!(
                "cannot place player inside a wall at ({}, {})",
                position.x, position.y
            )));
        }
        self.camera = Camera::new(position, angle, self.camera.fov());
        Ok(())
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Ceiling size of each column from the last tick.
    pub fn ceiling_sizes(&self) -> &[i32] {
        &self.ceiling_sizes
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn last_walltime_ms(&self) -> f64 {
        self.walltime_ms
    }
}
