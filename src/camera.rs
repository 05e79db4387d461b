use std::f32::consts::FRAC_PI_2;

use log::debug;

use crate::error::EngineError;
use crate::vector::Vector2;
use crate::world::GridMap;

/// Minimum distance kept between the player and any solid cell edge.
pub const WALL_CLEARANCE: f32 = 0.1;

/// Player pose. The camera plane is always derived from the direction and FOV.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Vector2,
    direction: Vector2, // unit length
    plane: Vector2,     // perp_cw(direction) * tan(fov / 2)
    fov: f32,           // horizontal, radians
}

impl Camera {
    pub fn new(position: Vector2, angle: f32, fov: f32) -> Self {
        let mut cam = Self {
            position,
            direction: Vector2::new(1.0, 0.0),
            plane: Vector2::ZERO,
            fov,
        };
        cam.rotate_to(angle);
        cam
    }

    /// Centre of the map's start cell, facing +y.
    pub fn at_start(map: &GridMap, fov: f32) -> Self {
        Self::new(map.player_start_position(), FRAC_PI_2, fov)
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    #[inline]
    pub fn camera_plane(&self) -> Vector2 {
        self.plane
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.direction.angle()
    }

    pub fn rotate(&mut self, delta: f32) {
        self.rotate_to(self.angle() + delta);
    }

    pub fn rotate_to(&mut self, angle: f32) {
        self.direction = Vector2::from_angle(angle);
        self.plane = Vector2::from_angle(angle - FRAC_PI_2) * (self.fov * 0.5).tan();
    }

    pub fn set_fov(&mut self, fov: f32) {
        debug!("fov {:.1} -> {:.1} deg", self.fov.to_degrees(), fov.to_degrees());
        self.fov = fov;
        self.rotate(0.0);
    }

    /// Un-normalised ray through a screen column: direction + t * plane, t in [-1, 1).
    /// Its projection on `direction` is 1, so distance along it is perpendicular distance.
    #[inline]
    pub fn ray_direction(&self, column: usize, pixwidth: usize) -> Vector2 {
        let t = (column as f32 / pixwidth as f32 - 0.5) * 2.0;
        self.direction + self.plane * t
    }

    /// Distance from the eye to the projection plane, in units where a wall is 1 high.
    /// Constant for a frame.
    pub fn screen_distance(&self, pixwidth: usize, pixheight: usize) -> f32 {
        0.5 / ((self.fov * 0.5).tan() * pixheight as f32 / pixwidth as f32)
    }

    /// Moves along the view direction. Returns whether the move happened.
    pub fn move_forward_or_back(&mut self, map: &GridMap, amount: f32) -> Result<bool, EngineError> {
        let step = self.direction.normalized()? * amount;
        Ok(self.try_move(map, self.position + step))
    }

    /// Strafes; positive `amount` moves to the right of the view direction.
    pub fn move_left_or_right(&mut self, map: &GridMap, amount: f32) -> Result<bool, EngineError> {
        let step = self.direction.normalized()?.perp_cw() * amount;
        Ok(self.try_move(map, self.position + step))
    }

    fn try_move(&mut self, map: &GridMap, dest: Vector2) -> bool {
        if map.is_solid_at(dest.x, dest.y) {
            debug!("move to ({:.2}, {:.2}) blocked", dest.x, dest.y);
            return false;
        }
        let Vector2 { mut x, mut y } = dest;
        // probes run in order; a later one may override an earlier snap
        if map.is_solid_at(x + WALL_CLEARANCE, y) {
            x = x.floor() + 1.0 - WALL_CLEARANCE;
        }
        if map.is_solid_at(x - WALL_CLEARANCE, y) {
            x = x.floor() + WALL_CLEARANCE;
        }
        if map.is_solid_at(x, y + WALL_CLEARANCE) {
            y = y.floor() + 1.0 - WALL_CLEARANCE;
        }
        if map.is_solid_at(x, y - WALL_CLEARANCE) {
            y = y.floor() + WALL_CLEARANCE;
        }
        self.position = Vector2::new(x, y);
        true
    }
}
