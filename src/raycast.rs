use std::f32::consts::{FRAC_PI_4, PI};

use crate::camera::Camera;
use crate::config::{IntersectionMethod, RenderConfig};
use crate::vector::Vector2;
use crate::world::{EMPTY, GridMap, WallId};

/// Cell edge struck by a ray. Top is +y, right is +x.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Result of casting one screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Wall id of the struck cell, `EMPTY` for a miss.
    pub wall: WallId,
    /// Distance along the view direction.
    pub distance: f32,
    pub texture_u: f32,
    pub edge: Edge,
}

impl RayHit {
    #[inline]
    pub fn is_miss(&self) -> bool {
        self.wall == EMPTY
    }
}

/// Where a ray crosses the boundary of a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeHit {
    pub edge: Edge,
    pub texture_u: f32,
    pub point: Vector2,
}

/// Marches the ray for `column` through the grid in fixed steps.
///
/// The step vector is `ray_direction * step_size`, and the ray direction has unit
/// projection on the view axis, so the accumulated distance is already the
/// perpendicular (fisheye-free) distance.
pub fn cast_ray(map: &GridMap, camera: &Camera, config: &RenderConfig, column: usize) -> RayHit {
    let step = config.step_size;
    let ray_step = camera.ray_direction(column, config.pixwidth) * step;
    let origin = camera.position();
    let mut ray = origin;
    let mut distance = 0.0;

    while distance <= config.black_distance {
        distance += step;
        ray += ray_step;
        let wall = map.wall_at(ray.x, ray.y);
        if wall != EMPTY {
            let hit = match config.intersection {
                IntersectionMethod::Exact => intersect_exact(origin, ray),
                IntersectionMethod::Fast => intersect_fast(ray),
            };
            return RayHit {
                wall,
                distance,
                texture_u: hit.texture_u,
                edge: hit.edge,
            };
        }
    }

    RayHit {
        wall: EMPTY,
        distance: config.black_distance,
        texture_u: 0.0,
        edge: Edge::Top,
    }
}

/// Exact boundary crossing of the ray from `camera` through `sample`, where `sample`
/// lies inside the struck cell.
pub fn intersect_exact(camera: Vector2, sample: Vector2) -> EdgeHit {
    let direction = sample - camera;
    let center = Vector2::new(sample.x.floor() + 0.5, sample.y.floor() + 0.5);
    let edge = classify_edge(camera, direction, center);
    edge_intersection(camera, direction, center, edge)
}

/// Picks the edge of the cell at `center` that a ray from `camera` along `direction`
/// enters through, by comparing the ray angle to the angle of the nearest corner.
pub fn classify_edge(camera: Vector2, direction: Vector2, center: Vector2) -> Edge {
    let below = camera.y < center.y;
    let corner_dy = if below { -0.5 } else { 0.5 };

    if camera.x < center.x {
        let corner = center + Vector2::new(-0.5, corner_dy) - camera;
        let under_corner = direction.angle() < corner.angle();
        match (below, under_corner) {
            (true, true) => Edge::Bottom,
            (true, false) => Edge::Left,
            (false, true) => Edge::Left,
            (false, false) => Edge::Top,
        }
    } else {
        // atan2 is not symmetric under reflection, so compare in the x-mirrored frame
        let corner = center + Vector2::new(0.5, corner_dy) - camera;
        let corner = Vector2::new(-corner.x, corner.y);
        let direction = Vector2::new(-direction.x, direction.y);
        let under_corner = direction.angle() < corner.angle();
        match (below, under_corner) {
            (true, true) => Edge::Bottom,
            (true, false) => Edge::Right,
            (false, true) => Edge::Right,
            (false, false) => Edge::Top,
        }
    }
}

/// Intercept of the ray with one edge of the cell at `center`. An axis-parallel ray
/// keeps the camera's coordinate instead of dividing by zero.
pub fn edge_intersection(camera: Vector2, direction: Vector2, center: Vector2, edge: Edge) -> EdgeHit {
    let x_at = |iy: f32| {
        if direction.y == 0.0 {
            camera.x
        } else {
            camera.x + (iy - camera.y) * direction.x / direction.y
        }
    };
    let y_at = |ix: f32| {
        if direction.x == 0.0 {
            camera.y
        } else {
            camera.y + (ix - camera.x) * direction.y / direction.x
        }
    };

    let (point, texture_u) = match edge {
        Edge::Top => {
            let iy = center.y + 0.5;
            let ix = x_at(iy);
            (Vector2::new(ix, iy), -ix)
        }
        Edge::Bottom => {
            let iy = center.y - 0.5;
            let ix = x_at(iy);
            (Vector2::new(ix, iy), ix)
        }
        Edge::Left => {
            let ix = center.x - 0.5;
            let iy = y_at(ix);
            (Vector2::new(ix, iy), -iy)
        }
        Edge::Right => {
            let ix = center.x + 0.5;
            let iy = y_at(ix);
            (Vector2::new(ix, iy), iy)
        }
    };
    EdgeHit {
        edge,
        texture_u,
        point,
    }
}

/// Approximate edge from the sample point's angle around the cell centre; the texture
/// coordinate comes from the sample point itself.
pub fn intersect_fast(sample: Vector2) -> EdgeHit {
    let center = Vector2::new(sample.x.floor() + 0.5, sample.y.floor() + 0.5);
    let angle = (sample - center).angle();
    let (edge, texture_u) = if (-FRAC_PI_4..FRAC_PI_4).contains(&angle) {
        (Edge::Right, sample.y)
    } else if (FRAC_PI_4..3.0 * FRAC_PI_4).contains(&angle) {
        (Edge::Top, -sample.x)
    } else if (-3.0 * FRAC_PI_4..-FRAC_PI_4).contains(&angle) {
        (Edge::Bottom, sample.x)
    } else {
        debug_assert!(angle.abs() <= PI);
        (Edge::Left, -sample.y)
    };
    EdgeHit {
        edge,
        texture_u,
        point: sample,
    }
}
