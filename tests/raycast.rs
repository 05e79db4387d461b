mod common;

use std::f32::consts::FRAC_PI_2;

use gridcaster::raycast::intersect_exact;
use gridcaster::{GridMap, IntersectionMethod, Raycaster, RenderConfig, Vector2};

use common::{corridor, engine, flat_textures};

#[test]
fn facing_a_wall_one_unit_away() {
    let mut rc = engine(&["111", "1s1", "111"]);
    rc.place_player(Vector2::new(1.5, 1.0), FRAC_PI_2).unwrap();
    let step = rc.config().step_size;
    let hit = rc.cast_column(rc.config().pixwidth / 2);
    assert_eq!(hit.wall, 1);
    assert!((hit.distance - 1.0).abs() <= step + 1e-3, "distance {}", hit.distance);
}

#[test]
fn centered_in_a_closed_cell() {
    let rc = engine(&["111", "1s1", "111"]);
    let step = rc.config().step_size;
    for column in [0, 80, 160, 240, 319] {
        let hit = rc.cast_column(column);
        assert_eq!(hit.wall, 1, "column {column}");
        assert!(hit.distance <= 1.0, "column {column}: {}", hit.distance);
    }
    let hit = rc.cast_column(160);
    assert!((hit.distance - 0.5).abs() <= step + 1e-3);
}

#[test]
fn long_corridor_is_a_miss() {
    let rows = corridor(12, &[]);
    let rc = engine(&rows);
    let hit = rc.cast_column(160);
    assert!(hit.is_miss());
    assert_eq!(hit.distance, rc.config().black_distance);
}

#[test]
fn distances_stay_within_cutoff() {
    let mut rc = Raycaster::new(
        RenderConfig::new(64, 40),
        GridMap::demo().unwrap(),
        flat_textures(),
    )
    .unwrap();
    let cfg = rc.config().clone();
    for turn in 0..16 {
        rc.rotate_player_to(turn as f32 * 0.4);
        for column in 0..cfg.pixwidth {
            let hit = rc.cast_column(column);
            assert!(hit.distance >= 0.0);
            assert!(hit.distance <= cfg.black_distance + cfg.step_size + 1e-3);
            if hit.is_miss() {
                assert_eq!(hit.distance, cfg.black_distance);
            }
        }
    }
}

#[test]
fn off_map_is_solid_to_rays() {
    // no border: the grid edge itself stops the ray
    let rc = engine(&["...", ".s.", "..."]);
    let hit = rc.cast_column(160);
    assert_eq!(hit.wall, gridcaster::world::OUT_OF_BOUNDS);
    assert!((hit.distance - 1.5).abs() <= rc.config().step_size + 1e-3);
}

#[test]
fn fast_and_exact_agree_away_from_corners() {
    let map = GridMap::parse(&["11111", "1...1", "1.s.1", "1...1", "11111"]).unwrap();
    let mut fast_cfg = RenderConfig::new(320, 200);
    fast_cfg.intersection = IntersectionMethod::Fast;
    let exact = Raycaster::new(RenderConfig::new(320, 200), map.clone(), flat_textures()).unwrap();
    let fast = Raycaster::new(fast_cfg, map, flat_textures()).unwrap();

    let a = exact.cast_column(160);
    let b = fast.cast_column(160);
    assert_eq!(a.wall, b.wall);
    assert_eq!(a.edge, b.edge);
    assert_eq!(a.distance, b.distance);
    assert!((a.texture_u - b.texture_u).abs() < 0.05);
}

#[test]
fn exact_hit_point_lies_on_an_edge() {
    let camera = Vector2::new(2.3, 1.7);
    for i in 0..50 {
        let sample = Vector2::new(4.0 + (i % 10) as f32 * 0.099, 3.0 + (i / 10) as f32 * 0.19);
        let hit = intersect_exact(camera, sample);
        let p = hit.point;
        assert!(p.x == 4.0 || p.x == 5.0 || p.y == 3.0 || p.y == 4.0, "{sample:?} -> {p:?}");
    }
}
