mod common;

use std::f32::consts::FRAC_PI_2;

use gridcaster::{Color, EngineError, GridMap, Raycaster, RenderConfig, Vector2};

use common::{FLOOR, WALL, corridor, engine, flat_textures, is_sprite_pixel};

#[test]
fn wall_fills_the_middle_of_the_screen() {
    let mut rc = engine(&["111", "1s1", "111"]);
    rc.tick(0.0);
    let fb = rc.framebuffer();
    let mid = fb.pixel(160, 100);
    assert_eq!(mid.r, 0);
    assert_eq!(mid.b, 0);
    assert!(mid.g > 0 && mid.g <= WALL.g);
    assert!((fb.depth_at(160, 100) - 0.5).abs() <= rc.config().step_size + 1e-3);
}

#[test]
fn floor_and_ceiling_surround_a_distant_wall() {
    let rows = corridor(3, &[]);
    let mut rc = engine(&rows);
    rc.tick(0.0);
    let fb = rc.framebuffer();
    let ceiling = rc.ceiling_sizes()[160];
    assert!(ceiling > 0);

    let top = fb.pixel(160, 0);
    let bottom = fb.pixel(160, fb.height() - 1);
    for c in [top, bottom] {
        assert_eq!((c.r, c.g), (0, 0));
        assert!(c.b > 0 && c.b <= FLOOR.b);
    }
    // row 0 and the last row share one ray, so they match
    assert_eq!(top, bottom);
    assert!(fb.depth_at(160, 0) < fb.depth_at(160, 100));
}

#[test]
fn miss_columns_stay_black_at_the_horizon() {
    let rows = corridor(12, &[]);
    let mut rc = engine(&rows);
    rc.tick(0.0);
    let fb = rc.framebuffer();
    assert_eq!(fb.pixel(160, 100), Color::BLACK);
    assert_eq!(fb.depth_at(160, 100), f32::INFINITY);
}

#[test]
fn depth_is_reset_every_tick() {
    let rows = corridor(12, &[]);
    let mut rc = engine(&rows);

    // far end, facing the closing wall
    let end_y = rc.map().height() as f32 - 2.0;
    rc.place_player(Vector2::new(1.5, end_y), FRAC_PI_2).unwrap();
    rc.tick(0.0);
    assert!(rc.framebuffer().depth_at(160, 100) < 1.5);

    let start = rc.map().player_start_position();
    rc.place_player(start, FRAC_PI_2).unwrap();
    rc.tick(16.0);
    assert_eq!(rc.framebuffer().depth_at(160, 100), f32::INFINITY);
    assert_eq!(rc.framebuffer().pixel(160, 100), Color::BLACK);
}

#[test]
fn sprite_ahead_is_centered() {
    let rows = corridor(12, &["1g1", "1.1"]);
    let mut rc = engine(&rows);
    rc.tick(0.0);
    let fb = rc.framebuffer();

    let columns: Vec<usize> = (0..fb.width())
        .filter(|&x| (0..fb.height()).any(|y| is_sprite_pixel(fb.pixel(x, y))))
        .collect();
    assert!(columns.len() > 10, "sprite columns: {}", columns.len());

    let (min, max) = (columns[0], columns[columns.len() - 1]);
    assert_eq!(max - min + 1, columns.len(), "footprint is contiguous");
    let center = (min + max + 1) as f32 / 2.0;
    assert!((center - 160.0).abs() <= 1.0, "center {center}");

    // sprite sits 2 units ahead: depth equals its perpendicular distance
    let y = (0..fb.height()).find(|&y| is_sprite_pixel(fb.pixel(160, y))).unwrap();
    assert!((fb.depth_at(160, y) - 2.0).abs() < 1e-3);
}

#[test]
fn sprite_behind_a_wall_is_hidden() {
    let rows = corridor(12, &["1g1", "111", "1.1"]);
    let mut rc = engine(&rows);
    rc.tick(0.0);
    let fb = rc.framebuffer();
    let any = (0..fb.width()).any(|x| (0..fb.height()).any(|y| is_sprite_pixel(fb.pixel(x, y))));
    assert!(!any);
}

#[test]
fn sprite_out_of_view_is_culled() {
    let rows = corridor(12, &["1g1", "1.1"]);
    let mut rc = engine(&rows);
    rc.rotate_player_to(-FRAC_PI_2);
    rc.tick(0.0);
    let fb = rc.framebuffer();
    let any = (0..fb.width()).any(|x| (0..fb.height()).any(|y| is_sprite_pixel(fb.pixel(x, y))));
    assert!(!any);
}

#[test]
fn frame_counter_and_walltime() {
    let mut rc = engine(&["111", "1s1", "111"]);
    assert_eq!(rc.frame_count(), 0);
    rc.tick(10.0);
    rc.tick(26.5);
    assert_eq!(rc.frame_count(), 2);
    assert_eq!(rc.last_walltime_ms(), 26.5);
}

#[test]
fn unknown_wall_id_is_rejected() {
    let map = GridMap::parse(&["131", "1s1", "111"]).unwrap();
    let err = Raycaster::new(RenderConfig::new(64, 40), map, flat_textures()).err();
    assert!(matches!(err, Some(EngineError::UnknownWallId(3))));
}

#[test]
fn invalid_config_is_rejected() {
    let map = GridMap::parse(&["111", "1s1", "111"]).unwrap();
    let mut cfg = RenderConfig::new(64, 40);
    cfg.step_size = 0.0;
    let err = Raycaster::new(cfg, map, flat_textures()).err();
    assert!(matches!(err, Some(EngineError::InvalidConfig(_))));
}

#[test]
fn demo_map_renders_with_procedural_textures() {
    let textures = gridcaster::assets::procedural_texture_set().unwrap();
    let mut rc = Raycaster::new(RenderConfig::default(), GridMap::demo().unwrap(), textures).unwrap();
    assert_eq!(rc.map().sprite_count(), 9);
    for i in 0..8 {
        rc.rotate_player(0.8);
        rc.move_player_forward_or_back(0.3).unwrap();
        rc.tick(i as f64 * 16.0);
    }
    let fb = rc.framebuffer();
    assert_eq!(fb.pixels().len(), fb.width() * fb.height());
    assert!(fb.pixels().iter().any(|&p| p != 0));
    assert!(fb.depth().iter().all(|&d| d >= 0.0));
}
