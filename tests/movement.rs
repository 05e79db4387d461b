mod common;

use std::f32::consts::{FRAC_PI_2, PI};

use gridcaster::{EngineError, Vector2};

use common::{corridor, engine};

#[test]
fn walking_forward_and_back() {
    let rows = corridor(6, &[]);
    let mut rc = engine(&rows);
    let start = rc.camera().position();

    assert!(rc.move_player_forward_or_back(1.0).unwrap());
    let p = rc.camera().position();
    assert!((p.x - start.x).abs() < 1e-4);
    assert!((p.y - (start.y + 1.0)).abs() < 1e-4);

    assert!(rc.move_player_forward_or_back(-1.0).unwrap());
    assert!((rc.camera().position().y - start.y).abs() < 1e-4);
}

#[test]
fn walls_block_movement() {
    let mut rc = engine(&["111", "1s1", "111"]);
    let before = rc.camera().position();
    assert!(!rc.move_player_forward_or_back(1.0).unwrap());
    assert_eq!(rc.camera().position(), before);
}

#[test]
fn player_keeps_clear_of_walls() {
    let rows = corridor(2, &[]);
    let mut rc = engine(&rows);
    for _ in 0..40 {
        rc.move_player_forward_or_back(0.05).unwrap();
    }
    let p = rc.camera().position();
    let wall_y = rc.map().height() as f32 - 1.0;
    assert!(p.y <= wall_y - 0.1 + 1e-4, "y = {}", p.y);
    assert!(!rc.map().is_solid_at(p.x, p.y));
}

#[test]
fn strafing_is_perpendicular_to_view() {
    let mut rc = engine(&["11111", "1...1", "1.s.1", "1...1", "11111"]);
    let start = rc.camera().position();
    // facing +y, so right is +x
    assert!(rc.move_player_left_or_right(0.3).unwrap());
    let p = rc.camera().position();
    assert!((p.x - (start.x + 0.3)).abs() < 1e-4);
    assert!((p.y - start.y).abs() < 1e-4);
}

#[test]
fn rotation_turns_the_view() {
    let mut rc = engine(&["111", "1s1", "111"]);
    rc.rotate_player(FRAC_PI_2);
    let d = rc.camera().direction();
    assert!((d.x + 1.0).abs() < 1e-5 && d.y.abs() < 1e-5);
    rc.rotate_player_to(PI);
    assert!((rc.camera().angle().abs() - PI).abs() < 1e-5);
}

#[test]
fn fov_changes_are_validated() {
    let mut rc = engine(&["111", "1s1", "111"]);
    assert!(rc.set_fov(1.0).is_ok());
    assert!((rc.camera().fov() - 1.0).abs() < 1e-6);
    assert!(matches!(rc.set_fov(0.0), Err(EngineError::InvalidConfig(_))));
    assert!(matches!(rc.set_fov(PI), Err(EngineError::InvalidConfig(_))));
}

#[test]
fn cannot_place_player_inside_a_wall() {
    let mut rc = engine(&["111", "1s1", "111"]);
    let err = rc.place_player(Vector2::new(0.5, 0.5), 0.0);
    assert!(matches!(err, Err(EngineError::MapFormat(_))));
}
