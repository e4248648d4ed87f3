mod common;

use approx::assert_abs_diff_eq;
use common::calm_world;
use rock_splitter::config::GameConfig;
use rock_splitter::input::{InputFrame, Key};
use rock_splitter::types::Point;

fn fire() -> InputFrame {
    InputFrame::new().press(Key::Fire)
}

#[test]
fn level_three_fires_five_bullets() {
    let mut world = calm_world(GameConfig::default(), 1);
    world.ship.upgrade_level = 3;
    world.tick(&fire());

    let headings: Vec<f64> = world.bullets.iter().map(|b| b.shape.rotation()).collect();
    assert_eq!(headings, vec![270.0, 270.0, 270.0, 315.0, 225.0]);
}

#[test]
fn nose_shot_leaves_from_the_nose_at_bullet_speed() {
    let mut world = calm_world(GameConfig::default(), 2);
    let nose = world.ship.shape.points()[0];
    world.tick(&fire());

    assert_eq!(world.bullets.len(), 1);
    let bullet = &world.bullets[0];
    assert_abs_diff_eq!(bullet.shape.position.x, nose.x, epsilon = 1e-9);
    assert_abs_diff_eq!(bullet.shape.position.y, nose.y - world.config().bullet_speed, epsilon = 1e-9);
}

#[test]
fn bullets_are_dropped_once_off_screen() {
    let mut world = calm_world(GameConfig::default(), 3);
    world.tick(&fire());
    for _ in 0..10 {
        world.tick(&InputFrame::new());
    }
    assert!(world.bullets.is_empty());
}

#[test]
fn holding_fire_shoots_once_per_press() {
    let mut world = calm_world(GameConfig::default(), 4);
    world.tick(&fire());
    world.tick(&InputFrame::new().hold(Key::Fire));
    world.tick(&InputFrame::new().hold(Key::Fire));
    assert_eq!(world.bullets.len(), 1);

    world.tick(&InputFrame::new());
    world.tick(&fire());
    assert_eq!(world.bullets.len(), 2);
}

#[test]
fn full_volley_tops_out_at_ten() {
    let mut world = calm_world(GameConfig::default(), 5);
    for _ in 0..20 {
        world.ship.upgrade();
    }
    assert_eq!(world.ship.upgrade_level, world.config().max_upgrade_level);
    world.tick(&fire());
    assert_eq!(world.bullets.len(), 10);

    let tail_shot = world.bullets.iter().find(|b| b.shape.rotation() == 90.0);
    assert!(tail_shot.is_some(), "a shot should leave straight backwards");
    assert!(world.bullets.iter().all(|b| b.shape.velocity != Point::ORIGIN));
}
