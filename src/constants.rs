// --- Default tuning values. GameConfig::default() mirrors these. ---
use crate::types::Color;

pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const FRAMES_PER_SECOND: u32 = 30;
pub const BACKGROUND_COLOR: Color = Color::BLACK;
pub const BACKGROUND_MUSIC: &str = "asteroid_field.mp3";

// Ship silhouette in its own pixel space; recentered on construction.
pub const SHIP_POINTS: [(f64, f64); 12] = [
    (30.0, 15.0), // nose
    (10.0, 20.0),
    (15.0, 25.0),
    (10.0, 30.0),
    (0.0, 25.0),
    (10.0, 20.0),
    (0.0, 15.0),
    (10.0, 10.0),
    (0.0, 5.0),
    (10.0, 0.0),
    (15.0, 5.0),
    (10.0, 10.0),
];
pub const SHIP_INITIAL_ROTATION: f64 = -90.0; // Facing up
pub const SHIP_ACCELERATION_RATE: f64 = 0.5;
pub const SHIP_ROTATION_RATE: f64 = 10.0; // Degrees per tick
pub const SHIP_COLOR: Color = Color::rgb(140, 140, 255);

pub const ASTEROID_DENSITY: f64 = 16.0 / (800.0 * 600.0); // 16 per 800x600 screen
pub const ASTEROID_MIN_POINTS: usize = 6;
pub const ASTEROID_MAX_POINTS: usize = 12;
pub const ASTEROID_MIN_RADIUS: f64 = 10.0;
pub const ASTEROID_MAX_RADIUS: f64 = 40.0;
pub const ASTEROID_RADIUS_JITTER: f64 = 0.25;
pub const ASTEROID_COLOR: Color = Color::rgb(139, 69, 19);
pub const ASTEROID_COLOR_DEVIATION: u8 = 20;
pub const ASTEROID_MIN_SPEED: f64 = 1.0;
pub const ASTEROID_MAX_SPEED: f64 = 4.0;
pub const ASTEROID_MIN_ROTATION_SPEED: f64 = 1.0;
pub const ASTEROID_MAX_ROTATION_SPEED: f64 = 6.0;

pub const BULLET_RADIUS: f64 = 3.0;
pub const BULLET_COLOR: Color = Color::rgb(255, 255, 0);
pub const BULLET_SPEED: f64 = 30.0;

pub const UPGRADE_RADIUS: f64 = 6.0;
pub const UPGRADE_REQUIREMENT: u32 = 5; // Asteroids destroyed per upgrade
pub const MAX_UPGRADE_LEVEL: u32 = 7;

pub const STAR_DENSITY: f64 = 201.0 / (800.0 * 600.0);
pub const STAR_RADIUS: f64 = 2.0;
pub const STAR_TWINKLE_SPEED: i32 = 20;

pub const RESPAWN_DELAY: u32 = 50; // Ticks
pub const VULNERABILITY_DELAY: u32 = 50; // Ticks

pub const CIRCLE_POINT_COUNT: usize = 8; // Sample points for circle collisions
