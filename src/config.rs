//! Game tuning, built once at startup and handed to the [`crate::world::World`].
//!
//! Every field defaults to the matching value in [`crate::constants`]. A TOML file
//! can override any subset of them:
//!
//! ```toml
//! screen_width = 1024.0
//! asteroid_max_radius = 60.0
//! ship_color = [255, 200, 0]
//! ```
//!
//! [`GameConfig::validate`] runs on every load path, so a `GameConfig` that came out
//! of [`GameConfig::load`] or [`GameConfig::from_toml_str`] is safe to simulate.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::constants::*;
use crate::error::{ConfigError, ConfigResult};
use crate::types::{Color, Point, normalize_degrees};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    // ── Screen ────────────────────────────────────────────────────────────
    pub screen_width: f64,
    pub screen_height: f64,
    pub frames_per_second: u32,
    pub background_color: Color,
    pub background_music: String,

    // ── Ship ──────────────────────────────────────────────────────────────
    pub ship_rotation_rate: f64,
    pub ship_acceleration_rate: f64,
    pub ship_initial_rotation: f64,
    pub ship_color: Color,

    // ── Asteroids ─────────────────────────────────────────────────────────
    /// Asteroids per square pixel in a fresh wave.
    pub asteroid_density: f64,
    pub asteroid_min_points: usize,
    pub asteroid_max_points: usize,
    pub asteroid_min_radius: f64,
    pub asteroid_max_radius: f64,
    /// Fraction each vertex radius may stray from the average radius.
    pub asteroid_radius_jitter: f64,
    pub asteroid_color: Color,
    pub asteroid_color_deviation: u8,
    pub asteroid_min_speed: f64,
    pub asteroid_max_speed: f64,
    pub asteroid_min_rotation_speed: f64,
    pub asteroid_max_rotation_speed: f64,

    // ── Bullets ───────────────────────────────────────────────────────────
    pub bullet_radius: f64,
    pub bullet_color: Color,
    pub bullet_speed: f64,

    // ── Upgrades ──────────────────────────────────────────────────────────
    pub upgrade_radius: f64,
    pub upgrade_requirement: u32,
    pub max_upgrade_level: u32,

    // ── Stars ─────────────────────────────────────────────────────────────
    pub star_density: f64,
    pub star_radius: f64,
    pub star_twinkle_speed: i32,

    // ── Timers (ticks) ────────────────────────────────────────────────────
    pub respawn_delay: u32,
    pub vulnerability_delay: u32,

    pub circle_point_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            frames_per_second: FRAMES_PER_SECOND,
            background_color: BACKGROUND_COLOR,
            background_music: BACKGROUND_MUSIC.to_string(),

            ship_rotation_rate: SHIP_ROTATION_RATE,
            ship_acceleration_rate: SHIP_ACCELERATION_RATE,
            ship_initial_rotation: SHIP_INITIAL_ROTATION,
            ship_color: SHIP_COLOR,

            asteroid_density: ASTEROID_DENSITY,
            asteroid_min_points: ASTEROID_MIN_POINTS,
            asteroid_max_points: ASTEROID_MAX_POINTS,
            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_max_radius: ASTEROID_MAX_RADIUS,
            asteroid_radius_jitter: ASTEROID_RADIUS_JITTER,
            asteroid_color: ASTEROID_COLOR,
            asteroid_color_deviation: ASTEROID_COLOR_DEVIATION,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_min_rotation_speed: ASTEROID_MIN_ROTATION_SPEED,
            asteroid_max_rotation_speed: ASTEROID_MAX_ROTATION_SPEED,

            bullet_radius: BULLET_RADIUS,
            bullet_color: BULLET_COLOR,
            bullet_speed: BULLET_SPEED,

            upgrade_radius: UPGRADE_RADIUS,
            upgrade_requirement: UPGRADE_REQUIREMENT,
            max_upgrade_level: MAX_UPGRADE_LEVEL,

            star_density: STAR_DENSITY,
            star_radius: STAR_RADIUS,
            star_twinkle_speed: STAR_TWINKLE_SPEED,

            respawn_delay: RESPAWN_DELAY,
            vulnerability_delay: VULNERABILITY_DELAY,

            circle_point_count: CIRCLE_POINT_COUNT,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigResult<()> {
            Err(ConfigError::Invalid { field, reason: reason.into() })
        }

        if !(self.screen_width > 0.0) {
            return invalid("screen_width", format!("must be positive, got {}", self.screen_width));
        }
        if !(self.screen_height > 0.0) {
            return invalid("screen_height", format!("must be positive, got {}", self.screen_height));
        }
        if self.frames_per_second == 0 {
            return invalid("frames_per_second", "must be at least 1");
        }
        if self.asteroid_min_points < 3 {
            return invalid("asteroid_min_points", "a polygon needs at least 3 points");
        }
        if self.asteroid_min_points > self.asteroid_max_points {
            return invalid(
                "asteroid_min_points",
                format!("{} exceeds asteroid_max_points {}", self.asteroid_min_points, self.asteroid_max_points),
            );
        }
        if !(self.asteroid_min_radius > 0.0) {
            return invalid("asteroid_min_radius", "must be positive");
        }
        if self.asteroid_min_radius > self.asteroid_max_radius {
            return invalid(
                "asteroid_min_radius",
                format!("{} exceeds asteroid_max_radius {}", self.asteroid_min_radius, self.asteroid_max_radius),
            );
        }
        if !(0.0..1.0).contains(&self.asteroid_radius_jitter) {
            return invalid("asteroid_radius_jitter", "must be in [0, 1)");
        }
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return invalid("asteroid_min_speed", "exceeds asteroid_max_speed");
        }
        if self.asteroid_min_rotation_speed > self.asteroid_max_rotation_speed {
            return invalid("asteroid_min_rotation_speed", "exceeds asteroid_max_rotation_speed");
        }
        if !(self.bullet_radius > 0.0) {
            return invalid("bullet_radius", "must be positive");
        }
        if !(self.bullet_speed > 0.0) {
            return invalid("bullet_speed", "must be positive");
        }
        if self.upgrade_requirement == 0 {
            return invalid("upgrade_requirement", "must be at least 1");
        }
        if !(self.asteroid_density >= 0.0) {
            return invalid("asteroid_density", "must not be negative");
        }
        if !(self.star_density >= 0.0) {
            return invalid("star_density", "must not be negative");
        }
        if self.circle_point_count == 0 {
            return invalid("circle_point_count", "must be at least 1");
        }
        Ok(())
    }

    pub fn screen_center(&self) -> Point {
        Point::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    pub fn screen_area(&self) -> f64 {
        self.screen_width * self.screen_height
    }

    /// Asteroids in a fresh wave. Never zero, or a cleared screen would respawn forever.
    pub fn wave_size(&self) -> usize {
        ((self.screen_area() * self.asteroid_density).round() as usize).max(1)
    }

    pub fn star_count(&self) -> usize {
        (self.screen_area() * self.star_density).round() as usize
    }

    pub fn ship_spawn_rotation(&self) -> f64 {
        normalize_degrees(self.ship_initial_rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.wave_size(), 16);
        assert_eq!(config.star_count(), 201);
        assert_eq!(config.ship_spawn_rotation(), 270.0);
    }

    #[test]
    fn toml_overrides_subset() {
        let config = GameConfig::from_toml_str(
            r#"
            screen_width = 1600.0
            asteroid_max_radius = 60.0
            ship_color = [255, 200, 0]
            "#,
        )
        .unwrap();
        assert_eq!(config.screen_width, 1600.0);
        assert_eq!(config.asteroid_max_radius, 60.0);
        assert_eq!(config.ship_color, Color::rgb(255, 200, 0));
        assert_eq!(config.screen_height, SCREEN_HEIGHT);
        assert_eq!(config.wave_size(), 32);
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let err = GameConfig::from_toml_str("asteroid_min_radius = 50.0").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "asteroid_min_radius"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            GameConfig::from_toml_str("warp_drive = true"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GameConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn rejects_bad_ranges_and_zero_requirements() {
        let cases = [
            ("asteroid_min_speed = 9.0", "asteroid_min_speed"),
            ("asteroid_min_rotation_speed = 7.0", "asteroid_min_rotation_speed"),
            ("bullet_speed = 0.0", "bullet_speed"),
            ("upgrade_requirement = 0", "upgrade_requirement"),
            ("asteroid_min_points = 2", "asteroid_min_points"),
            ("circle_point_count = 0", "circle_point_count"),
            ("star_density = -1.0", "star_density"),
            ("asteroid_density = -0.5", "asteroid_density"),
        ];
        for (toml, expected) in cases {
            match GameConfig::from_toml_str(toml) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{toml}"),
                other => panic!("{toml}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn wave_is_never_empty() {
        let config = GameConfig { asteroid_density: 0.0, ..GameConfig::default() };
        assert_eq!(config.wave_size(), 1);
    }
}
