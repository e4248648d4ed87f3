use crate::config::GameConfig;
use crate::constants::SHIP_POINTS;
use crate::input::{InputFrame, Key};
use crate::rendering::Renderer;
use crate::shapes::{Outline, Shape};
use crate::types::{Color, Point};
use crate::weapons;
use rand::Rng;
use log::{debug, info};

/// What happened when the ship was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Damage {
    /// Invincible (or already down): nothing changed.
    Ignored,
    /// The shield soaked the hit and the ship went invincible.
    ShieldAbsorbed,
    /// The ship went down and will respawn at the spawn point.
    Destroyed,
}

// --- Ship ---
pub struct Ship {
    pub shape: Shape,
    pub rotation_rate: f64,
    pub acceleration_rate: f64,
    pub asteroids_destroyed: u32,
    pub upgrade_level: u32,
    pub shielded: bool,
    pub invincibility_timer: u32,
    pub respawn_timer: u32,
    spawn_point: Point,
    spawn_rotation: f64,
    base_color: Color,
    max_upgrade_level: u32,
    respawn_delay: u32,
    vulnerability_delay: u32,
}

impl Ship {
    pub fn new(config: &GameConfig) -> Self {
        let outline: Vec<Point> = SHIP_POINTS.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let spawn_point = config.screen_center();
        let spawn_rotation = config.ship_spawn_rotation();
        Ship {
            shape: Shape::polygon(&outline, spawn_point, spawn_rotation, config.ship_color),
            rotation_rate: config.ship_rotation_rate,
            acceleration_rate: config.ship_acceleration_rate,
            asteroids_destroyed: 0,
            upgrade_level: 0,
            shielded: false,
            invincibility_timer: 0,
            respawn_timer: 0,
            spawn_point,
            spawn_rotation,
            base_color: config.ship_color,
            max_upgrade_level: config.max_upgrade_level,
            respawn_delay: config.respawn_delay,
            vulnerability_delay: config.vulnerability_delay,
        }
    }

    pub fn is_active(&self) -> bool {
        self.shape.is_active()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0
    }

    pub fn spawn_point(&self) -> Point {
        self.spawn_point
    }

    pub fn update(&mut self, input: &InputFrame, rng: &mut impl Rng, width: f64, height: f64) {
        if !self.is_active() {
            self.respawn_timer = self.respawn_timer.saturating_sub(1);
            if self.respawn_timer == 0 {
                self.invincibility_timer = self.vulnerability_delay;
                self.shape.activate();
                info!("Ship respawned at ({}, {})", self.shape.position.x, self.shape.position.y);
            }
            return;
        }

        self.invincibility_timer = self.invincibility_timer.saturating_sub(1);

        if input.is_held(Key::RotateRight) {
            self.shape.rotate(self.rotation_rate);
        }
        if input.is_held(Key::RotateLeft) {
            self.shape.rotate(-self.rotation_rate);
        }
        if input.is_held(Key::Thrust) {
            self.shape.accelerate(self.acceleration_rate);
        }
        if input.is_held(Key::Reverse) {
            self.shape.accelerate(-self.acceleration_rate);
        }
        if self.shielded {
            self.shape.color = Color::rgb(rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255));
        }
        self.shape.move_wrapping(width, height);
    }

    pub fn take_damage(&mut self) -> Damage {
        if !self.is_active() || self.is_invincible() {
            return Damage::Ignored;
        }
        if self.shielded {
            self.shielded = false;
            self.shape.color = self.base_color;
            self.invincibility_timer = self.vulnerability_delay;
            info!("Shield absorbed a hit");
            return Damage::ShieldAbsorbed;
        }

        self.shape.deactivate();
        self.asteroids_destroyed = 0;
        self.upgrade_level = 0;
        self.shape.position = self.spawn_point;
        self.shape.set_rotation(self.spawn_rotation);
        self.shape.velocity = Point::ORIGIN;
        self.shape.color = self.base_color;
        self.respawn_timer = self.respawn_delay;
        info!("Ship destroyed, respawning in {} ticks", self.respawn_delay);
        Damage::Destroyed
    }

    /// Applies one upgrade level. Reaching the cap raises the shield, which
    /// stays up until a hit consumes it.
    pub fn upgrade(&mut self) {
        self.upgrade_level = (self.upgrade_level + 1).min(self.max_upgrade_level);
        if self.upgrade_level >= self.max_upgrade_level {
            self.shielded = true;
        }
        info!("Upgrade collected: level {}, shielded: {}", self.upgrade_level, self.shielded);
    }

    /// Spawns the volley for the current upgrade level.
    pub fn fire(&mut self, config: &GameConfig) -> Vec<Bullet> {
        let rotation = self.shape.rotation();
        let position = self.shape.position;
        let points = self.shape.points();
        let bullets: Vec<Bullet> = weapons::volley(self.upgrade_level)
            .into_iter()
            .map(|shot| {
                let origin = points.get(shot.vertex).copied().unwrap_or(position);
                Bullet::fire(origin, rotation + shot.angle_offset, config)
            })
            .collect();
        debug!("Fired {} bullets at level {}", bullets.len(), self.upgrade_level);
        bullets
    }

    /// Blinks while invincible: odd invincibility ticks are skipped.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        if self.invincibility_timer % 2 == 1 {
            return;
        }
        self.shape.draw(renderer);
    }
}

// --- Asteroid ---
pub struct Asteroid {
    pub shape: Shape,
    pub average_radius: f64,
    pub rotation_rate: f64,
}

impl Asteroid {
    /// A wave asteroid: random position anywhere on screen, random size.
    pub fn random(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let position = Point::new(
            rng.gen_range(0.0..config.screen_width),
            rng.gen_range(0.0..config.screen_height),
        );
        let radius = rng.gen_range(config.asteroid_min_radius..=config.asteroid_max_radius);
        Asteroid::new(position, radius, rng, config)
    }

    pub fn new(position: Point, average_radius: f64, rng: &mut impl Rng, config: &GameConfig) -> Self {
        let count = rng.gen_range(config.asteroid_min_points..=config.asteroid_max_points);
        let jitter = config.asteroid_radius_jitter;
        let outline: Vec<Point> = (0..count)
            .map(|i| {
                let radius = average_radius * rng.gen_range((1.0 - jitter)..=(1.0 + jitter));
                Point::from_heading(i as f64 * 360.0 / count as f64).scale(radius)
            })
            .collect();

        let rotation = rng.gen_range(0.0..360.0);
        let mut rotation_rate =
            rng.gen_range(config.asteroid_min_rotation_speed..=config.asteroid_max_rotation_speed);
        if rng.gen_bool(0.5) {
            rotation_rate = -rotation_rate;
        }
        let color = deviate_color(config.asteroid_color, config.asteroid_color_deviation, rng);

        let mut shape = Shape::polygon(&outline, position, rotation, color);
        shape.accelerate(rng.gen_range(config.asteroid_min_speed..=config.asteroid_max_speed));

        Asteroid { shape, average_radius, rotation_rate }
    }

    pub fn point_count(&self) -> usize {
        match self.shape.outline() {
            Outline::Polygon(points) => points.len(),
            Outline::Circle { samples, .. } => *samples,
        }
    }

    pub fn update(&mut self, width: f64, height: f64) {
        if !self.shape.is_active() {
            return;
        }
        self.shape.rotate(self.rotation_rate);
        self.shape.move_wrapping(width, height);
    }

    /// Two half-size children at this asteroid's position, or `None` when half
    /// the radius would drop below the configured minimum.
    pub fn split(&self, rng: &mut impl Rng, config: &GameConfig) -> Option<[Asteroid; 2]> {
        let half = self.average_radius / 2.0;
        if half < config.asteroid_min_radius {
            return None;
        }
        let position = self.shape.position;
        Some([
            Asteroid::new(position, half, rng, config),
            Asteroid::new(position, half, rng, config),
        ])
    }
}

/// Nudges one random channel by `deviation`, flipping direction if that would
/// leave the 0..=255 range.
fn deviate_color(base: Color, deviation: u8, rng: &mut impl Rng) -> Color {
    let mut channels = [base.r as i16, base.g as i16, base.b as i16];
    let index = rng.gen_range(0..3);
    let deviation = deviation as i16;
    let mut value = if rng.gen_bool(0.5) {
        channels[index] + deviation
    } else {
        channels[index] - deviation
    };
    if value > 255 {
        value -= 2 * deviation;
    } else if value < 0 {
        value += 2 * deviation;
    }
    channels[index] = value.clamp(0, 255);
    Color::rgb(channels[0] as u8, channels[1] as u8, channels[2] as u8)
}

// --- Bullet ---
pub struct Bullet {
    pub shape: Shape,
}

impl Bullet {
    pub fn fire(position: Point, heading: f64, config: &GameConfig) -> Self {
        let mut shape = Shape::circle(config.bullet_radius, config.circle_point_count, position, config.bullet_color);
        shape.set_rotation(heading);
        shape.accelerate(config.bullet_speed);
        Bullet { shape }
    }

    pub fn update(&mut self, width: f64, height: f64) {
        if self.shape.is_active() {
            self.shape.move_bounded(width, height);
        }
    }
}

// --- Star ---
pub struct Star {
    pub shape: Shape,
    brightness: i32,
    twinkle_rate: i32,
}

impl Star {
    pub fn random(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let position = Point::new(
            rng.gen_range(0.0..config.screen_width),
            rng.gen_range(0.0..config.screen_height),
        );
        let brightness = rng.gen_range(0..=255);
        Star {
            shape: Shape::circle(config.star_radius, config.circle_point_count, position, Color::gray(brightness)),
            brightness: brightness as i32,
            twinkle_rate: config.star_twinkle_speed,
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness as u8
    }

    pub fn twinkle(&mut self) {
        let next = self.brightness + self.twinkle_rate;
        if !(0..=255).contains(&next) {
            self.twinkle_rate = -self.twinkle_rate;
        }
        self.brightness = (self.brightness + self.twinkle_rate).clamp(0, 255);
        self.shape.color = Color::gray(self.brightness as u8);
    }
}
