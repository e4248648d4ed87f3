//! The simulation: every entity collection, advanced one tick at a time.
//!
//! Each tick runs ship → bullets → upgrades → asteroids → stars. Entities that
//! die during a tick are only marked inactive while the collections are being
//! scanned; they are compacted out once the scan that killed them is over, and
//! asteroids spawned by splits are appended after that.

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::config::GameConfig;
use crate::entities::{Asteroid, Bullet, Damage, Ship, Star};
use crate::input::{InputFrame, Key};
use crate::rendering::Renderer;
use crate::upgrades::Upgrade;

pub struct World {
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub upgrades: Vec<Upgrade>,
    pub asteroids: Vec<Asteroid>,
    pub stars: Vec<Star>,
    config: GameConfig,
    rng: StdRng,
    asteroid_respawn_timer: u32,
    waves_spawned: u32,
    total_destroyed: u64,
    ticks: u64,
}

impl World {
    /// `config` must already have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Same as [`World::new`] but fully reproducible.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let ship = Ship::new(&config);
        let stars = (0..config.star_count()).map(|_| Star::random(&mut rng, &config)).collect();
        let mut world = World {
            ship,
            bullets: Vec::new(),
            upgrades: Vec::new(),
            asteroids: Vec::new(),
            stars,
            config,
            rng,
            asteroid_respawn_timer: 0,
            waves_spawned: 0,
            total_destroyed: 0,
            ticks: 0,
        };
        world.spawn_wave();
        world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn live_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| a.shape.is_active()).count()
    }

    pub fn asteroid_respawn_timer(&self) -> u32 {
        self.asteroid_respawn_timer
    }

    pub fn waves_spawned(&self) -> u32 {
        self.waves_spawned
    }

    pub fn total_destroyed(&self) -> u64 {
        self.total_destroyed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Replaces the asteroid field with a fresh wave.
    pub fn spawn_wave(&mut self) {
        let count = self.config.wave_size();
        self.asteroids = (0..count).map(|_| Asteroid::random(&mut self.rng, &self.config)).collect();
        self.waves_spawned += 1;
        info!("Wave {} spawned with {} asteroids", self.waves_spawned, count);
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self, input: &InputFrame) {
        let (width, height) = (self.config.screen_width, self.config.screen_height);
        self.ticks += 1;

        self.ship.update(input, &mut self.rng, width, height);
        if input.was_pressed(Key::Fire) && self.ship.is_active() {
            let volley = self.ship.fire(&self.config);
            self.bullets.extend(volley);
        }

        for bullet in &mut self.bullets {
            bullet.update(width, height);
        }
        self.bullets.retain(|b| b.shape.is_active());

        self.advance_upgrades();
        self.advance_asteroids();

        for star in &mut self.stars {
            star.twinkle();
        }
    }

    fn advance_upgrades(&mut self) {
        for upgrade in &mut self.upgrades {
            upgrade.update(&mut self.rng);
            if self.ship.is_active() && self.ship.shape.intersects(&mut upgrade.shape) {
                self.ship.upgrade();
                upgrade.collect();
            }
        }
        self.upgrades.retain(Upgrade::is_active);
    }

    fn advance_asteroids(&mut self) {
        if self.live_asteroids() == 0 {
            self.asteroid_respawn_timer = self.asteroid_respawn_timer.saturating_sub(1);
            if self.asteroid_respawn_timer == 0 {
                self.spawn_wave();
                // Grace period so the new wave can't land on the ship.
                self.ship.invincibility_timer = self.config.vulnerability_delay;
            }
            return;
        }

        let (width, height) = (self.config.screen_width, self.config.screen_height);
        let mut spawned: Vec<Asteroid> = Vec::new();
        let mut destroyed = 0;

        for asteroid in &mut self.asteroids {
            if !asteroid.shape.is_active() {
                continue;
            }
            asteroid.update(width, height);

            let hit_by_bullet = self
                .bullets
                .iter_mut()
                .filter(|b| b.shape.is_active())
                .find_map(|b| b.shape.intersects(&mut asteroid.shape).then_some(b));
            if let Some(bullet) = hit_by_bullet {
                bullet.shape.deactivate();
                destroy(asteroid, Some(&mut self.ship), &mut self.upgrades, &mut spawned, &mut self.rng, &self.config);
                destroyed += 1;
                continue;
            }

            if self.ship.is_active() && self.ship.shape.intersects(&mut asteroid.shape) {
                let credit = match self.ship.take_damage() {
                    Damage::Ignored => continue,
                    Damage::ShieldAbsorbed => Some(&mut self.ship),
                    Damage::Destroyed => None,
                };
                destroy(asteroid, credit, &mut self.upgrades, &mut spawned, &mut self.rng, &self.config);
                destroyed += 1;
            }
        }

        self.bullets.retain(|b| b.shape.is_active());
        self.asteroids.retain(|a| a.shape.is_active());
        self.asteroids.extend(spawned);
        self.total_destroyed += destroyed;

        if self.asteroids.is_empty() {
            self.asteroid_respawn_timer = self.config.respawn_delay;
            info!("Wave {} cleared, next wave in {} ticks", self.waves_spawned, self.config.respawn_delay);
        }
    }

    /// Draws every active entity: background, stars, upgrades, ship, bullets, asteroids.
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        renderer.clear(self.config.background_color);
        for star in &mut self.stars {
            star.shape.draw(renderer);
        }
        for upgrade in &mut self.upgrades {
            upgrade.draw(renderer);
        }
        self.ship.draw(renderer);
        for bullet in &mut self.bullets {
            bullet.shape.draw(renderer);
        }
        for asteroid in &mut self.asteroids {
            asteroid.shape.draw(renderer);
        }
    }
}

/// Removes `asteroid` from play, credits the kill to `ship` if given, and
/// queues its split products into `spawned`.
fn destroy(
    asteroid: &mut Asteroid,
    ship: Option<&mut Ship>,
    upgrades: &mut Vec<Upgrade>,
    spawned: &mut Vec<Asteroid>,
    rng: &mut StdRng,
    config: &GameConfig,
) {
    asteroid.shape.deactivate();
    let position = asteroid.shape.position;
    debug!(
        "Asteroid (r = {:.1}, {} points) destroyed at ({:.0}, {:.0})",
        asteroid.average_radius,
        asteroid.point_count(),
        position.x,
        position.y
    );

    if let Some(ship) = ship {
        ship.asteroids_destroyed += 1;
        if ship.asteroids_destroyed >= config.upgrade_requirement {
            ship.asteroids_destroyed = 0;
            upgrades.push(Upgrade::new(position, config));
            info!("Upgrade dropped at ({:.0}, {:.0})", position.x, position.y);
        }
    }

    if let Some(children) = asteroid.split(rng, config) {
        info!("Asteroid split into two of radius {:.1}", asteroid.average_radius / 2.0);
        spawned.extend(children);
    }
}
