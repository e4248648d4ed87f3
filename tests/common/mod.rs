#![allow(dead_code)]

use rand::{SeedableRng, rngs::StdRng};
use rock_splitter::config::GameConfig;
use rock_splitter::entities::Asteroid;
use rock_splitter::types::Point;
use rock_splitter::world::World;

/// Far from the ship's spawn point and out of every upward bullet's path.
pub const CORNER: Point = Point { x: 60.0, y: 560.0 };

pub fn starless(config: GameConfig) -> GameConfig {
    GameConfig { star_density: 0.0, ..config }
}

/// A seeded world whose whole wave sits motionless in the bottom-left corner.
pub fn calm_world(config: GameConfig, seed: u64) -> World {
    let mut world = World::with_seed(starless(config), seed);
    for asteroid in &mut world.asteroids {
        asteroid.shape.velocity = Point::ORIGIN;
        asteroid.rotation_rate = 0.0;
        asteroid.shape.position = CORNER;
    }
    world
}

/// A motionless asteroid with an outline of roughly radius 30 around `position`.
/// Splitting is decided by `average_radius`, which may differ from the outline.
pub fn parked_asteroid(world: &World, position: Point, average_radius: f64) -> Asteroid {
    let mut rng = StdRng::seed_from_u64(position.x.to_bits() ^ position.y.to_bits());
    let mut asteroid = Asteroid::new(position, 30.0, &mut rng, world.config());
    asteroid.shape.velocity = Point::ORIGIN;
    asteroid.rotation_rate = 0.0;
    asteroid.average_radius = average_radius;
    asteroid
}
