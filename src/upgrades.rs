use crate::config::GameConfig;
use crate::rendering::Renderer;
use crate::shapes::Shape;
use crate::types::{Color, Point};
use rand::Rng;

/// A pickup dropped where the ship earned it. It never expires; it stays on
/// screen, flickering through random colors, until the ship flies into it.
pub struct Upgrade {
    pub shape: Shape,
}

impl Upgrade {
    pub fn new(position: Point, config: &GameConfig) -> Self {
        Upgrade {
            shape: Shape::circle(config.upgrade_radius, config.circle_point_count, position, Color::BLACK),
        }
    }

    pub fn is_active(&self) -> bool {
        self.shape.is_active()
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        if self.is_active() {
            self.shape.color = Color::rgb(rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255));
        }
    }

    /// Marks the pickup as taken. Removal happens after the tick's scan.
    pub fn collect(&mut self) {
        self.shape.deactivate();
    }

    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.shape.draw(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn upgrade_cycles_color_and_never_expires() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut upgrade = Upgrade::new(Point::new(10.0, 20.0), &config);
        let mut colors = std::collections::HashSet::new();
        for _ in 0..1000 {
            upgrade.update(&mut rng);
            colors.insert(upgrade.shape.color);
            assert!(upgrade.is_active());
        }
        assert!(colors.len() > 100);
        assert_eq!(upgrade.shape.radius(), Some(config.upgrade_radius));
        assert_eq!(upgrade.shape.position, Point::new(10.0, 20.0));
    }

    #[test]
    fn collected_upgrade_stops_drawing() {
        let config = GameConfig::default();
        let mut upgrade = Upgrade::new(Point::ORIGIN, &config);
        upgrade.collect();
        let mut list = crate::rendering::DrawList::default();
        upgrade.draw(&mut list);
        assert!(list.commands.is_empty());
    }
}
