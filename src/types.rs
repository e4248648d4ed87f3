use serde::Deserialize;

/// A 2D coordinate in screen space, or an offset in a shape's local space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Point) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Point) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Unit vector pointing along `degrees` (0 = +x, 90 = +y, screen axes).
    pub fn from_heading(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Point::new(radians.cos(), radians.sin())
    }

    /// Rotates this offset about the origin. `sin`/`cos` are passed in so callers
    /// transforming a whole outline only pay for the trigonometry once.
    pub fn rotated(&self, sin: f64, cos: f64) -> Self {
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Color::rgb(level, level, level)
    }

    pub fn brightness(&self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

/// Folds any angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

pub fn wrap_coordinate(value: f64, max: f64) -> f64 {
    let wrapped = value % max;
    if wrapped < 0.0 {
        let shifted = wrapped + max;
        if shifted >= max { 0.0 } else { shifted }
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn normalize_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let r = rng.gen_range(-10_000.0..10_000.0);
            let n = normalize_degrees(r);
            assert!((0.0..360.0).contains(&n), "{r} normalized to {n}");
        }
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-1e-18), 0.0);
    }

    #[test]
    fn wrap_reenters_on_opposite_edge() {
        assert_eq!(wrap_coordinate(805.0, 800.0), 5.0);
        assert_eq!(wrap_coordinate(-3.0, 800.0), 797.0);
        assert_eq!(wrap_coordinate(400.0, 800.0), 400.0);
        assert_eq!(wrap_coordinate(800.0, 800.0), 0.0);
    }

    #[test]
    fn heading_zero_points_along_x() {
        let h = Point::from_heading(0.0);
        assert_abs_diff_eq!(h.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h.y, 0.0, epsilon = 1e-12);
        let down = Point::from_heading(90.0);
        assert_abs_diff_eq!(down.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn point_equality_is_exact() {
        assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
        assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 2.000_000_1));
    }
}
