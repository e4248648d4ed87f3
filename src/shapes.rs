//! Shared pose/physics record for everything on screen, plus the two outline kinds
//! the game needs: a recentered polygon and a circle.
//!
//! Collision is deliberately approximate: two shapes intersect when any vertex of
//! one lies inside the other. Circles contribute evenly spaced sample points as
//! their "vertices".

use crate::rendering::Renderer;
use crate::types::{Color, Point, normalize_degrees, wrap_coordinate};

#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    /// Local-space vertices, centroid at the origin, in edge order.
    Polygon(Vec<Point>),
    Circle { radius: f64, samples: usize },
}

/// World-space vertices for the pose they were computed at.
#[derive(Clone, Debug)]
struct PoseCache {
    rotation: f64,
    position: Point,
    points: Vec<Point>,
}

#[derive(Clone, Debug)]
pub struct Shape {
    pub position: Point,
    pub velocity: Point,
    pub color: Color,
    rotation: f64,
    active: bool,
    outline: Outline,
    cache: Option<PoseCache>,
}

impl Shape {
    /// Builds a polygon from raw outline points. The points are shifted so their
    /// area-weighted centroid becomes the local origin; vertex order is kept.
    pub fn polygon(outline: &[Point], position: Point, rotation: f64, color: Color) -> Self {
        Self::with_outline(Outline::Polygon(recenter(outline)), position, rotation, color)
    }

    pub fn circle(radius: f64, samples: usize, position: Point, color: Color) -> Self {
        Self::with_outline(Outline::Circle { radius, samples }, position, 0.0, color)
    }

    fn with_outline(outline: Outline, position: Point, rotation: f64, color: Color) -> Self {
        Shape {
            position,
            velocity: Point::ORIGIN,
            color,
            rotation: normalize_degrees(rotation),
            active: true,
            outline,
            cache: None,
        }
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn radius(&self) -> Option<f64> {
        match self.outline {
            Outline::Circle { radius, .. } => Some(radius),
            Outline::Polygon(_) => None,
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.rotation = normalize_degrees(self.rotation + degrees);
    }

    /// Thrust along the current heading. Velocity is never capped.
    pub fn accelerate(&mut self, magnitude: f64) {
        self.velocity = self.velocity.add(Point::from_heading(self.rotation).scale(magnitude));
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Moves by one tick of velocity and re-enters on the opposite edge when
    /// the shape leaves the `width` x `height` screen.
    pub fn move_wrapping(&mut self, width: f64, height: f64) {
        let next = self.position.add(self.velocity);
        self.position = Point::new(wrap_coordinate(next.x, width), wrap_coordinate(next.y, height));
    }

    /// Moves by one tick of velocity and deactivates once off screen.
    pub fn move_bounded(&mut self, width: f64, height: f64) {
        self.position = self.position.add(self.velocity);
        let Point { x, y } = self.position;
        if !(0.0..width).contains(&x) || !(0.0..height).contains(&y) {
            self.deactivate();
        }
    }

    /// World-space vertices for the current pose, recomputed only when the
    /// rotation or position changed since the last call.
    pub fn points(&mut self) -> &[Point] {
        let stale = match &self.cache {
            Some(cache) => cache.rotation != self.rotation || cache.position != self.position,
            None => true,
        };
        if stale {
            let points = self.compute_points();
            self.cache = Some(PoseCache { rotation: self.rotation, position: self.position, points });
        }
        match &self.cache {
            Some(cache) => &cache.points,
            None => &[],
        }
    }

    fn compute_points(&self) -> Vec<Point> {
        match &self.outline {
            Outline::Polygon(local) => {
                let (sin, cos) = self.rotation.to_radians().sin_cos();
                local.iter().map(|p| p.rotated(sin, cos).add(self.position)).collect()
            }
            Outline::Circle { radius, samples } => (0..*samples)
                .map(|i| {
                    let heading = i as f64 * 360.0 / *samples as f64;
                    Point::from_heading(heading).scale(*radius).add(self.position)
                })
                .collect(),
        }
    }

    pub fn contains(&mut self, point: Point) -> bool {
        match self.radius() {
            Some(radius) => self.position.distance_squared(point) <= radius * radius,
            None => crossing_number(self.points(), point) % 2 == 1,
        }
    }

    /// True when any vertex of either shape lies inside the other.
    pub fn intersects(&mut self, other: &mut Shape) -> bool {
        let mine = self.points().to_vec();
        if mine.into_iter().any(|p| other.contains(p)) {
            return true;
        }
        let theirs = other.points().to_vec();
        theirs.into_iter().any(|p| self.contains(p))
    }

    /// Emits one draw call for this shape; inactive shapes draw nothing.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        if !self.active {
            return;
        }
        let color = self.color;
        match self.outline {
            Outline::Circle { radius, .. } => renderer.draw_circle(self.position, radius, color),
            Outline::Polygon(_) => renderer.draw_polygon(self.points(), color),
        }
    }
}

/// Counts edges crossed by a ray cast from `point` toward -y. Edges whose ends
/// share an x coordinate never straddle the ray, so the slope division is safe.
fn crossing_number(points: &[Point], point: Point) -> usize {
    let n = points.len();
    (0..n)
        .filter(|&i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            let straddles = (a.x < point.x && point.x <= b.x) || (b.x < point.x && point.x <= a.x);
            straddles && point.y > a.y + (b.y - a.y) / (b.x - a.x) * (point.x - a.x)
        })
        .count()
}

fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    let sum: f64 = (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    0.5 * sum
}

/// Area-weighted centroid. Degenerate (zero-area) outlines fall back to the
/// vertex mean.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let area = signed_area(points);
    if area.abs() < f64::EPSILON {
        let n = points.len() as f64;
        let sum = points.iter().fold(Point::ORIGIN, |acc, p| acc.add(*p));
        return sum.scale(1.0 / n);
    }
    let n = points.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    Point::new(cx / (6.0 * area), cy / (6.0 * area))
}

fn recenter(outline: &[Point]) -> Vec<Point> {
    // Shift into the positive quadrant first so centroid sums stay small.
    let min_x = outline.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = outline.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let origin = if outline.is_empty() { Point::ORIGIN } else { Point::new(min_x, min_y) };
    let shifted: Vec<Point> = outline.iter().map(|p| p.sub(origin)).collect();
    let center = centroid(&shifted);
    shifted.iter().map(|p| p.sub(center)).collect()
}
