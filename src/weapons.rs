//! Which ship vertices fire, and at what angle, for each upgrade level.

// Vertex indices into the ship outline (see `constants::SHIP_POINTS`).
pub const NOSE: usize = 0;
pub const RIGHT_WING: usize = 3;
pub const RIGHT_TAIL: usize = 4;
pub const TAIL: usize = 6;
pub const LEFT_TAIL: usize = 8;
pub const LEFT_WING: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub vertex: usize,
    /// Degrees added to the ship's rotation.
    pub angle_offset: f64,
}

const fn shot(vertex: usize, angle_offset: f64) -> Shot {
    Shot { vertex, angle_offset }
}

// (minimum level, shots added at that level)
const FAN_OUT: [(u32, &[Shot]); 6] = [
    (0, &[shot(NOSE, 0.0)]),
    (1, &[shot(RIGHT_WING, 0.0), shot(LEFT_WING, 0.0)]),
    (3, &[shot(RIGHT_WING, 45.0), shot(LEFT_WING, -45.0)]),
    (4, &[shot(RIGHT_WING, 90.0), shot(LEFT_WING, -90.0)]),
    (5, &[shot(RIGHT_TAIL, 135.0), shot(LEFT_TAIL, -135.0)]),
    (6, &[shot(TAIL, 180.0)]),
];

/// Every shot fired by one press of the fire key at `level`.
pub fn volley(level: u32) -> Vec<Shot> {
    FAN_OUT
        .iter()
        .filter(|(min_level, _)| level >= *min_level)
        .flat_map(|(_, shots)| shots.iter().copied())
        .collect()
}
