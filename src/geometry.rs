use std::ops::{Add, AddAssign, Mul, Sub};

/// A point or direction in world space. The visible playfield spans [-1, 1] on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const UP: Vec2 = Vec2 { x: 0.0, y: 1.0 };
    pub const DOWN: Vec2 = Vec2 { x: 0.0, y: -1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `fallback` when the length is zero
    pub fn normalize_or(self, fallback: Vec2) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            fallback
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// True when an extent centred on `coord` stays strictly inside the visible [-1, 1] range
pub fn within_world(coord: f32, half_extent: f32) -> bool {
    coord - half_extent > -1.0 && coord + half_extent < 1.0
}

/// Axis-aligned box overlap between two square extents.
///
/// Entities are drawn as triangles and discs but always collide as boxes.
pub fn overlaps(a: Vec2, half_a: f32, b: Vec2, half_b: f32) -> bool {
    let reach = half_a + half_b;
    (a.x - b.x).abs() < reach && (a.y - b.y).abs() < reach
}
