use crate::geometry::Vec2;

/// Default half-extent used for every bullet in collision tests
pub const BULLET_SIZE: f32 = 0.01;

/// Default distance from the centre past which bullets are dropped, a little beyond the visible edge
pub const WORLD_MARGIN: f32 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

impl BulletOwner {
    /// Heading used when a shot is aimed along a zero-length vector
    pub fn default_heading(&self) -> Vec2 {
        match self {
            BulletOwner::Player => Vec2::UP,
            BulletOwner::Enemy => Vec2::DOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    /// Always unit length
    pub direction: Vec2,
    pub speed: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(position: Vec2, direction: Vec2, speed: f32, owner: BulletOwner) -> Self {
        Self {
            position,
            direction: direction.normalize_or(owner.default_heading()),
            speed,
            owner,
        }
    }

    pub fn update(&mut self) {
        self.position += self.direction * self.speed;
    }

    pub fn is_out_of_bounds(&self, margin: f32) -> bool {
        self.position.x < -margin
            || self.position.x > margin
            || self.position.y < -margin
            || self.position.y > margin
    }
}

/// Every live bullet, in the order it was fired
#[derive(Debug, Clone, Default)]
pub struct BulletPool {
    bullets: Vec<Bullet>,
}

impl BulletPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, origin: Vec2, direction: Vec2, speed: f32, owner: BulletOwner) {
        self.bullets.push(Bullet::new(origin, direction, speed, owner));
    }

    pub fn push(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    /// One fixed integration step for every bullet
    pub fn advance(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update();
        }
    }

    /// Drops every bullet past `margin` on either axis
    pub fn cull(&mut self, margin: f32) {
        self.bullets.retain(|b| !b.is_out_of_bounds(margin));
    }

    /// Keeps only the bullets for which `keep` returns true, visiting each once in order
    pub fn retain_mut(&mut self, keep: impl FnMut(&mut Bullet) -> bool) {
        self.bullets.retain_mut(keep);
    }

    pub fn remove(&mut self, index: usize) -> Bullet {
        self.bullets.remove(index)
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    pub fn as_slice(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn count_owned_by(&self, owner: BulletOwner) -> usize {
        self.bullets.iter().filter(|b| b.owner == owner).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_new_normalizes_direction() {
        let bullet = Bullet::new(Vec2::ZERO, Vec2::new(0.0, -2.0), 0.04, BulletOwner::Enemy);
        assert_eq!(bullet.direction, Vec2::DOWN);
    }

    #[test]
    fn test_zero_direction_falls_back_per_owner() {
        let enemy_shot = Bullet::new(Vec2::ZERO, Vec2::ZERO, 0.04, BulletOwner::Enemy);
        assert_eq!(enemy_shot.direction, Vec2::DOWN);

        let player_shot = Bullet::new(Vec2::ZERO, Vec2::ZERO, 0.08, BulletOwner::Player);
        assert_eq!(player_shot.direction, Vec2::UP);
    }

    #[test]
    fn test_player_bullet_moves_up() {
        let mut bullet = Bullet::new(Vec2::new(0.0, 0.0), Vec2::UP, 0.5, BulletOwner::Player);
        bullet.update();
        assert_eq!(bullet.position, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_diagonal_bullet_moves_by_speed() {
        let mut bullet = Bullet::new(Vec2::ZERO, Vec2::new(1.0, 1.0), 0.1, BulletOwner::Enemy);
        bullet.update();
        assert!((bullet.position.length() - 0.1).abs() < 1e-6);
        assert!((bullet.position.x - bullet.position.y).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_bounds_uses_margin() {
        let inside = Bullet::new(Vec2::new(1.05, -1.05), Vec2::UP, 0.1, BulletOwner::Player);
        assert!(!inside.is_out_of_bounds(WORLD_MARGIN));

        let outside = Bullet::new(Vec2::new(0.0, 1.2), Vec2::UP, 0.1, BulletOwner::Player);
        assert!(outside.is_out_of_bounds(WORLD_MARGIN));

        let left = Bullet::new(Vec2::new(-1.2, 0.0), Vec2::UP, 0.1, BulletOwner::Enemy);
        assert!(left.is_out_of_bounds(WORLD_MARGIN));
        assert!(!left.is_out_of_bounds(1.5));
    }

    #[test]
    fn test_pool_advance_and_cull() {
        let mut pool = BulletPool::new();
        pool.spawn(Vec2::new(0.0, 1.05), Vec2::UP, 0.08, BulletOwner::Player);
        pool.spawn(Vec2::new(0.0, 0.0), Vec2::DOWN, 0.04, BulletOwner::Enemy);

        pool.advance();
        pool.cull(WORLD_MARGIN);

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.as_slice()[0].owner, BulletOwner::Enemy);
    }

    #[test]
    fn test_pool_keeps_insertion_order() {
        let mut pool = BulletPool::new();
        for i in 0..5 {
            pool.spawn(Vec2::new(i as f32 * 0.1, 0.0), Vec2::UP, 0.01, BulletOwner::Player);
        }
        pool.retain_mut(|b| b.position.x != 0.2);

        let xs: Vec<f32> = pool.iter().map(|b| b.position.x).collect();
        assert_eq!(xs.len(), 4);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_cull_removes_everything_past_margin(
                positions in prop::collection::vec((-1.5f32..1.5, -1.5f32..1.5), 0..50)
            ) {
                let mut pool = BulletPool::new();
                for (x, y) in &positions {
                    pool.spawn(Vec2::new(*x, *y), Vec2::UP, 0.08, BulletOwner::Player);
                }
                pool.cull(WORLD_MARGIN);

                for bullet in pool.iter() {
                    prop_assert!(bullet.position.x.abs() <= WORLD_MARGIN);
                    prop_assert!(bullet.position.y.abs() <= WORLD_MARGIN);
                }
                let expected = positions
                    .iter()
                    .filter(|(x, y)| x.abs() <= WORLD_MARGIN && y.abs() <= WORLD_MARGIN)
                    .count();
                prop_assert_eq!(pool.len(), expected);
            }

            #[test]
            fn test_bullet_direction_is_unit_length(
                dx in -1.0f32..1.0,
                dy in -1.0f32..1.0,
                owner in prop::sample::select(vec![BulletOwner::Player, BulletOwner::Enemy])
            ) {
                let bullet = Bullet::new(Vec2::ZERO, Vec2::new(dx, dy), 0.05, owner);
                prop_assert!(bullet.direction.x.is_finite());
                prop_assert!((bullet.direction.length() - 1.0).abs() < 1e-3);
            }
        }
    }
}
