use super::bullet::{Bullet, BulletOwner};
use crate::config::GameConfig;
use crate::geometry::Vec2;

/// Gap between the enemy's lower edge and a freshly fired bullet
const MUZZLE_GAP: f32 = 0.02;

/// The stationary turret. It never moves and only ever shoots at the player.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub position: Vec2,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    pub shoot_cooldown: u32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(position: Vec2, size: f32, health: u32, shoot_cooldown: u32) -> Self {
        Self {
            position,
            size,
            health,
            max_health: health,
            shoot_cooldown,
            alive: true,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.enemy_position,
            config.enemy_size,
            config.enemy_health,
            config.enemy_initial_cooldown,
        )
    }

    /// Runs one tick of the firing loop. When the cooldown has run out, returns a
    /// bullet aimed at `target` and restarts the cooldown.
    pub fn update(&mut self, target: Vec2, config: &GameConfig) -> Option<Bullet> {
        if !self.alive {
            return None;
        }

        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
            return None;
        }

        self.shoot_cooldown = config.enemy_shoot_cooldown_max;
        let muzzle = Vec2::new(
            self.position.x,
            self.position.y - (self.size + MUZZLE_GAP),
        );
        // Aim from the enemy's centre, not the muzzle; a zero vector falls back to straight down
        Some(Bullet::new(
            muzzle,
            target - self.position,
            config.enemy_bullet_speed,
            BulletOwner::Enemy,
        ))
    }

    /// Takes one point of damage, never going below 0. Returns true only for the hit
    /// that destroyed the enemy.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Remaining health as a fraction of the starting health, for the health bar
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }
}
