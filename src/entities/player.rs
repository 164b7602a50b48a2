use super::bullet::{Bullet, BulletOwner};
use crate::config::GameConfig;
use crate::geometry::{Vec2, within_world};
use crate::input::InputState;

/// Gap between the ship's top edge and a freshly fired bullet
const MUZZLE_GAP: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub size: f32,
    pub lives: u32,
    pub alive: bool,
    pub fire_cooldown: u32,
    pub respawn_timer: u32,
}

impl Player {
    pub fn new(position: Vec2, size: f32, lives: u32) -> Self {
        Self {
            position,
            size,
            lives,
            alive: true,
            fire_cooldown: 0,
            respawn_timer: 0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.player_spawn, config.player_size, config.player_lives)
    }

    /// Moves along the held directions at `speed`.
    ///
    /// Each axis is only applied if it keeps the ship inside the playfield, so a
    /// diagonal push into a wall still slides along it.
    pub fn apply_movement(&mut self, input: &InputState, speed: f32) {
        let heading = input.heading();
        if heading == Vec2::ZERO {
            return;
        }

        let step = heading.normalize_or(Vec2::ZERO) * speed;
        let target = self.position + step;
        if within_world(target.x, self.size) {
            self.position.x = target.x;
        }
        if within_world(target.y, self.size) {
            self.position.y = target.y;
        }
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown == 0
    }

    pub fn update_cooldown(&mut self) {
        if self.fire_cooldown > 0 {
            self.fire_cooldown -= 1;
        }
    }

    /// Fires straight up if the cooldown allows, restarting it at `config.fire_cooldown_max`
    pub fn try_fire(&mut self, config: &GameConfig) -> Option<Bullet> {
        if !self.can_fire() {
            return None;
        }

        self.fire_cooldown = config.fire_cooldown_max;
        let muzzle = Vec2::new(self.position.x, self.position.y + self.size + MUZZLE_GAP);
        Some(Bullet::new(
            muzzle,
            Vec2::UP,
            config.player_bullet_speed,
            BulletOwner::Player,
        ))
    }

    /// Loses a life and goes down for `respawn_ticks`. Returns the lives left.
    pub fn take_hit(&mut self, respawn_ticks: u32) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.alive = false;
        self.respawn_timer = respawn_ticks;
        self.lives
    }

    /// Counts one tick of the respawn delay. Returns true once the delay has run out.
    pub fn tick_respawn(&mut self) -> bool {
        self.respawn_timer = self.respawn_timer.saturating_sub(1);
        self.respawn_timer == 0
    }

    pub fn revive(&mut self, position: Vec2) {
        self.alive = true;
        self.position = position;
        self.respawn_timer = 0;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}
