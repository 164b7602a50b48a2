use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{Bullet, BulletOwner, BulletPool, Enemy, GamePhase, Player, Status};
use crate::geometry::overlaps;
use crate::input::InputState;

/// Everything that changes during an encounter. The caller owns it and
/// advances it one tick at a time.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub enemy: Enemy,
    pub bullets: BulletPool,
    pub game_over: bool,
    pub tick_count: u64,
}

/// Read-only view handed to the renderer after each tick
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub enemy: &'a Enemy,
    pub bullets: &'a [Bullet],
    pub lives: u32,
    pub phase: GamePhase,
    pub status: Status,
    pub tick_count: u64,
}

/// Advances `state` by one tick and hands it back
pub fn tick(mut state: GameState, input: &InputState) -> GameState {
    state.tick(input);
    state
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            player: Player::from_config(&config),
            enemy: Enemy::from_config(&config),
            bullets: BulletPool::new(),
            game_over: false,
            tick_count: 0,
            config,
        }
    }

    /// Runs one fixed step: input, enemy fire, bullet motion, collisions, respawn.
    ///
    /// Once the game is over nothing moves until a reset comes in.
    pub fn tick(&mut self, input: &InputState) {
        if input.reset {
            self.reset();
        }
        if self.game_over {
            return;
        }
        self.tick_count += 1;

        self.update_player(input);
        self.update_enemy();

        self.bullets.advance();
        self.bullets.cull(self.config.world_margin);

        self.check_collisions();
        self.update_respawn();
    }

    /// Recreates both ships and clears every bullet
    pub fn reset(&mut self) {
        info!(game_over = self.game_over, "resetting encounter");
        self.player = Player::from_config(&self.config);
        self.enemy = Enemy::from_config(&self.config);
        self.bullets.clear();
        self.game_over = false;
    }

    fn update_player(&mut self, input: &InputState) {
        if !self.player.is_alive() {
            return;
        }

        self.player.apply_movement(input, self.config.move_speed);

        self.player.update_cooldown();
        if input.fire
            && let Some(bullet) = self.player.try_fire(&self.config)
        {
            self.bullets.push(bullet);
        }
    }

    fn update_enemy(&mut self) {
        if let Some(bullet) = self.enemy.update(self.player.position, &self.config) {
            debug!(x = bullet.position.x, y = bullet.position.y, "enemy fired");
            self.bullets.push(bullet);
        }
    }

    fn check_collisions(&mut self) {
        // Player bullets hitting the enemy: every overlapping bullet counts, even
        // the ones landing after the killing blow in the same tick
        let bullet_size = self.config.bullet_size;
        if self.enemy.is_alive() {
            let enemy = &mut self.enemy;
            self.bullets.retain_mut(|bullet| {
                if bullet.owner != BulletOwner::Player
                    || !overlaps(bullet.position, bullet_size, enemy.position, enemy.size)
                {
                    return true;
                }
                if enemy.take_hit() {
                    info!("enemy destroyed");
                } else if enemy.is_alive() {
                    debug!(health = enemy.health, "enemy hit");
                }
                false
            });
        }

        // Enemy bullets hitting the player: at most one per tick
        if !self.player.is_alive() {
            return;
        }
        let player = &self.player;
        let hit = self.bullets.iter().position(|bullet| {
            bullet.owner == BulletOwner::Enemy
                && overlaps(bullet.position, bullet_size, player.position, player.size)
        });
        if let Some(idx) = hit {
            self.bullets.remove(idx);
            let lives = self.player.take_hit(self.config.respawn_ticks);
            info!(lives, "player hit");
            if lives == 0 {
                info!(tick = self.tick_count, "game over");
                self.game_over = true;
            }
        }
    }

    fn update_respawn(&mut self) {
        if self.player.is_alive() || self.game_over {
            return;
        }
        if !self.player.tick_respawn() {
            return;
        }

        if self.player.lives > 0 {
            self.player.revive(self.config.player_spawn);
            debug!(lives = self.player.lives, "player respawned");
        } else {
            info!(tick = self.tick_count, "game over");
            self.game_over = true;
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if !self.player.is_alive() {
            GamePhase::PlayerRespawning
        } else if !self.enemy.is_alive() {
            GamePhase::EnemyDefeated
        } else {
            GamePhase::Playing
        }
    }

    pub fn status(&self) -> Status {
        if self.game_over {
            Status::GameOver
        } else if !self.enemy.is_alive() {
            Status::EnemyDestroyed
        } else {
            Status::Normal
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player,
            enemy: &self.enemy,
            bullets: self.bullets.as_slice(),
            lives: self.player.lives,
            phase: self.phase(),
            status: self.status(),
            tick_count: self.tick_count,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
