use color_eyre::Result;
use color_eyre::eyre::ensure;

use crate::entities::{BULLET_SIZE, WORLD_MARGIN};
use crate::geometry::{Vec2, within_world};

/// Tuning values for one encounter. All distances are in world units and all
/// durations are counted in ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub move_speed: f32,
    pub player_size: f32,
    /// Where the player starts and where it comes back after a respawn
    pub player_spawn: Vec2,
    pub player_lives: u32,
    pub fire_cooldown_max: u32,
    pub player_bullet_speed: f32,
    pub enemy_position: Vec2,
    pub enemy_size: f32,
    pub enemy_health: u32,
    pub enemy_shoot_cooldown_max: u32,
    /// Delay before the enemy's first shot
    pub enemy_initial_cooldown: u32,
    pub enemy_bullet_speed: f32,
    pub respawn_ticks: u32,
    /// Half-extent of every bullet's collision box
    pub bullet_size: f32,
    /// Bullets further than this from the centre on either axis are culled
    pub world_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.05,
            player_size: 0.05,
            player_spawn: Vec2::new(0.0, -0.6),
            player_lives: 3,
            fire_cooldown_max: 10,
            player_bullet_speed: 0.08,
            enemy_position: Vec2::new(0.0, 0.6),
            enemy_size: 0.09,
            enemy_health: 5,
            enemy_shoot_cooldown_max: 50,
            enemy_initial_cooldown: 30,
            enemy_bullet_speed: 0.04,
            respawn_ticks: 60,
            bullet_size: BULLET_SIZE,
            world_margin: WORLD_MARGIN,
        }
    }
}

impl GameConfig {
    /// Rejects values that would make the encounter unplayable
    pub fn validate(&self) -> Result<()> {
        ensure!(self.move_speed > 0.0, "move speed must be positive");
        ensure!(
            self.player_size > 0.0 && self.player_size < 1.0,
            "player size must be in (0, 1), got {}",
            self.player_size
        );
        ensure!(
            self.enemy_size > 0.0 && self.enemy_size < 1.0,
            "enemy size must be in (0, 1), got {}",
            self.enemy_size
        );
        ensure!(
            self.player_bullet_speed > 0.0 && self.enemy_bullet_speed > 0.0,
            "bullet speeds must be positive"
        );
        ensure!(self.bullet_size > 0.0, "bullet size must be positive");
        ensure!(
            self.world_margin >= 1.0,
            "world margin must not cut into the visible playfield, got {}",
            self.world_margin
        );
        ensure!(self.player_lives > 0, "player needs at least one life");
        ensure!(self.enemy_health > 0, "enemy needs at least one health point");
        ensure!(
            fits_in_world(self.player_spawn, self.player_size),
            "player spawn {:?} is outside the playfield",
            self.player_spawn
        );
        ensure!(
            fits_in_world(self.enemy_position, self.enemy_size),
            "enemy position {:?} is outside the playfield",
            self.enemy_position
        );
        Ok(())
    }
}

fn fits_in_world(position: Vec2, size: f32) -> bool {
    within_world(position.x, size) && within_world(position.y, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_lives_rejected() {
        let config = GameConfig {
            player_lives: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_spawn_outside_world_rejected() {
        let config = GameConfig {
            player_spawn: Vec2::new(0.0, -0.98),
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("outside the playfield"));
    }

    #[test]
    fn test_bullet_tuning_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.bullet_size, 0.01);
        assert_eq!(config.world_margin, 1.1);
    }

    #[test]
    fn test_margin_inside_playfield_rejected() {
        let config = GameConfig {
            world_margin: 0.9,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let config = GameConfig {
            enemy_bullet_speed: 0.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
