// Library exports for testing
pub use config::GameConfig;
pub use entities::{
    BULLET_SIZE, Bullet, BulletOwner, BulletPool, Enemy, GamePhase, Player, Status, WORLD_MARGIN,
};
pub use game::{GameState, Snapshot, tick};
pub use geometry::{Vec2, overlaps, within_world};
pub use input::{InputManager, InputState};

pub mod config;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
