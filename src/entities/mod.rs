mod bullet;
mod enemy;
mod game_phase;
mod player;

// Re-export all public types
pub use bullet::{BULLET_SIZE, Bullet, BulletOwner, BulletPool, WORLD_MARGIN};
pub use enemy::Enemy;
pub use game_phase::{GamePhase, Status};
pub use player::Player;
