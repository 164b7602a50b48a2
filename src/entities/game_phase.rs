/// Where the encounter currently stands. Derived from entity state each time it is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    PlayerRespawning,
    /// Informational only: the player keeps flying, the enemy just stops shooting
    EnemyDefeated,
    GameOver,
}

/// The banner shown over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Normal,
    EnemyDestroyed,
    GameOver,
}

impl Status {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Status::Normal => None,
            Status::EnemyDestroyed => Some("ENEMY DESTROYED!"),
            Status::GameOver => Some("GAME OVER"),
        }
    }
}
