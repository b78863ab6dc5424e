//! Two-player Rock-Paper-Scissors game coordinator
//!
//! Admits exactly two participants, collects one move from each per round,
//! announces the result and resets for the next round.

pub mod address;
pub mod choice;
pub mod config;
pub mod error;
pub mod game;
pub mod player;
pub mod round;
pub mod shared;

pub use address::Address;
pub use choice::{Choice, Move};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{GameCoordinator, GameInfo, GameState};
pub use player::{Seat, Slot};
pub use round::{evaluate, Outcome, RoundResult};
pub use shared::SharedGame;

/// Create a new game with both slots empty
pub fn create_game() -> GameCoordinator {
    GameCoordinator::new()
}

/// Create a new game behind a lock, ready to be shared between callers
pub fn create_shared_game(config: &GameConfig) -> Result<SharedGame> {
    SharedGame::with_config(GameCoordinator::new(), config)
}
