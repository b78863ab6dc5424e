use crate::{Address, Slot};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("There is no space for new players")]
    GameFull,

    #[error("This address already joined as player {slot}")]
    AlreadyJoined { slot: Slot },

    #[error("Please join the game before you choose an option")]
    NotEnoughPlayers,

    #[error("The choice NOT PLAYED is not valid")]
    InvalidChoice,

    #[error("Unknown choice: {0}")]
    UnknownChoice(String),

    #[error("Address {0} is not a player in this game")]
    NotAPlayer(Address),

    #[error("You already played")]
    AlreadyPlayed,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("The zero address cannot join a game")]
    ZeroAddress,

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
