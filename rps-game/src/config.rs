use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Round results buffered per subscriber before slow ones start lagging
    pub result_channel_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            result_channel_capacity: 64,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.result_channel_capacity == 0 {
            return Err(GameError::config(
                "result_channel_capacity must be greater than zero",
            ));
        }

        Ok(())
    }
}
