use crate::{Address, Move, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of comparing the two moves of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Draw(Move),
    Win {
        winner: Slot,
        winning: Move,
        losing: Move,
    },
}

impl Outcome {
    pub fn winner(&self) -> Option<Slot> {
        match self {
            Outcome::Draw(_) => None,
            Outcome::Win { winner, .. } => Some(*winner),
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw(_))
    }
}

/// Evaluate the moves of slot one and slot two
pub fn evaluate(first: Move, second: Move) -> Outcome {
    if first == second {
        Outcome::Draw(first)
    } else if first.beats(second) {
        Outcome::Win {
            winner: Slot::One,
            winning: first,
            losing: second,
        }
    } else {
        Outcome::Win {
            winner: Slot::Two,
            winning: second,
            losing: first,
        }
    }
}

/// Notification emitted once per completed round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub game_id: Uuid,
    pub round: u64,
    pub loser_announcement: String,
    pub winner_announcement: String,
    /// `None` on a draw; the zero address once serialized
    #[serde(with = "crate::address::zero_sentinel")]
    pub winner: Option<Address>,
    pub decided_at: DateTime<Utc>,
}

impl RoundResult {
    pub fn new(game_id: Uuid, round: u64, outcome: Outcome, players: [Address; 2]) -> Self {
        let (losing, winning, winner) = match outcome {
            Outcome::Draw(mv) => (mv, mv, None),
            Outcome::Win {
                winner,
                winning,
                losing,
            } => (losing, winning, Some(players[winner.index()])),
        };

        Self {
            game_id,
            round,
            loser_announcement: format!("The loser chose: {}", losing),
            winner_announcement: format!("The winner chose: {}", winning),
            winner,
            decided_at: Utc::now(),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// Winner in wire form, the zero address on a draw
    pub fn winner_address(&self) -> Address {
        Address::or_zero(self.winner)
    }
}
