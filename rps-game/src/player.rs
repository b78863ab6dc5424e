use crate::{Address, GameError, Move, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fixed seats in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::One, Slot::Two];

    pub fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn other(self) -> Slot {
        match self {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// An occupied seat: the participant and their move for the current round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    address: Address,
    pending: Option<Move>,
}

impl Seat {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            pending: None,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn has_played(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<Move> {
        self.pending
    }

    /// Record this round's move
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if self.pending.is_some() {
            return Err(GameError::AlreadyPlayed);
        }

        self.pending = Some(mv);
        tracing::debug!("Player {} recorded a move", self.address);
        Ok(())
    }

    /// Clear the move record, returning what was there
    pub fn take_move(&mut self) -> Option<Move> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_numbering() {
        assert_eq!(Slot::One.number(), 1);
        assert_eq!(Slot::Two.number(), 2);
        assert_eq!(Slot::One.other(), Slot::Two);
        assert_eq!(Slot::Two.to_string(), "2");
    }

    #[test]
    fn test_seat_plays_once_per_round() {
        let mut seat = Seat::new(Address::new([7; Address::LEN]));
        assert!(!seat.has_played());

        seat.play(Move::Rock).unwrap();
        assert!(matches!(
            seat.play(Move::Paper),
            Err(GameError::AlreadyPlayed)
        ));
        assert_eq!(seat.pending(), Some(Move::Rock));

        assert_eq!(seat.take_move(), Some(Move::Rock));
        assert!(!seat.has_played());
        seat.play(Move::Paper).unwrap();
    }
}
