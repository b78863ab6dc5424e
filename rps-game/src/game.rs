use crate::round::evaluate;
use crate::{Address, Choice, GameError, Move, Result, RoundResult, Seat, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Game state for a two-player round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Zero or one seat filled
    AwaitingPlayers,
    /// Both seats filled; rounds can be played indefinitely
    ReadyToPlay,
}

/// Authoritative coordinator for one two-player game.
///
/// Every operation checks all of its preconditions before mutating
/// anything, so a failed call leaves the game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameSnapshot", into = "GameSnapshot")]
pub struct GameCoordinator {
    id: Uuid,
    created_at: DateTime<Utc>,
    seats: [Option<Seat>; 2],
    rounds_played: u64,
}

impl Default for GameCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl GameCoordinator {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            seats: [None, None],
            rounds_played: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> GameState {
        if self.seats.iter().all(Option::is_some) {
            GameState::ReadyToPlay
        } else {
            GameState::AwaitingPlayers
        }
    }

    pub fn player_count(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    /// Number of the round currently being played, starting at 0
    pub fn round(&self) -> u64 {
        self.rounds_played
    }

    /// Occupants of slot one and slot two, in join order
    pub fn players(&self) -> [Option<Address>; 2] {
        [
            self.seats[0].as_ref().map(Seat::address),
            self.seats[1].as_ref().map(Seat::address),
        ]
    }

    /// Wire form of [`players`](Self::players): the zero address marks an empty slot
    pub fn player_addresses(&self) -> [Address; 2] {
        self.players().map(Address::or_zero)
    }

    pub fn slot_of(&self, address: Address) -> Option<Slot> {
        Slot::BOTH.into_iter().find(|slot| {
            self.seats[slot.index()]
                .as_ref()
                .map_or(false, |seat| seat.address() == address)
        })
    }

    pub fn has_played(&self, slot: Slot) -> bool {
        self.seats[slot.index()]
            .as_ref()
            .map_or(false, Seat::has_played)
    }

    pub fn can_join(&self, address: Address) -> bool {
        !address.is_zero() && self.player_count() < 2 && self.slot_of(address).is_none()
    }

    pub fn can_choose(&self, address: Address) -> bool {
        self.state() == GameState::ReadyToPlay
            && self
                .slot_of(address)
                .map_or(false, |slot| !self.has_played(slot))
    }

    /// Seat `caller` in the first empty slot
    pub fn join(&mut self, caller: Address) -> Result<Slot> {
        let slot = self.check_join(caller).map_err(|e| {
            tracing::warn!("Join by {} rejected in game {}: {}", caller, self.id, e);
            e
        })?;

        self.seats[slot.index()] = Some(Seat::new(caller));
        tracing::info!("Player {} joined game {} as player {}", caller, self.id, slot);

        if self.state() == GameState::ReadyToPlay {
            tracing::info!("Game {} ready to play", self.id);
        }

        Ok(slot)
    }

    fn check_join(&self, caller: Address) -> Result<Slot> {
        if caller.is_zero() {
            return Err(GameError::ZeroAddress);
        }

        if let Some(slot) = self.slot_of(caller) {
            return Err(GameError::AlreadyJoined { slot });
        }

        Slot::BOTH
            .into_iter()
            .find(|slot| self.seats[slot.index()].is_none())
            .ok_or(GameError::GameFull)
    }

    /// Record `caller`'s move for the current round.
    ///
    /// Returns the round's result when this move completes it; both move
    /// records are already cleared by the time the result is returned.
    pub fn choose_option(
        &mut self,
        caller: Address,
        choice: Choice,
    ) -> Result<Option<RoundResult>> {
        let id = self.id;
        self.record(caller, choice).map_err(|e| {
            tracing::warn!("Choice by {} rejected in game {}: {}", caller, id, e);
            e
        })
    }

    fn record(&mut self, caller: Address, choice: Choice) -> Result<Option<RoundResult>> {
        let (first, second) =
            both_seats(&mut self.seats).ok_or(GameError::NotEnoughPlayers)?;
        let mv = Move::try_from(choice)?;

        if first.address() == caller {
            first.play(mv)?;
        } else if second.address() == caller {
            second.play(mv)?;
        } else {
            return Err(GameError::NotAPlayer(caller));
        }

        let (Some(a), Some(b)) = (first.pending(), second.pending()) else {
            return Ok(None);
        };

        first.take_move();
        second.take_move();

        let players = [first.address(), second.address()];
        let result = RoundResult::new(self.id, self.rounds_played, evaluate(a, b), players);
        self.rounds_played += 1;

        match result.winner {
            Some(winner) => tracing::info!(
                "Game {} round {} won by {}",
                self.id,
                result.round,
                winner
            ),
            None => tracing::info!("Game {} round {} is a draw", self.id, result.round),
        }

        Ok(Some(result))
    }

    pub fn get_info(&self) -> GameInfo {
        GameInfo {
            id: self.id,
            state: self.state(),
            player_count: self.player_count(),
            players: self.players(),
            played: Slot::BOTH.map(|slot| self.has_played(slot)),
            round: self.rounds_played,
            created_at: self.created_at,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn both_seats(seats: &mut [Option<Seat>; 2]) -> Option<(&mut Seat, &mut Seat)> {
    match seats {
        [Some(first), Some(second)] => Some((first, second)),
        _ => None,
    }
}

/// Game info for display. Exposes whether each player has moved, never the move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: Uuid,
    pub state: GameState,
    pub player_count: usize,
    pub players: [Option<Address>; 2],
    pub played: [bool; 2],
    pub round: u64,
    pub created_at: DateTime<Utc>,
}

/// Persisted form of a game, checked on the way back in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    id: Uuid,
    created_at: DateTime<Utc>,
    seats: [Option<Seat>; 2],
    #[serde(default)]
    rounds_played: u64,
}

impl From<GameCoordinator> for GameSnapshot {
    fn from(game: GameCoordinator) -> Self {
        Self {
            id: game.id,
            created_at: game.created_at,
            seats: game.seats,
            rounds_played: game.rounds_played,
        }
    }
}

impl TryFrom<GameSnapshot> for GameCoordinator {
    type Error = GameError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self> {
        let [first, second] = &snapshot.seats;

        if first.is_none() && second.is_some() {
            return Err(GameError::invalid_state(
                "player 2 is seated while slot 1 is empty",
            ));
        }

        for seat in snapshot.seats.iter().flatten() {
            if seat.address().is_zero() {
                return Err(GameError::invalid_state("the zero address holds a slot"));
            }
        }

        match (first, second) {
            (Some(a), Some(b)) => {
                if a.address() == b.address() {
                    return Err(GameError::invalid_state(format!(
                        "{} holds both slots",
                        a.address()
                    )));
                }
                if a.has_played() && b.has_played() {
                    return Err(GameError::invalid_state(
                        "both moves recorded but the round was not resolved",
                    ));
                }
            }
            _ => {
                if snapshot.seats.iter().flatten().any(Seat::has_played) {
                    return Err(GameError::invalid_state(
                        "move recorded before both players joined",
                    ));
                }
                if snapshot.rounds_played > 0 {
                    return Err(GameError::invalid_state(
                        "rounds played before both players joined",
                    ));
                }
            }
        }

        Ok(Self {
            id: snapshot.id,
            created_at: snapshot.created_at,
            seats: snapshot.seats,
            rounds_played: snapshot.rounds_played,
        })
    }
}
