//! Game state model and structural invariants

use serde::{Deserialize, Serialize};
use crate::error::{GameError, InvariantViolation};
use crate::WIN_THRESHOLD;

/// Plain-data form of a game, used for transport and comparison between hosts
///
/// Field order and meaning match `GameState` one-to-one. `winner == None` is
/// the "no winner" sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot<P> {
    pub counter: u32,
    pub participants: Vec<P>,
    pub balances: Vec<u64>,
    pub current_player: P,
    pub game_active: bool,
    pub winner: Option<P>,
    pub bet_amount: u64,
}

/// Live game state, mutated only through the engine operations
///
/// Generic over the participant identifier so the same transition function
/// runs with `String` ids in the client and `Pubkey` ids on-chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState<P> {
    pub(crate) counter: u32,
    pub(crate) participants: Vec<P>,
    pub(crate) balances: Vec<u64>,
    pub(crate) current_player: P,
    pub(crate) game_active: bool,
    pub(crate) winner: Option<P>,
    pub(crate) bet_amount: u64,
}

impl<P: Clone + Eq> GameState<P> {
    /// Start a fresh game
    ///
    /// The first participant holds the first turn. Inputs come from the
    /// admission layer and are trusted for authenticity, but a structurally
    /// impossible state is never built.
    pub fn new(participants: Vec<P>, balances: Vec<u64>, bet_amount: u64) -> Result<Self, GameError> {
        let first = participants.first().cloned().ok_or(GameError::NoParticipants)?;
        if balances.len() != participants.len() {
            return Err(GameError::BalanceCountMismatch {
                participants: participants.len(),
                balances: balances.len(),
            });
        }
        if has_duplicates(&participants) {
            return Err(GameError::DuplicateParticipant);
        }
        checked_total(&balances).ok_or(GameError::BalanceOverflow)?;

        Ok(Self {
            counter: 0,
            participants,
            balances,
            current_player: first,
            game_active: true,
            winner: None,
            bet_amount,
        })
    }

    /// Rebuild a state received from another host, rejecting anything that
    /// breaks an invariant
    pub fn from_snapshot(snapshot: GameSnapshot<P>) -> Result<Self, GameError> {
        let state = Self {
            counter: snapshot.counter,
            participants: snapshot.participants,
            balances: snapshot.balances,
            current_player: snapshot.current_player,
            game_active: snapshot.game_active,
            winner: snapshot.winner,
            bet_amount: snapshot.bet_amount,
        };
        state.check_invariants()?;
        Ok(state)
    }

    /// Copy out the plain-data form
    pub fn snapshot(&self) -> GameSnapshot<P> {
        self.clone().into_snapshot()
    }

    /// Verify every structural invariant of the model
    ///
    /// Holds after every engine operation. The winner is a historical record
    /// once the game ends, so it may outlive its own membership when players
    /// withdraw from a finished game.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.participants.len() != self.balances.len() {
            return Err(InvariantViolation::LengthMismatch);
        }
        if has_duplicates(&self.participants) {
            return Err(InvariantViolation::DuplicateParticipant);
        }
        if checked_total(&self.balances).is_none() {
            return Err(InvariantViolation::StakeOverflow);
        }
        if self.game_active {
            if !self.participants.contains(&self.current_player) {
                return Err(InvariantViolation::CurrentPlayerMissing);
            }
            if self.winner.is_some() {
                return Err(InvariantViolation::WinnerWhileActive);
            }
            if self.counter >= WIN_THRESHOLD {
                return Err(InvariantViolation::ThresholdWhileActive);
            }
        } else if self.participants.is_empty() && self.winner.is_some() {
            return Err(InvariantViolation::WinnerWithoutParticipants);
        }
        Ok(())
    }

    /// Index of a participant in turn order
    pub fn position(&self, participant: &P) -> Option<usize> {
        self.participants.iter().position(|p| p == participant)
    }

    /// Whether the identifier is currently seated
    pub fn is_participant(&self, participant: &P) -> bool {
        self.participants.contains(participant)
    }

    /// Current balance of a participant
    pub fn balance_of(&self, participant: &P) -> Option<u64> {
        self.position(participant).map(|i| self.balances[i])
    }
}

impl<P> GameState<P> {
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn participants(&self) -> &[P] {
        &self.participants
    }

    pub fn balances(&self) -> &[u64] {
        &self.balances
    }

    /// Participant holding the turn (last holder once the game has ended)
    pub fn current_player(&self) -> &P {
        &self.current_player
    }

    pub fn is_active(&self) -> bool {
        self.game_active
    }

    pub fn winner(&self) -> Option<&P> {
        self.winner.as_ref()
    }

    pub fn bet_amount(&self) -> u64 {
        self.bet_amount
    }

    /// Sum of all balances
    ///
    /// Construction and admission keep this within u64, so plain addition
    /// cannot overflow here.
    pub fn total_stake(&self) -> u64 {
        self.balances.iter().sum()
    }

    /// Consume the state into its plain-data form
    pub fn into_snapshot(self) -> GameSnapshot<P> {
        GameSnapshot {
            counter: self.counter,
            participants: self.participants,
            balances: self.balances,
            current_player: self.current_player,
            game_active: self.game_active,
            winner: self.winner,
            bet_amount: self.bet_amount,
        }
    }
}

impl<P: Clone + Eq> TryFrom<GameSnapshot<P>> for GameState<P> {
    type Error = GameError;

    fn try_from(snapshot: GameSnapshot<P>) -> Result<Self, Self::Error> {
        Self::from_snapshot(snapshot)
    }
}

impl<P> From<GameState<P>> for GameSnapshot<P> {
    fn from(state: GameState<P>) -> Self {
        state.into_snapshot()
    }
}

fn has_duplicates<P: Eq>(items: &[P]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, a)| items[i + 1..].contains(a))
}

pub(crate) fn checked_total(balances: &[u64]) -> Option<u64> {
    balances.iter().try_fold(0u64, |acc, b| acc.checked_add(*b))
}
