//! Move application and win settlement

use serde::{Deserialize, Serialize};
use crate::error::GameError;
use crate::state::GameState;
use crate::{is_valid_increment, WIN_THRESHOLD};

/// Stake movement produced by a win
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement<P> {
    pub winner: P,
    /// Every other participant in turn order, with the amount it paid
    pub transfers: Vec<(P, u64)>,
}

impl<P> Settlement<P> {
    /// Total credited to the winner
    pub fn total(&self) -> u64 {
        self.transfers.iter().map(|(_, amount)| amount).sum()
    }
}

/// Result of a successful move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome<P> {
    /// Game continues; `next` now holds the turn
    NextTurn { counter: u32, next: P },
    /// Mover crossed the threshold and stakes were settled in the same step
    Won { counter: u32, settlement: Settlement<P> },
}

impl<P: Clone + Eq> GameState<P> {
    /// Apply one move by `player`
    ///
    /// Preconditions are checked in order: game active, player's turn,
    /// increment in range. A failed check leaves the state untouched.
    pub fn apply_move(&mut self, player: &P, value: u32) -> Result<MoveOutcome<P>, GameError> {
        if !self.game_active {
            return Err(GameError::GameInactive);
        }
        if *player != self.current_player {
            return Err(GameError::NotYourTurn);
        }
        if !is_valid_increment(value) {
            return Err(GameError::InvalidIncrement { value });
        }
        let index = self.position(player).ok_or(GameError::NotYourTurn)?;

        // Active games always sit below the threshold, so this cannot overflow
        self.counter += value;

        if self.counter >= WIN_THRESHOLD {
            self.game_active = false;
            self.winner = Some(player.clone());
            let settlement = self.settle_win(index);
            return Ok(MoveOutcome::Won { counter: self.counter, settlement });
        }

        let next = self.participants[(index + 1) % self.participants.len()].clone();
        self.current_player = next.clone();

        Ok(MoveOutcome::NextTurn { counter: self.counter, next })
    }

    /// Move up to `bet_amount` from every loser to the winner
    ///
    /// A loser never pays more than it holds, so no balance goes negative and
    /// the total stake is unchanged.
    fn settle_win(&mut self, w: usize) -> Settlement<P> {
        let mut transfers = Vec::with_capacity(self.participants.len() - 1);
        for i in 0..self.participants.len() {
            if i == w {
                continue;
            }
            let amount = self.bet_amount.min(self.balances[i]);
            self.balances[i] -= amount;
            self.balances[w] += amount;
            transfers.push((self.participants[i].clone(), amount));
        }

        Settlement { winner: self.participants[w].clone(), transfers }
    }
}
