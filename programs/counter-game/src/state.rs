//! Account state definitions

use anchor_lang::prelude::*;
use counter_logic::{GameSnapshot, GameState};
use crate::error::CounterError;

/// Global configuration account
#[account]
#[derive(Default)]
pub struct Config {
    /// Admin who can update config
    pub admin: Pubkey,
    /// Operator who admits players into new games and forces departures
    pub operator: Pubkey,
    /// Maximum seats per game (>= 2)
    pub max_participants: u16,
    /// Smallest bet amount a game may be opened with (lamports)
    pub min_bet: u64,
    /// Number of games opened so far; next game id
    pub games_opened: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const LEN: usize = 8 + // discriminator
        32 +  // admin
        32 +  // operator
        2 +   // max_participants
        8 +   // min_bet
        8 +   // games_opened
        1 +   // bump
        16;   // padding
}

/// Game account: authoritative copy of one game's state
///
/// The engine fields mirror `counter_logic::GameSnapshot<Pubkey>` one-to-one.
/// Sized dynamically; grows by one seat each time a player joins.
#[account]
#[derive(Default)]
pub struct Game {
    /// Game ID (index into config.games_opened)
    pub id: u64,
    /// Operator that admitted the opening participants
    pub operator: Pubkey,
    pub counter: u32,
    /// Turn order
    pub participants: Vec<Pubkey>,
    /// Escrowed stake per participant (lamports), index-aligned with participants
    pub balances: Vec<u64>,
    pub current_player: Pubkey,
    pub game_active: bool,
    /// None until somebody wins
    pub winner: Option<Pubkey>,
    /// Per-loser settlement cap, fixed at open
    pub bet_amount: u64,
    /// Number of accepted moves
    pub moves_applied: u32,
    /// Timestamp when the game was opened
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

/// Bytes added per seat (32-byte pubkey + 8-byte balance)
pub const BYTES_PER_PARTICIPANT: usize = 40;

impl Game {
    /// Base space for a game with empty vecs
    pub const BASE_SPACE: usize = 8 + // discriminator
        8 +   // id
        32 +  // operator
        4 +   // counter
        4 +   // participants vec len
        4 +   // balances vec len
        32 +  // current_player
        1 +   // game_active
        33 +  // winner (option tag + pubkey)
        8 +   // bet_amount
        4 +   // moves_applied
        8 +   // created_at
        1 +   // bump
        32;   // padding

    /// Space needed for a game with the given number of seats
    pub fn space(participant_count: usize) -> usize {
        Self::BASE_SPACE + participant_count * BYTES_PER_PARTICIPANT
    }

    /// Load the engine view, rejecting a stored state that breaks an invariant
    pub fn to_engine(&self) -> Result<GameState<Pubkey>> {
        let snapshot = GameSnapshot {
            counter: self.counter,
            participants: self.participants.clone(),
            balances: self.balances.clone(),
            current_player: self.current_player,
            game_active: self.game_active,
            winner: self.winner,
            bet_amount: self.bet_amount,
        };
        let state = GameState::from_snapshot(snapshot).map_err(CounterError::from)?;
        Ok(state)
    }

    /// Write an engine state back into the account
    pub fn store(&mut self, state: GameState<Pubkey>) {
        let GameSnapshot {
            counter,
            participants,
            balances,
            current_player,
            game_active,
            winner,
            bet_amount,
        } = state.into_snapshot();

        self.counter = counter;
        self.participants = participants;
        self.balances = balances;
        self.current_player = current_player;
        self.game_active = game_active;
        self.winner = winner;
        self.bet_amount = bet_amount;
    }
}
