//! Counter Game - authoritative on-chain ledger
//!
//! A Solana program that holds the ground-truth copy of each counter game.
//! Every state change is applied through `counter_logic`, the same engine the
//! client-side replica runs, so both copies stay in lockstep.

use anchor_lang::prelude::*;

mod state;
mod instructions;
mod error;

use instructions::*;
pub use state::{Config, Game};

declare_id!("7nJvEJiq2Xqxs7dxBbuxx8J926UoS9hHbbyERtdV75NL");

#[program]
pub mod counter_game {
    use super::*;

    /// Initialize the global config (one-time setup)
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        params: InitializeConfigParams,
    ) -> Result<()> {
        instructions::admin::initialize_config(ctx, params)
    }

    /// Update config parameters (admin only)
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        params: UpdateConfigParams,
    ) -> Result<()> {
        instructions::admin::update_config(ctx, params)
    }

    /// Open a game for admitted participants and escrow their stakes (operator only)
    pub fn open_game(
        ctx: Context<OpenGame>,
        participants: Vec<Pubkey>,
        balances: Vec<u64>,
        bet_amount: u64,
    ) -> Result<()> {
        instructions::game::open_game(ctx, participants, balances, bet_amount)
    }

    /// Add 1-10 to the counter on the signer's turn
    pub fn increment(ctx: Context<Increment>, value: u32) -> Result<()> {
        instructions::player::increment(ctx, value)
    }

    /// Join an active game with an opening deposit
    pub fn join_game(ctx: Context<JoinGame>, amount: u64) -> Result<()> {
        instructions::player::join_game(ctx, amount)
    }

    /// Leave a game and withdraw the remaining stake
    pub fn leave_game(ctx: Context<LeaveGame>) -> Result<()> {
        instructions::player::leave_game(ctx)
    }

    /// Force a participant out of a game (operator only)
    pub fn kick_participant(ctx: Context<KickParticipant>) -> Result<()> {
        instructions::game::kick_participant(ctx)
    }

    /// Close an emptied game account and recover rent (operator only)
    pub fn close_game(ctx: Context<CloseGame>) -> Result<()> {
        instructions::game::close_game(ctx)
    }
}
