//! Game lifecycle instructions run by the operator

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use counter_logic::GameState;
use crate::state::{Config, Game};
use crate::error::CounterError;
use super::player::settle_departure;

/// Open a game for an admitted set of participants
///
/// Participants, balances and bet arrive already validated by the admission
/// layer; the operator escrows the opening stakes.
#[derive(Accounts)]
#[instruction(participants: Vec<Pubkey>)]
pub struct OpenGame<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = operator @ CounterError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = operator,
        space = Game::space(participants.len()),
        seeds = [b"game", config.games_opened.to_le_bytes().as_ref()],
        bump
    )]
    pub game: Account<'info, Game>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn open_game(
    ctx: Context<OpenGame>,
    participants: Vec<Pubkey>,
    balances: Vec<u64>,
    bet_amount: u64,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let game = &mut ctx.accounts.game;
    let operator = &ctx.accounts.operator;
    let clock = Clock::get()?;

    require!(bet_amount >= config.min_bet, CounterError::BetTooSmall);
    require!(
        participants.len() <= config.max_participants as usize,
        CounterError::GameFull
    );

    let engine = GameState::new(participants, balances, bet_amount)
        .map_err(CounterError::from)?;
    let escrow = engine.total_stake();

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: operator.to_account_info(),
                to: game.to_account_info(),
            },
        ),
        escrow,
    )?;

    game.id = config.games_opened;
    game.operator = operator.key();
    game.moves_applied = 0;
    game.created_at = clock.unix_timestamp;
    game.bump = ctx.bumps.game;
    game.store(engine);

    config.games_opened = config.games_opened
        .checked_add(1)
        .ok_or(CounterError::Overflow)?;

    msg!(
        "Game {} opened with {} participants, bet = {}, escrow = {} lamports, first turn = {}",
        game.id,
        game.participants.len(),
        game.bet_amount,
        escrow,
        game.current_player
    );

    Ok(())
}

/// Force a participant out of a game (e.g. after it stopped responding)
#[derive(Accounts)]
pub struct KickParticipant<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = operator @ CounterError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"game", game.id.to_le_bytes().as_ref()],
        bump = game.bump
    )]
    pub game: Account<'info, Game>,

    /// CHECK: Payout destination; must be a seated participant, checked in the handler
    #[account(mut)]
    pub participant: AccountInfo<'info>,

    pub operator: Signer<'info>,
}

pub fn kick_participant(ctx: Context<KickParticipant>) -> Result<()> {
    let recipient = ctx.accounts.participant.to_account_info();
    let removal = settle_departure(&mut ctx.accounts.game, &recipient)?;

    msg!(
        "Operator removed {} from game {}, paid {} lamports ({} forfeited)",
        removal.participant,
        ctx.accounts.game.id,
        removal.payout(),
        removal.forfeited
    );

    Ok(())
}

/// Close an emptied game and recover its rent
#[derive(Accounts)]
pub struct CloseGame<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = operator @ CounterError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"game", game.id.to_le_bytes().as_ref()],
        bump = game.bump,
        close = operator
    )]
    pub game: Account<'info, Game>,

    #[account(mut)]
    pub operator: Signer<'info>,
}

pub fn close_game(ctx: Context<CloseGame>) -> Result<()> {
    let game = &ctx.accounts.game;

    require!(game.participants.is_empty(), CounterError::GameNotEmpty);

    msg!("Game {} closed after {} moves", game.id, game.moves_applied);

    Ok(())
}
