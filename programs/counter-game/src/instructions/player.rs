//! Player instructions

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use counter_logic::{MoveOutcome, Removal};
use crate::state::{Config, Game};
use crate::error::CounterError;

/// Add to the counter on the signer's turn
#[derive(Accounts)]
pub struct Increment<'info> {
    #[account(
        mut,
        seeds = [b"game", game.id.to_le_bytes().as_ref()],
        bump = game.bump
    )]
    pub game: Account<'info, Game>,

    pub player: Signer<'info>,
}

pub fn increment(ctx: Context<Increment>, value: u32) -> Result<()> {
    let game = &mut ctx.accounts.game;
    let player = ctx.accounts.player.key();

    let mut engine = game.to_engine()?;
    let outcome = engine
        .apply_move(&player, value)
        .map_err(CounterError::from)?;

    game.store(engine);
    game.moves_applied = game.moves_applied
        .checked_add(1)
        .ok_or(CounterError::Overflow)?;

    match outcome {
        MoveOutcome::NextTurn { counter, next } => {
            msg!(
                "Player {} incremented game {} by {}, counter = {}, next = {}",
                player,
                game.id,
                value,
                counter,
                next
            );
        }
        MoveOutcome::Won { counter, settlement } => {
            msg!(
                "Game {} over at counter {}: winner {} collected {} lamports",
                game.id,
                counter,
                settlement.winner,
                settlement.total()
            );
            for (loser, amount) in &settlement.transfers {
                msg!("{} paid {} lamports", loser, amount);
            }
        }
    }

    Ok(())
}

/// Join an active game with an opening deposit
#[derive(Accounts)]
pub struct JoinGame<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"game", game.id.to_le_bytes().as_ref()],
        bump = game.bump,
        realloc = Game::space(game.participants.len() + 1),
        realloc::payer = player,
        realloc::zero = false
    )]
    pub game: Account<'info, Game>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn join_game(ctx: Context<JoinGame>, amount: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    let game = &mut ctx.accounts.game;
    let player = &ctx.accounts.player;

    // Finished games only accept withdrawals on-chain
    require!(game.game_active, CounterError::GameInactive);
    require!(
        game.participants.len() < config.max_participants as usize,
        CounterError::GameFull
    );

    let mut engine = game.to_engine()?;
    engine
        .add_participant(player.key(), amount)
        .map_err(CounterError::from)?;

    // Escrow the deposit in the game account
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: player.to_account_info(),
                to: game.to_account_info(),
            },
        ),
        amount,
    )?;

    game.store(engine);

    msg!(
        "Player {} joined game {} at seat {} with {} lamports",
        player.key(),
        game.id,
        game.participants.len() - 1,
        amount
    );

    Ok(())
}

/// Leave a game and withdraw what remains of the signer's stake
///
/// Leaving an active game with one opponent left forfeits up to the bet amount
/// to that opponent. After the game ends, leaving is how players withdraw.
#[derive(Accounts)]
pub struct LeaveGame<'info> {
    #[account(
        mut,
        seeds = [b"game", game.id.to_le_bytes().as_ref()],
        bump = game.bump
    )]
    pub game: Account<'info, Game>,

    #[account(mut)]
    pub player: Signer<'info>,
}

pub fn leave_game(ctx: Context<LeaveGame>) -> Result<()> {
    let recipient = ctx.accounts.player.to_account_info();
    let removal = settle_departure(&mut ctx.accounts.game, &recipient)?;

    msg!(
        "Player {} left game {} with {} lamports ({} forfeited)",
        removal.participant,
        ctx.accounts.game.id,
        removal.payout(),
        removal.forfeited
    );

    Ok(())
}

/// Remove `recipient` from the game and pay out its remaining stake
///
/// Escrow holds exactly the sum of balances, and removal shrinks that sum by
/// `payout()`, so the account never pays out more than it holds in stakes.
pub(crate) fn settle_departure<'info>(
    game: &mut Account<'info, Game>,
    recipient: &AccountInfo<'info>,
) -> Result<Removal<Pubkey>> {
    let was_active = game.game_active;
    let mut engine = game.to_engine()?;
    let removal = engine
        .remove_participant(recipient.key)
        .ok_or(CounterError::NotParticipant)?;

    game.store(engine);

    if was_active && !game.game_active {
        match game.winner {
            Some(winner) => msg!("Game {} ended by departure, winner = {}", game.id, winner),
            None => msg!("Game {} ended with no participants left", game.id),
        }
    }

    let payout = removal.payout();
    **game.to_account_info().try_borrow_mut_lamports()? -= payout;
    **recipient.try_borrow_mut_lamports()? += payout;

    Ok(removal)
}
