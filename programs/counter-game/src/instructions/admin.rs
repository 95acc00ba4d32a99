//! Admin instructions

use anchor_lang::prelude::*;
use crate::state::Config;
use crate::error::CounterError;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeConfigParams {
    pub operator: Pubkey,
    pub max_participants: u16,
    pub min_bet: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateConfigParams {
    pub operator: Option<Pubkey>,
    pub max_participants: Option<u16>,
    pub min_bet: Option<u64>,
}

/// Initialize global config
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = Config::LEN,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    params: InitializeConfigParams,
) -> Result<()> {
    let InitializeConfigParams {
        operator,
        max_participants,
        min_bet,
    } = params;

    require!(max_participants >= 2, CounterError::InvalidConfig);

    let config = &mut ctx.accounts.config;

    config.admin = ctx.accounts.admin.key();
    config.operator = operator;
    config.max_participants = max_participants;
    config.min_bet = min_bet;
    config.games_opened = 0;
    config.bump = ctx.bumps.config;

    msg!(
        "Config initialized by {}, operator = {}, max_participants = {}, min_bet = {}",
        config.admin,
        config.operator,
        config.max_participants,
        config.min_bet
    );

    Ok(())
}

/// Update config parameters
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ CounterError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

pub fn update_config(
    ctx: Context<UpdateConfig>,
    params: UpdateConfigParams,
) -> Result<()> {
    let UpdateConfigParams {
        operator,
        max_participants,
        min_bet,
    } = params;

    let config = &mut ctx.accounts.config;

    if let Some(op) = operator {
        config.operator = op;
    }

    if let Some(max) = max_participants {
        require!(max >= 2, CounterError::InvalidConfig);
        config.max_participants = max;
    }

    if let Some(bet) = min_bet {
        config.min_bet = bet;
    }

    msg!("Config updated");
    Ok(())
}
