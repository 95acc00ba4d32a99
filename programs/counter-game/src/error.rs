//! Custom error codes

use anchor_lang::prelude::*;
use counter_logic::GameError;

#[error_code]
pub enum CounterError {
    #[msg("Game is not active")]
    GameInactive = 6000,

    #[msg("Not your turn")]
    NotYourTurn = 6001,

    #[msg("Increment must be between 1 and 10")]
    InvalidIncrement = 6002,

    #[msg("Player is already in the game")]
    AlreadyParticipant = 6003,

    #[msg("Deposit must be greater than zero")]
    InvalidDeposit = 6004,

    #[msg("Invalid initial game setup")]
    InvalidGameSetup = 6005,

    #[msg("Stored game state is corrupt")]
    CorruptState = 6006,

    #[msg("Arithmetic overflow")]
    Overflow = 6007,

    #[msg("Not authorized to perform this action")]
    Unauthorized = 6008,

    #[msg("Signer is not a participant in this game")]
    NotParticipant = 6009,

    #[msg("Game has reached maximum participants")]
    GameFull = 6010,

    #[msg("Bet amount below configured minimum")]
    BetTooSmall = 6011,

    #[msg("Game still has participants")]
    GameNotEmpty = 6012,

    #[msg("max_participants must be >= 2")]
    InvalidConfig = 6013,
}

impl From<GameError> for CounterError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::GameInactive => CounterError::GameInactive,
            GameError::NotYourTurn => CounterError::NotYourTurn,
            GameError::InvalidIncrement { .. } => CounterError::InvalidIncrement,
            GameError::AlreadyParticipant => CounterError::AlreadyParticipant,
            GameError::NonPositiveDeposit => CounterError::InvalidDeposit,
            GameError::BalanceOverflow => CounterError::Overflow,
            GameError::NoParticipants
            | GameError::BalanceCountMismatch { .. }
            | GameError::DuplicateParticipant => CounterError::InvalidGameSetup,
            GameError::Invariant(_) => CounterError::CorruptState,
        }
    }
}
