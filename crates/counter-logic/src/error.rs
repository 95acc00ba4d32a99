//! Error types for game operations.

use thiserror::Error;

/// Precondition failures reported by the engine.
///
/// Every variant leaves the game state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The game has already ended.
    #[error("game is not active")]
    GameInactive,
    /// The acting participant does not hold the turn.
    #[error("not your turn")]
    NotYourTurn,
    /// Increment outside the closed range [1, 10].
    #[error("increment {value} must be between 1 and 10")]
    InvalidIncrement { value: u32 },
    /// Joining identifier is already seated.
    #[error("participant is already in the game")]
    AlreadyParticipant,
    /// Joining deposit is zero.
    #[error("deposit must be greater than zero")]
    NonPositiveDeposit,
    /// Total stake would no longer fit in a u64.
    #[error("total stake overflows")]
    BalanceOverflow,
    /// A game needs at least one participant to start.
    #[error("game must have at least one participant")]
    NoParticipants,
    /// Initial balances are not index-aligned with participants.
    #[error("expected {participants} balances, got {balances}")]
    BalanceCountMismatch { participants: usize, balances: usize },
    /// The same identifier appears twice in the initial list.
    #[error("duplicate participant")]
    DuplicateParticipant,
    /// A reconstructed state breaks a structural invariant.
    #[error("invalid game state: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Structural invariants a `GameState` must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("participants and balances differ in length")]
    LengthMismatch,
    #[error("participants contain a duplicate")]
    DuplicateParticipant,
    #[error("current player is not a participant")]
    CurrentPlayerMissing,
    #[error("active game already has a winner")]
    WinnerWhileActive,
    #[error("empty game still names a winner")]
    WinnerWithoutParticipants,
    #[error("counter reached the threshold but the game is still active")]
    ThresholdWhileActive,
    #[error("total stake overflows")]
    StakeOverflow,
}
