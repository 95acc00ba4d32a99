//! Counter Game Logic
//!
//! State-transition engine for the wagered counter game.
//! This crate is compiled to:
//! - Native (for the on-chain program and any authoritative host)
//! - WASM (for the client-side replica used during interactive play)
//!
//! Both targets run the exact same transition function, so replaying the same
//! ordered action log always yields structurally equal states.

mod error;
mod state;
mod game;
mod membership;
mod action;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{GameError, InvariantViolation};
pub use state::{GameSnapshot, GameState};
pub use game::{MoveOutcome, Settlement};
pub use membership::Removal;
pub use action::{replay, Action, ActionOutcome, ReplayError};

/// Counter value at which the mover wins and the game ends
pub const WIN_THRESHOLD: u32 = 100;

/// Smallest increment a player may add in one move
pub const MIN_INCREMENT: u32 = 1;

/// Largest increment a player may add in one move
pub const MAX_INCREMENT: u32 = 10;

/// Whether `value` is a legal increment
pub fn is_valid_increment(value: u32) -> bool {
    (MIN_INCREMENT..=MAX_INCREMENT).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_bounds() {
        assert!(!is_valid_increment(0));
        assert!(is_valid_increment(1));
        assert!(is_valid_increment(5));
        assert!(is_valid_increment(10));
        assert!(!is_valid_increment(11));
        assert!(!is_valid_increment(u32::MAX));
    }
}
