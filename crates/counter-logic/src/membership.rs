//! Dynamic membership: participants joining and leaving mid-game

use serde::{Deserialize, Serialize};
use crate::error::GameError;
use crate::state::GameState;

/// Record of a departed participant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal<P> {
    pub participant: P,
    /// Balance held immediately before removal
    pub balance: u64,
    /// Portion of `balance` credited to the last remaining player by leave
    /// settlement (zero when the departure did not end the game)
    pub forfeited: u64,
}

impl<P> Removal<P> {
    /// Amount a host owes the departed participant
    pub fn payout(&self) -> u64 {
        self.balance - self.forfeited
    }
}

impl<P: Clone + Eq> GameState<P> {
    /// Remove a participant and its balance entry
    ///
    /// Returns `None` when the identifier is not seated; late or duplicate
    /// removals are a normal no-op. Otherwise:
    /// - the last departure ends the game with no winner;
    /// - leaving an active game with one player left makes that player the
    ///   winner and credits it `min(bet_amount, departed balance)`;
    /// - if the departing player held the turn, the turn passes to whoever now
    ///   occupies its old index, wrapping to the front.
    pub fn remove_participant(&mut self, participant: &P) -> Option<Removal<P>> {
        let index = self.position(participant)?;
        let was_active = self.game_active;

        let removed = self.participants.remove(index);
        let balance = self.balances.remove(index);
        let mut forfeited = 0;

        if self.participants.is_empty() {
            self.game_active = false;
            self.winner = None;
            return Some(Removal { participant: removed, balance, forfeited });
        }

        if self.participants.len() == 1 && was_active {
            self.game_active = false;
            self.winner = Some(self.participants[0].clone());
            // Bounded by the pre-removal total, which fits in u64
            forfeited = self.bet_amount.min(balance);
            self.balances[0] += forfeited;
        }

        if self.game_active && self.current_player == removed {
            self.current_player = self.participants[index % self.participants.len()].clone();
        }

        Some(Removal { participant: removed, balance, forfeited })
    }

    /// Seat a new participant at the end of turn order with an opening balance
    ///
    /// A finished game stays finished; reactivation is the host's call.
    pub fn add_participant(&mut self, participant: P, amount: u64) -> Result<(), GameError> {
        if self.is_participant(&participant) {
            return Err(GameError::AlreadyParticipant);
        }
        if amount == 0 {
            return Err(GameError::NonPositiveDeposit);
        }
        self.total_stake()
            .checked_add(amount)
            .ok_or(GameError::BalanceOverflow)?;

        self.participants.push(participant);
        self.balances.push(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(names: &[&str], balances: &[u64], bet: u64) -> GameState<String> {
        GameState::new(
            names.iter().map(|s| s.to_string()).collect(),
            balances.to_vec(),
            bet,
        )
        .unwrap()
    }

    fn id(name: &str) -> String {
        name.to_string()
    }

    fn names(g: &GameState<String>) -> Vec<&str> {
        g.participants().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_remove_middle_participant() {
        let mut g = game(&["Alice", "Bob", "Carol"], &[100, 100, 100], 50);
        let removal = g.remove_participant(&id("Bob")).unwrap();
        assert_eq!(removal, Removal { participant: id("Bob"), balance: 100, forfeited: 0 });
        assert_eq!(removal.payout(), 100);
        assert_eq!(names(&g), ["Alice", "Carol"]);
        assert_eq!(g.balances(), &[100, 100]);
        assert!(g.is_active());
        assert_eq!(g.current_player(), "Alice");
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut g = game(&["Alice", "Bob"], &[100, 100], 50);
        let before = g.clone();
        assert_eq!(g.remove_participant(&id("Carol")), None);
        assert_eq!(g, before);
    }

    #[test]
    fn test_remove_twice_is_none() {
        let mut g = game(&["Alice", "Bob", "Carol"], &[100, 100, 100], 50);
        assert!(g.remove_participant(&id("Carol")).is_some());
        assert_eq!(g.remove_participant(&id("Carol")), None);
    }

    #[test]
    fn test_leaving_two_player_game_hands_win() {
        let mut g = game(&["Alice", "Bob"], &[100, 100], 50);
        let removal = g.remove_participant(&id("Alice")).unwrap();
        assert_eq!(removal.balance, 100);
        assert_eq!(removal.forfeited, 50);
        assert_eq!(removal.payout(), 50);
        assert!(!g.is_active());
        assert_eq!(g.winner(), Some(&id("Bob")));
        assert_eq!(g.balances(), &[150]);
        assert!(g.check_invariants().is_ok());
    }

    #[test]
    fn test_leaver_with_small_balance_forfeits_all() {
        let mut g = game(&["Alice", "Bob"], &[30, 100], 100);
        let removal = g.remove_participant(&id("Alice")).unwrap();
        assert_eq!(removal.forfeited, 30);
        assert_eq!(removal.payout(), 0);
        assert_eq!(g.winner(), Some(&id("Bob")));
        assert_eq!(g.balances(), &[130]);
    }

    #[test]
    fn test_leave_settlement_ignores_turn() {
        let mut g = game(&["A", "B"], &[100, 100], 50);
        g.apply_move(&id("A"), 10).unwrap();
        g.apply_move(&id("B"), 1).unwrap();
        assert_eq!(g.counter(), 11);
        assert_eq!(g.current_player(), "A");

        g.remove_participant(&id("B")).unwrap();
        assert_eq!(names(&g), ["A"]);
        assert_eq!(g.winner(), Some(&id("A")));
        assert_eq!(g.balances(), &[150]);
        assert!(!g.is_active());
    }

    #[test]
    fn test_last_departure_ends_without_winner() {
        let mut g = game(&["Alice"], &[100], 50);
        let removal = g.remove_participant(&id("Alice")).unwrap();
        assert_eq!(removal, Removal { participant: id("Alice"), balance: 100, forfeited: 0 });
        assert!(!g.is_active());
        assert_eq!(g.winner(), None);
        assert!(g.participants().is_empty());
        assert!(g.balances().is_empty());
        assert!(g.check_invariants().is_ok());
    }

    #[test]
    fn test_current_player_removed_passes_turn() {
        let mut g = game(&["A", "B", "C"], &[100, 100, 100], 50);
        g.apply_move(&id("A"), 10).unwrap();
        assert_eq!(g.current_player(), "B");

        g.remove_participant(&id("B")).unwrap();
        assert_eq!(g.current_player(), "C");
        assert_eq!(names(&g), ["A", "C"]);
        assert!(g.is_active());
    }

    #[test]
    fn test_last_in_order_current_player_wraps() {
        let mut g = game(&["Alice", "Bob", "Carol"], &[100, 100, 100], 50);
        g.apply_move(&id("Alice"), 10).unwrap();
        g.apply_move(&id("Bob"), 10).unwrap();
        assert_eq!(g.current_player(), "Carol");

        g.remove_participant(&id("Carol")).unwrap();
        assert_eq!(g.current_player(), "Alice");
        assert_eq!(names(&g), ["Alice", "Bob"]);
    }

    #[test]
    fn test_removing_earlier_player_keeps_turn_holder() {
        let mut g = game(&["A", "B", "C", "D"], &[1, 1, 1, 1], 1);
        g.apply_move(&id("A"), 1).unwrap();
        g.apply_move(&id("B"), 1).unwrap();
        assert_eq!(g.current_player(), "C");

        g.remove_participant(&id("A")).unwrap();
        assert_eq!(g.current_player(), "C");
        g.apply_move(&id("C"), 1).unwrap();
        assert_eq!(g.current_player(), "D");
        g.apply_move(&id("D"), 1).unwrap();
        assert_eq!(g.current_player(), "B");
    }

    #[test]
    fn test_leaving_finished_game_does_not_settle_again() {
        let mut g = game(&["Alice", "Bob"], &[100, 100], 50);
        g.remove_participant(&id("Alice")).unwrap();
        assert_eq!(g.balances(), &[150]);

        let removal = g.remove_participant(&id("Bob")).unwrap();
        assert_eq!(removal, Removal { participant: id("Bob"), balance: 150, forfeited: 0 });
        assert_eq!(g.winner(), None);
    }

    #[test]
    fn test_join_appends() {
        let mut g = game(&["Alice"], &[100], 50);
        g.add_participant(id("Bob"), 150).unwrap();
        assert_eq!(names(&g), ["Alice", "Bob"]);
        assert_eq!(g.balances(), &[100, 150]);
        assert_eq!(g.current_player(), "Alice");
    }

    #[test]
    fn test_join_rejects_existing_participant() {
        let mut g = game(&["Alice"], &[100], 50);
        let before = g.clone();
        assert_eq!(g.add_participant(id("Alice"), 100), Err(GameError::AlreadyParticipant));
        assert_eq!(g, before);
    }

    #[test]
    fn test_join_rejects_zero_deposit() {
        let mut g = game(&["Alice"], &[100], 50);
        assert_eq!(g.add_participant(id("Bob"), 0), Err(GameError::NonPositiveDeposit));
        assert_eq!(names(&g), ["Alice"]);
    }

    #[test]
    fn test_join_rejects_stake_overflow() {
        let mut g = game(&["Alice"], &[u64::MAX - 5], 50);
        assert_eq!(g.add_participant(id("Bob"), 6), Err(GameError::BalanceOverflow));
        g.add_participant(id("Bob"), 5).unwrap();
        assert_eq!(g.total_stake(), u64::MAX);
    }

    #[test]
    fn test_join_does_not_reactivate() {
        let mut g = game(&["Alice"], &[100], 50);
        g.remove_participant(&id("Alice")).unwrap();
        g.add_participant(id("Bob"), 10).unwrap();
        assert!(!g.is_active());
        assert_eq!(g.winner(), None);
        assert!(g.check_invariants().is_ok());
    }

    #[test]
    fn test_joined_player_enters_rotation() {
        let mut g = game(&["Alice", "Bob"], &[100, 100], 50);
        g.apply_move(&id("Alice"), 1).unwrap();
        g.add_participant(id("Carol"), 70).unwrap();
        g.apply_move(&id("Bob"), 1).unwrap();
        assert_eq!(g.current_player(), "Carol");
        g.apply_move(&id("Carol"), 1).unwrap();
        assert_eq!(g.current_player(), "Alice");
    }
}
