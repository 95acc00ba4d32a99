//! Transition inputs and action-log replay
//!
//! Moves, joins and leaves are all order-sensitive, so they share one input
//! type. Two hosts that replay the same log from the same starting state end
//! in structurally equal states.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::error::GameError;
use crate::game::MoveOutcome;
use crate::membership::Removal;
use crate::state::GameState;

/// One entry of the action log
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action<P> {
    Move { player: P, value: u32 },
    Join { participant: P, amount: u64 },
    Leave { participant: P },
}

/// Result of applying a single action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome<P> {
    Moved(MoveOutcome<P>),
    Joined,
    Left(Removal<P>),
    /// Leave for an identifier that is not seated
    NotFound,
}

/// First action in a log that failed to apply
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("action {index} rejected: {error}")]
pub struct ReplayError<P> {
    pub index: usize,
    pub action: Action<P>,
    pub error: GameError,
}

impl<P: Clone + Eq> GameState<P> {
    /// Apply one action through the matching engine operation
    pub fn apply(&mut self, action: Action<P>) -> Result<ActionOutcome<P>, GameError> {
        match action {
            Action::Move { player, value } => {
                self.apply_move(&player, value).map(ActionOutcome::Moved)
            }
            Action::Join { participant, amount } => {
                self.add_participant(participant, amount).map(|()| ActionOutcome::Joined)
            }
            Action::Leave { participant } => Ok(self
                .remove_participant(&participant)
                .map_or(ActionOutcome::NotFound, ActionOutcome::Left)),
        }
    }
}

/// Replay an ordered action log from `initial`
///
/// Stops at the first rejected action. Leaves for absent participants are
/// no-ops, not failures.
pub fn replay<P, I>(initial: GameState<P>, actions: I) -> Result<GameState<P>, ReplayError<P>>
where
    P: Clone + Eq,
    I: IntoIterator<Item = Action<P>>,
{
    let mut state = initial;
    for (index, action) in actions.into_iter().enumerate() {
        if let Err(error) = state.apply(action.clone()) {
            return Err(ReplayError { index, action, error });
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> String {
        name.to_string()
    }

    fn mv(player: &str, value: u32) -> Action<String> {
        Action::Move { player: id(player), value }
    }

    fn start() -> GameState<String> {
        GameState::new(vec![id("A"), id("B"), id("C")], vec![100, 100, 100], 50).unwrap()
    }

    #[test]
    fn test_apply_dispatch() {
        let mut g = start();
        assert!(matches!(g.apply(mv("A", 3)), Ok(ActionOutcome::Moved(_))));
        assert_eq!(g.apply(Action::Join { participant: id("D"), amount: 5 }), Ok(ActionOutcome::Joined));
        assert_eq!(g.apply(Action::Leave { participant: id("Z") }), Ok(ActionOutcome::NotFound));
        assert!(matches!(
            g.apply(Action::Leave { participant: id("D") }),
            Ok(ActionOutcome::Left(Removal { balance: 5, .. }))
        ));
        assert_eq!(g.apply(mv("A", 3)), Err(GameError::NotYourTurn));
    }

    #[test]
    fn test_replay_matches_direct_calls() {
        let log = vec![
            mv("A", 10),
            Action::Leave { participant: id("B") },
            mv("C", 4),
            Action::Join { participant: id("D"), amount: 20 },
            mv("A", 7),
            mv("C", 1),
        ];
        let replayed = replay(start(), log).unwrap();

        let mut direct = start();
        direct.apply_move(&id("A"), 10).unwrap();
        direct.remove_participant(&id("B")).unwrap();
        direct.apply_move(&id("C"), 4).unwrap();
        direct.add_participant(id("D"), 20).unwrap();
        direct.apply_move(&id("A"), 7).unwrap();
        direct.apply_move(&id("C"), 1).unwrap();

        assert_eq!(replayed, direct);
        assert_eq!(replayed.snapshot(), direct.snapshot());
        assert_eq!(replayed.counter(), 22);
        assert_eq!(replayed.current_player(), "D");
    }

    #[test]
    fn test_replay_reports_first_failure() {
        let log = vec![mv("A", 5), mv("C", 5), mv("B", 5)];
        let err = replay(start(), log).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.action, mv("C", 5));
        assert_eq!(err.error, GameError::NotYourTurn);
        assert_eq!(err.to_string(), "action 1 rejected: not your turn");
    }

    #[test]
    fn test_order_matters() {
        let a = replay(start(), vec![Action::Leave { participant: id("A") }, mv("B", 1)]);
        let b = replay(start(), vec![mv("B", 1), Action::Leave { participant: id("A") }]);
        assert!(a.is_ok());
        assert!(b.is_err());
    }

    #[test]
    fn test_action_json() {
        let action: Action<String> =
            serde_json::from_str(r#"{"move":{"player":"A","value":3}}"#).unwrap();
        assert_eq!(action, mv("A", 3));
        let json = serde_json::to_string(&Action::Leave { participant: id("B") }).unwrap();
        assert_eq!(json, r#"{"leave":{"participant":"B"}}"#);
    }
}
