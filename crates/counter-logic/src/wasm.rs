//! WASM bindings for the client-side game replica

#![cfg(feature = "wasm")]

use serde::Serialize;
use wasm_bindgen::prelude::*;
use crate::{replay, Action, GameSnapshot, GameState};

/// Install panic hook so panics surface in the browser console
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(Serialize)]
struct RemovedInfo {
    participant: String,
    amount: u64,
    forfeited: u64,
}

/// Off-chain replica that applies moves optimistically as they are observed
#[wasm_bindgen]
pub struct CounterGameClient {
    state: GameState<String>,
}

#[wasm_bindgen]
impl CounterGameClient {
    /// Create a replica from JSON arrays of participant ids and balances
    #[wasm_bindgen(constructor)]
    pub fn new(
        participants_json: &str,
        bet_amount: u64,
        balances_json: &str,
    ) -> Result<CounterGameClient, JsError> {
        let participants: Vec<String> = serde_json::from_str(participants_json)
            .map_err(|e| JsError::new(&format!("Invalid participants: {}", e)))?;
        let balances: Vec<u64> = serde_json::from_str(balances_json)
            .map_err(|e| JsError::new(&format!("Invalid balances: {}", e)))?;

        let state = GameState::new(participants, balances, bet_amount)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { state })
    }

    /// Restore a replica from a snapshot produced by any host
    #[wasm_bindgen(js_name = fromSnapshot)]
    pub fn from_snapshot(snapshot_json: &str) -> Result<CounterGameClient, JsError> {
        let snapshot: GameSnapshot<String> = serde_json::from_str(snapshot_json)
            .map_err(|e| JsError::new(&format!("Invalid snapshot: {}", e)))?;
        let state = GameState::from_snapshot(snapshot)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { state })
    }

    /// Add `value` to the counter on behalf of `player`
    pub fn increment(&mut self, player: &str, value: u32) -> Result<JsValue, JsError> {
        let outcome = self
            .state
            .apply_move(&player.to_string(), value)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&outcome)
    }

    /// Remove a participant; returns `null` if it was not seated
    #[wasm_bindgen(js_name = removeParticipant)]
    pub fn remove_participant(&mut self, player: &str) -> Result<JsValue, JsError> {
        match self.state.remove_participant(&player.to_string()) {
            Some(removal) => to_js(&RemovedInfo {
                participant: removal.participant,
                amount: removal.balance,
                forfeited: removal.forfeited,
            }),
            None => Ok(JsValue::NULL),
        }
    }

    /// Seat a new participant; returns `false` if the join was rejected
    #[wasm_bindgen(js_name = joinChannel)]
    pub fn join_channel(&mut self, player: &str, amount: u64) -> bool {
        match self.state.add_participant(player.to_string(), amount) {
            Ok(()) => true,
            Err(e) => {
                warn(&format!("Player {} cannot join: {}", player, e));
                false
            }
        }
    }

    /// Apply one JSON-encoded action, e.g. `{"move":{"player":"A","value":3}}`
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<JsValue, JsError> {
        let action: Action<String> = serde_json::from_str(action_json)
            .map_err(|e| JsError::new(&format!("Invalid action: {}", e)))?;
        let outcome = self
            .state
            .apply(action)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&outcome)
    }

    /// Current state as a JS object
    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.state.snapshot())
    }

    /// Current state as JSON, for comparison against the authoritative copy
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.state.snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

/// Replay an action log against a snapshot, exactly as the ledger does
///
/// # Arguments
/// * `snapshot_json` - JSON serialized GameSnapshot to start from
/// * `actions_json` - JSON array of actions in application order
///
/// # Returns
/// JSON serialized GameSnapshot after the last action
#[wasm_bindgen(js_name = replayActions)]
pub fn replay_actions(snapshot_json: &str, actions_json: &str) -> Result<String, JsError> {
    let snapshot: GameSnapshot<String> = serde_json::from_str(snapshot_json)
        .map_err(|e| JsError::new(&format!("Invalid snapshot: {}", e)))?;
    let actions: Vec<Action<String>> = serde_json::from_str(actions_json)
        .map_err(|e| JsError::new(&format!("Invalid actions: {}", e)))?;

    let initial = GameState::from_snapshot(snapshot)
        .map_err(|e| JsError::new(&e.to_string()))?;
    let state = replay(initial, actions).map_err(|e| JsError::new(&e.to_string()))?;

    serde_json::to_string(&state.snapshot())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
