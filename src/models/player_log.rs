use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const ACTION_TYPE_RESPONSE: &str = "response";
pub const INFORMATION_TYPE_CUSTOM: &str = "custom";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PlayerAction {
    pub action_id: i64,
    pub action_type: String,
    pub action_input: String,
    pub turn: i64,
    pub response_required: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PlayerInformation {
    pub information_id: i64,
    pub information_type: String,
    pub information_input: String,
    pub turn: i64,
    pub response_required: bool,
}

/// Actions and information addressed to one player for the game's current turn.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PlayerLog {
    pub actions: Vec<PlayerAction>,
    pub information: Vec<PlayerInformation>,
}

/// The same listing for every player at the table, keyed by player id.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TableLog {
    pub actions: BTreeMap<String, Vec<PlayerAction>>,
    pub information: BTreeMap<String, Vec<PlayerInformation>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewAction {
    pub player_id: String,
    pub action_type: String,
    pub action_input: String,
    pub response_required: bool,
    pub turn: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewInformation {
    pub player_id: String,
    pub information_type: String,
    pub information_input: String,
    pub response_required: bool,
    pub turn: i64,
}
