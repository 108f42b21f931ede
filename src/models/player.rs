use super::Character;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Player {
    pub player_id: String,
    pub player_name: String,
    pub game_code: String,

    /// Only reported by the single-player lookup.
    pub turn: Option<i64>,

    pub character_id: Option<i64>,
    pub character: Option<Character>,

    pub vote_token_remaining: Option<bool>,
    pub creation_date: Option<String>,
    pub dead: Option<bool>,
    pub protected: Option<bool>,
}

impl Player {
    pub fn current_turn(&self) -> i64 {
        return self.turn.unwrap_or_default();
    }

    pub fn character_id_label(&self) -> String {
        return match self.character_id {
            Some(id) => id.to_string(),
            None => String::new(),
        };
    }

    pub fn vote_token_label(&self) -> &'static str {
        return if self.vote_token_remaining.unwrap_or(false) {
            "Yes"
        } else {
            "No"
        };
    }

    pub fn creation_date_label(&self) -> String {
        let Some(raw) = &self.creation_date else {
            return String::new();
        };

        return match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(date) => date.format("%Y-%m-%d %H:%M:%S").to_string(),
            Err(_) => raw.clone(),
        };
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub game_code: String,
    pub player_name: String,
}
