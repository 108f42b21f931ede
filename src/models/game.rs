use serde::{Deserialize, Serialize};

pub const TIME_OF_DAY_NIGHT: &str = "night";

pub const GAME_VERSION_TROUBLE_BREWING: &str = "Trouble Brewing";
pub const GAME_VERSION_BAD_MOON_RISING: &str = "Bad Moon Rising";
pub const GAME_VERSION_SECTS_AND_VIOLETS: &str = "Sects & Violets";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Game {
    pub game_code: String,
    pub player_count: Option<i64>,
    pub game_version: Option<String>,
    pub ai_game_master: Option<bool>,
    pub turn: Option<i64>,
    pub time_of_day: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewGame {
    pub player_count: i64,
    pub game_version: String,
    pub ai_game_master: bool,
    pub turn: i64,
    pub time_of_day: String,
}

/// Partial update; unset fields are left alone by the backend.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct GameUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
}

impl GameUpdate {
    pub fn first_night() -> Self {
        return Self {
            turn: Some(1),
            time_of_day: Some(TIME_OF_DAY_NIGHT.to_string()),
        };
    }
}
