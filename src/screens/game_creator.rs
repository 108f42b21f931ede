use super::Destination;

use crate::{
    backend::Backend,
    models::{
        NewGame, NewPlayer, GAME_VERSION_BAD_MOON_RISING, GAME_VERSION_SECTS_AND_VIOLETS,
        GAME_VERSION_TROUBLE_BREWING, TIME_OF_DAY_NIGHT,
    },
};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

pub const JOIN_ALERT: &str = "Please enter a valid game code and name!";

pub const DEFAULT_PLAYER_COUNT: i64 = 3;
pub const MIN_PLAYER_COUNT: i64 = 3;
pub const MAX_PLAYER_COUNT: i64 = 20;

pub const GAME_CODE_MAX_LEN: usize = 6;
pub const PLAYER_NAME_MAX_LEN: usize = 15;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameVersion {
    #[default]
    #[serde(rename = "Trouble Brewing")]
    TroubleBrewing,
    #[serde(rename = "Bad Moon Rising")]
    BadMoonRising,
    #[serde(rename = "Sects & Violets")]
    SectsAndViolets,
}

impl GameVersion {
    pub const ALL: [GameVersion; 3] = [
        GameVersion::TroubleBrewing,
        GameVersion::BadMoonRising,
        GameVersion::SectsAndViolets,
    ];

    /// Ruleset name as the backend knows it.
    pub fn name(&self) -> &'static str {
        return match self {
            GameVersion::TroubleBrewing => GAME_VERSION_TROUBLE_BREWING,
            GameVersion::BadMoonRising => GAME_VERSION_BAD_MOON_RISING,
            GameVersion::SectsAndViolets => GAME_VERSION_SECTS_AND_VIOLETS,
        };
    }

    pub fn label(&self) -> &'static str {
        return match self {
            GameVersion::TroubleBrewing => "Trouble Brewing (Beginner)",
            GameVersion::BadMoonRising => "Bad Moon Rising (Intermediate)",
            GameVersion::SectsAndViolets => "Sects & Violets (Intermediate)",
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateGameForm {
    pub game_version: GameVersion,
    pub ai_game_master: bool,
    /// Bounds are only a hint to the browser.
    pub player_count: i64,
}

impl Default for CreateGameForm {
    fn default() -> Self {
        return Self {
            game_version: GameVersion::default(),
            ai_game_master: false,
            player_count: DEFAULT_PLAYER_COUNT,
        };
    }
}

impl CreateGameForm {
    pub fn new_game(&self) -> NewGame {
        return NewGame {
            player_count: self.player_count,
            game_version: self.game_version.name().to_string(),
            ai_game_master: self.ai_game_master,
            turn: 0,
            time_of_day: TIME_OF_DAY_NIGHT.to_string(),
        };
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct JoinGameForm {
    pub game_code: String,
    pub player_name: String,
}

impl JoinGameForm {
    pub fn is_complete(&self) -> bool {
        return !self.game_code.is_empty() && !self.player_name.is_empty();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    /// Code or name missing; nothing was sent.
    Alert,
    Joined(Destination),
    Failed,
}

pub async fn create_game(backend: &dyn Backend, form: &CreateGameForm) -> Option<Destination> {
    return match backend.create_game(&form.new_game()).await {
        Ok(game_code) => {
            info!(%game_code, "Game created");
            Some(Destination::CurrentGame(game_code))
        }
        Err(err) => {
            error!(%err, "Game creation failed");
            None
        }
    };
}

pub async fn join_game(backend: &dyn Backend, form: &JoinGameForm) -> JoinOutcome {
    if !form.is_complete() {
        return JoinOutcome::Alert;
    }

    let new_player = NewPlayer {
        game_code: form.game_code.clone(),
        player_name: form.player_name.clone(),
    };

    return match backend.join_game(&new_player).await {
        Ok(player) => {
            info!(player_id = %player.player_id, game_code = %player.game_code, "Player created");
            JoinOutcome::Joined(Destination::CurrentGamePlayer(player.player_id))
        }
        Err(err) => {
            error!(%err, "Error joining game");
            JoinOutcome::Failed
        }
    };
}
