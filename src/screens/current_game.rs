use crate::{
    backend::Backend,
    models::{
        find_by_name, Character, CharacterAssignment, FirstNightPacket, FirstNightPlayer,
        GameUpdate, Player, TableLog,
    },
};

use std::collections::HashMap;

use tracing::{error, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPhase {
    Idle,
    GameStarted,
    FirstNightStarted,
    FirstNightSent,
}

/// The host's view of one game.
#[derive(Debug, Clone, Default)]
pub struct HostView {
    pub game_code: String,
    pub players: Vec<Player>,

    pub game_version: Option<String>,
    pub characters: Vec<Character>,

    pub game_started: bool,
    pub first_night_started: bool,
    pub first_night_sent: bool,

    pub first_night_players: Vec<FirstNightPlayer>,
    /// Host-edited text per player id, seeded from the backend's suggestion.
    pub information: HashMap<String, String>,

    pub table_log: Option<TableLog>,
}

/// Fetches the roster without touching any view, so polls need not hold a lock
/// across the request.
pub async fn fetch_roster(backend: &dyn Backend, game_code: &str) -> Option<Vec<Player>> {
    return match backend.players_in_game(game_code).await {
        Ok(players) => Some(players),
        Err(err) => {
            error!(%game_code, %err, "Failed to fetch players");
            None
        }
    };
}

impl HostView {
    pub fn new(game_code: &str) -> Self {
        return Self {
            game_code: game_code.to_string(),
            ..Default::default()
        };
    }

    pub fn phase(&self) -> HostPhase {
        if self.first_night_sent {
            return HostPhase::FirstNightSent;
        }
        if self.first_night_started {
            return HostPhase::FirstNightStarted;
        }
        if self.game_started {
            return HostPhase::GameStarted;
        }
        return HostPhase::Idle;
    }

    /// Last fetch wins; nothing is merged.
    pub fn replace_roster(&mut self, players: Vec<Player>) {
        self.players = players;
    }

    pub async fn refresh_roster(&mut self, backend: &dyn Backend) {
        if let Some(players) = fetch_roster(backend, &self.game_code).await {
            self.replace_roster(players);
        }
    }

    #[instrument(skip_all, fields(game_code = %self.game_code))]
    pub async fn start_game(&mut self, backend: &dyn Backend) {
        if self.game_started {
            warn!("Game already started");
            return;
        }

        match backend.game(&self.game_code).await {
            Ok(game) => {
                info!(game_version = ?game.game_version, "Game version fetched");
                self.game_version = game.game_version;
            }
            Err(err) => error!(%err, "Failed to fetch game version"),
        }

        if let Some(game_version) = &self.game_version {
            match backend.characters(game_version).await {
                Ok(characters) => {
                    info!(count = characters.len(), "Characters fetched");
                    self.characters = characters;
                }
                Err(err) => error!(%err, "Failed to fetch characters"),
            }
        }

        self.game_started = true;
    }

    /// One assignment per rostered player. A missing or unknown selection assigns nothing.
    pub fn assignments(&self, selections: &HashMap<String, String>) -> Vec<CharacterAssignment> {
        return self
            .players
            .iter()
            .map(|player| CharacterAssignment {
                player_id: player.player_id.clone(),
                character_id: selections
                    .get(&player.player_id)
                    .and_then(|name| find_by_name(&self.characters, name))
                    .map(|character| character.character_id),
            })
            .collect();
    }

    /// Returns whether the first night is now under way.
    #[instrument(skip_all, fields(game_code = %self.game_code))]
    pub async fn start_first_night(
        &mut self,
        backend: &dyn Backend,
        selections: &HashMap<String, String>,
    ) -> bool {
        if self.phase() != HostPhase::GameStarted {
            warn!(phase = ?self.phase(), "First night can only start after the game has");
            return false;
        }

        let assignments = self.assignments(selections);
        if let Err(err) = backend.assign_characters(&assignments).await {
            error!(%err, "Failed to update players");
            return false;
        }

        let first_night = backend
            .first_night_players(&self.game_code, self.game_version.as_deref())
            .await;
        let turn_update = backend
            .update_game(&self.game_code, &GameUpdate::first_night())
            .await;

        let first_night_players = match (first_night, turn_update) {
            (Ok(players), Ok(_)) => players,
            (first_night, turn_update) => {
                if let Err(err) = first_night {
                    error!(%err, "Failed to get first-night players");
                }
                if let Err(err) = turn_update {
                    error!(%err, "Failed to advance game to the first night");
                }
                return false;
            }
        };

        self.information = first_night_players
            .iter()
            .map(|player| {
                let seeded = player
                    .character_action_info
                    .information_received
                    .clone()
                    .unwrap_or_default();
                (player.player_id.clone(), seeded)
            })
            .collect();
        self.first_night_players = first_night_players;
        self.first_night_started = true;

        info!(count = self.first_night_players.len(), "First night started");
        return true;
    }

    pub fn information_for(&self, player_id: &str) -> &str {
        return self
            .information
            .get(player_id)
            .map(String::as_str)
            .unwrap_or_default();
    }

    pub fn edit_information(&mut self, player_id: &str, text: String) {
        let known = self
            .first_night_players
            .iter()
            .any(|player| player.player_id == player_id);

        if !known {
            warn!(%player_id, "Ignoring information for a player without a first night");
            return;
        }

        self.information.insert(player_id.to_string(), text);
    }

    pub fn packets(&self) -> Vec<FirstNightPacket> {
        return self
            .first_night_players
            .iter()
            .map(|player| player.packet(self.information_for(&player.player_id).to_string()))
            .collect();
    }

    /// Returns whether the packets were accepted.
    #[instrument(skip_all, fields(game_code = %self.game_code))]
    pub async fn send_first_night(&mut self, backend: &dyn Backend) -> bool {
        if self.phase() != HostPhase::FirstNightStarted {
            warn!(phase = ?self.phase(), "Nothing to send");
            return false;
        }

        return match backend
            .send_first_night_info(&self.game_code, &self.packets())
            .await
        {
            Ok(()) => {
                info!("First night info successfully sent");
                self.first_night_sent = true;
                true
            }
            Err(err) => {
                error!(%err, "Failed to send first-night info");
                false
            }
        };
    }

    // TODO: call the backend once it exposes a night-ending endpoint.
    pub fn end_night(&self) {
        info!(game_code = %self.game_code, "End night requested; no backend effect");
    }

    pub async fn refresh_table_log(&mut self, backend: &dyn Backend) {
        match backend.table_log(&self.game_code).await {
            Ok(log) => self.table_log = Some(log),
            Err(err) => error!(game_code = %self.game_code, %err, "Failed to fetch table log"),
        }
    }
}
