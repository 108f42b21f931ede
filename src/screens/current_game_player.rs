use crate::{
    backend::{is_unreachable, Backend},
    models::{
        NewAction, NewInformation, Player, PlayerAction, PlayerInformation, ACTION_TYPE_RESPONSE,
        INFORMATION_TYPE_CUSTOM,
    },
};

use std::collections::HashMap;

use tracing::{error, info, instrument};

/// A player's own dashboard. Nothing here is polled; the player refreshes by hand.
#[derive(Debug, Clone, Default)]
pub struct PlayerDashboard {
    pub player_id: String,
    /// `None` once a lookup failed; the screen then only says so.
    pub player: Option<Player>,

    pub actions: Vec<PlayerAction>,
    pub information: Vec<PlayerInformation>,

    /// Unsent response text per action id.
    pub responses: HashMap<i64, String>,
    pub new_information: String,
}

impl PlayerDashboard {
    pub fn new(player_id: &str) -> Self {
        return Self {
            player_id: player_id.to_string(),
            ..Default::default()
        };
    }

    pub fn response_draft(&self, action_id: i64) -> &str {
        return self
            .responses
            .get(&action_id)
            .map(String::as_str)
            .unwrap_or_default();
    }

    #[instrument(skip_all, fields(player_id = %self.player_id))]
    pub async fn load_player(&mut self, backend: &dyn Backend) {
        self.player = match backend.player(&self.player_id).await {
            Ok(player) => Some(player),
            Err(err) => {
                error!(%err, "Player not found");
                None
            }
        };
    }

    #[instrument(skip_all, fields(player_id = %self.player_id))]
    pub async fn refresh(&mut self, backend: &dyn Backend) {
        let Some(player) = &self.player else {
            return;
        };

        match backend.player_log(&player.game_code, &self.player_id).await {
            Ok(log) => {
                self.actions = log.actions;
                self.information = log.information;
            }
            Err(err) => error!(%err, "Error fetching player actions and information"),
        }
    }

    /// Sends `text` as the response to `action_id`. The draft is kept unless the
    /// backend accepts it. Once the backend has answered, the lists are fetched again.
    #[instrument(skip(self, backend, text), fields(player_id = %self.player_id))]
    pub async fn send_response(&mut self, backend: &dyn Backend, action_id: i64, text: String) {
        self.responses.insert(action_id, text);

        let Some(player) = &self.player else {
            return;
        };
        let text = self.response_draft(action_id);
        if text.is_empty() {
            return;
        }

        let action = NewAction {
            player_id: self.player_id.clone(),
            action_type: ACTION_TYPE_RESPONSE.to_string(),
            action_input: text.to_string(),
            response_required: false,
            turn: player.current_turn(),
        };

        match backend.add_action(&action).await {
            Ok(()) => {
                info!("Response sent");
                self.responses.insert(action_id, String::new());
            }
            Err(err) => {
                error!(%err, "Error sending response");
                if is_unreachable(&err) {
                    return;
                }
            }
        }

        self.refresh(backend).await;
    }

    /// Sends free text the player wants the table to know about, at any time.
    #[instrument(skip(self, backend, text), fields(player_id = %self.player_id))]
    pub async fn send_information(&mut self, backend: &dyn Backend, text: String) {
        self.new_information = text;

        let Some(player) = &self.player else {
            return;
        };
        if self.new_information.trim().is_empty() {
            return;
        }

        let information = NewInformation {
            player_id: self.player_id.clone(),
            information_type: INFORMATION_TYPE_CUSTOM.to_string(),
            information_input: self.new_information.clone(),
            response_required: false,
            turn: player.current_turn(),
        };

        match backend.add_information(&information).await {
            Ok(()) => {
                info!("Information sent");
                self.new_information.clear();
            }
            Err(err) => {
                error!(%err, "Error adding information");
                if is_unreachable(&err) {
                    return;
                }
            }
        }

        self.refresh(backend).await;
    }
}
