use super::{check_host, Backend, Connector, Unreachable};

use crate::{models::*, prelude::*};

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use anyhow::anyhow;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

enum Outcome<T> {
    Answered(T),
    Rejected(String),
    Unreachable,
}

/// Queue of canned outcomes for one backend call.
pub struct Script<T> {
    outcomes: Mutex<VecDeque<Outcome<T>>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        return Self {
            outcomes: Mutex::new(VecDeque::new()),
        };
    }
}

impl<T> Script<T> {
    pub fn ok(&self, value: T) -> &Self {
        self.outcomes.lock().unwrap().push_back(Outcome::Answered(value));
        return self;
    }

    pub fn fail(&self, reason: &str) -> &Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Outcome::Rejected(reason.to_string()));
        return self;
    }

    /// The request is sent but no answer ever comes back.
    pub fn unreachable(&self) -> &Self {
        self.outcomes.lock().unwrap().push_back(Outcome::Unreachable);
        return self;
    }

    fn next(&self, call: &str) -> Result<T> {
        let outcome = self.outcomes.lock().unwrap().pop_front();

        return match outcome {
            Some(Outcome::Answered(value)) => Ok(value),
            Some(Outcome::Rejected(reason)) => {
                Err(anyhow!("backend rejected request: {reason}").into())
            }
            Some(Outcome::Unreachable) => Err(anyhow!("connection refused")
                .context(Unreachable)
                .context(call.to_string())
                .into()),
            None => Err(anyhow!("no scripted response for {call}").into()),
        };
    }
}

/// In-memory [`Backend`] that replays scripted outcomes and records every call.
#[derive(Default)]
pub struct FakeBackend {
    pub create_game: Script<String>,
    pub game: Script<Game>,
    pub update_game: Script<Game>,
    pub join_game: Script<Player>,
    pub player: Script<Player>,
    pub players_in_game: Script<Vec<Player>>,
    pub assign_characters: Script<()>,
    pub characters: Script<Vec<Character>>,
    pub first_night_players: Script<Vec<FirstNightPlayer>>,
    pub send_first_night_info: Script<()>,
    pub player_log: Script<PlayerLog>,
    pub table_log: Script<TableLog>,
    pub add_information: Script<()>,
    pub add_action: Script<()>,

    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        return Arc::new(Self::default());
    }

    fn record(&self, call: &str, payload: impl Serialize) {
        let payload = serde_json::to_value(payload).unwrap_or(Value::Null);
        self.calls.lock().unwrap().push((call.to_string(), payload));
    }

    pub fn calls(&self) -> Vec<String> {
        return self
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(call, _)| call.clone())
            .collect();
    }

    pub fn count(&self, call: &str) -> usize {
        return self.calls().iter().filter(|c| *c == call).count();
    }

    /// Payload of the most recent `call`.
    pub fn payload(&self, call: &str) -> Option<Value> {
        return self
            .calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(c, _)| c == call)
            .map(|(_, payload)| payload.clone());
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn create_game(&self, game: &NewGame) -> Result<String> {
        self.record("create_game", game);
        return self.create_game.next("create_game");
    }

    async fn game(&self, game_code: &str) -> Result<Game> {
        self.record("game", game_code);
        return self.game.next("game");
    }

    async fn update_game(&self, game_code: &str, update: &GameUpdate) -> Result<Game> {
        self.record("update_game", json!({ "game_code": game_code, "update": update }));
        return self.update_game.next("update_game");
    }

    async fn join_game(&self, player: &NewPlayer) -> Result<Player> {
        self.record("join_game", player);
        return self.join_game.next("join_game");
    }

    async fn player(&self, player_id: &str) -> Result<Player> {
        self.record("player", player_id);
        return self.player.next("player");
    }

    async fn players_in_game(&self, game_code: &str) -> Result<Vec<Player>> {
        self.record("players_in_game", game_code);
        return self.players_in_game.next("players_in_game");
    }

    async fn assign_characters(&self, assignments: &[CharacterAssignment]) -> Result {
        self.record("assign_characters", assignments);
        return self.assign_characters.next("assign_characters");
    }

    async fn characters(&self, game_version: &str) -> Result<Vec<Character>> {
        self.record("characters", game_version);
        return self.characters.next("characters");
    }

    async fn first_night_players(
        &self,
        game_code: &str,
        game_version: Option<&str>,
    ) -> Result<Vec<FirstNightPlayer>> {
        self.record(
            "first_night_players",
            json!({ "game_code": game_code, "game_version": game_version }),
        );
        return self.first_night_players.next("first_night_players");
    }

    async fn send_first_night_info(
        &self,
        game_code: &str,
        packets: &[FirstNightPacket],
    ) -> Result {
        self.record(
            "send_first_night_info",
            json!({ "game_code": game_code, "players": packets }),
        );
        return self.send_first_night_info.next("send_first_night_info");
    }

    async fn player_log(&self, game_code: &str, player_id: &str) -> Result<PlayerLog> {
        self.record("player_log", json!({ "game_code": game_code, "player_id": player_id }));
        return self.player_log.next("player_log");
    }

    async fn table_log(&self, game_code: &str) -> Result<TableLog> {
        self.record("table_log", game_code);
        return self.table_log.next("table_log");
    }

    async fn add_information(&self, information: &NewInformation) -> Result {
        self.record("add_information", information);
        return self.add_information.next("add_information");
    }

    async fn add_action(&self, action: &NewAction) -> Result {
        self.record("add_action", action);
        return self.add_action.next("add_action");
    }
}

/// Hands out the same [`FakeBackend`] for every host and remembers which hosts were asked for.
pub struct FakeConnector {
    pub backend: Arc<FakeBackend>,
    hosts: Mutex<Vec<String>>,
}

impl FakeConnector {
    pub fn new(backend: Arc<FakeBackend>) -> Arc<Self> {
        return Arc::new(Self {
            backend,
            hosts: Mutex::new(Vec::new()),
        });
    }

    pub fn hosts(&self) -> Vec<String> {
        return self.hosts.lock().unwrap().clone();
    }
}

impl Connector for FakeConnector {
    fn connect(&self, host: &str) -> Result<Arc<dyn Backend>> {
        check_host(host)?;
        self.hosts.lock().unwrap().push(host.to_string());
        return Ok(self.backend.clone());
    }
}
