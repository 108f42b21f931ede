use super::{check_host, envelope, Backend, Connector, Unreachable};

use crate::{models::*, prelude::*};

use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde_json::{json, Value};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct HttpConnector {
    client: reqwest::Client,
    port: u16,
}

impl HttpConnector {
    pub fn new(port: u16, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        return Ok(Self { client, port });
    }
}

impl Connector for HttpConnector {
    fn connect(&self, host: &str) -> Result<Arc<dyn Backend>> {
        check_host(host)?;
        let backend = HttpBackend::new(self.client.clone(), &format!("http://{host}:{}", self.port))?;

        return Ok(Arc::new(backend));
    }
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url: Url = base_url
            .parse()
            .with_context(|| format!("invalid backend address {base_url}"))?;

        if base_url.cannot_be_a_base() {
            return Err(anyhow!("invalid backend address {base_url}").into());
        }

        return Ok(Self { client, base_url });
    }

    /// Joins percent-encoded path segments onto the base address. A trailing `""`
    /// segment yields a trailing slash.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        return url;
    }

    async fn call(&self, request: RequestBuilder) -> anyhow::Result<Value> {
        let response = request.send().await.context(Unreachable)?;
        let status = response.status();
        let text = response.text().await?;

        debug!(%status, body = %text, "Backend responded");

        let body: Value = serde_json::from_str(&text)
            .with_context(|| format!("backend answered {status} with a non-JSON body"))?;

        return envelope::open(body);
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self))]
    async fn create_game(&self, game: &NewGame) -> Result<String> {
        let request = self.client.post(self.url(&["games", ""])).json(game);
        let mut body = self.call(request).await.context("create game")?;

        return Ok(envelope::take(&mut body, "game_code")?);
    }

    #[instrument(skip(self))]
    async fn game(&self, game_code: &str) -> Result<Game> {
        let request = self.client.get(self.url(&["games", game_code]));
        let mut body = self.call(request).await.context("fetch game")?;

        return Ok(envelope::take(&mut body, "game")?);
    }

    #[instrument(skip(self))]
    async fn update_game(&self, game_code: &str, update: &GameUpdate) -> Result<Game> {
        let request = self.client.put(self.url(&["games", game_code])).json(update);
        let mut body = self.call(request).await.context("update game")?;

        return Ok(envelope::take(&mut body, "game")?);
    }

    #[instrument(skip(self))]
    async fn join_game(&self, player: &NewPlayer) -> Result<Player> {
        let request = self.client.post(self.url(&["players", ""])).json(player);
        let mut body = self.call(request).await.context("join game")?;

        return Ok(envelope::take(&mut body, "player")?);
    }

    #[instrument(skip(self))]
    async fn player(&self, player_id: &str) -> Result<Player> {
        let request = self.client.get(self.url(&["players", player_id]));
        let mut body = self.call(request).await.context("fetch player")?;

        return Ok(envelope::take(&mut body, "player")?);
    }

    #[instrument(skip(self))]
    async fn players_in_game(&self, game_code: &str) -> Result<Vec<Player>> {
        let request = self.client.get(self.url(&["players", "game", game_code]));
        let mut body = self.call(request).await.context("fetch players")?;

        return Ok(envelope::take(&mut body, "players")?);
    }

    #[instrument(skip(self))]
    async fn assign_characters(&self, assignments: &[CharacterAssignment]) -> Result {
        let request = self
            .client
            .put(self.url(&["players", "update_multiple"]))
            .json(&json!({ "players": assignments }));
        self.call(request).await.context("update players")?;

        return Ok(());
    }

    #[instrument(skip(self))]
    async fn characters(&self, game_version: &str) -> Result<Vec<Character>> {
        let request = self
            .client
            .get(self.url(&["characters", "game_version", game_version]));
        let mut body = self.call(request).await.context("fetch characters")?;

        return Ok(envelope::take(&mut body, "characters")?);
    }

    #[instrument(skip(self))]
    async fn first_night_players(
        &self,
        game_code: &str,
        game_version: Option<&str>,
    ) -> Result<Vec<FirstNightPlayer>> {
        let request = self
            .client
            .post(self.url(&["game", "first_night_players"]))
            .json(&json!({ "game_code": game_code, "game_version": game_version }));
        let mut body = self.call(request).await.context("fetch first night players")?;

        return Ok(envelope::take(&mut body, "players")?);
    }

    #[instrument(skip(self, packets), fields(count = packets.len()))]
    async fn send_first_night_info(
        &self,
        game_code: &str,
        packets: &[FirstNightPacket],
    ) -> Result {
        let request = self
            .client
            .post(self.url(&["game", "update_first_night_info"]))
            .json(&json!({ "game_code": game_code, "players": packets }));
        self.call(request).await.context("send first night info")?;

        return Ok(());
    }

    #[instrument(skip(self))]
    async fn player_log(&self, game_code: &str, player_id: &str) -> Result<PlayerLog> {
        let request = self
            .client
            .get(self.url(&["player_actions", game_code, player_id]));
        let body = self.call(request).await.context("fetch player actions")?;

        let log = serde_json::from_value(body).context("malformed player actions")?;
        return Ok(log);
    }

    #[instrument(skip(self))]
    async fn table_log(&self, game_code: &str) -> Result<TableLog> {
        let request = self.client.get(self.url(&["all_players_info", game_code]));
        let body = self.call(request).await.context("fetch table log")?;

        let log = serde_json::from_value(body).context("malformed table log")?;
        return Ok(log);
    }

    #[instrument(skip(self))]
    async fn add_information(&self, information: &NewInformation) -> Result {
        let request = self
            .client
            .post(self.url(&["player", "add_information"]))
            .json(information);
        self.call(request).await.context("add information")?;

        return Ok(());
    }

    #[instrument(skip(self))]
    async fn add_action(&self, action: &NewAction) -> Result {
        let request = self
            .client
            .post(self.url(&["player", "add_action"]))
            .json(action);
        self.call(request).await.context("add action")?;

        return Ok(());
    }
}
