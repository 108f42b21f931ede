//! Client side of the game backend's REST API.
//!
//! Every screen talks to the backend through [`Backend`], built per request by a
//! [`Connector`] for whichever host the browser session resolved to.

mod envelope;
mod http;

#[cfg(test)]
pub mod fake;

pub use http::{HttpBackend, HttpConnector};

use crate::{models::*, prelude::*, result::AppError};

use std::{fmt, sync::Arc};

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Url;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the new game's code.
    async fn create_game(&self, game: &NewGame) -> Result<String>;

    async fn game(&self, game_code: &str) -> Result<Game>;

    async fn update_game(&self, game_code: &str, update: &GameUpdate) -> Result<Game>;

    async fn join_game(&self, player: &NewPlayer) -> Result<Player>;

    async fn player(&self, player_id: &str) -> Result<Player>;

    async fn players_in_game(&self, game_code: &str) -> Result<Vec<Player>>;

    async fn assign_characters(&self, assignments: &[CharacterAssignment]) -> Result;

    async fn characters(&self, game_version: &str) -> Result<Vec<Character>>;

    async fn first_night_players(
        &self,
        game_code: &str,
        game_version: Option<&str>,
    ) -> Result<Vec<FirstNightPlayer>>;

    async fn send_first_night_info(&self, game_code: &str, packets: &[FirstNightPacket])
        -> Result;

    async fn player_log(&self, game_code: &str, player_id: &str) -> Result<PlayerLog>;

    async fn table_log(&self, game_code: &str) -> Result<TableLog>;

    async fn add_information(&self, information: &NewInformation) -> Result;

    async fn add_action(&self, action: &NewAction) -> Result;
}

pub trait Connector: Send + Sync {
    fn connect(&self, host: &str) -> Result<Arc<dyn Backend>>;
}

/// Marks a failure where the request never got an answer from the backend.
#[derive(Debug)]
pub struct Unreachable;

impl fmt::Display for Unreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backend unreachable")
    }
}

pub fn is_unreachable(err: &AppError) -> bool {
    return err.0.downcast_ref::<Unreachable>().is_some();
}

/// Accepts a bare host name or address: no scheme, port, path or credentials.
pub fn check_host(host: &str) -> Result {
    let url: Url = format!("http://{host}/")
        .parse()
        .with_context(|| format!("invalid backend host {host:?}"))?;

    let bare = url
        .host_str()
        .is_some_and(|parsed| parsed.eq_ignore_ascii_case(host));
    if !bare {
        return Err(anyhow!("backend host {host:?} must be a bare host name or address").into());
    }

    return Ok(());
}
