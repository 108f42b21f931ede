use super::utils;

use crate::{
    models::{PlayerAction, PlayerInformation},
    prelude::*,
    screens::{
        current_game::{fetch_roster, HostPhase, HostView},
        Destination,
    },
};

use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Path, State},
    headers::Host,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router, TypedHeader,
};
use tower_sessions::Session;

const CHARACTER_FIELD_PREFIX: &str = "character-";
const INFORMATION_FIELD_PREFIX: &str = "info-";

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router
        .route("/current-game/:game_code", get(current_game))
        .route("/current-game/:game_code/players", get(roster))
        .route("/current-game/:game_code/start", post(start_game))
        .route("/current-game/:game_code/first-night", post(start_first_night))
        .route("/current-game/:game_code/send", post(send_first_night))
        .route("/current-game/:game_code/end-night", post(end_night))
        .route("/current-game/:game_code/table-log", post(refresh_table_log));
}

struct RosterRow {
    player_id: String,
    player_name: String,
}

struct FirstNightRow {
    player_id: String,
    player_name: String,
    character_name: String,
    designation: String,
    first_night_order: String,
    receives_information: bool,
    information: String,
    action: String,
    response_required: bool,
}

struct TableLogRow {
    player_name: String,
    actions: Vec<PlayerAction>,
    information: Vec<PlayerInformation>,
}

#[derive(Template)]
#[template(path = "roster.html")]
struct RosterTemplate {
    players: Vec<RosterRow>,
    show_dropdowns: bool,
    character_names: Vec<String>,
}

#[derive(Template)]
#[template(path = "current-game.html")]
struct CurrentGameTemplate {
    game_code: String,
    poll_interval_ms: u128,

    players: Vec<RosterRow>,
    show_dropdowns: bool,
    character_names: Vec<String>,

    show_start_game: bool,
    show_start_first_night: bool,
    show_first_night: bool,
    first_night_sent: bool,
    show_end_night: bool,
    first_night: Vec<FirstNightRow>,

    show_table_log: bool,
    table_log: Vec<TableLogRow>,
}

fn roster_rows(view: &HostView) -> Vec<RosterRow> {
    return view
        .players
        .iter()
        .map(|player| RosterRow {
            player_id: player.player_id.clone(),
            player_name: player.player_name.clone(),
        })
        .collect();
}

fn character_names(view: &HostView) -> Vec<String> {
    return view
        .characters
        .iter()
        .map(|character| character.character_name.clone())
        .collect();
}

impl RosterTemplate {
    fn new(view: &HostView) -> Self {
        return Self {
            players: roster_rows(view),
            show_dropdowns: view.phase() == HostPhase::GameStarted,
            character_names: character_names(view),
        };
    }
}

impl CurrentGameTemplate {
    fn new(cfg: &Config, view: &HostView) -> Self {
        let phase = view.phase();

        let first_night = view
            .first_night_players
            .iter()
            .map(|player| FirstNightRow {
                player_id: player.player_id.clone(),
                player_name: player.player_name.clone(),
                character_name: player.character_name.clone().unwrap_or_default(),
                designation: player.designation.clone().unwrap_or_default(),
                first_night_order: player
                    .first_night_order
                    .map(|order| order.to_string())
                    .unwrap_or_default(),
                receives_information: player.character_action_info.receive_information,
                information: view.information_for(&player.player_id).to_string(),
                action: player.character_action_info.action.clone().unwrap_or_default(),
                response_required: player.character_action_info.response_required,
            })
            .collect();

        let table_log = match &view.table_log {
            Some(log) => view
                .players
                .iter()
                .map(|player| TableLogRow {
                    player_name: player.player_name.clone(),
                    actions: log
                        .actions
                        .get(&player.player_id)
                        .cloned()
                        .unwrap_or_default(),
                    information: log
                        .information
                        .get(&player.player_id)
                        .cloned()
                        .unwrap_or_default(),
                })
                .collect(),
            None => Vec::new(),
        };

        return Self {
            game_code: view.game_code.clone(),
            poll_interval_ms: cfg.roster_poll_interval.as_millis(),

            players: roster_rows(view),
            show_dropdowns: phase == HostPhase::GameStarted,
            character_names: character_names(view),

            show_start_game: phase == HostPhase::Idle,
            show_start_first_night: phase == HostPhase::GameStarted,
            show_first_night: phase == HostPhase::FirstNightStarted,
            first_night_sent: phase == HostPhase::FirstNightSent,
            show_end_night: view.first_night_started,
            first_night,

            show_table_log: view.first_night_started,
            table_log,
        };
    }
}

/// Form fields named `<prefix><player id>`, keyed by player id.
fn fields_with_prefix(fields: HashMap<String, String>, prefix: &str) -> HashMap<String, String> {
    return fields
        .into_iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(prefix)
                .map(|player_id| (player_id.to_string(), value))
        })
        .collect();
}

fn back_to(game_code: String) -> Response {
    return Redirect::to(&Destination::CurrentGame(game_code).path()).into_response();
}

async fn current_game(
    Path(game_code): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let view = state.screens.host_view(&sid, &game_code);
    let mut view = view.lock().await;
    view.refresh_roster(&*backend).await;

    return Ok(Html(CurrentGameTemplate::new(&state.cfg, &view)).into_response());
}

async fn roster(
    Path(game_code): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;
    let view = state.screens.host_view(&sid, &game_code);

    // Fetched outside the lock so a slow poll never holds up the host's actions.
    let players = fetch_roster(&*backend, &game_code).await;

    let mut view = view.lock().await;
    if let Some(players) = players {
        view.replace_roster(players);
    }

    return Ok(Html(RosterTemplate::new(&view)).into_response());
}

async fn start_game(
    Path(game_code): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let view = state.screens.host_view(&sid, &game_code);
    view.lock().await.start_game(&*backend).await;

    return Ok(back_to(game_code));
}

async fn start_first_night(
    Path(game_code): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;
    let selections = fields_with_prefix(fields, CHARACTER_FIELD_PREFIX);

    let view = state.screens.host_view(&sid, &game_code);
    view.lock()
        .await
        .start_first_night(&*backend, &selections)
        .await;

    return Ok(back_to(game_code));
}

async fn send_first_night(
    Path(game_code): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let view = state.screens.host_view(&sid, &game_code);
    let mut view = view.lock().await;

    for (player_id, text) in fields_with_prefix(fields, INFORMATION_FIELD_PREFIX) {
        view.edit_information(&player_id, text);
    }
    view.send_first_night(&*backend).await;

    return Ok(back_to(game_code));
}

async fn end_night(
    Path(game_code): Path<String>,
    session: Session,
    State(state): State<AppState>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;

    state
        .screens
        .host_view(&sid, &game_code)
        .lock()
        .await
        .end_night();

    return Ok(back_to(game_code));
}

async fn refresh_table_log(
    Path(game_code): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let view = state.screens.host_view(&sid, &game_code);
    view.lock().await.refresh_table_log(&*backend).await;

    return Ok(back_to(game_code));
}
