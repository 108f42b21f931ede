use super::utils;

use crate::{
    prelude::*,
    screens::game_creator::{
        self, CreateGameForm, GameVersion, JoinGameForm, JoinOutcome, GAME_CODE_MAX_LEN,
        JOIN_ALERT, MAX_PLAYER_COUNT, MIN_PLAYER_COUNT, PLAYER_NAME_MAX_LEN,
    },
};

use askama::Template;
use axum::{
    extract::State,
    headers::Host,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router, TypedHeader,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router
        .route("/", get(index))
        .route("/games", post(post_game))
        .route("/join", post(post_join))
        .route("/backend-host", post(post_backend_host));
}

struct VersionOption {
    name: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    versions: Vec<VersionOption>,
    ai_game_master: bool,
    player_count: i64,
    min_players: i64,
    max_players: i64,

    game_code: String,
    player_name: String,
    game_code_max_len: usize,
    player_name_max_len: usize,
    join_alert: &'static str,
    show_join_alert: bool,

    backend_host: String,
    resolved_backend_host: String,
}

impl IndexTemplate {
    fn new(
        state: &AppState,
        session: &Session,
        request_host: Option<&TypedHeader<Host>>,
        create: &CreateGameForm,
        join: &JoinGameForm,
    ) -> Result<Self> {
        let host_override = utils::backend_host_override(session)?;
        let resolved_backend_host =
            utils::resolve_backend_host(&state.cfg, host_override.clone(), request_host);

        return Ok(Self {
            versions: GameVersion::ALL
                .iter()
                .map(|version| VersionOption {
                    name: version.name(),
                    label: version.label(),
                    selected: *version == create.game_version,
                })
                .collect(),
            ai_game_master: create.ai_game_master,
            player_count: create.player_count,
            min_players: MIN_PLAYER_COUNT,
            max_players: MAX_PLAYER_COUNT,

            game_code: join.game_code.clone(),
            player_name: join.player_name.clone(),
            game_code_max_len: GAME_CODE_MAX_LEN,
            player_name_max_len: PLAYER_NAME_MAX_LEN,
            join_alert: JOIN_ALERT,
            show_join_alert: false,

            backend_host: host_override.unwrap_or_default(),
            resolved_backend_host,
        });
    }
}

async fn index(
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let template = IndexTemplate::new(
        &state,
        &session,
        host.as_ref(),
        &CreateGameForm::default(),
        &JoinGameForm::default(),
    )?;

    return Ok(Html(template));
}

#[derive(Debug, Deserialize)]
struct CreateGameParams {
    game_version: GameVersion,
    /// Checkboxes are only submitted when ticked.
    ai_game_master: Option<String>,
    player_count: i64,
}

impl From<CreateGameParams> for CreateGameForm {
    fn from(params: CreateGameParams) -> Self {
        return CreateGameForm {
            game_version: params.game_version,
            ai_game_master: params.ai_game_master.is_some(),
            player_count: params.player_count,
        };
    }
}

async fn post_game(
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
    Form(params): Form<CreateGameParams>,
) -> Result<Response> {
    let form = CreateGameForm::from(params);
    let backend = utils::backend(&state, &session, host.as_ref())?;

    if let Some(destination) = game_creator::create_game(&*backend, &form).await {
        return Ok(Redirect::to(&destination.path()).into_response());
    }

    let template = IndexTemplate::new(
        &state,
        &session,
        host.as_ref(),
        &form,
        &JoinGameForm::default(),
    )?;

    return Ok(Html(template).into_response());
}

async fn post_join(
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
    Form(form): Form<JoinGameForm>,
) -> Result<Response> {
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let show_join_alert = match game_creator::join_game(&*backend, &form).await {
        JoinOutcome::Joined(destination) => {
            return Ok(Redirect::to(&destination.path()).into_response());
        }
        JoinOutcome::Alert => true,
        JoinOutcome::Failed => false,
    };

    let mut template = IndexTemplate::new(
        &state,
        &session,
        host.as_ref(),
        &CreateGameForm::default(),
        &form,
    )?;
    template.show_join_alert = show_join_alert;

    return Ok(Html(template).into_response());
}

#[derive(Debug, Deserialize)]
struct BackendHostParams {
    #[serde(default)]
    backend_host: String,
}

async fn post_backend_host(
    session: Session,
    State(state): State<AppState>,
    Form(params): Form<BackendHostParams>,
) -> Result<Response> {
    let host = params.backend_host.trim();

    if !host.is_empty() {
        if let Err(err) = state.connector.connect(host) {
            warn!(%host, %err, "Ignoring unusable backend host");
            return Ok(Redirect::to("/").into_response());
        }
    }

    utils::set_backend_host_override(&session, host)?;
    info!(%host, "Backend host override updated");

    return Ok(Redirect::to("/").into_response());
}
