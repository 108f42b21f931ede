use super::utils;

use crate::{
    models::{Player, PlayerAction, PlayerInformation},
    prelude::*,
    screens::{current_game_player::PlayerDashboard, Destination},
};

use askama::Template;
use axum::{
    extract::{Path, State},
    headers::Host,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router, TypedHeader,
};
use serde::Deserialize;
use tower_sessions::Session;

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router
        .route("/current-game-player/:player_id", get(dashboard))
        .route("/current-game-player/:player_id/refresh", post(refresh))
        .route(
            "/current-game-player/:player_id/respond/:action_id",
            post(respond),
        )
        .route("/current-game-player/:player_id/information", post(add_information));
}

struct ActionRow {
    action: PlayerAction,
    draft: String,
}

#[derive(Template)]
#[template(path = "current-game-player.html")]
struct DashboardTemplate {
    player: Player,
    actions: Vec<ActionRow>,
    information: Vec<PlayerInformation>,
    new_information: String,
}

#[derive(Template)]
#[template(path = "player-not-found.html")]
struct PlayerNotFoundTemplate {}

fn render(dashboard: &PlayerDashboard) -> Response {
    let Some(player) = &dashboard.player else {
        return Html(PlayerNotFoundTemplate {}).into_response();
    };

    let template = DashboardTemplate {
        player: player.clone(),
        actions: dashboard
            .actions
            .iter()
            .map(|action| ActionRow {
                action: action.clone(),
                draft: dashboard.response_draft(action.action_id).to_string(),
            })
            .collect(),
        information: dashboard.information.clone(),
        new_information: dashboard.new_information.clone(),
    };

    return Html(template).into_response();
}

fn back_to(player_id: String) -> Response {
    return Redirect::to(&Destination::CurrentGamePlayer(player_id).path()).into_response();
}

async fn dashboard(
    Path(player_id): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let dashboard = state.screens.player_dashboard(&sid, &player_id);
    let mut dashboard = dashboard.lock().await;
    dashboard.load_player(&*backend).await;

    return Ok(render(&dashboard));
}

async fn refresh(
    Path(player_id): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let dashboard = state.screens.player_dashboard(&sid, &player_id);
    dashboard.lock().await.refresh(&*backend).await;

    return Ok(back_to(player_id));
}

#[derive(Debug, Deserialize)]
struct ResponseParams {
    #[serde(default)]
    response: String,
}

async fn respond(
    Path((player_id, action_id)): Path<(String, i64)>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
    Form(params): Form<ResponseParams>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let dashboard = state.screens.player_dashboard(&sid, &player_id);
    dashboard
        .lock()
        .await
        .send_response(&*backend, action_id, params.response)
        .await;

    return Ok(back_to(player_id));
}

#[derive(Debug, Deserialize)]
struct InformationParams {
    #[serde(default)]
    information: String,
}

async fn add_information(
    Path(player_id): Path<String>,
    session: Session,
    host: Option<TypedHeader<Host>>,
    State(state): State<AppState>,
    Form(params): Form<InformationParams>,
) -> Result<Response> {
    let sid = utils::session_id(&session)?;
    let backend = utils::backend(&state, &session, host.as_ref())?;

    let dashboard = state.screens.player_dashboard(&sid, &player_id);
    dashboard
        .lock()
        .await
        .send_information(&*backend, params.information)
        .await;

    return Ok(back_to(player_id));
}

#[cfg(test)]
mod tests {
    use crate::{
        models::{Character, Player, PlayerAction, PlayerInformation, PlayerLog},
        test_support::{body_text, location, session_cookie, TestApp},
    };

    use axum::http::StatusCode;

    fn ada() -> Player {
        return Player {
            player_id: "p1".to_string(),
            player_name: "Ada".to_string(),
            game_code: "ABC123".to_string(),
            turn: Some(1),
            character_id: Some(4),
            character: Some(Character {
                character_id: 4,
                character_name: "Empath".to_string(),
                character_description: "Each night, you learn how many of your 2 alive neighbours are evil.".to_string(),
                designation: "Townsfolk".to_string(),
            }),
            vote_token_remaining: Some(true),
            ..Default::default()
        };
    }

    #[tokio::test]
    async fn unknown_player_renders_not_found() {
        let app = TestApp::new();
        app.backend.player.fail("Player not found");

        let response = app.get("/current-game-player/p404", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Player not found."));
    }

    #[tokio::test]
    async fn dashboard_shows_character() {
        let app = TestApp::new();
        app.backend.player.ok(ada());

        let body = body_text(app.get("/current-game-player/p1", None).await).await;

        assert!(body.contains("Player Dashboard"));
        assert!(body.contains("Empath"));
        assert!(body.contains("Townsfolk"));
        assert!(body.contains("No actions available."));
        assert!(body.contains("No New Info"));
    }

    #[tokio::test]
    async fn refreshed_log_lists_type_turn_and_response_required() {
        let app = TestApp::new();
        app.backend.player.ok(ada());
        let response = app.get("/current-game-player/p1", None).await;
        let cookie = session_cookie(&response).unwrap();

        app.backend.player_log.ok(PlayerLog {
            actions: vec![PlayerAction {
                action_id: 11,
                action_type: "night_info".to_string(),
                action_input: "Choose two players".to_string(),
                turn: 7,
                response_required: true,
            }],
            information: vec![PlayerInformation {
                information_id: 3,
                information_type: "first_night".to_string(),
                information_input: "0 evil neighbours".to_string(),
                turn: 7,
                response_required: false,
            }],
        });
        app.post("/current-game-player/p1/refresh", "", Some(&cookie))
            .await;

        app.backend.player.ok(ada());
        let body = body_text(app.get("/current-game-player/p1", Some(&cookie)).await).await;

        assert!(body.contains("Type: night_info"));
        assert!(body.contains("Type: first_night"));
        assert!(body.contains("Turn: 7"));
        assert!(body.contains("Response Required: Yes"));
        assert!(body.contains("Response Required: No"));
        assert!(body.contains("0 evil neighbours"));
    }

    #[tokio::test]
    async fn response_flow() {
        let app = TestApp::new();
        app.backend.player.ok(ada());
        let response = app.get("/current-game-player/p1", None).await;
        let cookie = session_cookie(&response).unwrap();

        app.backend.player_log.ok(PlayerLog {
            actions: vec![PlayerAction {
                action_id: 11,
                action_type: "night_info".to_string(),
                action_input: "Choose two players".to_string(),
                turn: 1,
                response_required: true,
            }],
            information: Vec::new(),
        });
        let response = app
            .post("/current-game-player/p1/refresh", "", Some(&cookie))
            .await;
        assert_eq!(location(&response).as_deref(), Some("/current-game-player/p1"));

        app.backend.add_action.ok(());
        app.backend.player_log.ok(PlayerLog::default());
        app.post(
            "/current-game-player/p1/respond/11",
            "response=Bob+and+Cy",
            Some(&cookie),
        )
        .await;

        let sent = app.backend.payload("add_action").unwrap();
        assert_eq!(sent["action_input"], "Bob and Cy");
        assert_eq!(sent["action_type"], "response");
        assert_eq!(app.backend.count("player_log"), 2);
    }

    #[tokio::test]
    async fn custom_information_is_posted() {
        let app = TestApp::new();
        app.backend.player.ok(ada());
        let response = app.get("/current-game-player/p1", None).await;
        let cookie = session_cookie(&response).unwrap();

        app.backend.add_information.ok(());
        app.backend.player_log.ok(PlayerLog::default());
        let response = app
            .post(
                "/current-game-player/p1/information",
                "information=Who+is+the+Drunk%3F",
                Some(&cookie),
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let sent = app.backend.payload("add_information").unwrap();
        assert_eq!(sent["information_input"], "Who is the Drunk?");
        assert_eq!(sent["information_type"], "custom");
    }
}
