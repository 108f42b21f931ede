mod current_game;
mod current_game_player;
mod game_creator;
mod utils;

use crate::prelude::*;

use axum::{http::StatusCode, routing::get, Router};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    let router = game_creator::add_routes(router);
    let router = current_game::add_routes(router);
    let router = current_game_player::add_routes(router);

    return router.route("/health", get(|| async { StatusCode::NO_CONTENT }));
}
