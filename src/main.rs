mod backend;
mod config;
mod controllers;
mod html;
mod models;
mod prelude;
mod result;
mod screens;
mod sessions;

pub use crate::result::Result;

use std::{net::SocketAddr, sync::Arc};

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    backend::{Connector, HttpConnector},
    screens::ScreenStore,
};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<config::Config>,
    connector: Arc<dyn Connector>,
    screens: ScreenStore,
}

#[tokio::main]
async fn main() -> Result {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = config::build()?;
    let connector = HttpConnector::new(cfg.backend_port, cfg.backend_timeout)?;
    let addr: SocketAddr = format!("{}:{}", cfg.server_host, cfg.server_port).parse()?;

    let state = AppState {
        cfg: Arc::new(cfg),
        connector: Arc::new(connector),
        screens: ScreenStore::new(),
    };

    info!(%addr, backend_host = ?state.cfg.backend_host, "Serving game tables");

    axum::Server::bind(&addr)
        .serve(app(state).into_make_service())
        .await?;

    return Ok(());
}

fn app(state: AppState) -> Router {
    let session_service = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|_: BoxError| async {
            return StatusCode::BAD_REQUEST;
        }))
        .layer(
            SessionManagerLayer::new(sessions::store::build())
                .with_expiry(Expiry::OnSessionEnd)
                .with_secure(false)
                .with_same_site(SameSite::Lax),
        );

    let request_timeout = state.cfg.request_timeout;

    let router = Router::new();

    // dynamic paths
    let router = controllers::add_routes(router);

    // static assets
    let router = router.nest_service("/assets", ServeDir::new("assets"));

    return router
        .with_state(state)
        .layer(session_service)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());
}
