use crate::{backend::Backend, prelude::*};

use std::sync::Arc;

use axum::{headers::Host, TypedHeader};
use tower_sessions::Session;

const SESSION_ID_KEY: &str = "sid";
const BACKEND_HOST_KEY: &str = "backend_host";

const FALLBACK_BACKEND_HOST: &str = "localhost";

/// Stable id for this browser, pinned into the session on first use.
pub fn session_id(session: &Session) -> Result<String> {
    if let Some(sid) = session.get::<String>(SESSION_ID_KEY)? {
        return Ok(sid);
    }

    let sid = session.id().0.to_string();
    session.insert(SESSION_ID_KEY, sid.clone())?;

    return Ok(sid);
}

pub fn backend_host_override(session: &Session) -> Result<Option<String>> {
    let host: Option<String> = session.get(BACKEND_HOST_KEY)?;

    return Ok(host.filter(|host| !host.is_empty()));
}

/// An empty host clears the override.
pub fn set_backend_host_override(session: &Session, host: &str) -> Result {
    session.insert(BACKEND_HOST_KEY, host.trim().to_string())?;
    return Ok(());
}

/// Session override, then configured host, then the host the browser used to reach us.
pub fn resolve_backend_host(
    cfg: &Config,
    host_override: Option<String>,
    request_host: Option<&TypedHeader<Host>>,
) -> String {
    if let Some(host) = host_override {
        return host;
    }

    if let Some(host) = &cfg.backend_host {
        return host.clone();
    }

    return request_host
        .map(|TypedHeader(host)| host.hostname().to_string())
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| FALLBACK_BACKEND_HOST.to_string());
}

pub fn backend(
    state: &AppState,
    session: &Session,
    request_host: Option<&TypedHeader<Host>>,
) -> Result<Arc<dyn Backend>> {
    let host = resolve_backend_host(&state.cfg, backend_host_override(session)?, request_host);

    return state.connector.connect(&host);
}
