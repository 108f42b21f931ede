use crate::prelude::*;

use std::{fmt::Display, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};

const MAX_BACKEND_CALLS_PER_REQUEST: u64 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,

    /// Fixed backend host; when unset each browser's own host is used.
    pub backend_host: Option<String>,
    pub backend_port: u16,
    pub backend_timeout: Duration,

    pub roster_poll_interval: Duration,
    pub request_timeout: Duration,
}

pub fn build() -> Result<Config> {
    return from_lookup(|name| std::env::var(name).ok());
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
    let server_port = parse_or(&lookup, "SERVER_PORT", 3000)?;

    let backend_host = lookup("BACKEND_HOST").filter(|host| !host.trim().is_empty());
    let backend_port = parse_or(&lookup, "BACKEND_PORT", 8000)?;
    let backend_timeout_s: u64 = parse_or(&lookup, "BACKEND_TIMEOUT_SECS", 10)?;

    let roster_poll_s = parse_or(&lookup, "ROSTER_POLL_SECS", 5)?;
    let request_timeout_s: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 45)?;

    // Starting the first night makes this many backend calls within one request.
    if request_timeout_s <= backend_timeout_s.saturating_mul(MAX_BACKEND_CALLS_PER_REQUEST) {
        return Err(anyhow!(
            "REQUEST_TIMEOUT_SECS ({request_timeout_s}) must be more than \
             {MAX_BACKEND_CALLS_PER_REQUEST} x BACKEND_TIMEOUT_SECS ({backend_timeout_s})"
        )
        .into());
    }

    return Ok(Config {
        server_host,
        server_port,

        backend_host,
        backend_port,
        backend_timeout: Duration::from_secs(backend_timeout_s),

        roster_poll_interval: Duration::from_secs(roster_poll_s),
        request_timeout: Duration::from_secs(request_timeout_s),
    });
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    let parsed = raw
        .trim()
        .parse::<T>()
        .map_err(|err| anyhow::anyhow!("{err}"))
        .with_context(|| format!("{name} has an invalid value {raw:?}"))?;

    return Ok(parsed);
}
