use super::{current_game::HostView, current_game_player::PlayerDashboard};

use std::{sync::Arc, time::Duration};

use moka::sync::Cache;
use tokio::sync::Mutex;

const SCREEN_CACHE_CAPACITY: u64 = 2000;
const SCREEN_IDLE_TIMEOUT: Duration = Duration::from_secs(6 * 60 * 60);

pub type Shared<T> = Arc<Mutex<T>>;

/// (browser session id, game code or player id)
type ScreenKey = (String, String);

/// Server-side view state, one per browser session and screen.
#[derive(Clone)]
pub struct ScreenStore {
    hosts: Cache<ScreenKey, Shared<HostView>>,
    players: Cache<ScreenKey, Shared<PlayerDashboard>>,
}

impl ScreenStore {
    pub fn new() -> Self {
        return Self {
            hosts: Cache::builder()
                .max_capacity(SCREEN_CACHE_CAPACITY)
                .time_to_idle(SCREEN_IDLE_TIMEOUT)
                .build(),
            players: Cache::builder()
                .max_capacity(SCREEN_CACHE_CAPACITY)
                .time_to_idle(SCREEN_IDLE_TIMEOUT)
                .build(),
        };
    }

    pub fn host_view(&self, session_id: &str, game_code: &str) -> Shared<HostView> {
        let key = (session_id.to_string(), game_code.to_string());

        return self
            .hosts
            .get_with(key, || Arc::new(Mutex::new(HostView::new(game_code))));
    }

    pub fn player_dashboard(&self, session_id: &str, player_id: &str) -> Shared<PlayerDashboard> {
        let key = (session_id.to_string(), player_id.to_string());

        return self
            .players
            .get_with(key, || Arc::new(Mutex::new(PlayerDashboard::new(player_id))));
    }
}
