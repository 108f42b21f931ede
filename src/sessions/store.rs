use tower_sessions::MokaStore;

const SESSION_CACHE_CAPACITY: u64 = 2000;

/// Sessions only pin a browser id and its backend host override, so memory is enough.
pub fn build() -> MokaStore {
    return MokaStore::new(Some(SESSION_CACHE_CAPACITY));
}
