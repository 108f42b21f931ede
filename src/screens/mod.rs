//! View state and behaviour of the three screens, independent of HTTP.
//!
//! Backend failures stop here: they are logged and the screen stays where it was.

pub mod current_game;
pub mod current_game_player;
pub mod game_creator;
mod store;

pub use store::ScreenStore;

/// Where the browser goes after a successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    GameCreator,
    CurrentGame(String),
    CurrentGamePlayer(String),
}

impl Destination {
    pub fn path(&self) -> String {
        return match self {
            Destination::GameCreator => "/".to_string(),
            Destination::CurrentGame(game_code) => format!("/current-game/{game_code}"),
            Destination::CurrentGamePlayer(player_id) => {
                format!("/current-game-player/{player_id}")
            }
        };
    }
}
