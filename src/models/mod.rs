mod game;
pub use game::*;

mod player;
pub use player::*;

mod character;
pub use character::*;

mod first_night;
pub use first_night::*;

mod player_log;
pub use player_log::*;
