pub mod config;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod grid;
pub mod logging;
pub mod scores;
pub mod snake;
pub mod store;

#[cfg(test)]
mod test_support;

pub use config::GameConfig;
pub use error::{Error, Result};
pub use game::{Game, GameState, Intent, MENU_ITEMS, Snapshot};
pub use grid::{Direction, GRID_HEIGHT, GRID_WIDTH, Position};
pub use scores::{ScoreBook, ScoreEntry};
