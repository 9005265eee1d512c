//! Falling-block puzzle game: shape catalog, board, and game controller,
//! plus the terminal front end that drives them.

pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod game;
pub mod input;
pub mod ui;

pub use config::{Args, GameConfig};
pub use driver::Driver;
pub use error::{ConfigError, ScoreStoreError};
pub use game::{Board, Game, GameState, HighScore, ShapeCatalog, TickOutcome};
