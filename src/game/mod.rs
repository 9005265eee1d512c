pub mod board;
pub mod piece;
pub mod score;
pub mod state;

pub use board::{Board, Cell, EMPTY};
pub use piece::{rotate, Piece, Point, Shape, ShapeCatalog, ShapeInfo};
pub use score::{line_clear_points, HighScore};
pub use state::{Game, GameState, TickOutcome};
