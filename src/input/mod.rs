pub mod handler;

pub use handler::{handle_key, Command, Input};
