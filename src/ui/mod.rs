pub mod renderer;

pub use renderer::{ui, COLOR_INACTIVE, PALETTE};
