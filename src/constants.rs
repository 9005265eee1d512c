pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Number of colors a piece can be drawn in (cells hold 1..=PALETTE_SIZE)
pub const PALETTE_SIZE: u8 = 4;

// Timings (in milliseconds)
pub const TICK_INTERVAL: u64 = 500; // Gravity period
pub const CLEAR_DELAY: u64 = 320;   // Pause between lock-in and row removal
pub const BLINK_STEP: u64 = 100;    // One blink phase of a clearing row
pub const BLINK_COUNT: u32 = 4;
pub const INPUT_POLL: u64 = 16;

// Points for clearing 1, 2, 3 or 4 rows with a single piece
pub const LINE_SCORES: [u32; 4] = [10, 30, 60, 100];

// Side of the square box the preview piece is centered in
pub const PREVIEW_SIZE: i32 = 4;
