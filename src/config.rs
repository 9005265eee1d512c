use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH, CLEAR_DELAY, PALETTE_SIZE, TICK_INTERVAL};
use crate::error::ConfigError;
use crate::ui::PALETTE;

// Anything narrower or shorter than the widest/tallest piece is unplayable
pub const MIN_BOARD_SIDE: usize = 4;

/// Rules and timings of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub colors: u8,
    pub tick_interval: Duration,
    pub clear_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            colors: PALETTE_SIZE,
            tick_interval: Duration::from_millis(TICK_INTERVAL),
            clear_delay: Duration::from_millis(CLEAR_DELAY),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_BOARD_SIDE || self.height < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_BOARD_SIDE,
            });
        }
        let max = PALETTE.len() as u8;
        if self.colors == 0 || self.colors > max {
            return Err(ConfigError::ColorCount { got: self.colors, max });
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("tick interval"));
        }
        Ok(())
    }
}

/// Command line options of the terminal game.
#[derive(Parser, Debug, Clone)]
#[command(name = "tstack", version, about = "Falling-block puzzle game for the terminal")]
pub struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = BOARD_WIDTH)]
    pub width: usize,
    /// Board height in cells
    #[arg(long, default_value_t = BOARD_HEIGHT)]
    pub height: usize,
    /// Number of piece colors
    #[arg(long, default_value_t = PALETTE_SIZE)]
    pub colors: u8,
    /// Gravity period in milliseconds
    #[arg(long, default_value_t = TICK_INTERVAL)]
    pub interval_ms: u64,
    /// Pause between locking a piece and removing full rows, in milliseconds
    #[arg(long, default_value_t = CLEAR_DELAY)]
    pub clear_delay_ms: u64,
    /// Seed for piece selection (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
    /// File the best score is kept in
    #[arg(long)]
    pub score_file: Option<PathBuf>,
    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log debug events as well
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let config = GameConfig {
            width: self.width,
            height: self.height,
            colors: self.colors,
            tick_interval: Duration::from_millis(self.interval_ms),
            clear_delay: Duration::from_millis(self.clear_delay_ms),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_small_board() {
        let config = GameConfig { width: 3, ..GameConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall { width: 3, height: 20, min: 4 })
        );
    }

    #[test]
    fn rejects_bad_color_count() {
        let config = GameConfig { colors: 0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::ColorCount { got: 0, .. })));
        let config = GameConfig { colors: 200, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::ColorCount { got: 200, .. })));
    }

    #[test]
    fn rejects_zero_interval() {
        let config = GameConfig { tick_interval: Duration::ZERO, ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration("tick interval")));
    }

    #[test]
    fn args_map_to_config() {
        let args = Args::parse_from(["tstack", "--width", "12", "--colors", "6", "--seed", "9"]);
        let config = args.game_config().unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, BOARD_HEIGHT);
        assert_eq!(config.colors, 6);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.tick_interval, Duration::from_millis(TICK_INTERVAL));
    }

    #[test]
    fn args_reject_invalid_config() {
        let args = Args::parse_from(["tstack", "--interval-ms", "0"]);
        assert!(args.game_config().is_err());
    }
}
