#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use animation::*;
pub use board::*;
pub use engine::*;
pub use error::*;
pub use frontend::*;
pub use icon::*;
pub use layout::*;
pub use session::*;
pub use types::*;

mod animation;
mod board;
mod engine;
mod error;
mod frontend;
mod icon;
mod layout;
mod session;
mod types;

/// Fixed display delays, none of them can be interrupted by the player.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// How long a mismatched pair stays up before being covered again.
    pub mismatch_delay: Duration,
    /// Pause after the win flash, before the board is dealt again.
    pub win_delay: Duration,
    /// How long the fresh, fully covered board is shown before the intro.
    pub reset_delay: Duration,
    pub flash_interval: Duration,
    pub flash_count: u8,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            mismatch_delay: Duration::from_millis(1000),
            win_delay: Duration::from_millis(2000),
            reset_delay: Duration::from_millis(1000),
            flash_interval: Duration::from_millis(300),
            flash_count: 13,
        }
    }
}

/// Board dimensions plus the screen geometry and pacing every front-end shares.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    /// Drawing surface size in pixels.
    pub window: (u16, u16),
    pub tile_size: u16,
    pub gap_size: u16,
    /// Pixels uncovered (or covered) per animation frame.
    pub reveal_speed: u16,
    pub fps: u16,
    pub intro_group_size: usize,
    pub timing: Timing,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: (10, 7),
            window: (640, 480),
            tile_size: 40,
            gap_size: 10,
            reveal_speed: 8,
            fps: 30,
            intro_group_size: 8,
            timing: Timing::default(),
        }
    }
}

impl GameConfig {
    pub fn new(size: Coord2) -> core::result::Result<Self, ConfigError> {
        let config = Self {
            size,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        validate_feasible(self.size)?;
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.reveal_speed == 0 {
            return Err(ConfigError::ZeroRevealSpeed);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.intro_group_size == 0 {
            return Err(ConfigError::ZeroGroupSize);
        }
        Ok(())
    }

    /// Replaces tile and gap sizes, keeping everything else.
    pub const fn with_geometry(mut self, tile_size: u16, gap_size: u16) -> Self {
        self.tile_size = tile_size;
        self.gap_size = gap_size;
        self
    }

    /// Shrinks or grows the window so the board is surrounded by exactly `margin` pixels.
    pub const fn fit_window(mut self, margin: u16) -> Self {
        let stride = self.tile_size.saturating_add(self.gap_size);
        let width = stride.saturating_mul(self.size.0 as u16);
        let height = stride.saturating_mul(self.size.1 as u16);
        self.window = (
            width.saturating_add(margin.saturating_mul(2)),
            height.saturating_add(margin.saturating_mul(2)),
        );
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / u32::from(self.fps.max(1))
    }
}

/// What a single click did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tile was already face-up, nothing happened.
    Ignored,
    FirstRevealed(Coord2),
    Matched { first: Coord2, second: Coord2 },
    Mismatched { first: Coord2, second: Coord2 },
    /// The pair completed the board.
    Won { first: Coord2, second: Coord2 },
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// The tile flipped face-up by this selection, if any.
    pub const fn revealed(self) -> Option<Coord2> {
        use SelectOutcome::*;
        match self {
            Ignored => None,
            FirstRevealed(coords) => Some(coords),
            Matched { second, .. } | Mismatched { second, .. } | Won { second, .. } => {
                Some(second)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_playable() {
        let config = GameConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.total_cells(), 70);
        assert_eq!(config.frame_duration(), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn new_validates_board_size() {
        assert!(GameConfig::new((4, 4)).is_ok());
        assert_eq!(
            GameConfig::new((5, 5)),
            Err(ConfigError::OddCellCount { cells: 25 })
        );
    }

    #[test]
    fn zero_pacing_is_rejected() {
        let config = GameConfig {
            reveal_speed: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRevealSpeed));

        let config = GameConfig::default().with_geometry(0, 2);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTileSize));
    }

    #[test]
    fn fit_window_leaves_requested_margin() {
        let config = GameConfig::new((4, 3)).unwrap().with_geometry(4, 2).fit_window(2);

        assert_eq!(config.window, (28, 22));
    }

    #[test]
    fn outcome_reports_flipped_tile() {
        assert_eq!(SelectOutcome::Ignored.revealed(), None);
        assert_eq!(SelectOutcome::FirstRevealed((1, 2)).revealed(), Some((1, 2)));
        assert_eq!(
            SelectOutcome::Mismatched {
                first: (0, 0),
                second: (3, 1)
            }
            .revealed(),
            Some((3, 1))
        );
        assert!(!SelectOutcome::Ignored.has_update());
    }
}
