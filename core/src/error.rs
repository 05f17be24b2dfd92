use thiserror::Error;

use crate::{Coord2, Icon};

/// Board or timing settings that can never produce a playable game.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must have at least one column and one row")]
    EmptyBoard,
    #[error("Board needs an even number of tiles for pairs of matches, got {cells}")]
    OddCellCount { cells: u16 },
    #[error("Board needs {needed} distinct icons but only {available} are defined")]
    NotEnoughIcons { needed: u16, available: u16 },
    #[error("Tile size must be positive")]
    ZeroTileSize,
    #[error("Reveal speed must be positive")]
    ZeroRevealSpeed,
    #[error("Frame rate must be positive")]
    ZeroFrameRate,
    #[error("Intro group size must be positive")]
    ZeroGroupSize,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Coordinates {coords:?} outside of {size:?} board")]
    OutOfBounds { coords: Coord2, size: Coord2 },
    #[error("Icon {0:?} does not appear exactly twice")]
    UnpairedIcon(Icon),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Mismatched pair must be covered before the next selection")]
    CoverPending,
    #[error("No mismatched pair to cover")]
    NothingToCover,
}

pub type Result<T> = core::result::Result<T, GameError>;
