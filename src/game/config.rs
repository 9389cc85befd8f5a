use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::Position;

/// Pixel size of one grid cell, the board is `board_size / GRID_UNIT` cells wide
pub const GRID_UNIT: u32 = 20;

/// Slowest and fastest selectable base tick rate
pub const MIN_BASE_SPEED: u32 = 1;
pub const MAX_BASE_SPEED: u32 = 20;

/// Selectable board sizes, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    Small,
    Medium,
    Large,
}

impl BoardSize {
    pub fn pixels(&self) -> u32 {
        match self {
            BoardSize::Small => 300,
            BoardSize::Medium => 400,
            BoardSize::Large => 500,
        }
    }

    pub fn next(&self) -> BoardSize {
        match self {
            BoardSize::Small => BoardSize::Medium,
            BoardSize::Medium => BoardSize::Large,
            BoardSize::Large => BoardSize::Small,
        }
    }
}

/// Selectable board backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Classic,
    Midnight,
    Violet,
    Forest,
}

impl Background {
    pub fn hex(&self) -> &'static str {
        match self {
            Background::Classic => "#000000",
            Background::Midnight => "#1a1a2e",
            Background::Violet => "#3c1642",
            Background::Forest => "#1b3a2a",
        }
    }

    /// Backgrounds dark enough to need the brightened food palette
    pub fn is_dark_tint(&self) -> bool {
        matches!(self, Background::Midnight | Background::Violet)
    }

    pub fn next(&self) -> Background {
        match self {
            Background::Classic => Background::Midnight,
            Background::Midnight => Background::Violet,
            Background::Violet => Background::Forest,
            Background::Forest => Background::Classic,
        }
    }
}

/// Configuration for a play session
///
/// Only read when a session is (re)initialized; the clock refuses changes
/// while a run is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_size: BoardSize,
    /// Pixel size of one cell
    pub grid_unit: u32,
    /// Ticks per second at the start of every session
    pub base_speed: u32,
    pub background: Background,
    /// Cell the single-segment snake starts on
    pub origin: Position,
    /// Every multiple of this score raises the speed
    pub speed_increase_threshold: u32,
    /// Ticks per second added at each threshold
    pub speed_increase_amount: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BoardSize::Medium,
            grid_unit: GRID_UNIT,
            base_speed: 5,
            background: Background::Classic,
            origin: Position::new(5, 5),
            speed_increase_threshold: 50,
            speed_increase_amount: 0.5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size and speed
    pub fn new(board_size: BoardSize, base_speed: u32, background: Background) -> Self {
        Self {
            board_size,
            base_speed,
            background,
            ..Default::default()
        }
    }

    /// Cells per side
    pub fn grid_size(&self) -> usize {
        (self.board_size.pixels() / self.grid_unit.max(1)) as usize
    }

    pub fn base_speed(&self) -> f64 {
        f64::from(self.base_speed)
    }

    /// Check the configuration can host a game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_unit == 0 {
            return Err(ConfigError::ZeroGridUnit);
        }
        if !(MIN_BASE_SPEED..=MAX_BASE_SPEED).contains(&self.base_speed) {
            return Err(ConfigError::SpeedOutOfRange(self.base_speed));
        }
        if self.speed_increase_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.grid_size() < 2 {
            return Err(ConfigError::BoardTooSmall(self.grid_size()));
        }
        let n = self.grid_size() as i32;
        let Position { x, y } = self.origin;
        if x < 0 || y < 0 || x >= n || y >= n {
            return Err(ConfigError::OriginOutsideBoard(self.origin, self.grid_size()));
        }
        Ok(())
    }
}

/// Error returned by [`GameConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroGridUnit,
    SpeedOutOfRange(u32),
    ZeroThreshold,
    BoardTooSmall(usize),
    OriginOutsideBoard(Position, usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroGridUnit => write!(f, "grid unit must be at least one pixel"),
            Self::SpeedOutOfRange(speed) => write!(
                f,
                "base speed {} is outside {}..={}",
                speed, MIN_BASE_SPEED, MAX_BASE_SPEED
            ),
            Self::ZeroThreshold => write!(f, "speed increase threshold must be positive"),
            Self::BoardTooSmall(n) => write!(f, "a {}x{} board has no room for food", n, n),
            Self::OriginOutsideBoard(origin, n) => write!(
                f,
                "origin ({}, {}) lies outside a {}x{} board",
                origin.x, origin.y, n, n
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
