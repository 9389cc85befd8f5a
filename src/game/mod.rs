//! Core game logic module for Snake
//!
//! This module contains the simulation without any I/O, timing or rendering
//! dependencies. The clock drives it; the renderer reads its snapshots.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::{Background, BoardSize, ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{generate_food, GameEngine, GameOver, TickResult};
pub use food::{Food, FoodKind, SpawnTable};
pub use snapshot::{Overlay, RenderSnapshot};
pub use state::{EndReason, GamePhase, GameState, Position, Snake};
