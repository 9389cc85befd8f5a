//! Snake Arcade - terminal Snake with weighted food and rising speed
//!
//! This library provides:
//! - Core simulation (game module): snake, food, scoring, collisions
//! - Real-time scheduling (clock module): tick and play-time tasks
//! - High score persistence (store module)
//! - TUI rendering and keyboard input (render, input, modes modules)

pub mod clock;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod store;
