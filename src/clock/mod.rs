//! Real-time scheduling of the simulation
//!
//! The clock owns the engine and the periodic tasks that drive it. Hosts
//! await [`GameClock::next_event`] alongside their own input and render
//! sources and hand each event back to [`GameClock::handle`].

pub mod game_clock;
pub mod timer;

pub use game_clock::{ClockEvent, GameClock, SessionError};
pub use timer::{tick_period, TaskTimer};
