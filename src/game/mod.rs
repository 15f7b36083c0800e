//! Core game logic for Healthy Snake
//!
//! No I/O and no rendering here. The engine advances a caller-owned
//! [`GameState`] one tick at a time; the interactive mode and the tests
//! drive it the same way.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use state::{EndReason, GameState, Position, Snake, Status};
