//! Healthy Snake - a terminal snake game on a wrap-around grid
//!
//! This library provides:
//! - Core game logic, free of I/O (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Optional sound effects (audio module)
//! - The interactive terminal mode (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
