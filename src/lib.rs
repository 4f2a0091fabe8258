//! Cube Snake - Snake on a wrap-around grid
//!
//! This library provides:
//! - Core simulation (game module): grid, steering, fruit, clock, session
//! - Keyboard mapping (input module)
//! - TUI rendering and the fruit pulse animation (render module)
//! - Per-run statistics (metrics module)
//! - The interactive frame loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
