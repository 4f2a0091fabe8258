//! Core game logic module for Snake
//!
//! This module contains all the simulation logic without any I/O or rendering
//! dependencies: grid arithmetic, steering, fruit placement, the fixed-tick
//! clock and the session state machine that ties them together.

pub mod clock;
pub mod config;
pub mod direction;
pub mod error;
pub mod fruit;
pub mod grid;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use clock::GameClock;
pub use config::GameConfig;
pub use direction::{Direction, DirectionController};
pub use error::GameError;
pub use fruit::{Fruit, FruitSpawner};
pub use grid::{Cell, Grid, wrap};
pub use session::{GameEvent, GameSession, SceneView, SessionState};
pub use snake::{Color, Segment, Snake, StepOutcome};
