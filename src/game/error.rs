use std::fmt;

/// Errors raised by the simulation core
///
/// Collisions and rejected turns are ordinary game outcomes and never show up
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The snake covers every cell, so there is nowhere to put the fruit.
    NoFreeCell { cells: usize },
    /// The configuration cannot describe a playable field.
    InvalidConfig(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFreeCell { cells } => {
                write!(f, "No free cell for fruit: all {} cells are occupied", cells)
            }
            Self::InvalidConfig(reason) => write!(f, "Invalid game configuration: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}
