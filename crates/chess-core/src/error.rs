//! Domain model error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Please enter a valid username.")]
    EmptyUsername,

    #[error("Archive identifier {0:?} does not end in YYYY/MM")]
    MalformedArchive(String),

    #[error("Analysis has {positions} positions for {moves} moves; expected one more position than moves")]
    ShapeMismatch { moves: usize, positions: usize },
}
