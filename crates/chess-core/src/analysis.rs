//! Analysis results: a move list plus one position snapshot per ply.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Wire shape of a successful `/api/analyze` response. Unchecked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub moves: Vec<String>,
    pub fens: Vec<String>,
}

/// A validated analysis: `fens[0]` is the starting position and `fens[i + 1]`
/// is the position after `moves[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    moves: Vec<String>,
    fens: Vec<String>,
}

impl AnalysisResult {
    pub fn new(moves: Vec<String>, fens: Vec<String>) -> Result<Self, ModelError> {
        if fens.len() != moves.len() + 1 {
            return Err(ModelError::ShapeMismatch {
                moves: moves.len(),
                positions: fens.len(),
            });
        }
        Ok(Self { moves, fens })
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn positions(&self) -> &[String] {
        &self.fens
    }

    pub fn starting_position(&self) -> &str {
        &self.fens[0]
    }

    pub fn final_position(&self) -> &str {
        &self.fens[self.fens.len() - 1]
    }
}

impl TryFrom<AnalysisPayload> for AnalysisResult {
    type Error = ModelError;

    fn try_from(payload: AnalysisPayload) -> Result<Self, Self::Error> {
        Self::new(payload.moves, payload.fens)
    }
}
