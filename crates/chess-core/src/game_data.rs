use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pgn;

/// One side of a game as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub username: String,
    pub rating: i32,
    pub result: String, // "win", "checkmated", "agreed", "timeout", ...
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::WhiteWins => "White Wins",
            Outcome::BlackWins => "Black Wins",
            Outcome::Draw => "Draw",
        })
    }
}

/// A single game from a monthly archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub white: PlayerSummary,
    pub black: PlayerSummary,
    pub time_control: String,
    pub end_time: i64, // epoch seconds
    pub url: String,
    #[serde(default)]
    pub pgn: String,
}

impl GameSummary {
    /// White "win" takes precedence, then black "win"; anything else is a draw.
    pub fn outcome(&self) -> Outcome {
        if self.white.result == "win" {
            Outcome::WhiteWins
        } else if self.black.result == "win" {
            Outcome::BlackWins
        } else {
            Outcome::Draw
        }
    }

    /// List entry label, e.g. `alice (W) vs bob (B) - White Wins`.
    pub fn label(&self) -> String {
        format!(
            "{} (W) vs {} (B) - {}",
            self.white.username,
            self.black.username,
            self.outcome()
        )
    }

    /// UTC calendar date the game ended on.
    pub fn end_date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.end_time, 0).map(|dt| dt.date_naive())
    }

    /// SAN moves from the PGN movetext, for display only.
    pub fn san_moves(&self) -> Vec<String> {
        pgn::extract_moves(&self.pgn)
    }
}
