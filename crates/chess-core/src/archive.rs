//! Usernames and monthly archive periods.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A normalized (trimmed, lowercased) platform username. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Username(String);

impl Username {
    /// Normalize raw user input. Whitespace-only input is rejected.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ModelError::EmptyUsername);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A year/month bucket of games, taken from the last two path segments of an
/// archive identifier such as `https://api.chess.com/pub/player/hikaru/games/2023/07`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchivePeriod {
    year: String,
    month: String,
}

impl ArchivePeriod {
    /// Extract the period from an archive identifier.
    ///
    /// The last segment must be a two-digit month (`01`..`12`) and the one
    /// before it a four-digit year. A single trailing `/` is tolerated.
    pub fn from_identifier(identifier: &str) -> Result<Self, ModelError> {
        let malformed = || ModelError::MalformedArchive(identifier.to_string());

        let mut segments = identifier.trim_end_matches('/').rsplit('/');
        let month = segments.next().ok_or_else(malformed)?;
        let year = segments.next().ok_or_else(malformed)?;

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !all_digits(year) {
            return Err(malformed());
        }
        if month.len() != 2 || !all_digits(month) || !matches!(month.parse::<u8>(), Ok(1..=12)) {
            return Err(malformed());
        }

        Ok(Self {
            year: year.to_string(),
            month: month.to_string(),
        })
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    /// Value for the `archive=` query parameter, e.g. `2023/07`.
    pub fn query_param(&self) -> String {
        format!("{}/{}", self.year, self.month)
    }

    /// Human-readable label, e.g. `Archive: 07 / 2023`.
    pub fn label(&self) -> String {
        format!("Archive: {} / {}", self.month, self.year)
    }
}

impl fmt::Display for ArchivePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.year, self.month)
    }
}
