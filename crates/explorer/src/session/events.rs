//! Typed session events and the handlers that receive them.

use std::fmt;

use chess_core::{ArchivePeriod, GameSummary, Username};

/// A position reached in the replay, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayPosition {
    pub index: usize,
    pub last_index: usize,
    pub snapshot: String,
    /// Move that led here; `None` at the starting position.
    pub last_move: Option<String>,
}

impl fmt::Display for ReplayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.last_move {
            Some(mv) => write!(f, "Position {}/{} after {}", self.index, self.last_index, mv),
            None => write!(f, "Position {}/{} (start)", self.index, self.last_index),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ValidationFailed(String),

    ArchivesCleared {
        username: Username,
    },
    ArchivesLoaded {
        username: Username,
        periods: Vec<ArchivePeriod>,
    },
    ArchivesFailed {
        username: Username,
        status: Option<u16>,
        message: String,
    },
    ArchiveSelected {
        username: Username,
        period: ArchivePeriod,
    },

    GamesCleared {
        period: ArchivePeriod,
    },
    GamesLoaded {
        period: ArchivePeriod,
        games: Vec<GameSummary>,
    },
    GamesFailed {
        period: ArchivePeriod,
        status: Option<u16>,
        message: String,
    },
    GameSelected(GameSummary),

    AnalysisPending,
    AnalysisInstalled {
        moves: usize,
        position: ReplayPosition,
    },
    AnalysisFailed(String),
    AnalysisFinished,

    PositionChanged(ReplayPosition),
}

type Handler = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Fan-out of events to every registered handler, in registration order.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Handler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn emit(&self, event: SessionEvent) {
        for handler in &self.handlers {
            handler(&event);
        }
    }
}
