//! Terminal text for listings, game details and session events.

use chess_core::pgn;
use chess_core::{ArchivePeriod, GameSummary};

use crate::session::events::SessionEvent;

pub fn archive_list(periods: &[ArchivePeriod]) -> String {
    if periods.is_empty() {
        return "No archives listed.".to_string();
    }
    periods
        .iter()
        .enumerate()
        .map(|(i, period)| format!("[{i}] {}", period.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn game_list(games: &[GameSummary]) -> String {
    if games.is_empty() {
        return "No games listed.".to_string();
    }
    games
        .iter()
        .enumerate()
        .map(|(i, game)| format!("[{i}] {}", game.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Metadata block plus the raw PGN, shown when a game is picked.
pub fn game_details(game: &GameSummary) -> String {
    let date = game
        .end_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut out = String::from("Game Analysis\n");
    out.push_str(&format!("White: {} ({})\n", game.white.username, game.white.rating));
    out.push_str(&format!("Black: {} ({})\n", game.black.username, game.black.rating));
    out.push_str(&format!("Result: {}\n", game.outcome()));
    out.push_str(&format!("Time Control: {}\n", game.time_control));
    out.push_str(&format!("Date: {date}\n"));
    if let Some(eco) = pgn::extract_header(&game.pgn, "ECO") {
        out.push_str(&format!("Opening: {eco}\n"));
    }
    out.push_str(&format!("View on Chess.com: {}\n", game.url));

    let moves = game.san_moves();
    if !moves.is_empty() {
        out.push_str(&format!("Moves ({}): {}\n", moves.len(), pgn::format_movetext(&moves)));
    }
    out.push_str("PGN:\n");
    out.push_str(&game.pgn);
    out
}

/// What the user sees for an event; `None` for events that are silent.
pub fn event_line(event: &SessionEvent) -> Option<String> {
    let line = match event {
        SessionEvent::ValidationFailed(message) => message.clone(),
        SessionEvent::ArchivesCleared { username } => format!("Fetching archives for {username}..."),
        SessionEvent::ArchivesLoaded { username, periods } => {
            format!("Archives for {username}:\n{}", archive_list(periods))
        }
        SessionEvent::ArchivesFailed { username, message, .. } => {
            format!("Could not fetch archives for {username}: {message}")
        }
        SessionEvent::ArchiveSelected { period, .. } => format!("Opening {}...", period.label()),
        SessionEvent::GamesCleared { .. } => return None,
        SessionEvent::GamesLoaded { period, games } => {
            format!("Games in {}:\n{}", period.label(), game_list(games))
        }
        SessionEvent::GamesFailed { period, message, .. } => {
            format!("Could not fetch games for {}: {message}", period.label())
        }
        SessionEvent::GameSelected(game) => game_details(game),
        SessionEvent::AnalysisPending => "Analyzing...".to_string(),
        SessionEvent::AnalysisInstalled { moves, .. } => {
            format!("Analysis ready: {moves} moves. Use 'next' and 'prev' to step through.")
        }
        SessionEvent::AnalysisFailed(message) => {
            format!("Analysis failed. Please try again. ({message})")
        }
        SessionEvent::AnalysisFinished => return None,
        SessionEvent::PositionChanged(position) => position.to_string(),
    };
    Some(line)
}
