//! One browsing session: archives → games → analysis → replay.
//!
//! The `Session` owns every component and passes the username, period and
//! selected game between them explicitly. All operations take `&self`, so a
//! slow request in one component never blocks the others; when two loads for
//! the same component overlap, the one that completes last wins.

pub mod analysis;
pub mod archives;
pub mod events;
pub mod games;

use std::sync::{Mutex, PoisonError};

use chess_core::{ArchivePeriod, GameSummary};

use crate::board::BoardDisplay;
use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::{ClientError, ExplorerError};

use self::analysis::{AnalysisController, Step};
use self::archives::{ArchiveBrowser, ArchiveListing};
use self::events::{EventBus, ReplayPosition, SessionEvent};
use self::games::{GameBrowser, GameListing};

pub struct Session {
    api: ApiClient,
    events: EventBus,
    archives: ArchiveBrowser,
    games: GameBrowser,
    analysis: AnalysisController,
    board: Mutex<Box<dyn BoardDisplay>>,
    animate: bool,
}

impl Session {
    pub fn new(api: ApiClient, board: Box<dyn BoardDisplay>, animate: bool) -> Self {
        Self {
            api,
            events: EventBus::new(),
            archives: ArchiveBrowser::new(),
            games: GameBrowser::new(),
            analysis: AnalysisController::new(),
            board: Mutex::new(board),
            animate,
        }
    }

    pub fn from_config(config: &Config, board: Box<dyn BoardDisplay>) -> Result<Self, ClientError> {
        Ok(Self::new(ApiClient::new(config)?, board, config.animate))
    }

    /// Register a handler for every future event. Done while wiring, before
    /// the session is shared.
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(handler);
    }

    pub async fn load_archives(&self, raw_username: &str) -> Result<Vec<ArchivePeriod>, ExplorerError> {
        self.archives.load(&self.api, &self.events, raw_username).await
    }

    /// Select a listed archive and load its games.
    pub async fn open_archive(&self, index: usize) -> Result<Vec<GameSummary>, ExplorerError> {
        let (username, period) = self
            .archives
            .select(index)
            .await
            .ok_or_else(|| ExplorerError::Selection(format!("No archive #{index} listed")))?;

        self.events.emit(SessionEvent::ArchiveSelected {
            username: username.clone(),
            period: period.clone(),
        });
        self.games.load(&self.api, &self.events, &username, &period).await
    }

    pub async fn select_game(&self, index: usize) -> Result<GameSummary, ExplorerError> {
        self.games.select(&self.events, index).await
    }

    /// Analyze the selected game and show its starting position.
    pub async fn analyze_selected(&self) -> Result<ReplayPosition, ExplorerError> {
        let game = self
            .games
            .selected()
            .await
            .ok_or_else(|| ExplorerError::Selection("No game selected".to_string()))?;

        if game.pgn.trim().is_empty() {
            let message = "Selected game has no move notation".to_string();
            self.events.emit(SessionEvent::ValidationFailed(message.clone()));
            return Err(ExplorerError::Validation(message));
        }

        let start = self
            .analysis
            .analyze(&self.api, &self.events, &game.pgn, |snapshot| {
                self.draw(snapshot, self.animate)
            })
            .await?;
        Ok(start)
    }

    pub async fn next_move(&self) -> Option<ReplayPosition> {
        self.step(Step::Forward).await
    }

    pub async fn previous_move(&self) -> Option<ReplayPosition> {
        self.step(Step::Back).await
    }

    async fn step(&self, step: Step) -> Option<ReplayPosition> {
        let position = self
            .analysis
            .step(step, |snapshot| self.draw(snapshot, self.animate))
            .await?;
        self.events.emit(SessionEvent::PositionChanged(position.clone()));
        Some(position)
    }

    /// Redraw the current replay position, if any.
    pub async fn redraw(&self) -> Option<ReplayPosition> {
        let position = self.analysis.current().await?;
        self.draw(&position.snapshot, false);
        Some(position)
    }

    fn draw(&self, snapshot: &str, animate: bool) {
        self.board
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .position(snapshot, animate);
    }

    pub async fn current_position(&self) -> Option<ReplayPosition> {
        self.analysis.current().await
    }

    pub async fn analysis_moves(&self) -> Option<Vec<String>> {
        self.analysis.moves().await
    }

    pub async fn archive_listing(&self) -> ArchiveListing {
        self.archives.listing().await
    }

    pub async fn game_listing(&self) -> GameListing {
        self.games.listing().await
    }

    pub async fn selected_game(&self) -> Option<GameSummary> {
        self.games.selected().await
    }

    pub fn analysis_in_flight(&self) -> bool {
        self.analysis.is_in_flight()
    }
}
