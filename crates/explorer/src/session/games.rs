use tokio::sync::Mutex;

use chess_core::{ArchivePeriod, GameSummary, Username};

use crate::clients::ApiClient;
use crate::error::ExplorerError;
use crate::session::events::{EventBus, SessionEvent};

/// Games of the most recently requested archive period.
#[derive(Debug, Clone, Default)]
pub struct GameListing {
    pub username: Option<Username>,
    pub period: Option<ArchivePeriod>,
    pub games: Vec<GameSummary>,
}

/// Lists games for one archive and remembers the selected game.
///
/// The selection is kept across reloads so a pending analysis still has
/// its summary; it only changes when another game is picked.
#[derive(Default)]
pub struct GameBrowser {
    listing: Mutex<GameListing>,
    selected: Mutex<Option<GameSummary>>,
}

impl GameBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(
        &self,
        api: &ApiClient,
        events: &EventBus,
        username: &Username,
        period: &ArchivePeriod,
    ) -> Result<Vec<GameSummary>, ExplorerError> {
        {
            let mut listing = self.listing.lock().await;
            listing.username = Some(username.clone());
            listing.period = Some(period.clone());
            listing.games.clear();
        }
        events.emit(SessionEvent::GamesCleared {
            period: period.clone(),
        });

        match api.list_games(username, period).await {
            Ok(games) => {
                tracing::info!(%username, archive = %period, "{} games", games.len());
                {
                    let mut listing = self.listing.lock().await;
                    listing.username = Some(username.clone());
                    listing.period = Some(period.clone());
                    listing.games = games.clone();
                }
                events.emit(SessionEvent::GamesLoaded {
                    period: period.clone(),
                    games: games.clone(),
                });
                Ok(games)
            }
            Err(e) => {
                tracing::error!(%username, archive = %period, "Error fetching archive games: {e}");
                self.listing.lock().await.games.clear();
                events.emit(SessionEvent::GamesFailed {
                    period: period.clone(),
                    status: e.status().map(|s| s.as_u16()),
                    message: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    pub async fn select(
        &self,
        events: &EventBus,
        index: usize,
    ) -> Result<GameSummary, ExplorerError> {
        let game = self
            .listing
            .lock()
            .await
            .games
            .get(index)
            .cloned()
            .ok_or_else(|| ExplorerError::Selection(format!("No game #{index} in this archive")))?;

        *self.selected.lock().await = Some(game.clone());
        tracing::debug!("Selected game PGN: {}", game.pgn);
        events.emit(SessionEvent::GameSelected(game.clone()));
        Ok(game)
    }

    pub async fn selected(&self) -> Option<GameSummary> {
        self.selected.lock().await.clone()
    }

    pub async fn listing(&self) -> GameListing {
        self.listing.lock().await.clone()
    }
}
