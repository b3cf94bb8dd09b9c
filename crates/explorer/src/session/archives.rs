use tokio::sync::Mutex;

use chess_core::{ArchivePeriod, Username};

use crate::clients::ApiClient;
use crate::error::ExplorerError;
use crate::session::events::{EventBus, SessionEvent};

/// Archive periods listed for the most recently requested username.
#[derive(Debug, Clone, Default)]
pub struct ArchiveListing {
    pub username: Option<Username>,
    pub periods: Vec<ArchivePeriod>,
}

#[derive(Default)]
pub struct ArchiveBrowser {
    listing: Mutex<ArchiveListing>,
}

impl ArchiveBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the username, clear the old listing, and fetch the new one.
    ///
    /// Identifiers that do not end in `YYYY/MM` are skipped.
    pub async fn load(
        &self,
        api: &ApiClient,
        events: &EventBus,
        raw_username: &str,
    ) -> Result<Vec<ArchivePeriod>, ExplorerError> {
        let username = match Username::parse(raw_username) {
            Ok(username) => username,
            Err(e) => {
                events.emit(SessionEvent::ValidationFailed(e.to_string()));
                return Err(e.into());
            }
        };

        {
            let mut listing = self.listing.lock().await;
            listing.username = Some(username.clone());
            listing.periods.clear();
        }
        events.emit(SessionEvent::ArchivesCleared {
            username: username.clone(),
        });

        tracing::info!(%username, "Loading archives");
        match api.list_archives(&username).await {
            Ok(identifiers) => {
                let periods = parse_periods(&identifiers);
                tracing::info!(%username, "Found {} monthly archives", periods.len());

                {
                    let mut listing = self.listing.lock().await;
                    listing.username = Some(username.clone());
                    listing.periods = periods.clone();
                }
                events.emit(SessionEvent::ArchivesLoaded {
                    username,
                    periods: periods.clone(),
                });
                Ok(periods)
            }
            Err(e) => {
                tracing::error!(%username, "Error fetching archives: {e}");
                self.listing.lock().await.periods.clear();
                events.emit(SessionEvent::ArchivesFailed {
                    username,
                    status: e.status().map(|s| s.as_u16()),
                    message: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Pick a listed period. The username travels with it so the game load
    /// never reads it from anywhere else.
    pub async fn select(&self, index: usize) -> Option<(Username, ArchivePeriod)> {
        let listing = self.listing.lock().await;
        let username = listing.username.clone()?;
        let period = listing.periods.get(index)?.clone();
        Some((username, period))
    }

    pub async fn listing(&self) -> ArchiveListing {
        self.listing.lock().await.clone()
    }
}

fn parse_periods(identifiers: &[String]) -> Vec<ArchivePeriod> {
    identifiers
        .iter()
        .filter_map(|id| match ArchivePeriod::from_identifier(id) {
            Ok(period) => Some(period),
            Err(e) => {
                tracing::warn!("Skipping archive: {e}");
                None
            }
        })
        .collect()
}
