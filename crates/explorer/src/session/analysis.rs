//! Analysis submission and the replay it feeds.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use chess_core::{AnalysisPayload, AnalysisResult, ReplayState};

use crate::clients::{AnalysisResponse, ApiClient};
use crate::error::AnalysisFailure;
use crate::session::events::{EventBus, ReplayPosition, SessionEvent};

/// Holds the in-flight flag for as long as it lives.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Back,
}

/// Submits notation for analysis and owns the replay of the installed result.
///
/// Only one analysis runs at a time. A failed attempt never touches the
/// installed result.
#[derive(Default)]
pub struct AnalysisController {
    in_flight: AtomicBool,
    replay: Mutex<ReplayState>,
}

impl AnalysisController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one analysis and install its result, rewinding the replay.
    ///
    /// `show` receives the starting snapshot while the replay is still
    /// locked, so no step can be drawn ahead of it. The in-flight flag is
    /// released on every exit, including when the returned future is
    /// dropped before completion.
    pub async fn analyze<F>(
        &self,
        api: &ApiClient,
        events: &EventBus,
        notation: &str,
        show: F,
    ) -> Result<ReplayPosition, AnalysisFailure>
    where
        F: FnOnce(&str),
    {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            let failure = AnalysisFailure::InFlight;
            tracing::warn!("{failure}");
            events.emit(SessionEvent::AnalysisFailed(failure.to_string()));
            return Err(failure);
        };

        events.emit(SessionEvent::AnalysisPending);
        // Let the pending indicator reach the user before the request suspends.
        tokio::task::yield_now().await;

        let outcome = self.submit_and_install(api, notation, show).await;
        match &outcome {
            Ok(position) => {
                let moves = position.last_index;
                events.emit(SessionEvent::AnalysisInstalled {
                    moves,
                    position: position.clone(),
                });
            }
            Err(e) => {
                tracing::error!("Error during analysis: {e}");
                events.emit(SessionEvent::AnalysisFailed(e.to_string()));
            }
        }

        drop(guard);
        events.emit(SessionEvent::AnalysisFinished);
        outcome
    }

    async fn submit_and_install<F>(
        &self,
        api: &ApiClient,
        notation: &str,
        show: F,
    ) -> Result<ReplayPosition, AnalysisFailure>
    where
        F: FnOnce(&str),
    {
        let value = match api.submit_analysis(notation).await? {
            AnalysisResponse::Json(value) => value,
            AnalysisResponse::Text(text) => return Err(AnalysisFailure::Unparsed(text)),
        };

        let payload: AnalysisPayload =
            serde_json::from_value(value).map_err(AnalysisFailure::Payload)?;
        let result = AnalysisResult::try_from(payload).map_err(AnalysisFailure::Shape)?;

        tracing::info!(
            moves = result.moves().len(),
            fens = result.positions().len(),
            first = result.starting_position(),
            last = result.final_position(),
            "Analysis result"
        );

        let start = ReplayPosition {
            index: 0,
            last_index: result.moves().len(),
            snapshot: result.starting_position().to_string(),
            last_move: None,
        };
        let mut replay = self.replay.lock().await;
        replay.initialize(result);
        show(&start.snapshot);
        Ok(start)
    }

    /// Move the cursor one ply and hand the new snapshot to `show` before
    /// the replay is unlocked. `None` when nothing is installed or the
    /// cursor is already at that end.
    pub async fn step<F>(&self, step: Step, show: F) -> Option<ReplayPosition>
    where
        F: FnOnce(&str),
    {
        let mut replay = self.replay.lock().await;
        let moved = match step {
            Step::Forward => replay.next(),
            Step::Back => replay.previous(),
        };
        if !moved {
            return None;
        }
        let position = current_of(&replay)?;
        show(&position.snapshot);
        Some(position)
    }

    pub async fn current(&self) -> Option<ReplayPosition> {
        current_of(&*self.replay.lock().await)
    }

    /// Moves of the installed result, if any.
    pub async fn moves(&self) -> Option<Vec<String>> {
        self.replay
            .lock()
            .await
            .result()
            .map(|result| result.moves().to_vec())
    }
}

fn current_of(replay: &ReplayState) -> Option<ReplayPosition> {
    let snapshot = replay.current()?;
    Some(ReplayPosition {
        index: replay.cursor(),
        last_index: replay.len() - 1,
        snapshot: snapshot.to_string(),
        last_move: replay.last_move().map(str::to_string),
    })
}
