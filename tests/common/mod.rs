//! Shared test fixtures: an in-process stub of the explorer backend and a
//! session wired to it.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use archive_explorer::board::BoardDisplay;
use archive_explorer::config::Config;
use archive_explorer::session::events::SessionEvent;
use archive_explorer::session::Session;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
pub const AFTER_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
pub const AFTER_NF3: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2";

// ---------------------------------------------------------------------------
// Canned responses
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Canned {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    async fn respond(self) -> Response {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let content_type = if serde_json::from_str::<Value>(&self.body).is_ok() {
            "application/json"
        } else {
            "text/plain"
        };
        let status = StatusCode::from_u16(self.status).unwrap();
        (status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

fn not_found() -> Canned {
    Canned::json(404, json!({ "detail": "Not found" }))
}

// ---------------------------------------------------------------------------
// Stub backend
// ---------------------------------------------------------------------------

/// Responses keyed by username / archive, plus a queue of analysis replies
/// (the last one repeats once the queue is drained).
#[derive(Default)]
pub struct StubBackend {
    pub archives: Mutex<HashMap<String, Canned>>,
    pub games: Mutex<HashMap<String, Canned>>,
    pub analyses: Mutex<VecDeque<Canned>>,

    pub archive_hits: AtomicUsize,
    pub games_hits: AtomicUsize,
    pub analyze_hits: AtomicUsize,

    pub last_archive_query: Mutex<Option<String>>,
    pub last_pgn: Mutex<Option<String>>,
}

impl StubBackend {
    pub fn with_archives(self, username: &str, canned: Canned) -> Self {
        self.archives.lock().unwrap().insert(username.to_string(), canned);
        self
    }

    pub fn with_games(self, archive: &str, canned: Canned) -> Self {
        self.games.lock().unwrap().insert(archive.to_string(), canned);
        self
    }

    pub fn with_analysis(self, canned: Canned) -> Self {
        self.analyses.lock().unwrap().push_back(canned);
        self
    }

    pub fn hits(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

async fn archives_handler(
    State(stub): State<Arc<StubBackend>>,
    Path(username): Path<String>,
) -> Response {
    stub.archive_hits.fetch_add(1, Ordering::SeqCst);
    let canned = stub.archives.lock().unwrap().get(&username).cloned();
    canned.unwrap_or_else(not_found).respond().await
}

async fn games_handler(
    State(stub): State<Arc<StubBackend>>,
    Path(_username): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    stub.games_hits.fetch_add(1, Ordering::SeqCst);
    let archive = query.get("archive").cloned().unwrap_or_default();
    *stub.last_archive_query.lock().unwrap() = Some(archive.clone());
    let canned = stub.games.lock().unwrap().get(&archive).cloned();
    canned.unwrap_or_else(not_found).respond().await
}

async fn analyze_handler(State(stub): State<Arc<StubBackend>>, Json(body): Json<Value>) -> Response {
    stub.analyze_hits.fetch_add(1, Ordering::SeqCst);
    *stub.last_pgn.lock().unwrap() = body["pgn"].as_str().map(|s| s.to_string());
    let canned = {
        let mut queue = stub.analyses.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    };
    canned.unwrap_or_else(not_found).respond().await
}

/// Serve the stub on an ephemeral port and return its base URL.
pub async fn serve(stub: Arc<StubBackend>) -> String {
    let app = Router::new()
        .route("/api/chesscom/{username}/archives", get(archives_handler))
        .route("/api/chesscom/{username}/games", get(games_handler))
        .route("/api/analyze", post(analyze_handler))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub backend error");
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Session harness
// ---------------------------------------------------------------------------

pub type BoardCalls = Arc<Mutex<Vec<(String, bool)>>>;

/// Board that remembers every `position` call.
pub struct RecordingBoard {
    calls: BoardCalls,
}

impl BoardDisplay for RecordingBoard {
    fn position(&mut self, snapshot: &str, animate: bool) {
        self.calls.lock().unwrap().push((snapshot.to_string(), animate));
    }
}

pub struct Harness {
    pub session: Session,
    pub stub: Arc<StubBackend>,
    pub board: BoardCalls,
    pub events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl Harness {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn board_calls(&self) -> Vec<(String, bool)> {
        self.board.lock().unwrap().clone()
    }
}

pub async fn harness(stub: StubBackend) -> Harness {
    harness_with(stub, |_, _| {}).await
}

/// Like `harness`, with a hook to register extra handlers before the
/// session is handed out.
pub async fn harness_with<F>(stub: StubBackend, wire: F) -> Harness
where
    F: FnOnce(&mut Session, &Arc<StubBackend>),
{
    let stub = Arc::new(stub);
    let base_url = serve(Arc::clone(&stub)).await;

    let board: BoardCalls = Arc::default();
    let events: Arc<Mutex<Vec<SessionEvent>>> = Arc::default();

    let config = Config::with_base_url(&base_url);
    let mut session = Session::from_config(
        &config,
        Box::new(RecordingBoard {
            calls: Arc::clone(&board),
        }),
    )
    .expect("Failed to build session");

    let sink = Arc::clone(&events);
    session.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    wire(&mut session, &stub);

    Harness {
        session,
        stub,
        board,
        events,
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

pub fn archives_body(identifiers: &[String]) -> Value {
    json!({ "archives": identifiers })
}

pub fn archive_url(username: &str, year: &str, month: &str) -> String {
    format!("https://api.chess.com/pub/player/{username}/games/{year}/{month}")
}

pub fn game(white: (&str, &str), black: (&str, &str), pgn: &str) -> Value {
    json!({
        "url": format!("https://www.chess.com/game/live/{}{}", white.0, black.0),
        "pgn": pgn,
        "time_control": "600",
        "end_time": 1_688_169_600,
        "rated": true,
        "rules": "chess",
        "white": { "username": white.0, "rating": 1500, "result": white.1 },
        "black": { "username": black.0, "rating": 1450, "result": black.1 },
    })
}

pub fn games_body(games: Vec<Value>) -> Value {
    json!({ "games": games })
}

pub fn analysis_body(moves: &[&str], fens: &[&str]) -> Value {
    json!({ "moves": moves, "fens": fens })
}

/// Three-ply analysis: 1. e4 e5 2. Nf3
pub fn opening_analysis() -> Value {
    analysis_body(&["e4", "e5", "Nf3"], &[START_FEN, AFTER_E4, AFTER_E5, AFTER_NF3])
}
