//! Board display collaborator.

use std::io::Write;

use chess_core::board::render_fen;

/// Something that can show a position snapshot. Built once per session and
/// reused across analyses.
pub trait BoardDisplay: Send {
    fn position(&mut self, snapshot: &str, animate: bool);
}

/// Draws positions as a text grid on any writer (stdout by default).
pub struct TextBoard<W: Write + Send> {
    out: W,
}

impl TextBoard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write + Send> TextBoard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> BoardDisplay for TextBoard<W> {
    // No animation in a terminal; the flag is accepted and ignored.
    fn position(&mut self, snapshot: &str, _animate: bool) {
        let rendered = render_fen(snapshot).unwrap_or_else(|| {
            tracing::warn!(snapshot, "Unrenderable position snapshot");
            snapshot.to_string()
        });
        if let Err(e) = writeln!(self.out, "{rendered}") {
            tracing::warn!("Failed to draw board: {e}");
        }
    }
}
