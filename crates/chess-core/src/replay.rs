//! Move-by-move replay over an installed analysis.

use crate::analysis::AnalysisResult;

/// Cursor over `AnalysisResult::positions`, clamped to `[0, len - 1]`.
///
/// Stepping past either end is a no-op rather than an error.
#[derive(Debug, Default)]
pub struct ReplayState {
    result: Option<AnalysisResult>,
    cursor: usize,
}

impl ReplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any prior result and rewind to the starting position.
    pub fn initialize(&mut self, result: AnalysisResult) {
        self.result = Some(result);
        self.cursor = 0;
    }

    /// Advance one ply. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        match &self.result {
            Some(result) if self.cursor + 1 < result.positions().len() => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    /// Step back one ply. Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.result.is_some() && self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.result
            .as_ref()
            .map(|result| result.positions()[self.cursor].as_str())
    }

    /// The move that produced the current position; `None` at the start.
    pub fn last_move(&self) -> Option<&str> {
        let result = self.result.as_ref()?;
        let index = self.cursor.checked_sub(1)?;
        result.moves().get(index).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of positions in the installed result (0 when empty).
    pub fn len(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.positions().len())
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_none()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }
}
