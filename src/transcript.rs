//! Transcript display state
//!
//! A single mutable string shown in the text view. It is replaced wholesale
//! by the best-ranked candidate of each recognition result, and cleared to
//! empty with a placeholder hint when listening begins.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Snapshot of the transcript state sent to the webview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSnapshot {
    /// Displayed transcript text
    pub text: String,
    /// Placeholder hint shown while the text is empty
    pub hint: Option<String>,
}

/// Transcript state.
#[derive(Debug, Default)]
pub struct Transcript {
    text: String,
    hint: Option<String>,
}

impl Transcript {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            hint: None,
        }
    }

    /// Clears the text and installs the listening placeholder hint.
    pub fn clear_for_listening(&mut self, hint: impl Into<String>) {
        self.text.clear();
        self.hint = Some(hint.into());
    }

    /// Applies a ranked candidate list from the recognizer.
    ///
    /// A non-empty list replaces the text with the highest-confidence
    /// candidate; an empty list leaves the display unchanged. Returns
    /// whether the display changed.
    pub fn apply_result(&mut self, candidates: &[String]) -> bool {
        match candidates.first() {
            Some(best) => {
                self.text = best.clone();
                self.hint = None;
                true
            }
            None => false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        TranscriptSnapshot {
            text: self.text.clone(),
            hint: self.hint.clone(),
        }
    }
}

/// Global transcript instance
static TRANSCRIPT: RwLock<Transcript> = RwLock::new(Transcript::new());

/// Clear the transcript for a new listening session; returns the snapshot
/// to display.
pub fn begin_listening(hint: impl Into<String>) -> TranscriptSnapshot {
    let mut transcript = TRANSCRIPT.write();
    transcript.clear_for_listening(hint);
    transcript.snapshot()
}

/// Apply a recognition result; returns the new snapshot if the display
/// changed.
pub fn apply_result(candidates: &[String]) -> Option<TranscriptSnapshot> {
    let mut transcript = TRANSCRIPT.write();
    if transcript.apply_result(candidates) {
        Some(transcript.snapshot())
    } else {
        None
    }
}

// --- IPC Commands ---

/// Current transcript state, for initial render.
#[tauri::command]
pub fn get_transcript() -> TranscriptSnapshot {
    TRANSCRIPT.read().snapshot()
}
