//! Press-to-talk controller and recognition event relay
//!
//! Pointer-down on the mic button starts a recognition session carrying the
//! currently selected locale; pointer-up stops it. Recognizer callbacks are
//! relayed into two pieces of UI state: the transcript text and the mic
//! button state.

use crate::recognizer::{self, RecognitionEvent};
use crate::{config, transcript};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tauri::{AppHandle, Emitter};

/// Tracks whether the mic button is held down (session in flight)
static LISTENING: AtomicBool = AtomicBool::new(false);

/// Toast shown for any recognizer error; the error code is not surfaced
const RECOGNITION_ERROR_MESSAGE: &str = "Speech recognition error. Please try again.";

/// Mic button state shown in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MicState {
    /// Idle graphic; press to talk
    #[default]
    Idle,
    /// Listening graphic; recognition session in flight
    Listening,
}

/// Payload of the `mic-state` event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MicStatePayload {
    state: MicState,
}

/// Payload of the `recognition-toast` event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToastPayload {
    message: String,
    duration_ms: u32,
}

/// Handle the mic button being pressed down.
///
/// Starts a recognition session with the currently selected locale. The
/// mic button switches to the listening graphic when the service accepts
/// the session, via the relayed begin event, so the UI never shows
/// listening for a session that failed to start.
#[tauri::command]
pub fn talk_press_down(app: AppHandle) -> Result<(), String> {
    tracing::info!("Mic button pressed - starting recognition");
    recognizer::start_listening(app)
}

/// Handle the mic button being released.
///
/// Stops audio capture; the pending result arrives through the relay.
#[tauri::command]
pub fn talk_press_up(app: AppHandle) -> Result<(), String> {
    tracing::info!("Mic button released - stopping recognition");
    recognizer::stop_listening(app)
}

/// Check if a recognition session is in flight.
#[tauri::command]
pub fn is_listening() -> bool {
    LISTENING.load(Ordering::SeqCst)
}

/// Relay a recognizer callback into UI state updates.
///
/// An error or a result always returns the mic button to idle, regardless
/// of prior state. Partial results are ignored.
pub fn relay_event(app: &AppHandle, event: RecognitionEvent) {
    if starts_listening(&event) {
        LISTENING.store(true, Ordering::SeqCst);
        emit_mic_state(app, MicState::Listening);
    }
    if ends_listening(&event) {
        LISTENING.store(false, Ordering::SeqCst);
        emit_mic_state(app, MicState::Idle);
    }

    match event {
        RecognitionEvent::Begin => {
            let snapshot = transcript::begin_listening(listening_hint());
            emit_transcript(app, snapshot);
        }
        RecognitionEvent::End => {
            tracing::debug!("End of speech");
        }
        RecognitionEvent::Partial { transcript } => {
            tracing::debug!("Ignoring partial result ({} chars)", transcript.len());
        }
        RecognitionEvent::Result { transcripts } => {
            match transcript::apply_result(&transcripts) {
                Some(snapshot) => emit_transcript(app, snapshot),
                None => tracing::debug!("Empty candidate list; transcript unchanged"),
            }
        }
        RecognitionEvent::Error { message } => {
            tracing::warn!("Recognition error: {}", message);
            emit_toast(app, RECOGNITION_ERROR_MESSAGE);
        }
    }
}

/// Whether this event switches the mic button to the listening graphic.
fn starts_listening(event: &RecognitionEvent) -> bool {
    matches!(event, RecognitionEvent::Begin)
}

/// Whether this event returns the mic button to the idle graphic.
fn ends_listening(event: &RecognitionEvent) -> bool {
    matches!(
        event,
        RecognitionEvent::Result { .. } | RecognitionEvent::Error { .. }
    )
}

/// Placeholder hint shown while listening, from config.
fn listening_hint() -> String {
    config::get_config()
        .map(|c| c.ui.listening_hint)
        .unwrap_or_else(|_| config::UiConfig::default().listening_hint)
}

fn emit_mic_state(app: &AppHandle, state: MicState) {
    if let Err(e) = app.emit("mic-state", MicStatePayload { state }) {
        tracing::warn!("Failed to emit mic-state event: {}", e);
    }
}

fn emit_transcript(app: &AppHandle, snapshot: transcript::TranscriptSnapshot) {
    if let Err(e) = app.emit("transcript-changed", snapshot) {
        tracing::warn!("Failed to emit transcript-changed event: {}", e);
    }
}

fn emit_toast(app: &AppHandle, message: &str) {
    let duration_ms = config::get_config()
        .map(|c| c.ui.toast_duration_ms)
        .unwrap_or_else(|_| config::UiConfig::default().toast_duration_ms);
    let payload = ToastPayload {
        message: message.to_string(),
        duration_ms,
    };
    if let Err(e) = app.emit("recognition-toast", payload) {
        tracing::warn!("Failed to emit recognition-toast event: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_ends_listening() {
        // Both an empty and a non-empty result reset the mic button
        assert!(ends_listening(&RecognitionEvent::Result {
            transcripts: vec![]
        }));
        assert!(ends_listening(&RecognitionEvent::Result {
            transcripts: vec!["hello".to_string()]
        }));
    }

    #[test]
    fn test_error_ends_listening() {
        assert!(ends_listening(&RecognitionEvent::Error {
            message: "Connection failed".to_string()
        }));
    }

    #[test]
    fn test_begin_and_partial_keep_listening() {
        assert!(!ends_listening(&RecognitionEvent::Begin));
        assert!(!ends_listening(&RecognitionEvent::End));
        assert!(!ends_listening(&RecognitionEvent::Partial {
            transcript: "hel".to_string()
        }));
    }

    #[test]
    fn test_only_begin_starts_listening() {
        // The listening graphic appears with the begin event, not on press,
        // so a session that fails to start never shows as listening
        assert!(starts_listening(&RecognitionEvent::Begin));
        assert!(!starts_listening(&RecognitionEvent::End));
        assert!(!starts_listening(&RecognitionEvent::Partial {
            transcript: "hel".to_string()
        }));
        assert!(!starts_listening(&RecognitionEvent::Result {
            transcripts: vec!["hello".to_string()]
        }));
        assert!(!starts_listening(&RecognitionEvent::Error {
            message: "Connection failed".to_string()
        }));
    }

    #[test]
    fn test_mic_state_serialisation() {
        assert_eq!(serde_json::to_string(&MicState::Idle).unwrap(), "\"idle\"");
        assert_eq!(
            serde_json::to_string(&MicState::Listening).unwrap(),
            "\"listening\""
        );
    }

    #[test]
    fn test_toast_payload_serialisation() {
        let payload = ToastPayload {
            message: RECOGNITION_ERROR_MESSAGE.to_string(),
            duration_ms: 2500,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"durationMs\":2500"));
        assert!(json.contains("Speech recognition error"));
    }

    #[test]
    fn test_listening_flag_tracks_press() {
        LISTENING.store(false, Ordering::SeqCst);
        assert!(!is_listening());

        // Simulate press down
        LISTENING.store(true, Ordering::SeqCst);
        assert!(is_listening());

        // Simulate a result arriving
        LISTENING.store(false, Ordering::SeqCst);
        assert!(!is_listening());
    }
}
