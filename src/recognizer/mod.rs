//! Speech recognizer handle and event types
//!
//! The recognizer is an out-of-process speech service reached over HTTP.
//! The handle is created lazily on first use from the current configuration
//! and destroyed when the window goes away; recognition outcomes are relayed
//! to the UI as [`RecognitionEvent`]s.

pub mod service;

pub use service::{RecognizerError, SpeechServiceClient};

use crate::{config, language, session};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tauri::AppHandle;

/// Parameters of one recognition session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionRequest {
    /// Locale tag selecting the recognizer's expected input language
    pub locale: String,
    /// Use the free-form language model rather than a command grammar
    pub free_form: bool,
}

/// Callbacks delivered by the recognizer, in the order they occur.
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// The service accepted the session and began capturing audio
    Begin,
    /// Audio capture ended; a result is still pending
    End,
    /// An interim hypothesis; the relay ignores these
    Partial { transcript: String },
    /// Final transcript candidates ranked by confidence, best first
    Result { transcripts: Vec<String> },
    /// The session failed
    Error { message: String },
}

/// Global recognizer handle
static RECOGNIZER: OnceLock<Mutex<Option<SpeechServiceClient>>> = OnceLock::new();

/// Session currently capturing audio, if any
static ACTIVE_SESSION: Mutex<Option<String>> = Mutex::new(None);

/// Set when release arrives before the start round-trip has registered a
/// session id; the session task then stops capture as soon as it has one
static STOP_PENDING: AtomicBool = AtomicBool::new(false);

fn handle() -> &'static Mutex<Option<SpeechServiceClient>> {
    RECOGNIZER.get_or_init(|| Mutex::new(None))
}

/// Get the recognizer client, creating it from config on first use.
fn obtain_client() -> SpeechServiceClient {
    let mut guard = handle().lock();
    guard
        .get_or_insert_with(|| {
            let cfg = config::get_config().unwrap_or_default();
            let client = SpeechServiceClient::with_config(
                &cfg.recognizer.service_url,
                cfg.recognizer.timeout_secs,
            );
            tracing::info!("Speech recognizer created for {}", client.base_url());
            client
        })
        .clone()
}

/// Build the request for the next session from the current language
/// selection and configuration.
fn build_request() -> RecognitionRequest {
    let free_form = config::get_config()
        .map(|c| c.recognizer.free_form)
        .unwrap_or(true);
    RecognitionRequest {
        locale: language::current_locale(),
        free_form,
    }
}

/// Start a recognition session.
///
/// Spawns the session task: start capture, then await the ranked result
/// and relay it. A release that lands during the start round-trip is
/// honoured as soon as the session id is known. A press while a previous
/// result is still pending is not guarded against; the later result wins.
pub fn start_listening(app: AppHandle) -> Result<(), String> {
    let client = obtain_client();
    let request = build_request();
    STOP_PENDING.store(false, Ordering::SeqCst);
    tracing::info!("Starting recognition session (locale: {})", request.locale);

    tauri::async_runtime::spawn(async move {
        let session_id = match client.start_session(&request).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("Failed to start recognition session: {}", e);
                session::relay_event(&app, RecognitionEvent::Error {
                    message: e.to_string(),
                });
                return;
            }
        };

        let stop_now = register_session(&session_id);
        session::relay_event(&app, RecognitionEvent::Begin);

        if stop_now {
            // The button was released during the start round-trip
            tracing::info!(
                "Release preceded session {} registration, stopping capture",
                session_id
            );
            match client.stop_session(&session_id).await {
                Ok(()) => session::relay_event(&app, RecognitionEvent::End),
                Err(e) => {
                    tracing::warn!("Failed to stop recognition session {}: {}", session_id, e)
                }
            }
        }

        let event = match client.fetch_result(&session_id).await {
            Ok(transcripts) => {
                tracing::info!(
                    "Recognition session {} returned {} candidate(s)",
                    session_id,
                    transcripts.len()
                );
                RecognitionEvent::Result { transcripts }
            }
            Err(e) => {
                tracing::error!("Recognition session {} failed: {}", session_id, e);
                RecognitionEvent::Error {
                    message: e.to_string(),
                }
            }
        };

        {
            let mut active = ACTIVE_SESSION.lock();
            if active.as_deref() == Some(session_id.as_str()) {
                *active = None;
            }
        }

        session::relay_event(&app, event);
    });

    Ok(())
}

/// Record the session id accepted by the service.
///
/// Returns whether the button was already released, in which case capture
/// must stop immediately. The flag is consumed under the session lock so a
/// release always lands on exactly one of the two stop paths.
fn register_session(session_id: &str) -> bool {
    let mut active = ACTIVE_SESSION.lock();
    *active = Some(session_id.to_string());
    STOP_PENDING.swap(false, Ordering::SeqCst)
}

/// Session id to stop on release.
///
/// Returns `None` and flags a pending stop when the start round-trip has
/// not registered a session yet.
fn session_to_stop() -> Option<String> {
    let active = ACTIVE_SESSION.lock();
    match active.clone() {
        Some(id) => Some(id),
        None => {
            STOP_PENDING.store(true, Ordering::SeqCst);
            None
        }
    }
}

/// Stop the active recognition session, if any.
///
/// The pending result poll completes with whatever the service captured.
pub fn stop_listening(app: AppHandle) -> Result<(), String> {
    let Some(session_id) = session_to_stop() else {
        // Start round-trip still in flight; the session task stops capture
        return Ok(());
    };

    let client = obtain_client();
    tauri::async_runtime::spawn(async move {
        match client.stop_session(&session_id).await {
            Ok(()) => session::relay_event(&app, RecognitionEvent::End),
            Err(e) => {
                tracing::warn!("Failed to stop recognition session {}: {}", session_id, e)
            }
        }
    });

    Ok(())
}

/// Drop the recognizer handle. It is re-created lazily on the next press.
pub fn destroy() {
    if handle().lock().take().is_some() {
        tracing::info!("Speech recognizer destroyed");
    }
    *ACTIVE_SESSION.lock() = None;
    STOP_PENDING.store(false, Ordering::SeqCst);
}

// --- IPC Commands ---

/// Check whether the speech service is reachable.
#[tauri::command]
pub async fn is_recognizer_available() -> bool {
    obtain_client().is_available().await
}

/// Drop the recognizer handle from the frontend.
#[tauri::command]
pub fn destroy_recognizer() {
    destroy();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serialises tests that touch the global session state.
    static TEST_GUARD: Mutex<()> = Mutex::new(());

    fn reset_session_state() {
        *ACTIVE_SESSION.lock() = None;
        STOP_PENDING.store(false, Ordering::SeqCst);
    }

    #[test]
    fn test_request_carries_free_form_flag() {
        let request = RecognitionRequest {
            locale: "en-US".to_string(),
            free_form: true,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"freeForm\":true"));
        assert!(json.contains("\"locale\":\"en-US\""));
    }

    #[test]
    fn test_destroy_clears_active_session() {
        let _guard = TEST_GUARD.lock();
        *ACTIVE_SESSION.lock() = Some("s-1".to_string());
        STOP_PENDING.store(true, Ordering::SeqCst);

        destroy();

        assert!(ACTIVE_SESSION.lock().is_none());
        assert!(!STOP_PENDING.load(Ordering::SeqCst));
    }

    #[test]
    fn test_release_before_registration_hands_stop_to_session_task() {
        let _guard = TEST_GUARD.lock();
        reset_session_state();

        // Release arrives while the start round-trip is still in flight:
        // there is no session to stop yet, so a stop is left pending
        assert!(session_to_stop().is_none());
        assert!(STOP_PENDING.load(Ordering::SeqCst));

        // The session task then registers the id and must stop right away
        assert!(register_session("s-early"));
        assert_eq!(ACTIVE_SESSION.lock().as_deref(), Some("s-early"));
        assert!(!STOP_PENDING.load(Ordering::SeqCst));
    }

    #[test]
    fn test_release_after_registration_stops_directly() {
        let _guard = TEST_GUARD.lock();
        reset_session_state();

        // Normal ordering: the session is registered before release
        assert!(!register_session("s-late"));
        assert_eq!(session_to_stop().as_deref(), Some("s-late"));
        assert!(!STOP_PENDING.load(Ordering::SeqCst));
    }

    #[test]
    fn test_new_press_discards_stale_pending_stop() {
        let _guard = TEST_GUARD.lock();
        reset_session_state();

        // A release with nothing in flight leaves a pending stop behind
        assert!(session_to_stop().is_none());

        // The next press clears it so the new session is not cut short
        STOP_PENDING.store(false, Ordering::SeqCst);
        assert!(!register_session("s-next"));
    }
}
