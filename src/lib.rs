//! Talkpad - Push-to-talk speech-to-text notepad
//!
//! Desktop application for macOS and Linux. Hold the mic button to dictate;
//! the transcript replaces the text area contents when recognition finishes.

use tauri::Manager;

pub mod config;
pub mod language;
pub mod platform;
pub mod recognizer;
pub mod session;
pub mod transcript;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Set up file-based logging for debugging (local time for readability)
    use tracing_subscriber::prelude::*;

    /// Format timestamps using the system's local time via chrono
    struct LocalTimer;
    impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
        fn format_time(
            &self,
            w: &mut tracing_subscriber::fmt::format::Writer<'_>,
        ) -> std::fmt::Result {
            write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
        }
    }

    let log_dir = dirs::home_dir()
        .map(|h| h.join(".talkpad").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp"));
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("talkpad-debug.log"))
        .ok();

    if let Some(file) = log_file {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_timer(LocalTimer)
            .with_ansi(false);
        let stdout_layer = tracing_subscriber::fmt::layer().with_timer(LocalTimer);
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::fmt().with_timer(LocalTimer).init();
    }

    tauri::Builder::default()
        .setup(|app| {
            tracing::info!("Talkpad starting");

            // Gate the mic button behind the runtime permission: ask on
            // startup so the first press can go straight to the recognizer
            let mic_status = platform::check_microphone_permission();
            if mic_status != "granted" {
                tracing::info!("Microphone permission: {}, requesting", mic_status);
                platform::request_microphone_permission();
            } else {
                tracing::info!("Microphone permission granted");
            }

            // Drop the recognizer handle when the window closes so the
            // speech service session is not left dangling
            if let Some(window) = app.get_webview_window("main") {
                window.on_window_event(move |event| {
                    if let tauri::WindowEvent::CloseRequested { .. } = event {
                        recognizer::destroy();
                    }
                });
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Language selection
            language::list_languages,
            language::select_language,
            language::clear_language_selection,
            language::get_language_selection,
            // Transcript
            transcript::get_transcript,
            // Press-to-talk session
            session::talk_press_down,
            session::talk_press_up,
            session::is_listening,
            // Recognizer
            recognizer::is_recognizer_available,
            recognizer::destroy_recognizer,
            // Platform
            platform::check_microphone_permission,
            platform::request_microphone_permission,
            // Config
            config::get_config,
            config::set_config,
            config::reset_config,
            config::get_config_path_cmd,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
