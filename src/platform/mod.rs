//! Platform-specific functionality
//!
//! One concern: the microphone runtime permission gate.

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

/// Check microphone permission status
///
/// Returns the permission status as a string:
/// - "granted" - Permission has been granted
/// - "denied" - Permission was explicitly denied
/// - "not_determined" - User hasn't been asked yet
/// - "restricted" - Access is restricted (e.g., parental controls)
/// - "unknown" - Unable to determine status
#[tauri::command]
pub fn check_microphone_permission() -> String {
    #[cfg(target_os = "macos")]
    {
        macos::check_microphone_permission().to_string()
    }
    #[cfg(target_os = "linux")]
    {
        linux::check_microphone_permission().to_string()
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        "granted".to_string() // No runtime gate on other platforms
    }
}

/// Request microphone permission
///
/// Triggers the system permission dialog. If permission was already denied,
/// this will open System Preferences instead.
#[tauri::command]
pub fn request_microphone_permission() {
    #[cfg(target_os = "macos")]
    {
        let status = macos::check_microphone_permission();
        match status {
            macos::MicrophoneStatus::NotDetermined => {
                // First time - trigger the system dialog
                macos::request_microphone_permission();
            }
            macos::MicrophoneStatus::Denied | macos::MicrophoneStatus::Restricted => {
                // Already denied - open System Preferences
                macos::open_microphone_settings();
            }
            macos::MicrophoneStatus::Authorized => {
                // Already granted, nothing to do
                tracing::info!("Microphone permission already granted");
            }
            macos::MicrophoneStatus::Unknown => {
                // Try requesting anyway
                macos::request_microphone_permission();
            }
        }
    }
    #[cfg(target_os = "linux")]
    {
        linux::request_microphone_permission();
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        // Nothing needed on other platforms
    }
}
