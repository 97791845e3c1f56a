//! Linux-specific platform functionality
//!
//! Microphone access is managed by PulseAudio/PipeWire; there is no
//! system permission dialog. The check probes for an available input
//! source instead.

use std::process::Command;

/// Microphone authorization status values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicrophoneStatus {
    /// Microphone is available
    Granted,
    /// No microphone found or access denied
    Denied,
    /// Unable to determine status
    Unknown,
}

impl std::fmt::Display for MicrophoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MicrophoneStatus::Granted => write!(f, "granted"),
            MicrophoneStatus::Denied => write!(f, "denied"),
            MicrophoneStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Check microphone permission status
///
/// Checks if a default audio source (microphone) is available via
/// PulseAudio, falling back to PipeWire.
pub fn check_microphone_permission() -> MicrophoneStatus {
    let output = Command::new("pactl")
        .args(["list", "short", "sources"])
        .output();

    match output {
        Ok(output) => {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                // Each line is a source; microphones show up as inputs
                let has_sources = stdout
                    .lines()
                    .any(|line| !line.trim().is_empty() && line.contains("input"));

                if has_sources {
                    tracing::debug!("Microphone available via PulseAudio/PipeWire");
                    MicrophoneStatus::Granted
                } else {
                    tracing::warn!("No microphone sources found");
                    MicrophoneStatus::Denied
                }
            } else {
                tracing::warn!("pactl command failed, trying pipewire...");
                check_pipewire_microphone()
            }
        }
        Err(e) => {
            tracing::warn!("pactl not available: {}, trying pipewire...", e);
            check_pipewire_microphone()
        }
    }
}

/// Check microphone via PipeWire's pw-cli
fn check_pipewire_microphone() -> MicrophoneStatus {
    let output = Command::new("pw-cli").args(["list-objects"]).output();

    match output {
        Ok(output) => {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let has_capture = stdout.contains("Audio/Source") || stdout.contains("capture");

                if has_capture {
                    tracing::debug!("Microphone available via PipeWire");
                    MicrophoneStatus::Granted
                } else {
                    tracing::warn!("No PipeWire capture devices found");
                    MicrophoneStatus::Denied
                }
            } else {
                tracing::warn!("pw-cli command failed");
                MicrophoneStatus::Unknown
            }
        }
        Err(e) => {
            tracing::warn!("pw-cli not available: {}", e);
            // Neither pactl nor pw-cli available; the speech service will
            // surface the failure if there is genuinely no microphone
            MicrophoneStatus::Unknown
        }
    }
}

/// Request microphone permission
///
/// No permission dialog exists on Linux; access is granted by the audio
/// server. Kept for API compatibility with macOS.
pub fn request_microphone_permission() {
    tracing::info!("Linux does not require explicit microphone permission");
}
