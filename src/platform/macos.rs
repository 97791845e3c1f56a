//! macOS-specific platform functionality
//!
//! Microphone authorization via AVFoundation's AVCaptureDevice.

use objc2::runtime::AnyClass;
use objc2::{class, msg_send};
use objc2_foundation::NSString;
use std::process::Command;

/// Microphone authorization status values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicrophoneStatus {
    /// User has not yet made a choice
    NotDetermined,
    /// Access is restricted (e.g., parental controls)
    Restricted,
    /// User explicitly denied access
    Denied,
    /// User granted access
    Authorized,
    /// Unknown status
    Unknown,
}

impl From<i64> for MicrophoneStatus {
    fn from(value: i64) -> Self {
        match value {
            0 => MicrophoneStatus::NotDetermined,
            1 => MicrophoneStatus::Restricted,
            2 => MicrophoneStatus::Denied,
            3 => MicrophoneStatus::Authorized,
            _ => MicrophoneStatus::Unknown,
        }
    }
}

impl std::fmt::Display for MicrophoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MicrophoneStatus::NotDetermined => write!(f, "not_determined"),
            MicrophoneStatus::Restricted => write!(f, "restricted"),
            MicrophoneStatus::Denied => write!(f, "denied"),
            MicrophoneStatus::Authorized => write!(f, "granted"),
            MicrophoneStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Check microphone permission status
///
/// Uses AVFoundation's AVCaptureDevice to check authorization status for
/// audio capture.
pub fn check_microphone_permission() -> MicrophoneStatus {
    unsafe {
        // Link AVFoundation framework
        #[link(name = "AVFoundation", kind = "framework")]
        extern "C" {}

        let cls: &AnyClass = class!(AVCaptureDevice);

        // "soun" is AVMediaTypeAudio
        let media_type = NSString::from_str("soun");

        // authorizationStatusForMediaType:
        // Returns: 0=NotDetermined, 1=Restricted, 2=Denied, 3=Authorized
        let status: i64 = msg_send![cls, authorizationStatusForMediaType: &*media_type];

        tracing::debug!("Microphone authorization status: {}", status);
        MicrophoneStatus::from(status)
    }
}

/// Request microphone permission
///
/// Triggers the system permission dialog for microphone access.
/// Note: This returns immediately; the actual user response is handled
/// asynchronously by the OS.
pub fn request_microphone_permission() {
    unsafe {
        #[link(name = "AVFoundation", kind = "framework")]
        extern "C" {}

        let cls: &AnyClass = class!(AVCaptureDevice);
        let media_type = NSString::from_str("soun");

        // requestAccessForMediaType:completionHandler: with a nil handler;
        // the app re-checks the status on the next press
        let nil: *const std::ffi::c_void = std::ptr::null();
        let _: () = msg_send![
            cls,
            requestAccessForMediaType: &*media_type,
            completionHandler: nil
        ];

        tracing::info!("Requested microphone permission");
    }
}

/// Open System Preferences to the Microphone privacy pane
pub fn open_microphone_settings() {
    let result = Command::new("open")
        .arg("x-apple.systempreferences:com.apple.preference.security?Privacy_Microphone")
        .spawn();

    match result {
        Ok(_) => tracing::info!("Opened microphone settings"),
        Err(e) => tracing::error!("Failed to open microphone settings: {}", e),
    }
}
