//! Configuration management for Talkpad
//!
//! Provides persistent settings storage with schema versioning and
//! migrations. Configuration is stored in `~/.talkpad/config.json` and is
//! accessible from both the Rust backend and the frontend via IPC commands.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Current config schema version
const CURRENT_VERSION: u32 = 1;

/// Global config instance for caching
static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema version for migrations
    pub version: u32,
    /// Speech recognizer settings
    pub recognizer: RecognizerConfig,
    /// UI presentation settings
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            recognizer: RecognizerConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

/// Speech recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Speech service base URL
    pub service_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Request the free-form language model
    pub free_form: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8750".to_string(),
            timeout_secs: 30,
            free_form: true,
        }
    }
}

/// UI presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Placeholder hint shown while listening
    pub listening_hint: String,
    /// How long error toasts stay visible, in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            listening_hint: "Listening...".to_string(),
            toast_duration_ms: 2500,
        }
    }
}

/// Get the path to the config file (~/.talkpad/config.json)
pub fn get_config_path() -> PathBuf {
    home_dir_or_fallback().join(".talkpad").join("config.json")
}

/// Get the path to the config directory (~/.talkpad)
fn get_config_dir() -> PathBuf {
    home_dir_or_fallback().join(".talkpad")
}

/// Get the home directory, falling back to /tmp if unavailable
fn home_dir_or_fallback() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        tracing::error!("Could not determine home directory, using /tmp");
        PathBuf::from("/tmp")
    })
}

/// Ensure the config directory exists
fn ensure_config_dir() -> Result<(), String> {
    let dir = get_config_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    Ok(())
}

/// Load configuration from disk
fn load_from_disk() -> Result<Config, String> {
    let path = get_config_path();

    if !path.exists() {
        tracing::info!("Config file not found, using defaults");
        return Ok(Config::default());
    }

    let contents =
        fs::read_to_string(&path).map_err(|e| format!("Failed to read config file: {}", e))?;

    let config: Config =
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse config: {}", e))?;

    // Run migrations if needed
    let migrated = migrate_config(config)?;

    Ok(migrated)
}

/// Save configuration to disk
fn save_to_disk(config: &Config) -> Result<(), String> {
    ensure_config_dir()?;

    let path = get_config_path();
    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialise config: {}", e))?;

    fs::write(&path, contents).map_err(|e| format!("Failed to write config file: {}", e))?;

    tracing::info!(
        "Config saved to disk: service_url={}",
        config.recognizer.service_url
    );
    Ok(())
}

/// Migrate configuration from older schema versions
fn migrate_config(mut config: Config) -> Result<Config, String> {
    let original_version = config.version;

    // Apply migrations sequentially
    while config.version < CURRENT_VERSION {
        config = apply_migration(config)?;
    }

    if config.version != original_version {
        tracing::info!(
            "Migrated config from version {} to {}",
            original_version,
            config.version
        );
        // Save the migrated config
        save_to_disk(&config)?;
    }

    Ok(config)
}

/// Apply a single migration step
fn apply_migration(config: Config) -> Result<Config, String> {
    match config.version {
        // Version 0 -> 1: Initial migration (add any new fields)
        0 => {
            let mut migrated = config;
            migrated.version = 1;
            // Future migrations would add field transformations here
            Ok(migrated)
        }
        v => Err(format!("Unknown config version: {}", v)),
    }
}

/// Get the global config instance
fn get_config_instance() -> &'static RwLock<Config> {
    CONFIG.get_or_init(|| {
        let config = load_from_disk().unwrap_or_else(|e| {
            tracing::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        });
        tracing::info!(
            "Config loaded from disk: service_url={}",
            config.recognizer.service_url
        );
        RwLock::new(config)
    })
}

// --- IPC Commands ---

/// Get the current configuration
///
/// Returns the current configuration state. The config is cached in memory
/// and loaded from disk on first access.
#[tauri::command]
pub fn get_config() -> Result<Config, String> {
    let config = get_config_instance().read().clone();
    Ok(config)
}

/// Update the configuration
///
/// Replaces the current configuration with the provided config and persists
/// it to disk. The version field is automatically updated to the current
/// schema. The recognizer handle is dropped so the next session picks up
/// the new service settings.
#[tauri::command]
pub fn set_config(mut config: Config) -> Result<(), String> {
    // Ensure version is current
    config.version = CURRENT_VERSION;

    // Save to disk first
    save_to_disk(&config)?;

    // Update cached config
    let mut cached = get_config_instance().write();
    *cached = config;

    crate::recognizer::destroy();

    tracing::info!(
        "Configuration updated (service_url: {})",
        cached.recognizer.service_url
    );
    Ok(())
}

/// Reset configuration to defaults
///
/// Resets all settings to their default values and persists to disk.
#[tauri::command]
pub fn reset_config() -> Result<Config, String> {
    let default_config = Config::default();

    // Save to disk
    save_to_disk(&default_config)?;

    // Update cached config
    let mut cached = get_config_instance().write();
    *cached = default_config.clone();

    crate::recognizer::destroy();

    tracing::info!("Configuration reset to defaults");
    Ok(default_config)
}

/// Get the configuration file path
///
/// Returns the path to the config file for debugging or user information.
#[tauri::command]
pub fn get_config_path_cmd() -> String {
    get_config_path().to_string_lossy().to_string()
}
