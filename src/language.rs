//! Recognition language table and selection state
//!
//! A fixed, ordered set of languages populates the dropdown in the UI.
//! Selecting an entry sets the locale tag carried by the next recognition
//! request; clearing the selection falls back to the OS default locale.

use parking_lot::RwLock;
use serde::Serialize;

/// A recognisable language: display name plus BCP-47 locale tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// Display name shown in the dropdown
    pub name: &'static str,
    /// Locale tag sent to the recognizer (e.g. "en-US")
    pub locale: &'static str,
}

/// The fixed language table. Entry 0 is the default selection.
pub const LANGUAGES: &[Language] = &[
    Language { name: "English", locale: "en-US" },
    Language { name: "French", locale: "fr-FR" },
    Language { name: "Thai", locale: "th-TH" },
    Language { name: "Khmer", locale: "km-KH" },
    Language { name: "Vietnamese", locale: "vi-VN" },
    Language { name: "Japanese", locale: "ja-JP" },
    Language { name: "Korean", locale: "ko-KR" },
];

/// Locale used when the OS default cannot be determined
const FALLBACK_LOCALE: &str = "en-US";

/// Dropdown selection state.
///
/// `None` means the selection was cleared; recognition requests then carry
/// the OS default locale instead of a table entry.
#[derive(Debug)]
pub struct Selection {
    index: Option<usize>,
}

impl Selection {
    /// Creates a selection pointing at entry 0 (the default language).
    pub const fn new() -> Self {
        Self { index: Some(0) }
    }

    /// Returns the selected table index, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Selects a table entry and returns its locale tag.
    pub fn select(&mut self, index: usize) -> Result<&'static str, String> {
        let language = LANGUAGES
            .get(index)
            .ok_or_else(|| format!("Language index {} out of range", index))?;
        self.index = Some(index);
        Ok(language.locale)
    }

    /// Clears the selection; subsequent requests use the OS default locale.
    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Locale tag for the next recognition request.
    pub fn locale(&self) -> String {
        match self.index.and_then(|i| LANGUAGES.get(i)) {
            Some(language) => language.locale.to_string(),
            None => system_default_locale(),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

/// Global dropdown selection
static SELECTION: RwLock<Selection> = RwLock::new(Selection::new());

/// Locale tag carried by the next recognition request.
pub fn current_locale() -> String {
    SELECTION.read().locale()
}

/// Best-effort OS default locale as a BCP-47-ish tag.
///
/// Reads the POSIX locale environment (`LC_ALL`, `LC_MESSAGES`, `LANG`,
/// first match wins) and normalises e.g. `en_US.UTF-8` to `en-US`. Falls
/// back to "en-US" when unset or unparseable.
pub fn system_default_locale() -> String {
    for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(tag) = locale_tag(&value) {
                return tag;
            }
        }
    }
    FALLBACK_LOCALE.to_string()
}

/// Normalise a POSIX locale string to a language tag.
///
/// Strips codeset and modifier suffixes (`en_US.UTF-8@euro` → `en-US`).
/// The "C" and "POSIX" locales carry no language information.
fn locale_tag(raw: &str) -> Option<String> {
    let base = raw.split(['.', '@']).next().unwrap_or("");
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

// --- IPC Commands ---

/// List the languages shown in the dropdown, in table order.
#[tauri::command]
pub fn list_languages() -> Vec<Language> {
    LANGUAGES.to_vec()
}

/// Select a language by table index; returns the locale tag now in effect.
#[tauri::command]
pub fn select_language(index: usize) -> Result<String, String> {
    let locale = SELECTION.write().select(index)?;
    tracing::info!("Recognition language set to {}", locale);
    Ok(locale.to_string())
}

/// Clear the dropdown selection; returns the fallback locale now in effect.
#[tauri::command]
pub fn clear_language_selection() -> String {
    SELECTION.write().clear();
    let locale = system_default_locale();
    tracing::info!("Language selection cleared, falling back to {}", locale);
    locale
}

/// Current dropdown selection index, if any.
#[tauri::command]
pub fn get_language_selection() -> Option<usize> {
    SELECTION.read().index()
}
