//! Recognition flow integration tests for Talkpad.
//!
//! Exercises the language table, selection state, and transcript behaviour
//! through the public library API, following a session from press to result.

use talkpad_lib::language::{Selection, LANGUAGES};
use talkpad_lib::recognizer::RecognitionRequest;
use talkpad_lib::transcript::Transcript;

fn candidates(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Language Table Tests
// =============================================================================

#[test]
fn test_language_table_contents() {
    let expected = [
        ("English", "en-US"),
        ("French", "fr-FR"),
        ("Thai", "th-TH"),
        ("Khmer", "km-KH"),
        ("Vietnamese", "vi-VN"),
        ("Japanese", "ja-JP"),
        ("Korean", "ko-KR"),
    ];

    assert_eq!(LANGUAGES.len(), expected.len());
    for (language, (name, locale)) in LANGUAGES.iter().zip(expected.iter()) {
        assert_eq!(language.name, *name);
        assert_eq!(language.locale, *locale);
    }
}

#[test]
fn test_locale_tags_are_well_formed() {
    for language in LANGUAGES {
        let parts: Vec<&str> = language.locale.split('-').collect();
        assert_eq!(parts.len(), 2, "locale {} should be ll-RR", language.locale);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[1].len(), 2);
        assert!(parts[0].chars().all(|c| c.is_ascii_lowercase()));
        assert!(parts[1].chars().all(|c| c.is_ascii_uppercase()));
    }
}

#[test]
fn test_display_names_are_unique() {
    for (i, a) in LANGUAGES.iter().enumerate() {
        for b in &LANGUAGES[i + 1..] {
            assert_ne!(a.name, b.name);
            assert_ne!(a.locale, b.locale);
        }
    }
}

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn test_fresh_selection_defaults_to_first_entry() {
    let selection = Selection::new();
    assert_eq!(selection.index(), Some(0));
    assert_eq!(selection.locale(), "en-US");
}

#[test]
fn test_selection_drives_request_locale() {
    let mut selection = Selection::new();
    selection.select(5).expect("Japanese is in the table");

    let request = RecognitionRequest {
        locale: selection.locale(),
        free_form: true,
    };
    assert_eq!(request.locale, "ja-JP");
}

#[test]
fn test_cleared_selection_still_produces_a_locale() {
    let mut selection = Selection::new();
    selection.clear();

    // Whatever the host environment, a cleared selection must still
    // yield a usable locale tag for the next request
    let locale = selection.locale();
    assert!(!locale.is_empty());
    assert_ne!(locale, "C");
    assert_ne!(locale, "POSIX");
}

#[test]
fn test_reselect_after_clear() {
    let mut selection = Selection::new();
    selection.clear();
    let locale = selection.select(1).expect("French is in the table");

    assert_eq!(locale, "fr-FR");
    assert_eq!(selection.index(), Some(1));
}

// =============================================================================
// Press-to-Result Transcript Flow
// =============================================================================

#[test]
fn test_full_session_replaces_transcript() {
    let mut transcript = Transcript::new();

    // Press: the text clears and the hint appears
    transcript.clear_for_listening("Listening...");
    let snapshot = transcript.snapshot();
    assert_eq!(snapshot.text, "");
    assert_eq!(snapshot.hint, Some("Listening...".to_string()));

    // Release and result: the best candidate replaces the text
    let changed = transcript.apply_result(&candidates(&[
        "set a timer for ten minutes",
        "set a timer for tin minutes",
    ]));
    assert!(changed);
    assert_eq!(transcript.text(), "set a timer for ten minutes");
    assert_eq!(transcript.snapshot().hint, None);
}

#[test]
fn test_failed_session_preserves_previous_text() {
    let mut transcript = Transcript::new();
    transcript.apply_result(&candidates(&["first dictation"]));

    // A new press clears the display, then the session errors out with
    // no candidates; the display stays cleared rather than restoring
    transcript.clear_for_listening("Listening...");
    let changed = transcript.apply_result(&[]);

    assert!(!changed);
    assert_eq!(transcript.text(), "");
}

#[test]
fn test_back_to_back_sessions() {
    let mut transcript = Transcript::new();

    transcript.clear_for_listening("Listening...");
    transcript.apply_result(&candidates(&["hello"]));

    transcript.clear_for_listening("Listening...");
    transcript.apply_result(&candidates(&["goodbye"]));

    assert_eq!(transcript.text(), "goodbye");
}
