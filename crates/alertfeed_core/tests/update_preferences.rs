mod common;

use std::collections::BTreeSet;
use std::time::Duration;

use alertfeed_core::{
    update, ApiRequest, ApiResponse, AppState, DraftSnapshot, Effect, Msg, Preferences,
    RemoteFailure, TimerKind,
};
use common::*;
use pretty_assertions::assert_eq;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn remote_preferences() -> Preferences {
    Preferences {
        exam_categories: set(&["UPSC"]),
        min_age: Some(21),
        max_age: Some(32),
        preferred_locations: set(&["Delhi"]),
    }
}

/// Mounts, opens the form and returns ids of the preference load and url list calls.
fn open_form() -> (AppState, u64, u64) {
    let (state, _) = mount(AppState::new());
    let (state, effects) = update(
        state,
        Msg::PreferencesOpened {
            onboarding_seen: false,
        },
    );
    let load_id = call_id(&effects, |r| matches!(r, ApiRequest::LoadPreferences));
    let urls_id = call_id(&effects, |r| matches!(r, ApiRequest::ListUrls));
    assert!(effects.contains(&Effect::StartTimer {
        timer: TimerKind::DraftAutosave,
        period: Duration::from_secs(30),
    }));
    (state, load_id, urls_id)
}

#[test]
fn autosave_waits_for_remote_load() {
    init_logging();
    let (state, load_id, _) = open_form();

    let (state, effects) = update(state, Msg::TimerFired(TimerKind::DraftAutosave));
    assert!(effects.is_empty());

    let (state, effects) = succeed(state, load_id, ApiResponse::Preferences(remote_preferences()));
    assert_eq!(effects, vec![Effect::RestoreDraft { user_id: USER }]);

    let (state, effects) = update(state, Msg::TimerFired(TimerKind::DraftAutosave));
    assert_eq!(
        effects,
        vec![Effect::SnapshotDraft {
            user_id: USER,
            draft: DraftSnapshot {
                exam_categories: Some(set(&["UPSC"])),
                min_age: Some(Some(21)),
                max_age: Some(Some(32)),
                preferred_locations: Some(set(&["Delhi"])),
            },
        }]
    );
    let view = state.view().preferences.expect("form open");
    assert_eq!(view.draft_status.as_deref(), Some("Draft saved"));
}

#[test]
fn failed_remote_load_still_restores_draft_and_enables_autosave() {
    init_logging();
    let (state, load_id, _) = open_form();
    let (state, effects) = fail(state, load_id, RemoteFailure::network("offline"));
    assert!(effects.contains(&Effect::RestoreDraft { user_id: USER }));
    assert!(state.preferences().is_remote_resolved());

    let (_state, effects) = update(state, Msg::TimerFired(TimerKind::DraftAutosave));
    assert_eq!(effects.len(), 1);
}

#[test]
fn draft_overrides_only_the_fields_it_defines() {
    init_logging();
    let (state, load_id, _) = open_form();
    let (state, _) = succeed(state, load_id, ApiResponse::Preferences(remote_preferences()));

    let draft: DraftSnapshot =
        serde_json::from_str(r#"{"exam_categories": ["SSC", "Banking"], "max_age": ""}"#)
            .expect("draft parses");
    let (state, _) = update(state, Msg::DraftRestored(Some(draft)));

    let view = state.view().preferences.expect("form open");
    assert_eq!(view.categories, vec!["Banking".to_string(), "SSC".to_string()]);
    assert_eq!(view.min_age, Some(21));
    assert_eq!(view.max_age, None);
    assert_eq!(view.locations, vec!["Delhi".to_string()]);
    assert_eq!(
        view.draft_status.as_deref(),
        Some("Draft restored from local autosave.")
    );
}

#[test]
fn malformed_draft_text_is_rejected_by_the_parser() {
    let parsed = serde_json::from_str::<DraftSnapshot>(r#"{"min_age": "twenty"}"#);
    assert!(parsed.is_err());
}

#[test]
fn missing_draft_leaves_remote_values() {
    init_logging();
    let (state, load_id, _) = open_form();
    let (state, _) = succeed(state, load_id, ApiResponse::Preferences(remote_preferences()));
    let (state, _) = update(state, Msg::DraftRestored(None));

    let view = state.view().preferences.expect("form open");
    assert_eq!(view.categories, vec!["UPSC".to_string()]);
    assert_eq!(view.draft_status, None);
}

#[test]
fn local_validation_blocks_save() {
    init_logging();
    let (state, load_id, urls_id) = open_form();
    let (state, _) = succeed(state, load_id, ApiResponse::Preferences(Preferences::default()));
    let (state, _) = succeed(state, urls_id, ApiResponse::Urls(Vec::new()));

    let (state, _) = update(
        state,
        Msg::AgesChanged {
            min_age: Some(35),
            max_age: Some(25),
        },
    );
    let (state, effects) = update(state, Msg::SavePreferencesClicked);
    assert!(calls(&effects).is_empty());

    let view = state.view().preferences.expect("form open");
    assert_eq!(
        view.category_error.as_deref(),
        Some("Select at least one exam category.")
    );
    assert_eq!(
        view.age_error.as_deref(),
        Some("Minimum age cannot be greater than maximum age.")
    );
    assert_eq!(view.url_error.as_deref(), Some("Add at least one monitored URL."));
}

#[test]
fn successful_save_clears_draft_once() {
    init_logging();
    let (state, load_id, urls_id) = open_form();
    let (state, _) = succeed(state, load_id, ApiResponse::Preferences(remote_preferences()));
    let (state, _) = succeed(
        state,
        urls_id,
        ApiResponse::Urls(vec![site(1, "https://upsc.gov.in", "UPSC")]),
    );
    let (state, _) = update(state, Msg::CategoryToggled("SSC".to_string()));

    let (state, effects) = update(state, Msg::SavePreferencesClicked);
    let (save_id, request) = calls(&effects).remove(0);
    assert_eq!(
        request,
        ApiRequest::SavePreferences(Preferences {
            exam_categories: set(&["SSC", "UPSC"]),
            ..remote_preferences()
        })
    );

    let (state, effects) = update(state, Msg::SavePreferencesClicked);
    assert!(effects.is_empty(), "save already in flight");

    let (state, effects) = succeed(state, save_id, ApiResponse::Acknowledged);
    let clears = effects
        .iter()
        .filter(|e| matches!(e, Effect::ClearDraft { user_id: USER }))
        .count();
    assert_eq!(clears, 1);
    let view = state.view().preferences.expect("form open");
    assert_eq!(view.saved_message.as_deref(), Some("Preferences saved!"));
    assert_eq!(toast_texts(&state), vec!["Preferences saved!".to_string()]);
}

#[test]
fn autosave_stays_quiet_after_save_until_next_edit() {
    init_logging();
    let (state, load_id, urls_id) = open_form();
    let (state, _) = succeed(state, load_id, ApiResponse::Preferences(remote_preferences()));
    let (state, _) = succeed(
        state,
        urls_id,
        ApiResponse::Urls(vec![site(1, "https://upsc.gov.in", "UPSC")]),
    );
    let (state, effects) = update(state, Msg::SavePreferencesClicked);
    let save_id = calls(&effects)[0].0;
    let (state, effects) = succeed(state, save_id, ApiResponse::Acknowledged);
    assert!(effects.contains(&Effect::ClearDraft { user_id: USER }));

    let (state, effects) = update(state, Msg::TimerFired(TimerKind::DraftAutosave));
    assert!(effects.is_empty(), "draft written again after save: {effects:?}");

    let (state, _) = update(state, Msg::LocationAdded("Mumbai".to_string()));
    assert!(!state.preferences().is_saved());
    let (_state, effects) = update(state, Msg::TimerFired(TimerKind::DraftAutosave));
    assert!(matches!(
        effects.as_slice(),
        [Effect::SnapshotDraft { user_id: USER, .. }]
    ));
}

#[test]
fn failed_save_keeps_draft() {
    init_logging();
    let (state, load_id, urls_id) = open_form();
    let (state, _) = succeed(state, load_id, ApiResponse::Preferences(remote_preferences()));
    let (state, _) = succeed(
        state,
        urls_id,
        ApiResponse::Urls(vec![site(1, "https://upsc.gov.in", "UPSC")]),
    );
    let (state, effects) = update(state, Msg::SavePreferencesClicked);
    let save_id = calls(&effects)[0].0;

    let (state, effects) = fail(state, save_id, RemoteFailure::http(500, ""));
    assert!(!effects.iter().any(|e| matches!(e, Effect::ClearDraft { .. })));
    assert_eq!(toast_texts(&state), vec!["Failed to save preferences.".to_string()]);
    assert!(!state.preferences().is_saving());
}

#[test]
fn onboarding_is_dismissed_once() {
    init_logging();
    let (state, _, _) = open_form();
    assert!(state.view().preferences.expect("form open").show_onboarding);

    let (state, effects) = update(state, Msg::OnboardingDismissed);
    assert_eq!(effects, vec![Effect::MarkOnboardingSeen]);
    let (state, effects) = update(state, Msg::OnboardingDismissed);
    assert!(effects.is_empty());
    assert!(!state.view().preferences.expect("form open").show_onboarding);
}

#[test]
fn skip_optional_clears_ages_and_locations() {
    init_logging();
    let (state, load_id, _) = open_form();
    let (state, _) = succeed(state, load_id, ApiResponse::Preferences(remote_preferences()));
    let (state, _) = update(state, Msg::LocationAdded("Mumbai".to_string()));
    let (state, _) = update(state, Msg::SkipOptionalClicked);

    let view = state.view().preferences.expect("form open");
    assert_eq!(view.min_age, None);
    assert_eq!(view.max_age, None);
    assert!(view.locations.is_empty());
    assert_eq!(view.categories, vec!["UPSC".to_string()]);
}

#[test]
fn closing_form_stops_autosave() {
    init_logging();
    let (state, _, _) = open_form();
    let (state, effects) = update(state, Msg::PreferencesClosed);
    assert_eq!(
        effects,
        vec![Effect::StopTimer {
            timer: TimerKind::DraftAutosave
        }]
    );
    assert!(state.view().preferences.is_none());
}

#[test]
fn suggestions_skip_sites_already_monitored() {
    init_logging();
    let (state, load_id, urls_id) = open_form();
    let (state, _) = succeed(state, load_id, ApiResponse::Preferences(remote_preferences()));
    let (state, _) = succeed(state, urls_id, ApiResponse::Urls(Vec::new()));
    let before = state.view().preferences.expect("form open").suggestions;
    assert!(!before.is_empty());

    let first = before[0].url.clone();
    let (state, effects) = update(
        state,
        Msg::AddUrlSubmitted {
            url: first.clone(),
            website_name: String::new(),
        },
    );
    let add_id = calls(&effects)[0].0;
    let (state, _) = succeed(state, add_id, ApiResponse::UrlAdded(site(9, &first, "Suggested")));
    let after = state.view().preferences.expect("form open").suggestions;
    assert!(after.iter().all(|s| s.url != first));
}
