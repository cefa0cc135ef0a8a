mod common;

use std::time::Duration;

use alertfeed_core::{
    update, AlertQuery, ApiRequest, ApiResponse, AppState, DashboardStats, DashboardSummary,
    Effect, Msg, RemoteFailure, TimerKind, UserProfile,
};
use common::*;
use pretty_assertions::assert_eq;

fn summary(name: &str, total: u64) -> DashboardSummary {
    DashboardSummary {
        user: Some(UserProfile {
            id: USER,
            name: name.to_string(),
            email: "asha@example.com".to_string(),
            qualification: None,
        }),
        stats: DashboardStats {
            total_alerts_received: total,
            alerts_this_week: 2,
            monitored_urls: 1,
            active_preferences: vec!["UPSC".to_string(), "SSC".to_string()],
        },
        recent_alerts: Vec::new(),
    }
}

#[test]
fn mount_starts_polling_and_loads_every_view() {
    init_logging();
    let (state, effects) = mount(AppState::new());

    assert_eq!(
        effects,
        vec![
            Effect::StartTimer {
                timer: TimerKind::Poll,
                period: Duration::from_secs(300),
            },
            Effect::Call {
                request_id: 1,
                request: ApiRequest::Summary,
            },
            Effect::Call {
                request_id: 2,
                request: ApiRequest::Alerts(AlertQuery {
                    page: 1,
                    per_page: 20,
                    exam_category: None,
                }),
            },
            Effect::Call {
                request_id: 3,
                request: ApiRequest::ListUrls,
            },
            Effect::Call {
                request_id: 4,
                request: ApiRequest::Activity,
            },
        ]
    );
    assert!(state.view().alerts_loading);
    assert_eq!(state.pending_calls(), 4);
}

#[test]
fn poll_timer_reloads_only_while_mounted() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::TimerFired(TimerKind::Poll));
    assert!(effects.is_empty());
    assert_eq!(state.pending_calls(), 0);

    let (state, _) = mount(state);
    let (state, effects) = update(state, Msg::TimerFired(TimerKind::Poll));
    assert_eq!(calls(&effects).len(), 4);

    let (_state, effects) = update(state, Msg::Unmounted);
    assert_eq!(
        effects,
        vec![Effect::StopTimer {
            timer: TimerKind::Poll
        }]
    );
}

#[test]
fn older_alert_page_cannot_overwrite_newer_one() {
    init_logging();
    let (state, first) = mount(AppState::new());
    let first_alerts = call_id(&first, is_alerts);
    let (state, second) = update(state, Msg::RefreshClicked);
    let second_alerts = call_id(&second, is_alerts);

    let newer = page(vec![alert(2, "SSC CGL", None)], 1, 1, 20);
    let older = page(vec![alert(1, "UPSC CSE", None)], 1, 1, 20);

    let (mut state, _) = succeed(state, second_alerts, ApiResponse::Alerts(newer));
    assert!(state.consume_dirty());
    let (mut state, effects) = succeed(state, first_alerts, ApiResponse::Alerts(older));

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    let titles: Vec<_> = state.view().alerts.iter().map(|a| a.job_title.clone()).collect();
    assert_eq!(titles, vec!["SSC CGL".to_string()]);
}

#[test]
fn stale_failure_does_not_mark_fresh_cache_as_failed() {
    init_logging();
    let (state, first) = mount(AppState::new());
    let first_summary = call_id(&first, |r| matches!(r, ApiRequest::Summary));
    let (state, second) = update(state, Msg::RefreshClicked);
    let second_summary = call_id(&second, |r| matches!(r, ApiRequest::Summary));

    let (state, _) = succeed(state, second_summary, ApiResponse::Summary(summary("Asha", 5)));
    let (state, effects) = fail(state, first_summary, RemoteFailure::network("timed out"));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.summary_error, None);
    assert_eq!(view.stats.map(|s| s.total_alerts), Some(5));
}

#[test]
fn summary_failure_toasts_and_keeps_previous_summary() {
    init_logging();
    let (state, first) = mount(AppState::new());
    let summary_id = call_id(&first, |r| matches!(r, ApiRequest::Summary));
    let (state, _) = succeed(state, summary_id, ApiResponse::Summary(summary("Asha Devi", 9)));

    let (state, second) = update(state, Msg::TimerFired(TimerKind::Poll));
    let summary_id = call_id(&second, |r| matches!(r, ApiRequest::Summary));
    let (state, effects) = fail(state, summary_id, RemoteFailure::http(500, "db down"));

    assert!(matches!(effects.as_slice(), [Effect::ScheduleToast { .. }]));
    assert_eq!(toast_texts(&state), vec!["Dashboard load failed: db down".to_string()]);
    let view = state.view();
    assert_eq!(view.stats.map(|s| s.total_alerts), Some(9));
    assert_eq!(view.profile.map(|p| p.initials), Some("AD".to_string()));
    assert_eq!(view.category_options, vec!["UPSC".to_string(), "SSC".to_string()]);
}

#[test]
fn url_and_activity_failures_are_inline_only() {
    init_logging();
    let (state, effects) = mount(AppState::new());
    let urls = call_id(&effects, |r| matches!(r, ApiRequest::ListUrls));
    let activity = call_id(&effects, |r| matches!(r, ApiRequest::Activity));

    let (state, url_effects) = fail(state, urls, RemoteFailure::network("offline"));
    let (state, activity_effects) = fail(state, activity, RemoteFailure::network("offline"));

    assert!(url_effects.is_empty());
    assert!(activity_effects.is_empty());
    assert!(state.toasts().toasts().is_empty());
    let view = state.view();
    assert_eq!(view.sites_error.as_deref(), Some("Failed to load monitored websites."));
    assert_eq!(view.activity_error.as_deref(), Some("Failed to load activity."));
}

#[test]
fn responses_after_unmount_are_dropped() {
    init_logging();
    let (state, effects) = mount(AppState::new());
    let alerts_id = call_id(&effects, is_alerts);
    let (state, _) = update(state, Msg::Unmounted);
    assert_eq!(state.pending_calls(), 0);

    let fetched = page(vec![alert(1, "UPSC CSE", None)], 1, 1, 20);
    let (state, effects) = succeed(state, alerts_id, ApiResponse::Alerts(fetched));
    assert!(effects.is_empty());
    assert!(state.view().alerts.is_empty());
}

#[test]
fn refresh_click_toasts_confirmation() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RefreshClicked);
    assert!(state.toasts().toasts().is_empty());

    let (state, _) = mount(state);
    let (state, effects) = update(state, Msg::RefreshClicked);
    assert_eq!(calls(&effects).len(), 4);
    assert_eq!(toast_texts(&state), vec!["Dashboard refreshed.".to_string()]);
}

#[test]
fn mismatched_payload_is_treated_as_failure() {
    init_logging();
    let (state, effects) = mount(AppState::new());
    let alerts_id = call_id(&effects, is_alerts);
    let (state, effects) = succeed(state, alerts_id, ApiResponse::Acknowledged);

    assert_eq!(effects.len(), 1);
    assert_eq!(toast_texts(&state), vec!["Failed to load alerts.".to_string()]);
}
