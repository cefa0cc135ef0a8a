use feed_logging::{feed_debug, feed_info, feed_warn};

use crate::alerts::Ingest;
use crate::api::{ApiRequest, ApiResponse, RequestId};
use crate::effect::{Effect, TimerKind};
use crate::error::{RemoteFailure, RemoteFailureKind};
use crate::scheduler::{Mutation, View, ALL_VIEWS};
use crate::state::{AppState, PendingCall};
use crate::toast::ToastKind;
use crate::Msg;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted { user_id } => {
            state.user_id = Some(user_id);
            let mut effects = vec![state.scheduler.mount()];
            effects.extend(state.reload(ALL_VIEWS));
            effects
        }
        Msg::Unmounted => {
            let mut effects = vec![state.scheduler.unmount()];
            if state.preferences.is_open() {
                state.preferences.close();
                effects.push(Effect::StopTimer {
                    timer: TimerKind::DraftAutosave,
                });
            }
            // Late responses now have no route and are dropped.
            state.pending.clear();
            state.sites.reset_in_flight();
            state.mark_dirty();
            effects
        }
        Msg::TimerFired(TimerKind::Poll) => {
            if state.scheduler.is_mounted() {
                state.reload(ALL_VIEWS)
            } else {
                Vec::new()
            }
        }
        Msg::TimerFired(TimerKind::DraftAutosave) => autosave(&mut state),
        Msg::RefreshClicked => {
            if !state.scheduler.is_mounted() {
                return (state, Vec::new());
            }
            let mut effects = state.reload(ALL_VIEWS);
            effects.push(state.toast("Dashboard refreshed.", ToastKind::Success));
            effects
        }
        Msg::NextPageClicked => {
            if state.alerts.next_page() {
                state.reload(&[View::Alerts])
            } else {
                Vec::new()
            }
        }
        Msg::PrevPageClicked => {
            if state.alerts.prev_page() {
                state.reload(&[View::Alerts])
            } else {
                Vec::new()
            }
        }
        Msg::CategoryChanged(category) => {
            state.alerts.set_category(category);
            state.reload(&[View::Alerts])
        }
        Msg::SortChanged(sort) => {
            state.alerts.set_sort(sort);
            state.reload(&[View::Alerts])
        }
        Msg::SearchChanged(search) => {
            state.alerts.set_search(&search);
            state.reload(&[View::Alerts])
        }
        Msg::ArchiveClicked(alert_id) => {
            if state.user_id.is_none() {
                return (state, Vec::new());
            }
            vec![state.call(
                ApiRequest::ArchiveAlert { alert_id },
                PendingCall::Archive(alert_id),
            )]
        }
        Msg::AddUrlSubmitted { url, website_name } => {
            if state.user_id.is_none() {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match state.sites.validate_new(&url, &website_name) {
                Ok(site) => vec![state.call(ApiRequest::AddUrl(site), PendingCall::AddUrl)],
                Err(failure) => {
                    feed_debug!("add url rejected locally: {}", failure);
                    Vec::new()
                }
            }
        }
        Msg::RemoveUrlClicked(url_id) => {
            if state.user_id.is_none() {
                return (state, Vec::new());
            }
            vec![state.call(
                ApiRequest::RemoveUrl { url_id },
                PendingCall::RemoveUrl(url_id),
            )]
        }
        Msg::TriggerScrapeClicked(url_id) => {
            if state.user_id.is_none() || !state.sites.begin_scrape(url_id) {
                return (state, Vec::new());
            }
            state.mark_dirty();
            vec![state.call(
                ApiRequest::TriggerScrape { url_id },
                PendingCall::TriggerScrape(url_id),
            )]
        }
        Msg::PreferencesOpened { onboarding_seen } => {
            if state.user_id.is_none() {
                return (state, Vec::new());
            }
            state.preferences.open(onboarding_seen);
            let mut effects = vec![state.call(ApiRequest::LoadPreferences, PendingCall::LoadPreferences)];
            effects.extend(state.reload(&[View::Urls]));
            effects.push(Effect::StartTimer {
                timer: TimerKind::DraftAutosave,
                period: state.settings.draft_interval,
            });
            effects
        }
        Msg::PreferencesClosed => {
            if !state.preferences.is_open() {
                return (state, Vec::new());
            }
            state.preferences.close();
            state.mark_dirty();
            vec![Effect::StopTimer {
                timer: TimerKind::DraftAutosave,
            }]
        }
        Msg::CategoryToggled(category) => {
            state.preferences.toggle_category(&category);
            state.mark_dirty();
            Vec::new()
        }
        Msg::AgesChanged { min_age, max_age } => {
            state.preferences.set_ages(min_age, max_age);
            state.mark_dirty();
            Vec::new()
        }
        Msg::LocationAdded(location) => {
            if state.preferences.add_location(&location) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LocationRemoved(location) => {
            if state.preferences.remove_location(&location) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SkipOptionalClicked => {
            state.preferences.skip_optional();
            vec![state.toast("Optional fields skipped.", ToastKind::Success)]
        }
        Msg::SavePreferencesClicked => save_preferences(&mut state),
        Msg::OnboardingDismissed => {
            if state.preferences.dismiss_onboarding() {
                state.mark_dirty();
                vec![Effect::MarkOnboardingSeen]
            } else {
                Vec::new()
            }
        }
        Msg::DraftRestored(draft) => {
            if let Some(draft) = draft.filter(|_| state.preferences.is_open()) {
                state.preferences.apply_draft(&draft);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CallCompleted {
            request_id,
            outcome,
        } => complete_call(&mut state, request_id, outcome),
        Msg::ToastFaded(id) => {
            if state.toasts.fade(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ToastExpired(id) => {
            if state.toasts.expire(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn autosave(state: &mut AppState) -> Vec<Effect> {
    let Some(user_id) = state.user_id else {
        return Vec::new();
    };
    // Saving before the remote load resolves would overwrite a real draft with an empty form.
    // After a successful save the draft stays cleared until the next edit.
    let form = &state.preferences;
    if !form.is_open() || !form.is_remote_resolved() || form.is_saved() {
        return Vec::new();
    }
    state.preferences.mark_draft_saved();
    state.mark_dirty();
    vec![Effect::SnapshotDraft {
        user_id,
        draft: state.preferences.snapshot(),
    }]
}

fn save_preferences(state: &mut AppState) -> Vec<Effect> {
    if state.user_id.is_none() || state.preferences.is_saving() {
        return Vec::new();
    }
    state.mark_dirty();
    match state.preferences.validate(state.sites.urls().len()) {
        Ok(preferences) => {
            state.preferences.begin_save();
            vec![state.call(
                ApiRequest::SavePreferences(preferences),
                PendingCall::SavePreferences,
            )]
        }
        Err(errors) => {
            feed_debug!("preferences rejected locally: {:?}", errors);
            Vec::new()
        }
    }
}

/// Issues the reloads a confirmed mutation invalidates.
fn invalidate(state: &mut AppState, mutation: Mutation) -> Vec<Effect> {
    let views: Vec<View> = mutation
        .invalidates()
        .iter()
        .copied()
        .filter(|view| state.scheduler.is_mounted() || *view == View::Urls)
        .collect();
    if views.is_empty() {
        return Vec::new();
    }
    state.reload(&views)
}

fn response_fits(pending: PendingCall, response: &ApiResponse) -> bool {
    matches!(
        (pending, response),
        (PendingCall::Summary(_), ApiResponse::Summary(_))
            | (PendingCall::Alerts(_), ApiResponse::Alerts(_))
            | (PendingCall::Urls(_), ApiResponse::Urls(_))
            | (PendingCall::Activity(_), ApiResponse::Activity(_))
            | (PendingCall::Archive(_), ApiResponse::Acknowledged)
            | (PendingCall::AddUrl, ApiResponse::UrlAdded(_))
            | (PendingCall::RemoveUrl(_), ApiResponse::Acknowledged)
            | (PendingCall::TriggerScrape(_), ApiResponse::ScrapeCompleted { .. })
            | (PendingCall::LoadPreferences, ApiResponse::Preferences(_))
            | (PendingCall::SavePreferences, ApiResponse::Preferences(_))
            | (PendingCall::SavePreferences, ApiResponse::Acknowledged)
    )
}

fn failure_text(failure: &RemoteFailure, fallback: &str) -> String {
    failure.server_message().unwrap_or(fallback).to_string()
}

fn complete_call(
    state: &mut AppState,
    request_id: RequestId,
    outcome: Result<ApiResponse, RemoteFailure>,
) -> Vec<Effect> {
    let Some(pending) = state.pending.remove(&request_id) else {
        feed_debug!("dropping outcome of untracked request {}", request_id);
        return Vec::new();
    };
    let outcome = match outcome {
        Ok(response) if !response_fits(pending, &response) => {
            feed_warn!("request {} answered with mismatched payload", request_id);
            Err(RemoteFailure::new(
                RemoteFailureKind::Decode,
                "unexpected response shape",
            ))
        }
        other => other,
    };

    match (pending, outcome) {
        (PendingCall::Summary(token), Ok(ApiResponse::Summary(summary))) => {
            if state.summary.ingest(token, summary) {
                state.mark_dirty();
            } else {
                feed_debug!("discarding stale summary for {:?}", token);
            }
            Vec::new()
        }
        (PendingCall::Summary(token), Err(failure)) => {
            if !state.summary.fail(token, failure.to_string()) {
                return Vec::new();
            }
            vec![state.toast(
                format!("Dashboard load failed: {}", failure.describe()),
                ToastKind::Error,
            )]
        }
        (PendingCall::Alerts(token), Ok(ApiResponse::Alerts(page))) => {
            match state.alerts.ingest(token, page) {
                Ingest::Applied => {
                    state.mark_dirty();
                    Vec::new()
                }
                Ingest::Reposition => state.reload(&[View::Alerts]),
                Ingest::Stale => {
                    feed_debug!("discarding stale alerts page for {:?}", token);
                    Vec::new()
                }
            }
        }
        (PendingCall::Alerts(token), Err(failure)) => {
            if !state.alerts.fail(token, failure.to_string()) {
                return Vec::new();
            }
            vec![state.toast("Failed to load alerts.", ToastKind::Error)]
        }
        (PendingCall::Urls(token), Ok(ApiResponse::Urls(urls))) => {
            if state.sites.replace_all(token, urls) {
                state.mark_dirty();
            } else {
                feed_debug!("discarding stale url list for {:?}", token);
            }
            Vec::new()
        }
        (PendingCall::Urls(token), Err(_)) => {
            if state.sites.fail(token, "Failed to load monitored websites.") {
                state.mark_dirty();
            }
            Vec::new()
        }
        (PendingCall::Activity(token), Ok(ApiResponse::Activity(feed))) => {
            if state.activity.ingest(token, &feed) {
                state.mark_dirty();
            } else {
                feed_debug!("discarding stale activity for {:?}", token);
            }
            Vec::new()
        }
        (PendingCall::Activity(token), Err(_)) => {
            if state.activity.fail(token, "Failed to load activity.") {
                state.mark_dirty();
            }
            Vec::new()
        }
        (PendingCall::Archive(alert_id), Ok(_)) => {
            feed_info!("alert {} archived", alert_id);
            let mut effects = vec![state.toast("Alert archived.", ToastKind::Success)];
            effects.extend(invalidate(state, Mutation::ArchiveAlert));
            effects
        }
        (PendingCall::Archive(_), Err(failure)) => {
            vec![state.toast(failure_text(&failure, "Archive failed."), ToastKind::Error)]
        }
        (PendingCall::AddUrl, Ok(ApiResponse::UrlAdded(site))) => {
            feed_info!("monitored url {} added", site.id);
            let issued = state.scheduler.last_token();
            state.sites.insert_confirmed(issued, site);
            let mut effects = vec![state.toast("URL added.", ToastKind::Success)];
            effects.extend(invalidate(state, Mutation::AddUrl));
            effects
        }
        (PendingCall::AddUrl, Err(failure)) => {
            vec![state.toast(failure_text(&failure, "Failed to add URL."), ToastKind::Error)]
        }
        (PendingCall::RemoveUrl(url_id), Ok(_)) => {
            let issued = state.scheduler.last_token();
            state.sites.remove_confirmed(issued, url_id);
            let mut effects = vec![state.toast("Website removed.", ToastKind::Success)];
            effects.extend(invalidate(state, Mutation::RemoveUrl));
            effects
        }
        (PendingCall::RemoveUrl(_), Err(failure)) => vec![state.toast(
            failure_text(&failure, "Failed to remove URL."),
            ToastKind::Error,
        )],
        (
            PendingCall::TriggerScrape(url_id),
            Ok(ApiResponse::ScrapeCompleted {
                notifications_found,
            }),
        ) => {
            state.sites.end_scrape(url_id);
            let mut effects = vec![state.toast(
                format!("Found {notifications_found} notifications!"),
                ToastKind::Success,
            )];
            effects.extend(invalidate(state, Mutation::TriggerScrape));
            effects
        }
        (PendingCall::TriggerScrape(url_id), Err(failure)) => {
            state.sites.end_scrape(url_id);
            vec![state.toast(
                format!("Scrape failed: {}", failure_text(&failure, "Unknown error")),
                ToastKind::Error,
            )]
        }
        (PendingCall::LoadPreferences, outcome) => {
            let Some(user_id) = state.user_id.filter(|_| state.preferences.is_open()) else {
                return Vec::new();
            };
            let mut effects = Vec::new();
            match outcome {
                Ok(ApiResponse::Preferences(remote)) => state.preferences.apply_remote(remote),
                _ => {
                    state.preferences.mark_remote_failed();
                    effects.push(state.toast("Could not load preferences.", ToastKind::Error));
                }
            }
            state.mark_dirty();
            // The draft goes on top of whatever the remote returned.
            effects.push(Effect::RestoreDraft { user_id });
            effects
        }
        (PendingCall::SavePreferences, Ok(_)) => {
            state.preferences.finish_save(true);
            let mut effects = vec![state.toast("Preferences saved!", ToastKind::Success)];
            if let Some(user_id) = state.user_id {
                effects.push(Effect::ClearDraft { user_id });
            }
            effects
        }
        (PendingCall::SavePreferences, Err(failure)) => {
            state.preferences.finish_save(false);
            vec![state.toast(
                failure_text(&failure, "Failed to save preferences."),
                ToastKind::Error,
            )]
        }
        (pending, Ok(_)) => {
            // Unreachable after the shape check above; kept so the match stays total.
            feed_warn!("unrouted response for {:?}", pending);
            Vec::new()
        }
    }
}
