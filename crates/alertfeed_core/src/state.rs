use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDateTime;

use crate::activity::ActivityStore;
use crate::alerts::{epoch, AlertFeedStore};
use crate::api::{ApiRequest, RequestId};
use crate::effect::Effect;
use crate::fence::FenceToken;
use crate::model::{AlertId, UrlId, UserId};
use crate::preferences::PreferencesForm;
use crate::scheduler::{PollingScheduler, View};
use crate::sites::MonitoredSiteStore;
use crate::summary::SummaryStore;
use crate::toast::{NotificationQueue, ToastKind};

/// Tunables the core needs; the shell fills them from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub per_page: u32,
    pub poll_interval: Duration,
    pub draft_interval: Duration,
    pub toast_fade: Duration,
    pub toast_remove: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            per_page: 20,
            poll_interval: Duration::from_secs(5 * 60),
            draft_interval: Duration::from_secs(30),
            toast_fade: Duration::from_millis(2500),
            toast_remove: Duration::from_millis(3000),
        }
    }
}

/// What an in-flight call was issued for, so its outcome can be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingCall {
    Summary(FenceToken),
    Alerts(FenceToken),
    Urls(FenceToken),
    Activity(FenceToken),
    Archive(AlertId),
    AddUrl,
    RemoveUrl(UrlId),
    TriggerScrape(UrlId),
    LoadPreferences,
    SavePreferences,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) settings: DashboardSettings,
    pub(crate) user_id: Option<UserId>,
    pub(crate) alerts: AlertFeedStore,
    pub(crate) sites: MonitoredSiteStore,
    pub(crate) activity: ActivityStore,
    pub(crate) summary: SummaryStore,
    pub(crate) toasts: NotificationQueue,
    pub(crate) preferences: PreferencesForm,
    pub(crate) scheduler: PollingScheduler,
    pub(crate) pending: HashMap<RequestId, PendingCall>,
    next_request_id: RequestId,
    now: NaiveDateTime,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(DashboardSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: DashboardSettings) -> Self {
        Self {
            alerts: AlertFeedStore::new(settings.per_page),
            scheduler: PollingScheduler::new(settings.poll_interval),
            settings,
            user_id: None,
            sites: MonitoredSiteStore::new(),
            activity: ActivityStore::default(),
            summary: SummaryStore::default(),
            toasts: NotificationQueue::default(),
            preferences: PreferencesForm::default(),
            pending: HashMap::new(),
            next_request_id: 0,
            now: epoch(),
            dirty: false,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn alerts(&self) -> &AlertFeedStore {
        &self.alerts
    }

    pub fn sites(&self) -> &MonitoredSiteStore {
        &self.sites
    }

    pub fn activity(&self) -> &ActivityStore {
        &self.activity
    }

    pub fn summary(&self) -> &SummaryStore {
        &self.summary
    }

    pub fn toasts(&self) -> &NotificationQueue {
        &self.toasts
    }

    pub fn preferences(&self) -> &PreferencesForm {
        &self.preferences
    }

    pub fn scheduler(&self) -> &PollingScheduler {
        &self.scheduler
    }

    /// Wall-clock time as last reported by the shell; stamps new toasts.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    pub fn pending_calls(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn call(&mut self, request: ApiRequest, pending: PendingCall) -> Effect {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending.insert(request_id, pending);
        Effect::Call {
            request_id,
            request,
        }
    }

    pub(crate) fn toast(&mut self, text: impl Into<String>, kind: ToastKind) -> Effect {
        let id = self.toasts.enqueue(text, kind, self.now);
        self.mark_dirty();
        Effect::ScheduleToast {
            id,
            fade_after: self.settings.toast_fade,
            remove_after: self.settings.toast_remove,
        }
    }

    /// Issues one load per view in `views`, all fenced by the same fresh token.
    pub(crate) fn reload(&mut self, views: &[View]) -> Vec<Effect> {
        let token = self.scheduler.next_token();
        let mut effects = Vec::with_capacity(views.len());
        for view in views {
            let effect = match view {
                View::Summary => self.call(ApiRequest::Summary, PendingCall::Summary(token)),
                View::Alerts => {
                    self.alerts.mark_loading();
                    let query = self.alerts.query();
                    self.call(ApiRequest::Alerts(query), PendingCall::Alerts(token))
                }
                View::Urls => self.call(ApiRequest::ListUrls, PendingCall::Urls(token)),
                View::Activity => self.call(ApiRequest::Activity, PendingCall::Activity(token)),
            };
            effects.push(effect);
        }
        self.mark_dirty();
        effects
    }
}
