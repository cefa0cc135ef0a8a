//! Requests the core asks the engine to perform, and the typed replies it expects.
use crate::alerts::AlertQuery;
use crate::model::{
    ActivityFeed, AlertId, AlertPage, DashboardSummary, MonitoredUrl, Preferences, UrlId,
};
use crate::sites::NewSite;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Summary,
    Alerts(AlertQuery),
    Activity,
    ArchiveAlert { alert_id: AlertId },
    TriggerScrape { url_id: UrlId },
    ListUrls,
    AddUrl(NewSite),
    RemoveUrl { url_id: UrlId },
    LoadPreferences,
    SavePreferences(Preferences),
}

impl ApiRequest {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ApiRequest::Summary => "summary",
            ApiRequest::Alerts(_) => "alerts",
            ApiRequest::Activity => "activity",
            ApiRequest::ArchiveAlert { .. } => "archive-alert",
            ApiRequest::TriggerScrape { .. } => "trigger-scrape",
            ApiRequest::ListUrls => "list-urls",
            ApiRequest::AddUrl(_) => "add-url",
            ApiRequest::RemoveUrl { .. } => "remove-url",
            ApiRequest::LoadPreferences => "load-preferences",
            ApiRequest::SavePreferences(_) => "save-preferences",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    Summary(DashboardSummary),
    Alerts(AlertPage),
    Activity(ActivityFeed),
    Urls(Vec<MonitoredUrl>),
    UrlAdded(MonitoredUrl),
    /// Archive and remove acknowledge without a payload.
    Acknowledged,
    ScrapeCompleted { notifications_found: u64 },
    Preferences(Preferences),
}
