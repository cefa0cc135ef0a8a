//! Alertfeed core: pure dashboard state machine, caches and view-model helpers.
mod activity;
mod alerts;
mod api;
mod effect;
mod error;
mod fence;
mod model;
mod msg;
mod preferences;
mod scheduler;
mod sites;
mod state;
mod summary;
mod toast;
mod update;
mod view_model;

pub use activity::{aggregate, ActivityEvent, ActivityKind, ActivityStore, ACTIVITY_LIMIT};
pub use alerts::{
    sort_alerts, total_pages, AlertFeedStore, AlertFilters, AlertQuery, Ingest, SortKey,
};
pub use api::{ApiRequest, ApiResponse, RequestId};
pub use effect::{Effect, TimerKind};
pub use error::{RemoteFailure, RemoteFailureKind, ValidationFailure};
pub use fence::{Fence, FenceCounter, FenceToken};
pub use model::{
    parse_date, parse_timestamp, ActivityFeed, Alert, AlertId, AlertPage, DashboardStats,
    DashboardSummary, EmailSentRow, MonitoredUrl, Preferences, ScrapeRunRow, UrlId, UserId,
    UserProfile, WarningRow, EMAIL_STATUS_SENT,
};
pub use msg::Msg;
pub use preferences::{
    DraftSnapshot, DraftStatus, FormErrors, PreferencesForm, Suggestion, EXAM_CATEGORIES,
    LOCATION_OPTIONS,
};
pub use scheduler::{Mutation, PollingScheduler, View, ALL_VIEWS};
pub use sites::{auto_name_from_url, normalize_url_for_dedupe, MonitoredSiteStore, NewSite};
pub use state::{AppState, DashboardSettings};
pub use summary::{chart_series, match_rate, next_deadline, ChartSeries, SummaryStore};
pub use toast::{NotificationQueue, Toast, ToastId, ToastKind, ToastPhase};
pub use update::update;
pub use view_model::{
    initials, pagination_text, DashboardViewModel, DeadlineView, PaginationView,
    PreferencesView, ProfileView, SiteRowView, StatsView,
};
