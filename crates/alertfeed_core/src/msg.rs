use crate::alerts::SortKey;
use crate::api::{ApiResponse, RequestId};
use crate::effect::TimerKind;
use crate::error::RemoteFailure;
use crate::model::{AlertId, UrlId, UserId};
use crate::preferences::DraftSnapshot;
use crate::toast::ToastId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Dashboard became visible for `user_id`.
    Mounted { user_id: UserId },
    /// Dashboard went away; timers stop and in-flight responses are forgotten.
    Unmounted,
    /// A periodic timer fired.
    TimerFired(TimerKind),
    /// User asked for a refresh.
    RefreshClicked,
    NextPageClicked,
    PrevPageClicked,
    CategoryChanged(Option<String>),
    SortChanged(SortKey),
    SearchChanged(String),
    ArchiveClicked(AlertId),
    AddUrlSubmitted { url: String, website_name: String },
    RemoveUrlClicked(UrlId),
    TriggerScrapeClicked(UrlId),
    /// Preferences form opened; `onboarding_seen` comes from the local store.
    PreferencesOpened { onboarding_seen: bool },
    PreferencesClosed,
    CategoryToggled(String),
    AgesChanged {
        min_age: Option<u32>,
        max_age: Option<u32>,
    },
    LocationAdded(String),
    LocationRemoved(String),
    SkipOptionalClicked,
    SavePreferencesClicked,
    OnboardingDismissed,
    /// Result of `Effect::RestoreDraft`; `None` when absent or unreadable.
    DraftRestored(Option<DraftSnapshot>),
    /// Engine outcome for `Effect::Call`.
    CallCompleted {
        request_id: RequestId,
        outcome: Result<ApiResponse, RemoteFailure>,
    },
    ToastFaded(ToastId),
    ToastExpired(ToastId),
    /// Fallback for placeholder wiring.
    NoOp,
}
