use std::time::Duration;

use crate::api::{ApiRequest, RequestId};
use crate::model::UserId;
use crate::preferences::DraftSnapshot;
use crate::toast::ToastId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Perform a remote call; the outcome comes back as `Msg::CallCompleted`.
    Call {
        request_id: RequestId,
        request: ApiRequest,
    },
    /// Start (or restart) a periodic timer.
    StartTimer { timer: TimerKind, period: Duration },
    StopTimer { timer: TimerKind },
    /// Report `Msg::ToastFaded` after `fade_after` and `Msg::ToastExpired` after
    /// `remove_after`, both measured from now.
    ScheduleToast {
        id: ToastId,
        fade_after: Duration,
        remove_after: Duration,
    },
    SnapshotDraft { user_id: UserId, draft: DraftSnapshot },
    /// Read the draft back; the result comes back as `Msg::DraftRestored`.
    RestoreDraft { user_id: UserId },
    ClearDraft { user_id: UserId },
    MarkOnboardingSeen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Poll,
    DraftAutosave,
}
