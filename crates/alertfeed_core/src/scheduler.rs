//! Refresh orchestration: timers, coordinated reloads and invalidation sets.
use std::time::Duration;

use crate::effect::{Effect, TimerKind};
use crate::fence::{FenceCounter, FenceToken};

/// A cached view that a reload can refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum View {
    Summary,
    Alerts,
    Urls,
    Activity,
}

pub const ALL_VIEWS: &[View] = &[View::Summary, View::Alerts, View::Urls, View::Activity];

/// Confirmed mutations and the views each one invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ArchiveAlert,
    AddUrl,
    RemoveUrl,
    TriggerScrape,
}

impl Mutation {
    pub fn invalidates(self) -> &'static [View] {
        match self {
            Mutation::ArchiveAlert => &[View::Alerts, View::Summary],
            Mutation::AddUrl | Mutation::RemoveUrl => &[View::Urls, View::Summary],
            // A scrape can change alerts, counts and activity at once.
            Mutation::TriggerScrape => ALL_VIEWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingScheduler {
    poll_interval: Duration,
    mounted: bool,
    counter: FenceCounter,
}

impl PollingScheduler {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            mounted: false,
            counter: FenceCounter::default(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub(crate) fn mount(&mut self) -> Effect {
        self.mounted = true;
        Effect::StartTimer {
            timer: TimerKind::Poll,
            period: self.poll_interval,
        }
    }

    pub(crate) fn unmount(&mut self) -> Effect {
        self.mounted = false;
        Effect::StopTimer {
            timer: TimerKind::Poll,
        }
    }

    /// Token for the next reload, coordinated or single-view.
    pub(crate) fn next_token(&mut self) -> FenceToken {
        self.counter.issue()
    }

    pub fn last_token(&self) -> FenceToken {
        self.counter.last_issued()
    }
}
