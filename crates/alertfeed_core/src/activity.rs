//! Merges the three activity collections into one newest-first timeline.
use chrono::NaiveDateTime;

use crate::alerts::epoch;
use crate::fence::{Fence, FenceToken};
use crate::model::ActivityFeed;

/// Entries kept for display.
pub const ACTIVITY_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    EmailSent,
    ScrapeRun,
    Warning,
}

impl ActivityKind {
    pub fn icon(self) -> &'static str {
        match self {
            ActivityKind::EmailSent => "🔔",
            ActivityKind::ScrapeRun => "🕷️",
            ActivityKind::Warning => "⚠️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
    pub text: String,
    pub at: Option<NaiveDateTime>,
}

/// Builds the display timeline from `feed` without touching it.
pub fn aggregate(feed: &ActivityFeed) -> Vec<ActivityEvent> {
    let emails = feed.emails_sent.iter().map(|row| ActivityEvent {
        kind: ActivityKind::EmailSent,
        text: format!(
            "New alert sent: {}",
            row.job_title.as_deref().unwrap_or("Not specified")
        ),
        at: row.sent_at,
    });
    let scrapes = feed.scraping_runs.iter().map(|row| ActivityEvent {
        kind: ActivityKind::ScrapeRun,
        text: format!(
            "Scraped {} - {}",
            row.url,
            row.result.as_deref().unwrap_or("completed")
        ),
        at: row.scraped_at,
    });
    let warnings = feed.errors_warnings.iter().map(|row| ActivityEvent {
        kind: ActivityKind::Warning,
        text: row
            .message
            .clone()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| "Warning".to_string()),
        at: row.timestamp,
    });

    let mut events: Vec<ActivityEvent> = emails.chain(scrapes).chain(warnings).collect();
    events.sort_by(|a, b| {
        let a_at = a.at.unwrap_or_else(epoch);
        let b_at = b.at.unwrap_or_else(epoch);
        b_at.cmp(&a_at)
    });
    events.truncate(ACTIVITY_LIMIT);
    events
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityStore {
    events: Vec<ActivityEvent>,
    loaded: bool,
    error: Option<String>,
    fence: Fence,
}

impl ActivityStore {
    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn ingest(&mut self, token: FenceToken, feed: &ActivityFeed) -> bool {
        if !self.fence.admit(token) {
            return false;
        }
        self.events = aggregate(feed);
        self.loaded = true;
        self.error = None;
        true
    }

    pub fn fail(&mut self, token: FenceToken, message: impl Into<String>) -> bool {
        if !self.fence.admit(token) {
            return false;
        }
        self.error = Some(message.into());
        true
    }
}
