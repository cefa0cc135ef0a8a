//! Paginated, filterable, sortable cache of alert records.
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::fence::{Fence, FenceToken};
use crate::model::{Alert, AlertId, AlertPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest `sent_at` first.
    #[default]
    Recent,
    /// Earliest deadline first; alerts without a deadline last.
    Deadline,
    /// Sent alerts first, otherwise the prior order.
    Relevance,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "recent" => Some(Self::Recent),
            "deadline" => Some(Self::Deadline),
            "relevance" => Some(Self::Relevance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertFilters {
    /// Sent to the remote as `exam_category`.
    pub category: Option<String>,
    /// Applied locally to the fetched page only.
    pub search: String,
}

/// Parameters of one paginated fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertQuery {
    pub page: u32,
    pub per_page: u32,
    pub exam_category: Option<String>,
}

/// Outcome of handing a fetched page to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    Applied,
    /// The page was applied but lies beyond the last page; the store moved to the
    /// last page and wants another load.
    Reposition,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertFeedStore {
    page: u32,
    per_page: u32,
    filters: AlertFilters,
    sort: SortKey,
    alerts: Vec<Alert>,
    total: u64,
    loaded: bool,
    loading: bool,
    error: Option<String>,
    fence: Fence,
}

impl AlertFeedStore {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            filters: AlertFilters::default(),
            sort: SortKey::default(),
            alerts: Vec::new(),
            total: 0,
            loaded: false,
            loading: false,
            error: None,
            fence: Fence::default(),
        }
    }

    pub fn query(&self) -> AlertQuery {
        AlertQuery {
            page: self.page,
            per_page: self.per_page,
            exam_category: self.filters.category.clone(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn filters(&self) -> &AlertFilters {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The cached page exactly as fetched.
    pub fn cached(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.per_page)
    }

    pub fn mark_loading(&mut self) {
        self.loading = true;
    }

    /// Returns `true` when the category changed; the page is reset to 1 either way.
    pub fn set_category(&mut self, category: Option<String>) -> bool {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self.page = 1;
        if self.filters.category == category {
            return false;
        }
        self.filters.category = category;
        true
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.page = 1;
        self.sort = sort;
    }

    pub fn set_search(&mut self, search: &str) {
        self.page = 1;
        self.filters.search = search.trim().to_lowercase();
    }

    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Replaces the cached page with `fetched` unless a newer load already landed.
    pub fn ingest(&mut self, token: FenceToken, fetched: AlertPage) -> Ingest {
        if !self.fence.admit(token) {
            return Ingest::Stale;
        }
        self.loading = false;
        self.loaded = true;
        self.error = None;
        if let Some(per_page) = fetched.per_page.filter(|p| *p > 0) {
            self.per_page = per_page;
        }
        self.total = fetched.total;
        self.page = fetched.page.max(1);

        let mut seen = HashSet::new();
        self.alerts = fetched
            .alerts
            .into_iter()
            .filter(|alert| seen.insert(alert.id))
            .collect();

        let last = self.total_pages();
        if self.alerts.is_empty() && self.total > 0 && self.page > last {
            self.page = last;
            return Ingest::Reposition;
        }
        Ingest::Applied
    }

    /// Records a failed load. The cached page stays visible.
    pub fn fail(&mut self, token: FenceToken, message: impl Into<String>) -> bool {
        if !self.fence.admit(token) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    pub fn contains(&self, id: AlertId) -> bool {
        self.alerts.iter().any(|alert| alert.id == id)
    }

    /// What the user sees: the cached page, sorted, then narrowed by the search text.
    pub fn visible(&self) -> Vec<Alert> {
        let mut alerts = self.alerts.clone();
        sort_alerts(&mut alerts, self.sort);
        if self.filters.search.is_empty() {
            return alerts;
        }
        alerts
            .into_iter()
            .filter(|alert| alert.job_title.to_lowercase().contains(&self.filters.search))
            .collect()
    }
}

pub fn total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Stable sort by `key`.
pub fn sort_alerts(alerts: &mut [Alert], key: SortKey) {
    match key {
        SortKey::Recent => {
            alerts.sort_by(|a, b| sent_key(b).cmp(&sent_key(a)));
        }
        SortKey::Deadline => {
            alerts.sort_by_key(|alert| alert.last_date_to_apply.unwrap_or(NaiveDate::MAX));
        }
        SortKey::Relevance => {
            alerts.sort_by_key(|alert| !alert.is_sent());
        }
    }
}

fn sent_key(alert: &Alert) -> NaiveDateTime {
    alert.sent_at.unwrap_or_else(epoch)
}

pub(crate) fn epoch() -> NaiveDateTime {
    DateTime::from_timestamp(0, 0)
        .map(|at| at.naive_utc())
        .unwrap_or(NaiveDateTime::MIN)
}
