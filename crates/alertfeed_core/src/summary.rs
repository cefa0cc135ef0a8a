//! Dashboard header data: profile, stat cards and chart series.
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::fence::{Fence, FenceToken};
use crate::model::{Alert, DashboardSummary};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryStore {
    summary: Option<DashboardSummary>,
    error: Option<String>,
    fence: Fence,
}

impl SummaryStore {
    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn ingest(&mut self, token: FenceToken, summary: DashboardSummary) -> bool {
        if !self.fence.admit(token) {
            return false;
        }
        self.summary = Some(summary);
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

    pub fn category_options(&self) -> Vec<String> {
        self.summary
            .as_ref()
            .map(|summary| summary.stats.active_preferences.clone())
            .unwrap_or_default()
    }
}

/// Earliest deadline among `alerts`, with the alert it belongs to.
pub fn next_deadline(alerts: &[Alert]) -> Option<&Alert> {
    alerts
        .iter()
        .filter(|alert| alert.last_date_to_apply.is_some())
        .min_by_key(|alert| alert.last_date_to_apply)
}

/// Percentage of `alerts` whose email went out, rounded to the nearest integer.
pub fn match_rate(alerts: &[Alert]) -> u32 {
    if alerts.is_empty() {
        return 0;
    }
    let sent = alerts.iter().filter(|alert| alert.is_sent()).count();
    ((sent as f64 / alerts.len() as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartSeries {
    pub per_day: BTreeMap<String, u32>,
    pub per_category: BTreeMap<String, u32>,
}

pub fn chart_series(alerts: &[Alert]) -> ChartSeries {
    let mut series = ChartSeries::default();
    for alert in alerts {
        let day = alert
            .sent_at
            .map(|at| at.date())
            .map(|date: NaiveDate| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        *series.per_day.entry(day).or_default() += 1;
        let category = alert
            .exam_category
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        *series.per_category.entry(category).or_default() += 1;
    }
    series
}
