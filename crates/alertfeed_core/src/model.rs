//! Records owned by the remote service, as the client sees them.
//!
//! Timestamps arrive as naive ISO-8601 strings (`2024-05-01T09:30:00.123456`); some
//! deployments append an offset. Unparseable values are read as missing rather than
//! failing the whole payload.
use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

pub type UserId = u64;
pub type AlertId = u64;
pub type UrlId = u64;

/// Email status the remote pipeline reports for a delivered alert.
pub const EMAIL_STATUS_SENT: &str = "sent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub exam_category: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_date_to_apply: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub sent_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub email_status: Option<String>,
}

impl Alert {
    pub fn is_sent(&self) -> bool {
        self.email_status.as_deref() == Some(EMAIL_STATUS_SENT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredUrl {
    pub id: UrlId,
    pub url: String,
    #[serde(default)]
    pub website_name: Option<String>,
    #[serde(default = "default_scraper_type")]
    pub scraper_type: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_scraped_at: Option<NaiveDateTime>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

pub(crate) const DEFAULT_SCRAPER_TYPE: &str = "html";

fn default_scraper_type() -> String {
    DEFAULT_SCRAPER_TYPE.to_string()
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub exam_categories: BTreeSet<String>,
    #[serde(default)]
    pub min_age: Option<u32>,
    #[serde(default)]
    pub max_age: Option<u32>,
    #[serde(default)]
    pub preferred_locations: BTreeSet<String>,
}

/// One page of `GET /api/dashboard/{user}/alerts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertPage {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: Option<u32>,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub qualification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_alerts_received: u64,
    #[serde(default)]
    pub alerts_this_week: u64,
    #[serde(default)]
    pub monitored_urls: u64,
    #[serde(default)]
    pub active_preferences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardSummary {
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailSentRow {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub sent_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeRunRow {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub scraped_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WarningRow {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<NaiveDateTime>,
}

/// The three independently shaped activity collections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ActivityFeed {
    #[serde(default)]
    pub emails_sent: Vec<EmailSentRow>,
    #[serde(default)]
    pub scraping_runs: Vec<ScrapeRunRow>,
    #[serde(default)]
    pub errors_warnings: Vec<WarningRow>,
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| parse_date(raw).and_then(|date| date.and_hms_opt(0, 0, 0)))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_tolerates_missing_and_garbled_dates() {
        let alert: Alert = serde_json::from_str(
            r#"{"id": 4, "job_title": "SSC CGL", "sent_at": "yesterday", "last_date_to_apply": null}"#,
        )
        .unwrap();
        assert_eq!(alert.sent_at, None);
        assert_eq!(alert.last_date_to_apply, None);
        assert!(!alert.is_sent());
    }

    #[test]
    fn timestamps_accept_naive_and_offset_forms() {
        let naive = parse_timestamp("2024-05-01T09:30:00.123456").unwrap();
        let offset = parse_timestamp("2024-05-01T09:30:00+00:00").unwrap();
        assert_eq!(naive.date(), offset.date());
        assert_eq!(
            parse_timestamp("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn monitored_url_fills_server_defaults() {
        let url: MonitoredUrl =
            serde_json::from_str(r#"{"id": 9, "url": "https://ssc.gov.in/"}"#).unwrap();
        assert_eq!(url.scraper_type, "html");
        assert!(url.is_active);
        assert_eq!(url.website_name, None);
    }
}
