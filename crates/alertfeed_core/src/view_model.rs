use chrono::NaiveDate;

use crate::activity::ActivityEvent;
use crate::alerts::SortKey;
use crate::model::{Alert, MonitoredUrl, UrlId};
use crate::preferences::{DraftStatus, Suggestion};
use crate::summary::{chart_series, match_rate, next_deadline, ChartSeries};
use crate::toast::Toast;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    pub profile: Option<ProfileView>,
    pub stats: Option<StatsView>,
    pub charts: ChartSeries,
    pub summary_error: Option<String>,
    pub category_options: Vec<String>,
    pub selected_category: Option<String>,
    pub sort: SortKey,
    pub search: String,
    pub alerts: Vec<Alert>,
    pub alerts_loading: bool,
    pub alerts_error: Option<String>,
    pub pagination: PaginationView,
    pub sites: Vec<SiteRowView>,
    pub sites_error: Option<String>,
    pub url_field_error: Option<String>,
    pub activity: Vec<ActivityEvent>,
    pub activity_error: Option<String>,
    pub toasts: Vec<Toast>,
    pub preferences: Option<PreferencesView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub total_alerts: u64,
    pub alerts_this_week: u64,
    pub monitored_urls: u64,
    pub next_deadline: Option<DeadlineView>,
    pub match_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineView {
    pub date: NaiveDate,
    pub job_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginationView {
    pub text: String,
    pub page: u32,
    pub total_pages: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRowView {
    pub id: UrlId,
    pub website_name: String,
    pub url: String,
    pub last_scraped_at: Option<chrono::NaiveDateTime>,
    pub is_active: bool,
    pub scraping: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesView {
    pub categories: Vec<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub locations: Vec<String>,
    pub category_error: Option<String>,
    pub age_error: Option<String>,
    pub url_error: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub saving: bool,
    pub saved_message: Option<String>,
    pub draft_status: Option<String>,
    pub show_onboarding: bool,
}

pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

pub fn pagination_text(page: u32, total_pages: u32, total: u64, filtered: Option<usize>) -> String {
    match filtered {
        Some(count) => format!("Filtered: {count} results"),
        None => format!("Page {page} of {total_pages} ({total} total)"),
    }
}

fn draft_status_text(status: DraftStatus) -> &'static str {
    match status {
        DraftStatus::Saved => "Draft saved",
        DraftStatus::Restored => "Draft restored from local autosave.",
    }
}

fn site_row(state: &AppState, site: &MonitoredUrl) -> SiteRowView {
    SiteRowView {
        id: site.id,
        website_name: site
            .website_name
            .clone()
            .unwrap_or_else(|| site.url.clone()),
        url: site.url.clone(),
        last_scraped_at: site.last_scraped_at,
        is_active: site.is_active,
        scraping: state.sites.is_scraping(site.id),
    }
}

impl AppState {
    pub fn view(&self) -> DashboardViewModel {
        let alerts_store = &self.alerts;
        let visible = alerts_store.visible();
        let filtered = (!alerts_store.filters().search.is_empty()).then_some(visible.len());
        let page = alerts_store.page();
        let total_pages = alerts_store.total_pages();

        let summary = self.summary.summary();
        let recent: &[Alert] = summary.map(|s| s.recent_alerts.as_slice()).unwrap_or(&[]);

        DashboardViewModel {
            profile: summary.and_then(|s| s.user.as_ref()).map(|user| ProfileView {
                name: user.name.clone(),
                email: user.email.clone(),
                initials: initials(&user.name),
            }),
            stats: summary.map(|s| StatsView {
                total_alerts: s.stats.total_alerts_received,
                alerts_this_week: s.stats.alerts_this_week,
                monitored_urls: s.stats.monitored_urls,
                next_deadline: next_deadline(recent).and_then(|alert| {
                    alert.last_date_to_apply.map(|date| DeadlineView {
                        date,
                        job_title: alert.job_title.clone(),
                    })
                }),
                match_rate: match_rate(recent),
            }),
            charts: chart_series(recent),
            summary_error: self.summary.error().map(str::to_string),
            category_options: self.summary.category_options(),
            selected_category: alerts_store.filters().category.clone(),
            sort: alerts_store.sort(),
            search: alerts_store.filters().search.clone(),
            alerts: visible,
            alerts_loading: alerts_store.is_loading(),
            alerts_error: alerts_store.error().map(str::to_string),
            pagination: PaginationView {
                text: pagination_text(page, total_pages, alerts_store.total(), filtered),
                page,
                total_pages,
                prev_enabled: page > 1,
                next_enabled: page < total_pages,
            },
            sites: self
                .sites
                .urls()
                .iter()
                .map(|site| site_row(self, site))
                .collect(),
            sites_error: self.sites.error().map(str::to_string),
            url_field_error: self.sites.field_error().map(ToString::to_string),
            activity: self.activity.events().to_vec(),
            activity_error: self.activity.error().map(str::to_string),
            toasts: self.toasts.toasts().to_vec(),
            preferences: self.preferences.is_open().then(|| self.preferences_view()),
        }
    }

    fn preferences_view(&self) -> PreferencesView {
        let form = &self.preferences;
        let errors = form.errors();
        PreferencesView {
            categories: form.categories().iter().cloned().collect(),
            min_age: form.min_age(),
            max_age: form.max_age(),
            locations: form.locations().iter().cloned().collect(),
            category_error: errors.category.as_ref().map(ToString::to_string),
            age_error: errors.age.as_ref().map(ToString::to_string),
            url_error: errors.url.as_ref().map(ToString::to_string),
            suggestions: form.suggestions(&self.sites),
            saving: form.is_saving(),
            saved_message: form.is_saved().then(|| "Preferences saved!".to_string()),
            draft_status: form.draft_status().map(|s| draft_status_text(s).to_string()),
            show_onboarding: form.show_onboarding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("asha kumari devi"), "AK");
        assert_eq!(initials("Ravi"), "R");
        assert_eq!(initials("   "), "U");
    }

    #[test]
    fn pagination_text_switches_when_filtered() {
        assert_eq!(pagination_text(1, 3, 23, None), "Page 1 of 3 (23 total)");
        assert_eq!(pagination_text(1, 3, 23, Some(4)), "Filtered: 4 results");
    }
}
