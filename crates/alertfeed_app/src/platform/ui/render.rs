use chrono::{NaiveDate, NaiveDateTime};

use alertfeed_core::{
    ActivityEvent, Alert, DashboardViewModel, PreferencesView, SortKey, Toast, ToastKind,
    ToastPhase,
};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: u64,
    pub text: String,
    pub enabled: bool,
}

impl ListItem {
    fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    SetText {
        control: ControlId,
        text: String,
        severity: Severity,
    },
    SetEnabled {
        control: ControlId,
        enabled: bool,
    },
    SetVisible {
        control: ControlId,
        visible: bool,
    },
    SetItems {
        control: ControlId,
        items: Vec<ListItem>,
    },
    ShowToasts(Vec<ToastLine>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastLine {
    pub text: String,
    pub severity: Severity,
    pub fading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    None,
    Critical,
    Soon,
    Relaxed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgencyBadge {
    pub text: String,
    pub urgency: Urgency,
}

/// "just now" inside the first hour, then hours, then whole days.
pub fn time_ago(at: Option<NaiveDateTime>, now: NaiveDateTime) -> String {
    let Some(at) = at else {
        return "Unknown".to_string();
    };
    let hours = (now - at).num_hours();
    if hours < 1 {
        "just now".to_string()
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else {
        format!("{} days ago", hours / 24)
    }
}

pub fn urgency_badge(deadline: Option<NaiveDate>, today: NaiveDate) -> UrgencyBadge {
    let Some(deadline) = deadline else {
        return UrgencyBadge {
            text: "No deadline".to_string(),
            urgency: Urgency::None,
        };
    };
    let days = (deadline - today).num_days();
    let urgency = if days < 3 {
        Urgency::Critical
    } else if days <= 7 {
        Urgency::Soon
    } else {
        Urgency::Relaxed
    };
    UrgencyBadge {
        text: format!("{}d left", days.max(0)),
        urgency,
    }
}

fn text(control: ControlId, text: impl Into<String>) -> RenderCommand {
    RenderCommand::SetText {
        control,
        text: text.into(),
        severity: Severity::Information,
    }
}

fn error_text(control: ControlId, message: Option<&str>) -> RenderCommand {
    RenderCommand::SetText {
        control,
        text: message.unwrap_or_default().to_string(),
        severity: if message.is_some() {
            Severity::Error
        } else {
            Severity::Information
        },
    }
}

fn sort_label(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Recent => "recent",
        SortKey::Deadline => "deadline",
        SortKey::Relevance => "relevance",
    }
}

#[allow(clippy::vec_init_then_push)]
pub fn render(view: &DashboardViewModel, now: NaiveDateTime) -> Vec<RenderCommand> {
    let mut cmds = Vec::new();

    let (name, email, avatar) = match &view.profile {
        Some(profile) if !profile.name.trim().is_empty() => (
            profile.name.clone(),
            profile.email.clone(),
            profile.initials.clone(),
        ),
        Some(profile) => ("User".to_string(), profile.email.clone(), "U".to_string()),
        None => ("User".to_string(), String::new(), "U".to_string()),
    };
    cmds.push(text(LABEL_USER_NAME, name));
    cmds.push(text(LABEL_USER_EMAIL, email));
    cmds.push(text(LABEL_USER_AVATAR, avatar));

    if let Some(stats) = &view.stats {
        cmds.push(text(LABEL_TOTAL_ALERTS, stats.total_alerts.to_string()));
        cmds.push(text(
            LABEL_WEEK_ALERTS,
            format!("+{} this week", stats.alerts_this_week),
        ));
        cmds.push(text(LABEL_WEBSITES, stats.monitored_urls.to_string()));
        let (deadline, job) = match &stats.next_deadline {
            Some(next) => (
                next.date.format("%d %B %Y").to_string(),
                next.job_title.clone(),
            ),
            None => (
                "Not available".to_string(),
                "No upcoming deadlines".to_string(),
            ),
        };
        cmds.push(text(LABEL_NEXT_DEADLINE, deadline));
        cmds.push(text(LABEL_NEXT_DEADLINE_JOB, job));
        cmds.push(text(LABEL_MATCH_RATE, format!("{}%", stats.match_rate)));
    }
    cmds.push(error_text(LABEL_SUMMARY_ERROR, view.summary_error.as_deref()));
    cmds.push(RenderCommand::SetItems {
        control: LIST_CHART_PER_DAY,
        items: chart_items(&view.charts.per_day),
    });
    cmds.push(RenderCommand::SetItems {
        control: LIST_CHART_PER_CATEGORY,
        items: chart_items(&view.charts.per_category),
    });

    let mut categories = vec![ListItem::new(0, "All categories")];
    categories.extend(
        view.category_options
            .iter()
            .enumerate()
            .map(|(i, option)| ListItem::new(i as u64 + 1, option.clone())),
    );
    cmds.push(RenderCommand::SetItems {
        control: SELECT_CATEGORY,
        items: categories,
    });
    cmds.push(text(SELECT_SORT, sort_label(view.sort)));
    cmds.push(text(INPUT_SEARCH, view.search.clone()));

    let today = now.date();
    cmds.push(RenderCommand::SetItems {
        control: LIST_ALERTS,
        items: view
            .alerts
            .iter()
            .map(|alert| ListItem::new(alert.id, alert_line(alert, today, now)))
            .collect(),
    });
    let alerts_status = if let Some(err) = &view.alerts_error {
        error_text(LABEL_ALERTS_STATUS, Some(err.as_str()))
    } else if view.alerts_loading {
        text(LABEL_ALERTS_STATUS, "Loading alerts...")
    } else if view.alerts.is_empty() {
        text(LABEL_ALERTS_STATUS, "No alerts found.")
    } else {
        text(LABEL_ALERTS_STATUS, "")
    };
    cmds.push(alerts_status);
    cmds.push(text(LABEL_PAGINATION, view.pagination.text.clone()));
    cmds.push(RenderCommand::SetEnabled {
        control: BUTTON_PREV_PAGE,
        enabled: view.pagination.prev_enabled,
    });
    cmds.push(RenderCommand::SetEnabled {
        control: BUTTON_NEXT_PAGE,
        enabled: view.pagination.next_enabled,
    });

    cmds.push(RenderCommand::SetItems {
        control: LIST_SITES,
        items: view
            .sites
            .iter()
            .map(|site| {
                let scraped = match site.last_scraped_at {
                    Some(at) => time_ago(Some(at), now),
                    None => "Never".to_string(),
                };
                let state = if site.scraping {
                    " | Scraping..."
                } else if site.is_active {
                    ""
                } else {
                    " | Paused"
                };
                ListItem {
                    id: site.id,
                    text: format!(
                        "{} | {} | Last scraped: {}{}",
                        site.website_name, site.url, scraped, state
                    ),
                    enabled: !site.scraping,
                }
            })
            .collect(),
    });
    let sites_status = match &view.sites_error {
        Some(err) => error_text(LABEL_SITES_STATUS, Some(err.as_str())),
        None if view.sites.is_empty() => text(
            LABEL_SITES_STATUS,
            "No websites added yet. Go to Preferences to add monitored URLs.",
        ),
        None => text(LABEL_SITES_STATUS, ""),
    };
    cmds.push(sites_status);
    cmds.push(error_text(LABEL_URL_ERROR, view.url_field_error.as_deref()));

    cmds.push(RenderCommand::SetItems {
        control: LIST_ACTIVITY,
        items: view
            .activity
            .iter()
            .enumerate()
            .map(|(i, event)| ListItem::new(i as u64, activity_line(event, now)))
            .collect(),
    });
    let activity_status = match &view.activity_error {
        Some(err) => error_text(LABEL_ACTIVITY_STATUS, Some(err.as_str())),
        None if view.activity.is_empty() => text(LABEL_ACTIVITY_STATUS, "No recent activity."),
        None => text(LABEL_ACTIVITY_STATUS, ""),
    };
    cmds.push(activity_status);

    cmds.push(RenderCommand::SetVisible {
        control: PANEL_PREFERENCES,
        visible: view.preferences.is_some(),
    });
    if let Some(prefs) = &view.preferences {
        render_preferences(&mut cmds, prefs);
    }

    cmds.push(RenderCommand::ShowToasts(
        view.toasts.iter().map(toast_line).collect(),
    ));

    cmds
}

fn render_preferences(cmds: &mut Vec<RenderCommand>, prefs: &PreferencesView) {
    cmds.push(RenderCommand::SetItems {
        control: LIST_CATEGORIES,
        items: prefs
            .categories
            .iter()
            .enumerate()
            .map(|(i, category)| ListItem::new(i as u64, category.clone()))
            .collect(),
    });
    let age = |value: Option<u32>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    cmds.push(text(
        LABEL_AGES,
        format!("Age: {} to {}", age(prefs.min_age), age(prefs.max_age)),
    ));
    cmds.push(RenderCommand::SetItems {
        control: LIST_LOCATIONS,
        items: prefs
            .locations
            .iter()
            .enumerate()
            .map(|(i, location)| ListItem::new(i as u64, location.clone()))
            .collect(),
    });
    cmds.push(error_text(LABEL_CATEGORY_ERROR, prefs.category_error.as_deref()));
    cmds.push(error_text(LABEL_AGE_ERROR, prefs.age_error.as_deref()));
    cmds.push(error_text(LABEL_URL_ERROR, prefs.url_error.as_deref()));
    cmds.push(RenderCommand::SetItems {
        control: LIST_SUGGESTIONS,
        items: prefs
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| ListItem::new(i as u64, format!("{} ({})", s.website_name, s.url)))
            .collect(),
    });
    cmds.push(RenderCommand::SetEnabled {
        control: BUTTON_SAVE_PREFERENCES,
        enabled: !prefs.saving,
    });
    let save_status = if prefs.saving {
        "Saving...".to_string()
    } else {
        prefs.saved_message.clone().unwrap_or_default()
    };
    cmds.push(text(LABEL_SAVE_STATUS, save_status));
    cmds.push(text(
        LABEL_DRAFT_STATUS,
        prefs.draft_status.clone().unwrap_or_default(),
    ));
    cmds.push(RenderCommand::SetVisible {
        control: PANEL_ONBOARDING,
        visible: prefs.show_onboarding,
    });
}

fn chart_items(series: &std::collections::BTreeMap<String, u32>) -> Vec<ListItem> {
    series
        .iter()
        .enumerate()
        .map(|(i, (label, count))| ListItem::new(i as u64, format!("{label}: {count}")))
        .collect()
}

fn alert_line(alert: &Alert, today: NaiveDate, now: NaiveDateTime) -> String {
    let title = if alert.job_title.trim().is_empty() {
        "Untitled"
    } else {
        alert.job_title.as_str()
    };
    let deadline = alert
        .last_date_to_apply
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "Not specified".to_string());
    let sent = if alert.is_sent() {
        " | Email sent"
    } else {
        ""
    };
    format!(
        "{} | {} | Exam: {} | Last Date: {} | {} | Alerted {}{}",
        title,
        alert.organization.as_deref().unwrap_or("Not specified"),
        alert.exam_category.as_deref().unwrap_or("Not specified"),
        deadline,
        urgency_badge(alert.last_date_to_apply, today).text,
        time_ago(alert.sent_at, now),
        sent,
    )
}

fn activity_line(event: &ActivityEvent, now: NaiveDateTime) -> String {
    format!(
        "{} {} · {}",
        event.kind.icon(),
        event.text,
        time_ago(event.at, now)
    )
}

fn toast_line(toast: &Toast) -> ToastLine {
    ToastLine {
        text: toast.text.clone(),
        severity: match toast.kind {
            ToastKind::Success => Severity::Information,
            ToastKind::Error => Severity::Error,
        },
        fading: toast.phase == ToastPhase::Fading,
    }
}
