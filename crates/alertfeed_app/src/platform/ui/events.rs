//! Widget events and their translation into core messages.
use alertfeed_core::{Msg, SortKey, UserId};

use super::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    WindowShown,
    WindowClosed,
    /// `item` carries the row id for per-row buttons.
    ButtonClicked {
        control: ControlId,
        item: Option<u64>,
    },
    SelectionChanged {
        control: ControlId,
        value: Option<String>,
    },
    TextChanged {
        control: ControlId,
        text: String,
    },
    AddUrlSubmitted {
        url: String,
        website_name: String,
    },
    AgesSubmitted {
        min_age: Option<u32>,
        max_age: Option<u32>,
    },
    KeyPressed(char),
}

/// Facts the translation needs that live outside the event itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    pub user_id: UserId,
    pub onboarding_seen: bool,
}

pub fn to_msg(event: UiEvent, ctx: &EventContext) -> Option<Msg> {
    match event {
        UiEvent::WindowShown => Some(Msg::Mounted {
            user_id: ctx.user_id,
        }),
        UiEvent::WindowClosed => Some(Msg::Unmounted),
        UiEvent::ButtonClicked { control, item } => button_msg(control, item, ctx),
        UiEvent::SelectionChanged { control, value } => match control {
            SELECT_CATEGORY => Some(Msg::CategoryChanged(value.filter(|v| !v.is_empty()))),
            SELECT_SORT => value
                .as_deref()
                .and_then(SortKey::parse)
                .map(Msg::SortChanged),
            LIST_CATEGORIES => value.map(Msg::CategoryToggled),
            LIST_LOCATIONS => value.map(Msg::LocationRemoved),
            _ => None,
        },
        UiEvent::TextChanged { control, text } => match control {
            INPUT_SEARCH => Some(Msg::SearchChanged(text)),
            INPUT_LOCATION => Some(Msg::LocationAdded(text)),
            _ => None,
        },
        UiEvent::AddUrlSubmitted { url, website_name } => {
            Some(Msg::AddUrlSubmitted { url, website_name })
        }
        UiEvent::AgesSubmitted { min_age, max_age } => Some(Msg::AgesChanged { min_age, max_age }),
        UiEvent::KeyPressed(key) => match key.to_ascii_lowercase() {
            'r' => Some(Msg::RefreshClicked),
            'n' => Some(Msg::NextPageClicked),
            'p' => Some(Msg::PrevPageClicked),
            _ => None,
        },
    }
}

fn button_msg(control: ControlId, item: Option<u64>, ctx: &EventContext) -> Option<Msg> {
    let msg = match control {
        BUTTON_REFRESH => Msg::RefreshClicked,
        BUTTON_PREV_PAGE => Msg::PrevPageClicked,
        BUTTON_NEXT_PAGE => Msg::NextPageClicked,
        BUTTON_ARCHIVE => Msg::ArchiveClicked(item?),
        BUTTON_SCRAPE => Msg::TriggerScrapeClicked(item?),
        BUTTON_REMOVE_SITE => Msg::RemoveUrlClicked(item?),
        BUTTON_OPEN_PREFERENCES => Msg::PreferencesOpened {
            onboarding_seen: ctx.onboarding_seen,
        },
        BUTTON_CLOSE_PREFERENCES => Msg::PreferencesClosed,
        BUTTON_SAVE_PREFERENCES => Msg::SavePreferencesClicked,
        BUTTON_SKIP_OPTIONAL => Msg::SkipOptionalClicked,
        BUTTON_DISMISS_ONBOARDING => Msg::OnboardingDismissed,
        _ => return None,
    };
    Some(msg)
}
