//! Line-oriented front end: commands in, rendered dashboard out.
use std::collections::BTreeMap;

use super::app::Presenter;
use super::ui::constants::*;
use super::ui::events::UiEvent;
use super::ui::render::{ListItem, RenderCommand, Severity};

pub const HELP: &str = "\
Commands:
  r | n | p                 refresh, next page, previous page
  archive <alert-id>        archive an alert
  add <url> [name]          monitor a website
  remove <url-id>           stop monitoring a website
  scrape <url-id>           scrape a website now
  cat [category]            filter by exam category (none for all)
  sort recent|deadline|relevance
  search [text]             filter the current page
  prefs | close             open or close preferences
  toggle <category>         select or deselect an exam category
  ages <min|-> <max|->      set the age range
  loc+ <place> | loc- <place>
  skip | save | dismiss     preferences actions
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Event(UiEvent),
    Help,
    Quit,
}

fn click(control: ControlId, item: Option<u64>) -> Option<ConsoleCommand> {
    Some(ConsoleCommand::Event(UiEvent::ButtonClicked { control, item }))
}

fn select(control: ControlId, value: &str) -> Option<ConsoleCommand> {
    let value = (!value.is_empty()).then(|| value.to_string());
    Some(ConsoleCommand::Event(UiEvent::SelectionChanged { control, value }))
}

fn age(raw: &str) -> Option<Option<u32>> {
    match raw {
        "-" => Some(None),
        other => other.parse().ok().map(Some),
    }
}

pub fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));
    match word {
        "r" | "n" | "p" => {
            let key = word.chars().next()?;
            Some(ConsoleCommand::Event(UiEvent::KeyPressed(key)))
        }
        "archive" => click(BUTTON_ARCHIVE, Some(rest.parse().ok()?)),
        "remove" => click(BUTTON_REMOVE_SITE, Some(rest.parse().ok()?)),
        "scrape" => click(BUTTON_SCRAPE, Some(rest.parse().ok()?)),
        "add" => {
            let (url, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Some(ConsoleCommand::Event(UiEvent::AddUrlSubmitted {
                url: url.to_string(),
                website_name: name.trim().to_string(),
            }))
        }
        "cat" => select(SELECT_CATEGORY, rest),
        "sort" => select(SELECT_SORT, rest),
        "search" => Some(ConsoleCommand::Event(UiEvent::TextChanged {
            control: INPUT_SEARCH,
            text: rest.to_string(),
        })),
        "prefs" => click(BUTTON_OPEN_PREFERENCES, None),
        "close" => click(BUTTON_CLOSE_PREFERENCES, None),
        "toggle" if !rest.is_empty() => select(LIST_CATEGORIES, rest),
        "ages" => {
            let mut parts = rest.split_whitespace();
            let min_age = age(parts.next()?)?;
            let max_age = age(parts.next()?)?;
            Some(ConsoleCommand::Event(UiEvent::AgesSubmitted { min_age, max_age }))
        }
        "loc+" if !rest.is_empty() => Some(ConsoleCommand::Event(UiEvent::TextChanged {
            control: INPUT_LOCATION,
            text: rest.to_string(),
        })),
        "loc-" if !rest.is_empty() => select(LIST_LOCATIONS, rest),
        "skip" => click(BUTTON_SKIP_OPTIONAL, None),
        "save" => click(BUTTON_SAVE_PREFERENCES, None),
        "dismiss" => click(BUTTON_DISMISS_ONBOARDING, None),
        "help" | "?" => Some(ConsoleCommand::Help),
        "quit" | "q" | "exit" => Some(ConsoleCommand::Quit),
        _ => None,
    }
}

/// Keeps the latest value of every control and prints the dashboard after each render.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    texts: BTreeMap<ControlId, (String, Severity)>,
    lists: BTreeMap<ControlId, Vec<ListItem>>,
    visible: BTreeMap<ControlId, bool>,
    toasts: Vec<String>,
}

impl ConsolePresenter {
    pub fn apply(&mut self, commands: Vec<RenderCommand>) {
        for command in commands {
            match command {
                RenderCommand::SetText {
                    control,
                    text,
                    severity,
                } => {
                    self.texts.insert(control, (text, severity));
                }
                RenderCommand::SetItems { control, items } => {
                    self.lists.insert(control, items);
                }
                RenderCommand::SetVisible { control, visible } => {
                    self.visible.insert(control, visible);
                }
                RenderCommand::SetEnabled { .. } => {}
                RenderCommand::ShowToasts(lines) => {
                    self.toasts = lines
                        .into_iter()
                        .filter(|line| !line.fading)
                        .map(|line| match line.severity {
                            Severity::Error => format!("[!] {}", line.text),
                            _ => format!("[ok] {}", line.text),
                        })
                        .collect();
                }
            }
        }
    }

    pub fn text(&self, control: ControlId) -> &str {
        self.texts
            .get(&control)
            .map(|(text, _)| text.as_str())
            .unwrap_or("")
    }

    pub fn items(&self, control: ControlId) -> &[ListItem] {
        self.lists.get(&control).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_visible(&self, control: ControlId) -> bool {
        self.visible.get(&control).copied().unwrap_or(false)
    }

    pub fn toasts(&self) -> &[String] {
        &self.toasts
    }

    fn status_line(&self, control: ControlId) -> Option<String> {
        let (text, severity) = self.texts.get(&control)?;
        if text.is_empty() {
            return None;
        }
        Some(match severity {
            Severity::Error | Severity::Warning => format!("  ! {text}"),
            Severity::Information => format!("  {text}"),
        })
    }

    fn screen(&self) -> String {
        let mut out = Vec::new();
        out.push(format!(
            "== {} [{}] {}",
            self.text(LABEL_USER_NAME),
            self.text(LABEL_USER_AVATAR),
            self.text(LABEL_USER_EMAIL)
        ));
        out.push(format!(
            "Alerts: {} ({}) | Websites: {} | Next deadline: {} ({}) | Match: {}",
            self.text(LABEL_TOTAL_ALERTS),
            self.text(LABEL_WEEK_ALERTS),
            self.text(LABEL_WEBSITES),
            self.text(LABEL_NEXT_DEADLINE),
            self.text(LABEL_NEXT_DEADLINE_JOB),
            self.text(LABEL_MATCH_RATE)
        ));
        out.extend(self.status_line(LABEL_SUMMARY_ERROR));
        out.push(format!("-- Alerts (sort: {})", self.text(SELECT_SORT)));
        for item in self.items(LIST_ALERTS) {
            out.push(format!("  #{} {}", item.id, item.text));
        }
        out.extend(self.status_line(LABEL_ALERTS_STATUS));
        out.push(format!("  {}", self.text(LABEL_PAGINATION)));
        out.push("-- Websites".to_string());
        for item in self.items(LIST_SITES) {
            out.push(format!("  #{} {}", item.id, item.text));
        }
        out.extend(self.status_line(LABEL_SITES_STATUS));
        out.extend(self.status_line(LABEL_URL_ERROR));
        out.push("-- Activity".to_string());
        for item in self.items(LIST_ACTIVITY) {
            out.push(format!("  {}", item.text));
        }
        out.extend(self.status_line(LABEL_ACTIVITY_STATUS));
        if self.is_visible(PANEL_PREFERENCES) {
            out.push("-- Preferences".to_string());
            if self.is_visible(PANEL_ONBOARDING) {
                out.push("  Welcome! Pick exam categories and add websites to monitor.".to_string());
            }
            let categories: Vec<&str> = self
                .items(LIST_CATEGORIES)
                .iter()
                .map(|item| item.text.as_str())
                .collect();
            out.push(format!("  Categories: {}", categories.join(", ")));
            out.push(format!("  {}", self.text(LABEL_AGES)));
            let locations: Vec<&str> = self
                .items(LIST_LOCATIONS)
                .iter()
                .map(|item| item.text.as_str())
                .collect();
            out.push(format!("  Locations: {}", locations.join(", ")));
            out.extend(self.status_line(LABEL_CATEGORY_ERROR));
            out.extend(self.status_line(LABEL_AGE_ERROR));
            for item in self.items(LIST_SUGGESTIONS) {
                out.push(format!("  suggestion: {}", item.text));
            }
            out.extend(self.status_line(LABEL_SAVE_STATUS));
            out.extend(self.status_line(LABEL_DRAFT_STATUS));
        }
        out.extend(self.toasts.iter().cloned());
        out.join("\n")
    }
}

impl Presenter for ConsolePresenter {
    fn present(&mut self, commands: Vec<RenderCommand>) {
        self.apply(commands);
        println!("{}", self.screen());
    }
}
