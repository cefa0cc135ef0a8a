//! Cache of monitored websites and the local checks that gate their mutations.
use std::collections::{BTreeSet, HashSet};

use crate::error::ValidationFailure;
use crate::fence::{Fence, FenceToken};
use crate::model::{MonitoredUrl, UrlId, DEFAULT_SCRAPER_TYPE};

/// A validated add request, ready for the remote create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    pub url: String,
    pub website_name: String,
    pub scraper_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitoredSiteStore {
    urls: Vec<MonitoredUrl>,
    loaded: bool,
    error: Option<String>,
    field_error: Option<ValidationFailure>,
    scraping: BTreeSet<UrlId>,
    fence: Fence,
}

impl MonitoredSiteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn urls(&self) -> &[MonitoredUrl] {
        &self.urls
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_error(&self) -> Option<&ValidationFailure> {
        self.field_error.as_ref()
    }

    pub fn is_scraping(&self, id: UrlId) -> bool {
        self.scraping.contains(&id)
    }

    pub fn contains_url(&self, url: &str) -> bool {
        let wanted = normalize_url_for_dedupe(url);
        self.urls
            .iter()
            .any(|site| normalize_url_for_dedupe(&site.url) == wanted)
    }

    /// Checks an add request against local rules. On failure the message is kept as
    /// the inline field error and no remote call may be made.
    pub fn validate_new(&mut self, url: &str, name: &str) -> Result<NewSite, ValidationFailure> {
        let result = self.check_new(url, name);
        self.field_error = result.as_ref().err().cloned();
        result
    }

    fn check_new(&self, url: &str, name: &str) -> Result<NewSite, ValidationFailure> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationFailure::EmptyUrl);
        }
        if self.contains_url(url) {
            return Err(ValidationFailure::DuplicateUrl);
        }
        let name = name.trim();
        let website_name = if name.is_empty() {
            auto_name_from_url(url)
        } else {
            name.to_string()
        };
        Ok(NewSite {
            url: url.to_string(),
            website_name,
            scraper_type: DEFAULT_SCRAPER_TYPE.to_string(),
        })
    }

    /// Full replace from a list response.
    pub fn replace_all(&mut self, token: FenceToken, urls: Vec<MonitoredUrl>) -> bool {
        if !self.fence.admit(token) {
            return false;
        }
        let mut seen = HashSet::new();
        self.urls = urls.into_iter().filter(|site| seen.insert(site.id)).collect();
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

    /// Stores the server's canonical record for a confirmed create. `issued` is the
    /// newest token handed out so far; list loads issued up to it are stale now.
    pub fn insert_confirmed(&mut self, issued: FenceToken, site: MonitoredUrl) {
        self.fence.advance_to(issued);
        self.field_error = None;
        match self.urls.iter_mut().find(|existing| existing.id == site.id) {
            Some(existing) => *existing = site,
            None => self.urls.push(site),
        }
    }

    pub fn remove_confirmed(&mut self, issued: FenceToken, id: UrlId) -> bool {
        self.fence.advance_to(issued);
        let before = self.urls.len();
        self.urls.retain(|site| site.id != id);
        self.urls.len() != before
    }

    /// Marks a scrape as in flight. Returns `false` if one is already running for `id`.
    pub fn begin_scrape(&mut self, id: UrlId) -> bool {
        self.scraping.insert(id)
    }

    pub fn end_scrape(&mut self, id: UrlId) {
        self.scraping.remove(&id);
    }

    /// Drops in-flight markers whose responses will never be routed back.
    pub fn reset_in_flight(&mut self) {
        self.scraping.clear();
    }
}

/// Host of `url` without a leading `www.`, or `Custom Site` when it does not parse.
pub fn auto_name_from_url(url: &str) -> String {
    url::Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .map(|host| host.strip_prefix("www.").unwrap_or(&host).to_string())
        .unwrap_or_else(|| "Custom Site".to_string())
}

/// Canonical form used for duplicate detection: lower-cased scheme and host, no
/// trailing slash on the path, surrounding whitespace ignored.
pub fn normalize_url_for_dedupe(url: &str) -> String {
    let trimmed = url.trim();
    match url::Url::parse(trimmed) {
        Ok(parsed) => {
            let mut normalized = parsed.to_string();
            if parsed.query().is_none() && parsed.fragment().is_none() {
                while normalized.ends_with('/') {
                    normalized.pop();
                }
            }
            normalized
        }
        Err(_) => trimmed.trim_end_matches('/').to_lowercase(),
    }
}
