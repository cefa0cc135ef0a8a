//! Preference form state, its autosaved draft, and the precedence between them.
use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ValidationFailure;
use crate::model::Preferences;
use crate::sites::MonitoredSiteStore;

/// Exam categories offered by the form: key, label, description.
pub const EXAM_CATEGORIES: &[(&str, &str, &str)] = &[
    ("UPSC", "UPSC", "Civil Services"),
    ("SSC", "SSC", "Staff Selection Commission"),
    ("Banking", "Banking", "IBPS, SBI, RBI"),
    ("Railways", "Railways", "RRB NTPC, Group D, etc."),
    ("State PSCs", "State PSCs", "All states"),
    ("University", "University Exams", "Semester exams, admissions, results"),
    ("Defence", "Defence", "NDA, CDS, AFCAT"),
    ("Teaching", "Teaching", "CTET, State TETs, UGC NET"),
    ("Engineering", "Engineering", "GATE, ESE"),
    ("Medical", "Medical", "NEET PG, AIIMS"),
    ("Law", "Law", "CLAT, Judicial Services"),
    ("Police", "Police", "UPSC, State Police Recruitment"),
    ("Others", "Others", "Custom"),
];

pub const LOCATION_OPTIONS: &[&str] = &[
    "All India",
    "Delhi",
    "Maharashtra",
    "Karnataka",
    "Tamil Nadu",
    "Uttar Pradesh",
    "Madhya Pradesh",
    "Rajasthan",
    "Bihar",
    "West Bengal",
    "Gujarat",
    "Punjab",
    "Haryana",
    "Kerala",
    "Telangana",
    "Andhra Pradesh",
    "Odisha",
    "Assam",
    "Uttarakhand",
    "Jharkhand",
];

/// Official sites suggested per category: category, website name, url.
const SUGGESTED_URLS: &[(&str, &str, &str)] = &[
    ("UPSC", "UPSC Official", "https://upsc.gov.in/examinations/active"),
    ("SSC", "SSC Official", "https://ssc.gov.in/"),
    ("Banking", "IBPS", "https://www.ibps.in/"),
    ("Banking", "SBI Careers", "https://sbi.co.in/web/careers"),
    ("Railways", "Railway Recruitment", "https://www.rrbcdg.gov.in/"),
    ("State PSCs", "MPPSC", "https://www.mppsc.mp.gov.in/"),
    ("State PSCs", "UPPSC", "https://uppsc.up.nic.in/"),
    ("University", "MAKAUT Exam", "https://www.makautexam.net/"),
    ("University", "Delhi University Notices", "https://du.ac.in/index.php?page=notices"),
    ("Defence", "Indian Army", "https://joinindianarmy.nic.in/"),
    ("Teaching", "UGC NET", "https://ugcnet.nta.ac.in/"),
    ("Engineering", "GATE", "https://gate2026.iitr.ac.in/"),
    ("Medical", "NTA NEET", "https://neet.nta.nic.in/"),
    ("Law", "CLAT", "https://consortiumofnlus.ac.in/"),
    ("Police", "Police Recruitment", "https://www.ncs.gov.in/"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub website_name: String,
    pub url: String,
}

/// Locally autosaved copy of in-progress form edits.
///
/// Every field is optional: an absent field leaves the form untouched when the draft
/// is applied, a present `null` age clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DraftSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_categories: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "draft_age")]
    pub min_age: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "draft_age")]
    pub max_age: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_locations: Option<BTreeSet<String>>,
}

/// Ages were historically stored either as numbers or as the raw input text.
mod draft_age {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeField {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<Option<u32>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(Some(age)) => s.serialize_u32(*age),
            _ => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<u32>>, D::Error> {
        let field = Option::<AgeField>::deserialize(d)?;
        let age = match field {
            None => None,
            Some(AgeField::Number(age)) => Some(age),
            Some(AgeField::Text(text)) if text.trim().is_empty() => None,
            Some(AgeField::Text(text)) => Some(text.trim().parse::<u32>().map_err(D::Error::custom)?),
        };
        Ok(Some(age))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStatus {
    Saved,
    Restored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    pub category: Option<ValidationFailure>,
    pub age: Option<ValidationFailure>,
    pub url: Option<ValidationFailure>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.age.is_none() && self.url.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferencesForm {
    open: bool,
    remote_resolved: bool,
    categories: BTreeSet<String>,
    min_age: Option<u32>,
    max_age: Option<u32>,
    locations: BTreeSet<String>,
    errors: FormErrors,
    saving: bool,
    saved: bool,
    draft_status: Option<DraftStatus>,
    show_onboarding: bool,
}

impl PreferencesForm {
    pub(crate) fn open(&mut self, onboarding_seen: bool) {
        *self = Self {
            open: true,
            show_onboarding: !onboarding_seen,
            ..Self::default()
        };
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True once the remote load finished, successfully or not. Autosave waits for it.
    pub fn is_remote_resolved(&self) -> bool {
        self.remote_resolved
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn min_age(&self) -> Option<u32> {
        self.min_age
    }

    pub fn max_age(&self) -> Option<u32> {
        self.max_age
    }

    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn draft_status(&self) -> Option<DraftStatus> {
        self.draft_status
    }

    pub fn show_onboarding(&self) -> bool {
        self.show_onboarding
    }

    pub(crate) fn dismiss_onboarding(&mut self) -> bool {
        std::mem::replace(&mut self.show_onboarding, false)
    }

    pub(crate) fn apply_remote(&mut self, remote: Preferences) {
        self.categories = remote.exam_categories;
        self.min_age = remote.min_age;
        self.max_age = remote.max_age;
        self.locations = remote.preferred_locations;
        self.remote_resolved = true;
    }

    pub(crate) fn mark_remote_failed(&mut self) {
        self.remote_resolved = true;
    }

    /// Overwrites only the fields the draft defines.
    pub(crate) fn apply_draft(&mut self, draft: &DraftSnapshot) {
        if let Some(categories) = &draft.exam_categories {
            self.categories = categories.clone();
        }
        if let Some(min_age) = draft.min_age {
            self.min_age = min_age;
        }
        if let Some(max_age) = draft.max_age {
            self.max_age = max_age;
        }
        if let Some(locations) = &draft.preferred_locations {
            self.locations = locations.clone();
        }
        self.draft_status = Some(DraftStatus::Restored);
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            exam_categories: Some(self.categories.clone()),
            min_age: Some(self.min_age),
            max_age: Some(self.max_age),
            preferred_locations: Some(self.locations.clone()),
        }
    }

    pub(crate) fn mark_draft_saved(&mut self) {
        self.draft_status = Some(DraftStatus::Saved);
    }

    /// Any edit after a successful save makes the form unsaved again.
    fn touch(&mut self) {
        self.saved = false;
    }

    pub(crate) fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
        self.touch();
    }

    pub(crate) fn set_ages(&mut self, min_age: Option<u32>, max_age: Option<u32>) {
        self.touch();
        self.min_age = min_age;
        self.max_age = max_age;
        self.errors.age = age_check(min_age, max_age).err();
    }

    pub(crate) fn add_location(&mut self, location: &str) -> bool {
        let location = location.trim();
        let added = !location.is_empty() && self.locations.insert(location.to_string());
        if added {
            self.touch();
        }
        added
    }

    pub(crate) fn remove_location(&mut self, location: &str) -> bool {
        let removed = self.locations.remove(location);
        if removed {
            self.touch();
        }
        removed
    }

    pub(crate) fn skip_optional(&mut self) {
        self.touch();
        self.min_age = None;
        self.max_age = None;
        self.locations.clear();
        self.errors.age = None;
    }

    /// Runs every local rule, records inline errors, and returns the payload to save.
    pub(crate) fn validate(&mut self, monitored_urls: usize) -> Result<Preferences, FormErrors> {
        let errors = FormErrors {
            category: self
                .categories
                .is_empty()
                .then_some(ValidationFailure::NoCategories),
            age: age_check(self.min_age, self.max_age).err(),
            url: (monitored_urls == 0).then_some(ValidationFailure::NoMonitoredUrls),
        };
        self.errors = errors.clone();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Preferences {
            exam_categories: self.categories.clone(),
            min_age: self.min_age,
            max_age: self.max_age,
            preferred_locations: self.locations.clone(),
        })
    }

    pub(crate) fn begin_save(&mut self) {
        self.saving = true;
        self.saved = false;
    }

    pub(crate) fn finish_save(&mut self, ok: bool) {
        self.saving = false;
        self.saved = ok;
    }

    /// Suggested sites for the selected categories, minus ones already monitored.
    pub fn suggestions(&self, sites: &MonitoredSiteStore) -> Vec<Suggestion> {
        let mut seen = HashSet::new();
        SUGGESTED_URLS
            .iter()
            .filter(|(category, _, _)| self.categories.contains(*category))
            .filter(|(_, _, url)| seen.insert(*url) && !sites.contains_url(url))
            .map(|(_, name, url)| Suggestion {
                website_name: (*name).to_string(),
                url: (*url).to_string(),
            })
            .collect()
    }
}

fn age_check(min_age: Option<u32>, max_age: Option<u32>) -> Result<(), ValidationFailure> {
    match (min_age, max_age) {
        (Some(min), Some(max)) if min > max => Err(ValidationFailure::AgeRange { min, max }),
        _ => Ok(()),
    }
}
