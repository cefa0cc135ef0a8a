//! Durable per-user key-value state: preference drafts, identity, onboarding flag.
//!
//! One JSON file per key under the state directory. Last write wins; every component
//! owns its own keys.
use std::fs;
use std::io;
use std::path::PathBuf;

use alertfeed_core::{DraftSnapshot, UserId, UserProfile};
use feed_logging::{feed_info, feed_warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::persist::{AtomicFileWriter, PersistError};

const ONBOARDING_KEY: &str = "preferences_onboarding_seen";
const IDENTITY_KEY: &str = "identity";

fn draft_key(user_id: UserId) -> String {
    format!("preferences_draft_{user_id}")
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    writer: AtomicFileWriter,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.into()),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.writer.dir().join(format!("{key}.json"))
    }

    /// Raw stored text, `None` when the key was never written.
    pub fn read_raw(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn write_raw(&self, key: &str, text: &str) -> Result<(), PersistError> {
        self.writer.write(&format!("{key}.json"), text)?;
        Ok(())
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PersistError> {
        let text = serde_json::to_string_pretty(value)?;
        self.write_raw(key, &text)
    }

    /// Decoded value; unreadable or malformed entries read as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.read_raw(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                feed_warn!("could not read {}: {}", key, err);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                feed_warn!("ignoring malformed entry {}: {}", key, err);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn onboarding_seen(&self) -> bool {
        self.get::<bool>(ONBOARDING_KEY).unwrap_or(false)
    }

    pub fn mark_onboarding_seen(&self) -> Result<(), PersistError> {
        self.put(ONBOARDING_KEY, &true)
    }

    pub fn identity(&self) -> Option<Identity> {
        self.get(IDENTITY_KEY)
    }

    pub fn save_identity(&self, identity: &Identity) -> Result<(), PersistError> {
        self.put(IDENTITY_KEY, identity)
    }
}

/// Who is signed in, as last seen by this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl From<&UserProfile> for Identity {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            email: profile.email.clone(),
        }
    }
}

/// Best-effort storage of unsaved preference edits, keyed by user.
#[derive(Debug, Clone)]
pub struct DraftPersistence {
    store: LocalStore,
}

impl DraftPersistence {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn snapshot(&self, user_id: UserId, draft: &DraftSnapshot) -> Result<(), PersistError> {
        self.store.put(&draft_key(user_id), draft)?;
        feed_info!("draft saved for user {}", user_id);
        Ok(())
    }

    /// The stored draft, or `None` when absent or malformed.
    pub fn restore(&self, user_id: UserId) -> Option<DraftSnapshot> {
        let draft = self.store.get::<DraftSnapshot>(&draft_key(user_id));
        if draft.is_some() {
            feed_info!("draft restored for user {}", user_id);
        }
        draft
    }

    pub fn clear(&self, user_id: UserId) -> Result<(), PersistError> {
        self.store.remove(&draft_key(user_id))?;
        feed_info!("draft cleared for user {}", user_id);
        Ok(())
    }
}
