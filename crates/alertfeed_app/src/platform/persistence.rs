//! Who the dashboard runs as, and remembering it between sessions.
use alertfeed_core::{UserId, UserProfile};
use alertfeed_engine::{Identity, LocalStore};
use feed_logging::{feed_info, feed_warn};

/// Picks the flag value when given, otherwise the identity stored by a previous session.
pub fn resolve_user_id(explicit: Option<UserId>, store: &LocalStore) -> Option<UserId> {
    let stored = store.identity();
    match explicit {
        Some(id) => {
            if stored.as_ref().map(|identity| identity.id) != Some(id) {
                let identity = Identity {
                    id,
                    name: String::new(),
                    email: String::new(),
                };
                if let Err(err) = store.save_identity(&identity) {
                    feed_warn!("Failed to remember user {}: {}", id, err);
                }
            }
            Some(id)
        }
        None => stored.map(|identity| {
            feed_info!("Using stored identity for user {}", identity.id);
            identity.id
        }),
    }
}

/// Writes the profile from each summary back to the store when it changes.
pub struct IdentityKeeper {
    store: LocalStore,
    last: Option<Identity>,
}

impl IdentityKeeper {
    pub fn new(store: LocalStore) -> Self {
        let last = store.identity();
        Self { store, last }
    }

    pub fn observe(&mut self, profile: Option<&UserProfile>) {
        let Some(profile) = profile else {
            return;
        };
        let identity = Identity::from(profile);
        if self.last.as_ref() == Some(&identity) {
            return;
        }
        match self.store.save_identity(&identity) {
            Ok(()) => self.last = Some(identity),
            Err(err) => feed_warn!("Failed to persist identity: {}", err),
        }
    }
}
