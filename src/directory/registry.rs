use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::domain::{User, UserId, UserType};

/// Errors raised while constructing or registering users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("user identifier must not be blank")]
    MissingIdentifier,
    #[error("year of study must be at least 1, got {0}")]
    InvalidYearOfStudy(u8),
    #[error("user {0} is already registered")]
    DuplicateIdentifier(UserId),
}

/// In-memory keyed store of users. Entries are never removed.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<UserId, Arc<User>>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `user` unless its identifier is taken. The existence check and the insert
    /// happen under one write lock.
    pub fn try_register(&self, user: User) -> Result<Arc<User>, DirectoryError> {
        let mut guard = self.users.write().expect("registry lock poisoned");
        match guard.entry(user.id().clone()) {
            Entry::Occupied(entry) => {
                warn!(user_id = %entry.key(), "rejected duplicate registration");
                Err(DirectoryError::DuplicateIdentifier(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                let user_type = user.user_type();
                let stored = Arc::new(user);
                entry.insert(Arc::clone(&stored));
                debug!(user_id = %stored.id(), %user_type, "registered user");
                Ok(stored)
            }
        }
    }

    /// Soft-fail form of [`UserRegistry::try_register`].
    pub fn register(&self, user: User) -> bool {
        self.try_register(user).is_ok()
    }

    /// Exact lookup. Blank or unknown identifiers yield `None`.
    pub fn find_by_id(&self, user_id: impl AsRef<str>) -> Option<Arc<User>> {
        let key = user_id.as_ref().trim();
        if key.is_empty() {
            return None;
        }
        let guard = self.users.read().expect("registry lock poisoned");
        guard.get(key).cloned()
    }

    pub fn exists(&self, user_id: impl AsRef<str>) -> bool {
        let key = user_id.as_ref().trim();
        if key.is_empty() {
            return false;
        }
        let guard = self.users.read().expect("registry lock poisoned");
        guard.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.users.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Users holding `user_type`, ordered by identifier.
    pub fn users_of_type(&self, user_type: UserType) -> Vec<Arc<User>> {
        let guard = self.users.read().expect("registry lock poisoned");
        let mut users: Vec<Arc<User>> = guard
            .values()
            .filter(|user| user.user_type() == user_type)
            .cloned()
            .collect();
        users.sort_by(|left, right| left.id().cmp(right.id()));
        users
    }
}
