//! The logged-in user as an explicit value

use crate::api::models::User;
use crate::types::RecordId;
use chrono::{DateTime, Utc};

/// Proof of a successful login
///
/// Obtained from [`AuthApi::login`](super::AuthApi::login) or
/// [`AuthApi::restore`](super::AuthApi::restore) and handed to every
/// operation that acts on behalf of the user. The session cookie itself
/// lives in the client's cookie jar; this value carries who it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: User,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            started_at: Utc::now(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> RecordId {
        self.user.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Swap in a fresher copy of the user, e.g. after a profile edit
    pub fn replace_user(&mut self, user: User) {
        self.user = user;
    }
}
