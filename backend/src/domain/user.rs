//! User identity record and credential shape rules.

use crate::domain::password::PasswordDigest;

/// Minimum accepted password length, inclusive.
pub const PASSWORD_MIN: usize = 4;

/// Maximum accepted password length, inclusive.
pub const PASSWORD_MAX: usize = 20;

/// A username is acceptable when it contains no whitespace.
///
/// Usernames are compared case-insensitively everywhere; shape validation
/// only rejects whitespace.
pub fn valid_username(username: &str) -> bool {
    !username.contains(char::is_whitespace)
}

/// A password is acceptable when its length is within
/// [`PASSWORD_MIN`]..=[`PASSWORD_MAX`] characters.
pub fn valid_password(password: &str) -> bool {
    (PASSWORD_MIN..=PASSWORD_MAX).contains(&password.chars().count())
}

/// Stored user identity record.
///
/// ## Invariants
/// - `id` is assigned by the persistence layer on creation.
/// - `username` is unique case-insensitively across all records.
/// - The digest's hash and salt are always written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: i32,
    username: String,
    digest: PasswordDigest,
}

impl User {
    /// Assemble a user record from its stored components.
    pub fn new(id: i32, username: impl Into<String>, digest: PasswordDigest) -> Self {
        Self {
            id,
            username: username.into(),
            digest,
        }
    }

    /// Persistence-assigned identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Username as stored (original casing preserved).
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password digest and salt.
    pub fn digest(&self) -> &PasswordDigest {
        &self.digest
    }

    /// Copy of this record with a different username.
    pub fn with_username(&self, username: impl Into<String>) -> Self {
        Self {
            id: self.id,
            username: username.into(),
            digest: self.digest.clone(),
        }
    }

    /// Copy of this record with a different digest (hash and salt together).
    pub fn with_digest(&self, digest: PasswordDigest) -> Self {
        Self {
            id: self.id,
            username: self.username.clone(),
            digest,
        }
    }
}
