//! Port abstraction for user persistence adapters.
//!
//! The Credential Manager only ever touches user records through this trait,
//! so HTTP handler and service tests can substitute the in-memory
//! implementation instead of wiring PostgreSQL.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::password::PasswordDigest;
use crate::domain::user::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
    }
}

/// Persistence port for user identity records.
///
/// Username lookups are case-insensitive: `find_by_username("Alice")` and
/// `find_by_username("alice")` resolve the same record.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by persistence-assigned identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by case-insensitive username match.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;

    /// Case-insensitive existence probe.
    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError>;

    /// Create a record and return its assigned identifier.
    async fn add(
        &self,
        username: &str,
        digest: &PasswordDigest,
    ) -> Result<i32, UserPersistenceError>;

    /// Overwrite an existing record (username, hash, and salt together).
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Remove the record with the given identifier, if present.
    async fn remove(&self, id: i32) -> Result<(), UserPersistenceError>;
}

/// In-memory user store backing service and handler tests.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: Vec<User>,
    next_id: i32,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, for test assertions.
    pub fn len(&self) -> usize {
        self.state.lock().expect("user store lock").users.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("user store lock");
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let needle = username.to_lowercase();
        let state = self.state.lock().expect("user store lock");
        Ok(state
            .users
            .iter()
            .find(|user| user.username().to_lowercase() == needle)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn add(
        &self,
        username: &str,
        digest: &PasswordDigest,
    ) -> Result<i32, UserPersistenceError> {
        let mut state = self.state.lock().expect("user store lock");
        state.next_id += 1;
        let id = state.next_id;
        state.users.push(User::new(id, username, digest.clone()));
        Ok(id)
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.state.lock().expect("user store lock");
        match state.users.iter_mut().find(|stored| stored.id() == user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(UserPersistenceError::query("no such user record")),
        }
    }

    async fn remove(&self, id: i32) -> Result<(), UserPersistenceError> {
        let mut state = self.state.lock().expect("user store lock");
        state.users.retain(|user| user.id() != id);
        Ok(())
    }
}
