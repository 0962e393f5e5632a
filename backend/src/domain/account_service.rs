//! The account service: registration, login, credential mutation, deletion,
//! and token issuance.
//!
//! Every operation is request-scoped and stateless: it reads or writes at
//! most one user record through the [`UserRepository`] port and holds no
//! session state. Failures are explicit [`AccountError`] values; persistence
//! faults are wrapped and reported with the underlying message, never
//! propagated uncaught.

use std::sync::Arc;

use tracing::debug;

use crate::domain::error::Error;
use crate::domain::password::PasswordDigest;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::token::{TokenError, TokenSigner};
use crate::domain::user::{valid_password, valid_username};

/// Failure reasons for account operations.
///
/// The `Display` strings are the exact messages carried to clients in the
/// failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// Another record already holds this username (case-insensitively).
    #[error("Username is taken!")]
    UsernameTaken,
    /// The username contains whitespace.
    #[error("Invalid username!")]
    InvalidUsername,
    /// The password is outside the accepted length bounds.
    #[error("Password must be 4-20 characters!")]
    InvalidPassword,
    /// No record for the given identifier or username.
    #[error("User not found!")]
    UserNotFound,
    /// The supplied password does not match the stored digest.
    #[error("Wrong password!")]
    WrongPassword,
    /// The "new" password hashes to the current stored digest.
    #[error("Please enter a new password!")]
    PasswordUnchanged,
    /// The persistence collaborator failed; the underlying message is
    /// forwarded verbatim.
    #[error("{0}")]
    Persistence(#[from] UserPersistenceError),
    /// Token minting failed after a successful credential check.
    #[error("{0}")]
    Token(#[from] TokenError),
}

impl From<AccountError> for Error {
    fn from(err: AccountError) -> Self {
        let message = err.to_string();
        match err {
            AccountError::UsernameTaken
            | AccountError::InvalidUsername
            | AccountError::InvalidPassword
            | AccountError::PasswordUnchanged => Self::invalid_request(message),
            AccountError::UserNotFound => Self::not_found(message),
            AccountError::WrongPassword => Self::unauthorized(message),
            AccountError::Persistence(UserPersistenceError::Connection { .. }) => {
                Self::service_unavailable(message)
            }
            AccountError::Persistence(UserPersistenceError::Query { .. })
            | AccountError::Token(_) => Self::internal(message),
        }
    }
}

/// Credential manager over a user repository and a token signer.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: TokenSigner,
}

impl AccountService {
    /// Success message for a completed registration.
    pub const MSG_REGISTERED: &'static str = "Welcome to Tally!";
    /// Success message for a completed login.
    pub const MSG_LOGGED_IN: &'static str = "Welcome!";
    /// Success message for a password change.
    pub const MSG_PASSWORD_CHANGED: &'static str = "Password has changed.";
    /// Success message for a username change.
    pub const MSG_USERNAME_CHANGED: &'static str = "Username has changed.";
    /// Success message for an account deletion.
    pub const MSG_DELETED: &'static str = "Account deleted. Sorry to see you go.";

    /// Create a service over the given repository and signer.
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenSigner) -> Self {
        Self { users, tokens }
    }

    /// Register a new account and return its assigned identifier.
    ///
    /// Checks run in order: username taken, username shape, password shape.
    /// Nothing is persisted unless all three pass.
    pub async fn register(&self, username: &str, password: &str) -> Result<i32, AccountError> {
        if self.users.username_exists(username).await? {
            return Err(AccountError::UsernameTaken);
        }
        if !valid_username(username) {
            return Err(AccountError::InvalidUsername);
        }
        if !valid_password(password) {
            return Err(AccountError::InvalidPassword);
        }

        let digest = PasswordDigest::derive(password);
        let id = self.users.add(username, &digest).await?;
        debug!(user_id = id, "account registered");
        Ok(id)
    }

    /// Verify credentials and mint a bearer token.
    ///
    /// The username match is case-insensitive; the hash comparison is
    /// constant time.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AccountError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if !user.digest().verify(password) {
            return Err(AccountError::WrongPassword);
        }

        let token = self.tokens.mint(user.id(), user.username())?;
        debug!(user_id = user.id(), "login succeeded");
        Ok(token)
    }

    /// Replace the user's password with a genuinely different one.
    ///
    /// A fresh salt is derived; hash and salt are overwritten together.
    pub async fn change_password(
        &self,
        user_id: i32,
        new_password: &str,
    ) -> Result<bool, AccountError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        // The unchanged-password check runs before shape validation, so an
        // out-of-bounds "new" password that matches the stored digest still
        // reports "enter a new password".
        if user.digest().verify(new_password) {
            return Err(AccountError::PasswordUnchanged);
        }
        if !valid_password(new_password) {
            return Err(AccountError::InvalidPassword);
        }

        let updated = user.with_digest(PasswordDigest::derive(new_password));
        self.users.update(&updated).await?;
        debug!(user_id, "password changed");
        Ok(true)
    }

    /// Rename the account.
    ///
    /// The taken check does not exclude the caller's own current name, so
    /// renaming to the same name fails with "Username is taken!".
    pub async fn change_username(
        &self,
        user_id: i32,
        new_username: &str,
    ) -> Result<bool, AccountError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if self.users.username_exists(new_username).await? {
            return Err(AccountError::UsernameTaken);
        }
        if !valid_username(new_username) {
            return Err(AccountError::InvalidUsername);
        }

        let updated = user.with_username(new_username);
        self.users.update(&updated).await?;
        debug!(user_id, "username changed");
        Ok(true)
    }

    /// Remove the identity record.
    ///
    /// Cascading cleanup of associated data is the database's concern.
    pub async fn delete_user(&self, user_id: i32) -> Result<bool, AccountError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountError::UserNotFound);
        }
        self.users.remove(user_id).await?;
        debug!(user_id, "account deleted");
        Ok(true)
    }

    /// Case-insensitive existence probe.
    pub async fn user_exists(&self, username: &str) -> Result<bool, AccountError> {
        Ok(self.users.username_exists(username).await?)
    }
}
