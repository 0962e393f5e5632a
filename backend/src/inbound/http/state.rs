//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain services and remain testable without a database.

use std::sync::Arc;

use crate::domain::ports::{ExpenseRepository, UserRepository};
use crate::domain::{AccountService, ExpenseService, TokenSigner};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential manager (registration, login, account mutation).
    pub accounts: AccountService,
    /// Owner-scoped expense use-cases.
    pub expenses: ExpenseService,
    /// Token verifier used by the bearer extractor.
    pub tokens: TokenSigner,
}

impl HttpState {
    /// Wire services over the given repositories and signer.
    pub fn new(
        users: Arc<dyn UserRepository>,
        expenses: Arc<dyn ExpenseRepository>,
        tokens: TokenSigner,
    ) -> Self {
        Self {
            accounts: AccountService::new(users, tokens.clone()),
            expenses: ExpenseService::new(expenses),
            tokens,
        }
    }
}
