//! Owner-scoped expense CRUD.
//!
//! Every operation runs on behalf of an authenticated user id; records
//! belonging to other users are indistinguishable from missing ones.

use std::sync::Arc;

use tracing::debug;

use crate::domain::error::Error;
use crate::domain::expense::{Expense, ExpenseDraft, ExpenseValidationError};
use crate::domain::ports::{ExpensePersistenceError, ExpenseRepository};

/// Failure reasons for expense operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseError {
    /// No record with this id owned by the caller.
    #[error("Expense not found!")]
    NotFound,
    /// The draft failed shape validation.
    #[error("{0}")]
    Validation(#[from] ExpenseValidationError),
    /// The persistence collaborator failed; the underlying message is
    /// forwarded verbatim.
    #[error("{0}")]
    Persistence(#[from] ExpensePersistenceError),
}

impl From<ExpenseError> for Error {
    fn from(err: ExpenseError) -> Self {
        let message = err.to_string();
        match err {
            ExpenseError::NotFound => Self::not_found(message),
            ExpenseError::Validation(_) => Self::invalid_request(message),
            ExpenseError::Persistence(ExpensePersistenceError::Connection { .. }) => {
                Self::service_unavailable(message)
            }
            ExpenseError::Persistence(ExpensePersistenceError::Query { .. }) => {
                Self::internal(message)
            }
        }
    }
}

/// Expense use-cases over a repository port.
#[derive(Clone)]
pub struct ExpenseService {
    expenses: Arc<dyn ExpenseRepository>,
}

impl ExpenseService {
    /// Success message for an expense deletion.
    pub const MSG_DELETED: &'static str = "Expense deleted.";

    /// Create a service over the given repository.
    pub fn new(expenses: Arc<dyn ExpenseRepository>) -> Self {
        Self { expenses }
    }

    /// List the caller's expenses, newest spend date first.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.expenses.list_by_user(user_id).await?)
    }

    /// Validate and persist a new expense for the caller.
    pub async fn create(
        &self,
        user_id: i32,
        draft: ExpenseDraft,
    ) -> Result<Expense, ExpenseError> {
        draft.validate()?;
        let id = self.expenses.add(user_id, &draft).await?;
        debug!(user_id, expense_id = id, "expense created");
        Ok(Expense {
            id,
            user_id,
            title: draft.title,
            amount_cents: draft.amount_cents,
            spent_on: draft.spent_on,
        })
    }

    /// Replace an expense the caller owns.
    pub async fn update(
        &self,
        user_id: i32,
        expense_id: i32,
        draft: ExpenseDraft,
    ) -> Result<Expense, ExpenseError> {
        draft.validate()?;
        let existing = self.owned_expense(user_id, expense_id).await?;
        let updated = Expense {
            id: existing.id,
            user_id: existing.user_id,
            title: draft.title,
            amount_cents: draft.amount_cents,
            spent_on: draft.spent_on,
        };
        self.expenses.update(&updated).await?;
        debug!(user_id, expense_id, "expense updated");
        Ok(updated)
    }

    /// Remove an expense the caller owns.
    pub async fn delete(&self, user_id: i32, expense_id: i32) -> Result<bool, ExpenseError> {
        self.owned_expense(user_id, expense_id).await?;
        self.expenses.remove(expense_id).await?;
        debug!(user_id, expense_id, "expense deleted");
        Ok(true)
    }

    /// Fetch an expense, treating other users' records as missing.
    async fn owned_expense(
        &self,
        user_id: i32,
        expense_id: i32,
    ) -> Result<Expense, ExpenseError> {
        match self.expenses.find_by_id(expense_id).await? {
            Some(expense) if expense.user_id == user_id => Ok(expense),
            _ => Err(ExpenseError::NotFound),
        }
    }
}
