//! Port abstraction for expense persistence adapters.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::expense::{Expense, ExpenseDraft};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by expense repository adapters.
    pub enum ExpensePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "expense store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "expense store query failed: {message}",
    }
}

/// Persistence port for expense records.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Fetch an expense by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Expense>, ExpensePersistenceError>;

    /// List a user's expenses, newest spend date first.
    async fn list_by_user(&self, user_id: i32)
    -> Result<Vec<Expense>, ExpensePersistenceError>;

    /// Create a record for `user_id` and return its assigned identifier.
    async fn add(
        &self,
        user_id: i32,
        draft: &ExpenseDraft,
    ) -> Result<i32, ExpensePersistenceError>;

    /// Overwrite an existing record.
    async fn update(&self, expense: &Expense) -> Result<(), ExpensePersistenceError>;

    /// Remove the record with the given identifier, if present.
    async fn remove(&self, id: i32) -> Result<(), ExpensePersistenceError>;
}

/// In-memory expense store backing service and handler tests.
#[derive(Debug, Default)]
pub struct InMemoryExpenseRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    expenses: Vec<Expense>,
    next_id: i32,
}

impl InMemoryExpenseRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, for test assertions.
    pub fn len(&self) -> usize {
        self.state.lock().expect("expense store lock").expenses.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Expense>, ExpensePersistenceError> {
        let state = self.state.lock().expect("expense store lock");
        Ok(state.expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<Expense>, ExpensePersistenceError> {
        let state = self.state.lock().expect("expense store lock");
        let mut rows: Vec<Expense> = state
            .expenses
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        // Newest spend date first; same-date rows newest record first,
        // matching the SQL adapter's ordering.
        rows.sort_by(|a, b| b.spent_on.cmp(&a.spent_on).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn add(
        &self,
        user_id: i32,
        draft: &ExpenseDraft,
    ) -> Result<i32, ExpensePersistenceError> {
        let mut state = self.state.lock().expect("expense store lock");
        state.next_id += 1;
        let id = state.next_id;
        state.expenses.push(Expense {
            id,
            user_id,
            title: draft.title.clone(),
            amount_cents: draft.amount_cents,
            spent_on: draft.spent_on,
        });
        Ok(id)
    }

    async fn update(&self, expense: &Expense) -> Result<(), ExpensePersistenceError> {
        let mut state = self.state.lock().expect("expense store lock");
        match state.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(stored) => {
                *stored = expense.clone();
                Ok(())
            }
            None => Err(ExpensePersistenceError::query("no such expense record")),
        }
    }

    async fn remove(&self, id: i32) -> Result<(), ExpensePersistenceError> {
        let mut state = self.state.lock().expect("expense store lock");
        state.expenses.retain(|e| e.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::NaiveDate;

    fn draft(title: &str, day: u32) -> ExpenseDraft {
        ExpenseDraft {
            title: title.to_owned(),
            amount_cents: 100,
            spent_on: NaiveDate::from_ymd_opt(2025, 6, day).expect("valid test date"),
        }
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_user_and_date_ordered() {
        let repo = InMemoryExpenseRepository::new();
        repo.add(1, &draft("coffee", 1)).await.expect("add");
        repo.add(1, &draft("rent", 15)).await.expect("add");
        repo.add(2, &draft("other user", 10)).await.expect("add");

        let rows = repo.list_by_user(1).await.expect("list");
        let titles: Vec<&str> = rows.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["rent", "coffee"]);
    }

    #[tokio::test]
    async fn same_date_rows_list_newest_record_first() {
        let repo = InMemoryExpenseRepository::new();
        repo.add(1, &draft("first", 10)).await.expect("add");
        repo.add(1, &draft("second", 10)).await.expect("add");
        repo.add(1, &draft("third", 10)).await.expect("add");

        let rows = repo.list_by_user(1).await.expect("list");
        let titles: Vec<&str> = rows.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn add_assigns_sequential_identifiers() {
        let repo = InMemoryExpenseRepository::new();
        let first = repo.add(1, &draft("a", 1)).await.expect("add");
        let second = repo.add(1, &draft("b", 2)).await.expect("add");
        assert_eq!(second, first + 1);
    }
}
