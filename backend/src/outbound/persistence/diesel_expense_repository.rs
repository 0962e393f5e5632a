//! PostgreSQL-backed `ExpenseRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ExpensePersistenceError, ExpenseRepository};
use crate::domain::{Expense, ExpenseDraft};

use super::models::{ExpenseRow, ExpenseUpdate, NewExpenseRow};
use super::pool::{DbPool, PoolError};
use super::schema::expenses;

/// Diesel-backed implementation of the `ExpenseRepository` port.
#[derive(Clone)]
pub struct DieselExpenseRepository {
    pool: DbPool,
}

impl DieselExpenseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain expense persistence errors.
fn map_pool_error(error: PoolError) -> ExpensePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ExpensePersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain expense persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> ExpensePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ExpensePersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ExpensePersistenceError::connection("database connection error")
        }
        _ => ExpensePersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain [`Expense`].
fn row_to_expense(row: ExpenseRow) -> Expense {
    Expense {
        id: row.id,
        user_id: row.user_id,
        title: row.title,
        amount_cents: row.amount_cents,
        spent_on: row.spent_on,
    }
}

#[async_trait]
impl ExpenseRepository for DieselExpenseRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Expense>, ExpensePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ExpenseRow> = expenses::table
            .find(id)
            .select(ExpenseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_expense))
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Expense>, ExpensePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ExpenseRow> = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .order((expenses::spent_on.desc(), expenses::id.desc()))
            .select(ExpenseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_expense).collect())
    }

    async fn add(
        &self,
        user_id: i32,
        draft: &ExpenseDraft,
    ) -> Result<i32, ExpensePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewExpenseRow {
            user_id,
            title: &draft.title,
            amount_cents: draft.amount_cents,
            spent_on: draft.spent_on,
        };

        diesel::insert_into(expenses::table)
            .values(&new_row)
            .returning(expenses::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update(&self, expense: &Expense) -> Result<(), ExpensePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = ExpenseUpdate {
            title: &expense.title,
            amount_cents: expense.amount_cents,
            spent_on: expense.spent_on,
        };

        let updated_rows = diesel::update(expenses::table.find(expense.id))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(ExpensePersistenceError::query("no such expense record"));
        }
        Ok(())
    }

    async fn remove(&self, id: i32) -> Result<(), ExpensePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(expenses::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::build("bad url"));

        assert!(matches!(
            repo_err,
            ExpensePersistenceError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("bad url"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, ExpensePersistenceError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_to_expense_preserves_fields() {
        let row = ExpenseRow {
            id: 4,
            user_id: 2,
            title: "Groceries".into(),
            amount_cents: 4_250,
            spent_on: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid test date"),
            created_at: Utc::now(),
        };

        let expense = row_to_expense(row);

        assert_eq!(expense.id, 4);
        assert_eq!(expense.user_id, 2);
        assert_eq!(expense.title, "Groceries");
        assert_eq!(expense.amount_cents, 4_250);
    }
}
