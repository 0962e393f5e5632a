//! Domain ports for the hexagonal boundary.
//!
//! Outbound adapters (Diesel) implement these traits; the in-memory
//! implementations back tests and local development without a database.

mod macros;
pub(crate) use macros::define_port_error;

mod expense_repository;
mod user_repository;

pub use expense_repository::{
    ExpensePersistenceError, ExpenseRepository, InMemoryExpenseRepository,
};
pub use user_repository::{InMemoryUserRepository, UserPersistenceError, UserRepository};
