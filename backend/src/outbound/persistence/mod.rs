//! PostgreSQL persistence adapters built on Diesel.

pub mod diesel_expense_repository;
pub mod diesel_user_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_expense_repository::DieselExpenseRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
