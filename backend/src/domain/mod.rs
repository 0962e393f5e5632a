//! Domain core: accounts, expenses, tokens, and the ports they run over.
//!
//! Everything here is transport agnostic. Inbound adapters translate domain
//! errors into HTTP responses; outbound adapters implement the ports.

pub mod account_service;
pub mod error;
pub mod expense;
pub mod expense_service;
pub mod password;
pub mod ports;
pub mod response;
pub mod token;
pub mod user;

pub use self::account_service::{AccountError, AccountService};
pub use self::error::{Error, ErrorCode};
pub use self::expense::{Expense, ExpenseDraft, ExpenseValidationError};
pub use self::expense_service::{ExpenseError, ExpenseService};
pub use self::password::PasswordDigest;
pub use self::response::ServiceResponse;
pub use self::token::{TokenClaims, TokenConfigError, TokenError, TokenSigner};
pub use self::user::User;
