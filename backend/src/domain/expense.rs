//! Expense records and draft validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Maximum accepted title length in characters.
pub const TITLE_MAX: usize = 100;

/// Validation errors for expense drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    /// Title was empty once trimmed.
    EmptyTitle,
    /// Title exceeded [`TITLE_MAX`] characters.
    TitleTooLong,
    /// Amount was zero or negative.
    NonPositiveAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title must not be empty!"),
            Self::TitleTooLong => {
                write!(f, "Title must be at most {TITLE_MAX} characters!")
            }
            Self::NonPositiveAmount => write!(f, "Amount must be positive!"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A stored expense owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Persistence-assigned identifier.
    pub id: i32,
    /// Owning user's identifier.
    pub user_id: i32,
    /// What the money was spent on.
    pub title: String,
    /// Amount in minor currency units (always positive).
    pub amount_cents: i64,
    /// Calendar date of the spend.
    pub spent_on: NaiveDate,
}

/// Caller-supplied expense fields, validated before any persistence call.
///
/// ## Invariants (after [`ExpenseDraft::validate`])
/// - `title` is non-empty once trimmed and at most [`TITLE_MAX`] characters.
/// - `amount_cents` is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    /// What the money was spent on.
    pub title: String,
    /// Amount in minor currency units.
    pub amount_cents: i64,
    /// Calendar date of the spend.
    pub spent_on: NaiveDate,
}

impl ExpenseDraft {
    /// Check the draft against the shape rules above.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }
        if self.title.chars().count() > TITLE_MAX {
            return Err(ExpenseValidationError::TitleTooLong);
        }
        if self.amount_cents <= 0 {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn draft(title: &str, amount_cents: i64) -> ExpenseDraft {
        ExpenseDraft {
            title: title.to_owned(),
            amount_cents,
            spent_on: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid test date"),
        }
    }

    #[rstest]
    #[case("", 100, Some(ExpenseValidationError::EmptyTitle))]
    #[case("   ", 100, Some(ExpenseValidationError::EmptyTitle))]
    #[case("Groceries", 0, Some(ExpenseValidationError::NonPositiveAmount))]
    #[case("Groceries", -250, Some(ExpenseValidationError::NonPositiveAmount))]
    #[case("Groceries", 250, None)]
    fn draft_shape(
        #[case] title: &str,
        #[case] amount_cents: i64,
        #[case] expected: Option<ExpenseValidationError>,
    ) {
        assert_eq!(draft(title, amount_cents).validate().err(), expected);
    }

    #[test]
    fn overlong_titles_are_rejected() {
        let long = "x".repeat(TITLE_MAX + 1);
        assert_eq!(
            draft(&long, 100).validate().err(),
            Some(ExpenseValidationError::TitleTooLong)
        );
        let boundary = "x".repeat(TITLE_MAX);
        assert_eq!(draft(&boundary, 100).validate().err(), None);
    }
}
