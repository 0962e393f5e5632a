//! Expense API handlers.
//!
//! ```text
//! GET    /api/v1/expenses            (bearer)
//! POST   /api/v1/expenses            (bearer)
//! PUT    /api/v1/expenses/{id}       (bearer)
//! DELETE /api/v1/expenses/{id}       (bearer)
//! ```
//!
//! All operations are scoped to the authenticated owner; another user's
//! expense ids read as missing.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Expense, ExpenseDraft, ExpenseService, ServiceResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Expense fields supplied on create and update.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    /// What the money was spent on.
    pub title: String,
    /// Amount in minor currency units; must be positive.
    pub amount_cents: i64,
    /// Calendar date of the spend.
    pub spent_on: NaiveDate,
}

impl From<ExpenseRequest> for ExpenseDraft {
    fn from(value: ExpenseRequest) -> Self {
        Self {
            title: value.title,
            amount_cents: value.amount_cents,
            spent_on: value.spent_on,
        }
    }
}

/// List the caller's expenses, newest spend date first.
#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    responses(
        (status = 200, description = "The caller's expenses", body = ServiceResponse<Vec<Expense>>),
        (status = 401, description = "Missing or invalid bearer token", body = ServiceResponse<Vec<Expense>>)
    ),
    tags = ["expenses"],
    operation_id = "listExpenses"
)]
#[get("/expenses")]
pub async fn list_expenses(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let rows = state.expenses.list_for_user(user.user_id).await?;
    Ok(HttpResponse::Ok().json(ServiceResponse::ok(rows)))
}

/// Record a new expense for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    request_body = ExpenseRequest,
    responses(
        (status = 200, description = "Expense recorded", body = ServiceResponse<Expense>),
        (status = 400, description = "Malformed title or amount", body = ServiceResponse<Expense>),
        (status = 401, description = "Missing or invalid bearer token", body = ServiceResponse<Expense>)
    ),
    tags = ["expenses"],
    operation_id = "createExpense"
)]
#[post("/expenses")]
pub async fn create_expense(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let expense = state
        .expenses
        .create(user.user_id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(ServiceResponse::ok(expense)))
}

/// Replace an expense the caller owns.
#[utoipa::path(
    put,
    path = "/api/v1/expenses/{id}",
    request_body = ExpenseRequest,
    params(("id" = i32, Path, description = "Expense identifier")),
    responses(
        (status = 200, description = "Expense replaced", body = ServiceResponse<Expense>),
        (status = 400, description = "Malformed title or amount", body = ServiceResponse<Expense>),
        (status = 401, description = "Missing or invalid bearer token", body = ServiceResponse<Expense>),
        (status = 404, description = "No such expense for this caller", body = ServiceResponse<Expense>)
    ),
    tags = ["expenses"],
    operation_id = "updateExpense"
)]
#[put("/expenses/{id}")]
pub async fn update_expense(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    payload: web::Json<ExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let expense = state
        .expenses
        .update(user.user_id, path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(ServiceResponse::ok(expense)))
}

/// Remove an expense the caller owns.
#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{id}",
    params(("id" = i32, Path, description = "Expense identifier")),
    responses(
        (status = 200, description = "Expense removed", body = ServiceResponse<bool>),
        (status = 401, description = "Missing or invalid bearer token", body = ServiceResponse<bool>),
        (status = 404, description = "No such expense for this caller", body = ServiceResponse<bool>)
    ),
    tags = ["expenses"],
    operation_id = "deleteExpense"
)]
#[delete("/expenses/{id}")]
pub async fn delete_expense(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let done = state.expenses.delete(user.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .json(ServiceResponse::ok(done).with_message(ExpenseService::MSG_DELETED)))
}
