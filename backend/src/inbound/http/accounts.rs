//! Account API handlers.
//!
//! ```text
//! POST   /api/v1/accounts/register  {"username":"alice","password":"pass1"}
//! POST   /api/v1/accounts/login     {"username":"alice","password":"pass1"}
//! PUT    /api/v1/accounts/password  {"newPassword":"pass2"}      (bearer)
//! PUT    /api/v1/accounts/username  {"newUsername":"alice2"}     (bearer)
//! DELETE /api/v1/accounts                                        (bearer)
//! ```
//!
//! Every response body is the [`ServiceResponse`] envelope; failures carry
//! `success=false` with the reason message and an appropriate status code.

use actix_web::{HttpResponse, delete, post, put, web};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::{AccountService, ServiceResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Credentials body shared by registration and login.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    /// Desired or existing username.
    pub username: String,
    /// Plaintext password; hashed before it ever reaches storage and
    /// scrubbed from memory on drop.
    #[schema(value_type = String)]
    pub password: Zeroizing<String>,
}

/// Body for `PUT /api/v1/accounts/password`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Replacement password; must differ from the current one. Scrubbed
    /// from memory on drop.
    #[schema(value_type = String)]
    pub new_password: Zeroizing<String>,
}

/// Body for `PUT /api/v1/accounts/username`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUsernameRequest {
    /// Replacement username.
    pub new_username: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/register",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created; data is the new user id", body = ServiceResponse<i32>),
        (status = 400, description = "Username taken or malformed input", body = ServiceResponse<i32>),
        (status = 503, description = "User store unavailable", body = ServiceResponse<i32>)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security(())
)]
#[post("/accounts/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let id = state.accounts.register(&body.username, &body.password).await?;
    Ok(HttpResponse::Ok()
        .json(ServiceResponse::ok(id).with_message(AccountService::MSG_REGISTERED)))
}

/// Authenticate and mint a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success; data is the bearer token", body = ServiceResponse<String>),
        (status = 401, description = "Wrong password", body = ServiceResponse<String>),
        (status = 404, description = "Unknown username", body = ServiceResponse<String>)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security(())
)]
#[post("/accounts/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let token = state.accounts.login(&body.username, &body.password).await?;
    Ok(HttpResponse::Ok()
        .json(ServiceResponse::ok(token).with_message(AccountService::MSG_LOGGED_IN)))
}

/// Replace the caller's password.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password replaced", body = ServiceResponse<bool>),
        (status = 400, description = "Unchanged or malformed password", body = ServiceResponse<bool>),
        (status = 401, description = "Missing or invalid bearer token", body = ServiceResponse<bool>),
        (status = 404, description = "Account no longer exists", body = ServiceResponse<bool>)
    ),
    tags = ["accounts"],
    operation_id = "changePassword"
)]
#[put("/accounts/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let done = state
        .accounts
        .change_password(user.user_id, &payload.new_password)
        .await?;
    Ok(HttpResponse::Ok()
        .json(ServiceResponse::ok(done).with_message(AccountService::MSG_PASSWORD_CHANGED)))
}

/// Rename the caller's account.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/username",
    request_body = ChangeUsernameRequest,
    responses(
        (status = 200, description = "Username replaced", body = ServiceResponse<bool>),
        (status = 400, description = "Taken or malformed username", body = ServiceResponse<bool>),
        (status = 401, description = "Missing or invalid bearer token", body = ServiceResponse<bool>),
        (status = 404, description = "Account no longer exists", body = ServiceResponse<bool>)
    ),
    tags = ["accounts"],
    operation_id = "changeUsername"
)]
#[put("/accounts/username")]
pub async fn change_username(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ChangeUsernameRequest>,
) -> ApiResult<HttpResponse> {
    let done = state
        .accounts
        .change_username(user.user_id, &payload.new_username)
        .await?;
    Ok(HttpResponse::Ok()
        .json(ServiceResponse::ok(done).with_message(AccountService::MSG_USERNAME_CHANGED)))
}

/// Delete the caller's account.
///
/// Outstanding bearer tokens for the account stay formally valid until they
/// expire; they fail at the next lookup because the record is gone.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts",
    responses(
        (status = 200, description = "Account removed", body = ServiceResponse<bool>),
        (status = 401, description = "Missing or invalid bearer token", body = ServiceResponse<bool>),
        (status = 404, description = "Account no longer exists", body = ServiceResponse<bool>)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/accounts")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let done = state.accounts.delete_user(user.user_id).await?;
    Ok(HttpResponse::Ok()
        .json(ServiceResponse::ok(done).with_message(AccountService::MSG_DELETED)))
}
