//! Bearer-token authentication extractor.
//!
//! This is the token-consuming side of the stateless scheme: every protected
//! handler takes an [`AuthenticatedUser`] argument, which parses the
//! `Authorization: Bearer <token>` header and verifies signature and expiry
//! against the shared [`TokenSigner`]. Handlers never see raw tokens.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::Error;
use crate::inbound::http::state::HttpState;

/// Claims of a verified bearer token, available to protected handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Authenticated user identifier.
    pub user_id: i32,
    /// Username recorded when the token was minted.
    pub username: String,
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Missing bearer token!"))?;
    let raw = header_value
        .to_str()
        .map_err(|_| Error::unauthorized("Malformed authorization header!"))?;
    raw.strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("Malformed authorization header!"))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("authentication state not configured"))?;
    let token = bearer_token(req)?;
    let claims = state
        .tokens
        .verify(token)
        .map_err(|_| Error::unauthorized("Invalid or expired token!"))?;
    Ok(AuthenticatedUser {
        user_id: claims.user_id,
        username: claims.username,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{InMemoryExpenseRepository, InMemoryUserRepository};
    use crate::domain::TokenSigner;
    use crate::inbound::http::ApiResult;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use std::sync::Arc;

    const SECRET: &str = "a-test-secret-nobody-guesses";

    fn test_state(secret: &str) -> HttpState {
        let tokens = TokenSigner::new(secret).expect("test secret");
        HttpState::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryExpenseRepository::new()),
            tokens,
        )
    }

    async fn whoami(user: AuthenticatedUser) -> ApiResult<HttpResponse> {
        Ok(HttpResponse::Ok().json((user.user_id, user.username)))
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
                actix_web::dev::ServiceRequest,
                Config = (),
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
                InitError = (),
            >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .route("/whoami", web::get().to(whoami))
    }

    #[actix_web::test]
    async fn a_minted_token_authenticates() {
        let state = test_state(SECRET);
        let token = state.tokens.mint(7, "alice").expect("token mints");
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: (i32, String) = actix_test::read_body_json(response).await;
        assert_eq!(body, (7, "alice".to_owned()));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic abc"))]
    #[case(Some("Bearer not-a-token"))]
    #[actix_web::test]
    async fn bad_or_missing_headers_yield_unauthorized(#[case] header_value: Option<&str>) {
        let app = actix_test::init_service(test_app(test_state(SECRET))).await;

        let mut request = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = header_value {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn expired_tokens_are_unauthorized() {
        let state = test_state(SECRET);
        let token = state
            .tokens
            .mint_expiring_at(7, "alice", chrono::Utc::now() - chrono::Duration::hours(1))
            .expect("token mints");
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tokens_signed_under_another_secret_are_rejected() {
        let foreign = TokenSigner::new("some-other-secret-string").expect("test secret");
        let token = foreign.mint(7, "alice").expect("token mints");
        let app = actix_test::init_service(test_app(test_state(SECRET))).await;

        let request = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
