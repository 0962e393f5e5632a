//! HTTP server assembly.
//!
//! [`build_app`] wires every route onto an `actix_web::App` so the binary and
//! the integration tests serve an identical surface.

pub mod config;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{accounts, expenses};

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the application with all routes and shared state.
///
/// Swagger UI is mounted under `/docs` in debug builds only.
pub fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(accounts::register)
        .service(accounts::login)
        .service(accounts::change_password)
        .service(accounts::change_username)
        .service(accounts::delete_account)
        .service(expenses::list_expenses)
        .service(expenses::create_expense)
        .service(expenses::update_expense)
        .service(expenses::delete_expense);

    let app = App::new()
        .app_data(state)
        .app_data(health_state)
        .service(api)
        .service(health::ready)
        .service(health::live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::TokenSigner;
    use crate::domain::ports::{InMemoryExpenseRepository, InMemoryUserRepository};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn test_state() -> web::Data<HttpState> {
        let tokens = TokenSigner::new("a-test-secret-nobody-guesses").expect("test secret");
        web::Data::new(HttpState::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryExpenseRepository::new()),
            tokens,
        ))
    }

    #[actix_web::test]
    async fn assembled_app_serves_accounts_and_health() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let app =
            actix_test::init_service(build_app(test_state(), health_state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/accounts/register")
            .set_json(json!({"username": "alice", "password": "pass1"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("success").and_then(Value::as_bool), Some(true));
    }
}
