//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: the
//! account and expense endpoints, the health probes, the envelope and request
//! schemas, and the bearer token security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::Expense;
use crate::inbound::http::accounts::{
    ChangePasswordRequest, ChangeUsernameRequest, CredentialsRequest,
};
use crate::inbound::http::expenses::ExpenseRequest;

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/accounts/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tally backend API",
        description = "HTTP interface for account management and expense tracking."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::change_password,
        crate::inbound::http::accounts::change_username,
        crate::inbound::http::accounts::delete_account,
        crate::inbound::http::expenses::list_expenses,
        crate::inbound::http::expenses::create_expense,
        crate::inbound::http::expenses::update_expense,
        crate::inbound::http::expenses::delete_expense,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CredentialsRequest,
        ChangePasswordRequest,
        ChangeUsernameRequest,
        ExpenseRequest,
        Expense,
    )),
    tags(
        (name = "accounts", description = "Registration, login, and account maintenance"),
        (name = "expenses", description = "Owner-scoped expense records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;

    #[test]
    fn openapi_document_references_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/v1/accounts/register",
            "/api/v1/accounts/login",
            "/api/v1/accounts/password",
            "/api/v1/accounts/username",
            "/api/v1/accounts",
            "/api/v1/expenses",
            "/api/v1/expenses/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path '{path}'");
        }
    }

    #[test]
    fn openapi_document_registers_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
