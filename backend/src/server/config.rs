//! Environment-driven application configuration.
//!
//! Configuration is read once at startup. A missing or blank token secret is
//! fatal: the server must never fall back to a default signing key.

use std::net::SocketAddr;

use zeroize::Zeroizing;

/// Environment variable holding the HMAC secret for bearer tokens.
pub const TOKEN_SECRET_VAR: &str = "TALLY_TOKEN_SECRET";

/// Environment variable holding the PostgreSQL connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable overriding the listen address.
pub const BIND_ADDR_VAR: &str = "TALLY_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset.
    #[error("required environment variable {name} is not set")]
    MissingVar { name: &'static str },

    /// The token secret is set but blank.
    #[error("{TOKEN_SECRET_VAR} must not be blank")]
    BlankSecret,

    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address {value:?}")]
    InvalidBindAddr { value: String },
}

/// Resolved application configuration.
#[derive(Debug)]
pub struct AppConfig {
    /// Secret key for signing and verifying bearer tokens.
    pub token_secret: Zeroizing<String>,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a required variable is missing, the
    /// token secret is blank, or the bind address is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Assemble the configuration from an arbitrary variable lookup.
    ///
    /// Factored out of [`Self::from_env`] so tests can supply variables
    /// without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token_secret = lookup(TOKEN_SECRET_VAR).ok_or(ConfigError::MissingVar {
            name: TOKEN_SECRET_VAR,
        })?;
        if token_secret.trim().is_empty() {
            return Err(ConfigError::BlankSecret);
        }

        let database_url = lookup(DATABASE_URL_VAR).ok_or(ConfigError::MissingVar {
            name: DATABASE_URL_VAR,
        })?;

        let bind_value = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_value
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { value: bind_value })?;

        Ok(Self {
            token_secret: Zeroizing::new(token_secret),
            database_url,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn full_environment_resolves() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (TOKEN_SECRET_VAR, "a-long-random-secret"),
            (DATABASE_URL_VAR, "postgres://localhost/tally"),
            (BIND_ADDR_VAR, "127.0.0.1:9090"),
        ]))
        .expect("config resolves");

        assert_eq!(config.database_url, "postgres://localhost/tally");
        assert_eq!(config.bind_addr.port(), 9090);
    }

    #[test]
    fn bind_address_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (TOKEN_SECRET_VAR, "a-long-random-secret"),
            (DATABASE_URL_VAR, "postgres://localhost/tally"),
        ]))
        .expect("config resolves");

        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_secret_is_fatal(#[case] secret: &str) {
        let err = AppConfig::from_lookup(lookup_from(&[
            (TOKEN_SECRET_VAR, secret),
            (DATABASE_URL_VAR, "postgres://localhost/tally"),
        ]))
        .expect_err("blank secret rejected");

        assert_eq!(err, ConfigError::BlankSecret);
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let err =
            AppConfig::from_lookup(lookup_from(&[(TOKEN_SECRET_VAR, "a-long-random-secret")]))
                .expect_err("missing url rejected");

        assert_eq!(
            err,
            ConfigError::MissingVar {
                name: DATABASE_URL_VAR
            }
        );
    }

    #[test]
    fn malformed_bind_address_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (TOKEN_SECRET_VAR, "a-long-random-secret"),
            (DATABASE_URL_VAR, "postgres://localhost/tally"),
            (BIND_ADDR_VAR, "not-an-address"),
        ]))
        .expect_err("malformed address rejected");

        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }
}
