//! Stateless bearer tokens.
//!
//! Tokens are HS512 JWTs binding a user id and username with an expiry one
//! day after issue. The issuing side holds no session state and cannot revoke
//! an outstanding token; expiry is enforced when the token is presented (see
//! the inbound bearer extractor).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// How long a minted token stays valid.
pub fn token_ttl() -> Duration {
    Duration::days(1)
}

/// Fatal configuration error raised when the signing secret is unusable.
///
/// This is a startup-time failure, never a per-request one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenConfigError {
    /// The configured secret was empty or whitespace.
    #[error("token signing secret must not be blank")]
    BlankSecret,
}

/// Per-request token failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signing the claim set failed.
    #[error("failed to sign token: {message}")]
    Sign {
        /// Underlying signer message.
        message: String,
    },
    /// The presented token is malformed, forged, or expired.
    #[error("invalid or expired token")]
    Invalid,
}

/// Claim set embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user's numeric identifier, as a string.
    sub: String,
    /// Username at issue time.
    name: String,
    /// Issued-at (Unix seconds).
    iat: i64,
    /// Expiry (Unix seconds).
    exp: i64,
}

/// Claims extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Authenticated user identifier.
    pub user_id: i32,
    /// Username recorded when the token was minted.
    pub username: String,
}

/// Mints and verifies bearer tokens under a single symmetric secret.
///
/// The secret is injected at construction and validated once; handlers only
/// ever see the derived keys.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    /// Build a signer from the configured secret.
    ///
    /// # Errors
    /// Returns [`TokenConfigError::BlankSecret`] when the secret is empty or
    /// whitespace; callers treat that as fatal at startup.
    pub fn new(secret: &str) -> Result<Self, TokenConfigError> {
        if secret.trim().is_empty() {
            return Err(TokenConfigError::BlankSecret);
        }
        let secret = Zeroizing::new(secret.to_owned());
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Mint a token for the given user, expiring [`token_ttl`] from now.
    pub fn mint(&self, user_id: i32, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            name: username.to_owned(),
            iat: now.timestamp(),
            exp: (now + token_ttl()).timestamp(),
        };
        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding).map_err(|err| {
            TokenError::Sign {
                message: err.to_string(),
            }
        })
    }

    /// Verify a presented token and extract its claims.
    ///
    /// # Errors
    /// Returns [`TokenError::Invalid`] for bad signatures, malformed tokens,
    /// and expired timestamps alike; callers map this to 401.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS512);
        // No grace period on expiry: a token past `exp` is rejected outright.
        validation.leeway = 0;
        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|_| TokenError::Invalid)?;
        let user_id = data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| TokenError::Invalid)?;
        Ok(TokenClaims {
            user_id,
            username: data.claims.name,
        })
    }

    /// Mint a token with an explicit expiry instant, for expiry tests.
    #[cfg(test)]
    pub(crate) fn mint_expiring_at(
        &self,
        user_id: i32,
        username: &str,
        expires_at: chrono::DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            name: username.to_owned(),
            iat: (expires_at - token_ttl()).timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding).map_err(|err| {
            TokenError::Sign {
                message: err.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn signer() -> TokenSigner {
        TokenSigner::new("a-test-secret-nobody-guesses").expect("valid test secret")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_secrets_are_fatal(#[case] secret: &str) {
        assert_eq!(
            TokenSigner::new(secret).err(),
            Some(TokenConfigError::BlankSecret)
        );
    }

    #[test]
    fn minted_tokens_verify_to_the_same_claims() {
        let signer = signer();
        let token = signer.mint(7, "alice").expect("token mints");
        assert!(!token.is_empty());
        let claims = signer.verify(&token).expect("token verifies");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let token = signer().mint(7, "alice").expect("token mints");
        let other = TokenSigner::new("a-different-secret-entirely").expect("valid test secret");
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[rstest]
    #[case("not-a-token")]
    #[case("")]
    #[case("aaaa.bbbb.cccc")]
    fn garbage_tokens_are_rejected(#[case] token: &str) {
        assert_eq!(signer().verify(token), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let signer = signer();
        let token = signer
            .mint_expiring_at(7, "alice", Utc::now() - Duration::hours(1))
            .expect("token mints");
        // Correctly signed under the same secret; only the expiry is past.
        assert_eq!(signer.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn tokens_expiring_in_the_future_still_verify() {
        let signer = signer();
        let token = signer
            .mint_expiring_at(7, "alice", Utc::now() + Duration::minutes(5))
            .expect("token mints");
        assert_eq!(signer.verify(&token).expect("token verifies").user_id, 7);
    }
}
