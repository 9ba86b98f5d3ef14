//! Bearer-token issuing and verification.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use staffdesk_database::{AuthError, AuthResult};

/// Token claims: the authenticated identity and the expiry instant.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub exp: usize,
}

/// Issues and verifies HS256 tokens signed with the process-wide secret.
/// Tokens are stateless; expiry is the only termination mechanism.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_duration: Duration,
}

impl TokenManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            token_duration: Duration::from_secs(60 * 60),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.token_duration = duration;
        self
    }

    /// Issue a token for the given identity, expiring one TTL from now.
    pub fn issue(&self, email: &str) -> AuthResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Database("system clock before unix epoch".to_string()))?;
        self.issue_at(email, now)
    }

    fn issue_at(&self, email: &str, issued_at: Duration) -> AuthResult<String> {
        let claims = Claims {
            email: email.to_string(),
            exp: (issued_at + self.token_duration).as_secs() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::Database("failed to encode token".to_string()))
    }

    /// Verify a token and extract the identity it carries.
    ///
    /// The signing algorithm is pinned to HS256: tokens asserting any other
    /// algorithm are rejected. Every failure mode collapses to the same
    /// unauthorized error so callers learn nothing about which check failed.
    pub fn verify(&self, token: &str) -> AuthResult<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::Unauthorized)?;

        if data.claims.email.is_empty() {
            return Err(AuthError::Unauthorized);
        }

        Ok(data.claims.email)
    }
}
