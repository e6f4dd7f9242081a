//! Bearer token issue/verify (HS256 JWT).
//!
//! The token subject is the account email; the HTTP layer decodes it into a
//! `Principal` and services resolve the account from there.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Authenticated caller as carried by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
    /// Account the token was issued to; checked against the account resolved by email.
    pub account_id: Option<Uuid>,
}

impl Principal {
    pub fn new(email: impl Into<String>) -> Self { Self { email: email.into(), account_id: None } }

    pub fn with_account(email: impl Into<String>, account_id: Uuid) -> Self {
        Self { email: email.into(), account_id: Some(account_id) }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub aid: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, account_id: Uuid, email: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            aid: account_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| ServiceError::Token(e.to_string()))
    }

    pub fn decode(&self, token: &str) -> Result<Principal, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| ServiceError::Unauthorized(e.to_string()))?;
        let account_id = Uuid::parse_str(&data.claims.aid).map_err(|e| ServiceError::Unauthorized(e.to_string()))?;
        Ok(Principal::with_account(data.claims.sub, account_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_decode_yields_email_and_account() {
        let codec = TokenCodec::new("secret", 1);
        let id = Uuid::new_v4();
        let token = codec.issue(id, "me@example.com").unwrap();
        let p = codec.decode(&token).unwrap();
        assert_eq!(p.email, "me@example.com");
        assert_eq!(p.account_id, Some(id));
    }

    #[test]
    fn malformed_account_claim_is_unauthorized() {
        let codec = TokenCodec::new("secret", 1);
        let claims = Claims { sub: "me@example.com".into(), aid: "not-a-uuid".into(), iat: 0, exp: (Utc::now().timestamp() + 3600) as usize };
        let token = encode(&Header::default(), &claims, &codec.encoding).unwrap();
        assert!(matches!(codec.decode(&token), Err(ServiceError::Unauthorized(_))));
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token = TokenCodec::new("secret-a", 1).issue(Uuid::new_v4(), "me@example.com").unwrap();
        let err = TokenCodec::new("secret-b", 1).decode(&token).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        // Default validation leeway is 60s; two hours in the past is well outside it.
        let token = TokenCodec::new("secret", -2).issue(Uuid::new_v4(), "me@example.com").unwrap();
        assert!(matches!(TokenCodec::new("secret", 1).decode(&token), Err(ServiceError::Unauthorized(_))));
    }

    #[test]
    fn garbage_is_unauthorized() {
        assert!(matches!(TokenCodec::new("secret", 1).decode("not-a-jwt"), Err(ServiceError::Unauthorized(_))));
    }
}
