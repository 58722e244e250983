use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Verified subject identifier; the owner id stamped onto owned rows.
    pub sub: String,
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: String, email: Option<String>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub,
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Sign claims with the given secret (HS256). The secret is passed in
/// explicitly so callers outside the request path, tests included, can mint
/// tokens without touching the config singleton.
pub fn encode_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::default(), claims, &encoding_key)?)
}

/// Validate and decode a bearer token.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_claims() {
        let claims = Claims::new("u1".to_string(), Some("u1@example.com".to_string()));
        let token = encode_jwt(&claims, "test-secret").unwrap();
        let decoded = decode_jwt(&token, "test-secret").unwrap();
        assert_eq!(decoded.sub, "u1");
        assert_eq!(decoded.email.as_deref(), Some("u1@example.com"));
    }

    #[test]
    fn rejects_wrong_secret() {
        let claims = Claims::new("u1".to_string(), None);
        let token = encode_jwt(&claims, "test-secret").unwrap();
        assert!(decode_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn empty_secret_is_an_error() {
        let claims = Claims::new("u1".to_string(), None);
        assert!(matches!(
            encode_jwt(&claims, ""),
            Err(JwtError::MissingSecret)
        ));
        assert!(matches!(decode_jwt("abc", ""), Err(JwtError::MissingSecret)));
    }
}
