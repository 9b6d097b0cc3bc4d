//! Signed session tokens

use crate::config::AuthConfig;
use crate::error::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user name)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    pub fn for_user(name: &str, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: name.to_string(),
            iat: now,
            exp: now + ttl_secs,
        }
    }
}

/// Issues and validates HS256 identity tokens with the configured secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.secret.as_bytes(), config.token_ttl_secs)
    }

    /// Create a token naming `username`
    pub fn create_token(&self, username: &str) -> Result<String> {
        let claims = Claims::for_user(username, self.ttl_secs);
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate_token() {
        let keys = TokenKeys::new(b"seekrit", 3600);
        let token = keys.create_token("basic").expect("Failed to create token");
        let claims = keys.validate_token(&token).expect("Failed to validate token");

        assert_eq!(claims.sub, "basic");
        assert!(claims.exp > chrono::Utc::now().timestamp());
    }

    #[test]
    fn test_invalid_token() {
        let keys = TokenKeys::new(b"seekrit", 3600);
        assert!(keys.validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let ours = TokenKeys::new(b"seekrit", 3600);
        let theirs = TokenKeys::new(b"another-secret", 3600);
        let token = theirs.create_token("editor").unwrap();
        assert!(ours.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s validation leeway
        let keys = TokenKeys::new(b"seekrit", -120);
        let token = keys.create_token("basic").unwrap();
        assert!(keys.validate_token(&token).is_err());
    }
}
