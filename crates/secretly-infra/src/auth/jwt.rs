//! JWT session token implementation.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use secretly_core::domain::{SessionClaims, SessionIdentity};
use secretly_core::ports::{AuthError, TokenService};

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
            issuer: "secretly".to_string(),
        }
    }
}

/// Claims persisted per session: the public projection of the user, nothing more.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    jti: String, // session id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    exp: i64,
    iat: i64,
    iss: String,
}

/// HS256-signed session tokens.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl JwtTokenService {
    fn lifetime(&self) -> Result<TimeDelta, AuthError> {
        TimeDelta::try_hours(self.config.expiration_hours)
            .ok_or(AuthError::InvalidLifetime(self.config.expiration_hours))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &SessionIdentity) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.lifetime()?)
            .ok_or(AuthError::InvalidLifetime(self.config.expiration_hours))?;

        let claims = Claims {
            sub: identity.id.to_string(),
            jti: Uuid::new_v4().to_string(),
            username: identity.username.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;
        let claims = token_data.claims;

        let id = Uuid::parse_str(&claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let session_id =
            Uuid::parse_str(&claims.jti).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthError::InvalidToken("exp out of range".to_string()))?;

        Ok(SessionClaims {
            session_id,
            identity: SessionIdentity {
                id,
                username: claims.username,
            },
            expires_at,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.lifetime().map(|d| d.num_seconds()).unwrap_or(0)
    }
}
