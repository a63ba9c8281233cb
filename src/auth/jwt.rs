//! Session token validation
//! Tokens are issued by the external session provider and signed with the shared secret

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Username
    pub username: String,

    /// Role name, e.g. "SALES_MANAGER"
    pub role: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID
    pub jti: String,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_exp_secs: u64,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_exp_secs: config.security.access_token_exp_secs,
        })
    }

    /// Issue a session token
    pub fn generate_access_token(
        &self,
        user_id: &str,
        username: &str,
        role: &str,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.access_token_exp_secs as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            AppError::Internal(format!("Failed to encode access token: {}", e))
        })
    }

    /// Validate and decode a session token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?
            .claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, LoggingConfig, SecurityConfig, ServerConfig};
    use secrecy::Secret;

    fn test_config(secret: &str) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: Secret::new(secret.to_string()),
                access_token_exp_secs: 900,
                trust_proxy: false,
                allowed_ips: None,
            },
            client: ClientConfig {
                base_url: "http://127.0.0.1:3000".to_string(),
                api_token: None,
                request_timeout_secs: 30,
                abilities_timeout_ms: 5000,
                search_debounce_ms: 500,
                toast_duration_ms: 5000,
            },
        }
    }

    #[test]
    fn test_generate_and_validate() {
        let service =
            JwtService::from_config(&test_config("test-secret-key-for-testing-only-min-32")).unwrap();

        let token = service
            .generate_access_token("user-1", "alice", "SALES_MANAGER")
            .unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "SALES_MANAGER");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(JwtService::from_config(&test_config("short")).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let service =
            JwtService::from_config(&test_config("test-secret-key-for-testing-only-min-32")).unwrap();
        assert!(matches!(
            service.validate_access_token("not-a-token"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer =
            JwtService::from_config(&test_config("another-secret-key-that-is-32-chars-long")).unwrap();
        let verifier =
            JwtService::from_config(&test_config("test-secret-key-for-testing-only-min-32")).unwrap();

        let token = issuer.generate_access_token("user-1", "alice", "ADMIN").unwrap();
        assert!(verifier.validate_access_token(&token).is_err());
    }
}
