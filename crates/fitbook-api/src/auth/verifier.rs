//! JWT signature and expiry validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use fitbook_core::config::auth::AuthConfig;
use fitbook_core::error::AppError;
use fitbook_core::result::AppResult;

use super::claims::Claims;

/// Verifies provider-issued identity tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an identity token string.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fitbook_entity::account::AccountRole;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            leeway_seconds: 5,
        }
    }

    fn mint(secret: &str, exp_offset_seconds: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: AccountRole::Member,
            company_id: None,
            iat: now,
            exp: now + exp_offset_seconds,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trips() {
        let verifier = TokenVerifier::new(&config());
        let token = mint("test-secret", 3600);
        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.role, AccountRole::Member);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = TokenVerifier::new(&config());
        let token = mint("other-secret", 3600);
        let err = verifier.verify(&token).unwrap_err();
        assert_eq!(err.kind, fitbook_core::error::ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = TokenVerifier::new(&config());
        let token = mint("test-secret", -3600);
        assert!(verifier.verify(&token).is_err());
    }
}
