/// Session tokens
///
/// After signup or login the API hands the client an HS256-signed JWT whose
/// subject is the user ID. Routes that act on "the current user" validate it.
///
/// # Example
///
/// ```
/// use lightbnb_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "your-secret-key-at-least-32-bytes-long";
///
/// let token = create_token(&Claims::new(user_id)?, secret)?;
/// let claims = validate_token(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer written into and required on every token
pub const ISSUER: &str = "lightbnb";

/// Default session lifetime
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Longest session lifetime accepted by [`Claims::with_ttl_hours`] (one year)
pub const MAX_TTL_HOURS: i64 = 8760;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, format or claim check failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token was issued by someone else
    #[error("Invalid issuer")]
    InvalidIssuer,
}

/// Session claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer - always [`ISSUER`]
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Claims for `user_id` expiring after [`DEFAULT_TTL_HOURS`]
    pub fn new(user_id: Uuid) -> Result<Self, JwtError> {
        Self::with_ttl_hours(user_id, DEFAULT_TTL_HOURS)
    }

    /// Claims for `user_id` expiring after `hours`
    ///
    /// # Errors
    ///
    /// Returns `JwtError::CreateError` unless `hours` is in `1..=MAX_TTL_HOURS`.
    pub fn with_ttl_hours(user_id: Uuid, hours: i64) -> Result<Self, JwtError> {
        if !(1..=MAX_TTL_HOURS).contains(&hours) {
            return Err(JwtError::CreateError(format!(
                "Session lifetime must be 1..={} hours, got {}",
                MAX_TTL_HOURS, hours
            )));
        }

        let expires_in = TimeDelta::try_hours(hours)
            .ok_or_else(|| JwtError::CreateError(format!("Session lifetime out of range: {} hours", hours)))?;
        Self::with_expiration(user_id, expires_in)
    }

    /// Claims for `user_id` expiring after `expires_in`
    ///
    /// A negative `expires_in` yields claims that are already expired.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::CreateError` if the expiry is not a representable time.
    pub fn with_expiration(user_id: Uuid, expires_in: TimeDelta) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(expires_in)
            .ok_or_else(|| JwtError::CreateError("Token expiry overflows".to_string()))?;

        Ok(Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            nbf: now.timestamp(),
        })
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs `claims` with HS256
///
/// The secret should be at least 32 bytes; the API config enforces this.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and returns its claims
///
/// Checks the signature, expiry, not-before and issuer.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
