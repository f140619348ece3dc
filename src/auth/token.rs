use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of random bytes in a refresh token (256 bits before hex encoding).
const REFRESH_TOKEN_BYTES: usize = 32;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token, typically the user's unique identifier.
    pub sub: i32,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Issues and verifies access tokens and generates opaque refresh tokens.
///
/// The signing secret is resolved once at startup and handed to the
/// constructor; it never changes for the process lifetime. Access tokens are
/// self-contained HS256 JWTs carrying the user id and an absolute expiry.
/// Refresh tokens are random hex strings with no embedded claims and no
/// relationship to the signing key.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenManager {
    /// Creates a manager from the configured signing secret.
    ///
    /// An empty secret is a fatal configuration error and is rejected here,
    /// at startup, rather than on each signing call.
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::InternalServerError(
                "signing secret must not be empty".into(),
            ));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Generates a signed access token for the given user, expiring `ttl`
    /// from now.
    pub fn new_access_token(&self, user_id: i32, ttl: Duration) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| AppError::InternalServerError(format!("invalid token ttl: {}", e)))?;

        let claims = Claims {
            sub: user_id,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies an access token's signature and expiry, returning the
    /// subject user id.
    ///
    /// A structurally valid but expired token and a malformed or forged one
    /// both come back as 401s; the message distinguishes them for logs, not
    /// for the end user.
    pub fn parse_access_token(&self, token: &str) -> Result<i32, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("token has expired".into())
                }
                _ => AppError::Unauthorized("invalid token".into()),
            })
    }

    /// Generates an opaque, cryptographically unpredictable refresh token.
    ///
    /// 32 bytes from the OS-seeded RNG, hex-encoded. The value carries no
    /// claims; its validity lives entirely in the session store.
    pub fn new_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}
