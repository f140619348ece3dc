use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identity record for a registered user. The id is assigned by the
/// persistence layer and immutable; the email is unique across all users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// A user record about to be inserted. Carries the salted credential
/// produced by the password hasher; the plaintext never reaches this type.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: Vec<u8>,
}

/// The durable record of a user's currently valid refresh token.
///
/// Exactly one row exists per user: created with null token/expiry at
/// account creation, overwritten by every successful sign-up, sign-in or
/// refresh. "No active refresh token" is a legitimate state, not an error.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub user_id: i32,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether the session's refresh token is past its expiry.
    ///
    /// A populated token without an expiry cannot be produced by the
    /// service; if one is ever observed it is treated as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => true,
        }
    }
}
