pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenManager};

lazy_static! {
    // Regex for display-name validation: letters, digits, spaces, underscores, hyphens
    static ref NAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9 _-]+$").unwrap();
}

/// Represents the payload for a new account sign-up request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Display name for the new account.
    #[validate(
        length(min = 2, max = 64),
        regex(
            path = "NAME_REGEX",
            message = "Name must be alphanumeric, spaces, underscores, or hyphens"
        )
    )]
    pub name: String,
    /// Email address for the new account.
    /// Must be a valid email format and unique across all users.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a sign-in request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a token refresh request.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token obtained from a previous sign-up, sign-in or refresh.
    pub token: String,
}

/// Token pair handed to the caller after any successful authentication
/// operation. The refresh half is mirrored into the user's session; the
/// pair itself is never persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived, self-verifying access token.
    pub access_token: String,
    /// Long-lived opaque refresh token; single-use under rotation.
    pub refresh_token: String,
}

/// Public view of a user returned by profile lookups. Never carries the
/// password credential.
#[derive(Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub email: String,
}
