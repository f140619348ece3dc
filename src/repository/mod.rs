//!
//! # Persistence Layer
//!
//! Repository traits consumed by the service layer, with Postgres
//! implementations over `sqlx`. Services depend on the traits only, so
//! tests can substitute in-memory stores.

pub mod tasks;
pub mod users;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Session, Task, User};

pub use tasks::PgTaskRepository;
pub use users::PgUserRepository;

/// Durable storage for users and their single active session.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks up a user by exact `(email, credential)` match. A wrong
    /// password and an unknown email are indistinguishable here.
    async fn find_by_credentials(&self, email: &str, credential: &[u8]) -> Result<User, AppError>;

    /// Inserts a new user together with its empty session row, atomically.
    /// Returns `Conflict` when the email is already registered; the check
    /// and the insert are serialized by the unique constraint, so exactly
    /// one of two concurrent sign-ups for the same email can succeed.
    async fn insert_user(&self, user: NewUser) -> Result<i32, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<User, AppError>;

    /// Overwrites the user's session row with a new refresh token and
    /// expiry. Upsert semantics: the write fully replaces any prior state
    /// in a single statement.
    async fn set_session(
        &self,
        user_id: i32,
        refresh_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Finds the session whose stored refresh token equals the given value.
    /// Expiry is not enforced here; the service decides what an expired
    /// session means.
    async fn find_session_by_refresh(&self, refresh_token: &str) -> Result<Session, AppError>;
}

/// Durable storage for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert(&self, task: &Task) -> Result<(), AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Task, AppError>;
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, AppError>;
    async fn update(&self, task: &Task) -> Result<(), AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
