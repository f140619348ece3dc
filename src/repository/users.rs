use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{NewUser, Session, User};
use crate::repository::UserRepository;

/// Postgres-backed user and session storage.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_credentials(&self, email: &str, credential: &[u8]) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email FROM users WHERE email = $1 AND password_hash = $2",
        )
        .bind(email)
        .bind(credential)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| AppError::NotFound("user not found".into()))
    }

    async fn insert_user(&self, user: NewUser) -> Result<i32, AppError> {
        let mut tx = self.pool.begin().await?;

        // The unique constraint on users.email serializes concurrent
        // sign-ups for the same address; a duplicate surfaces here as a
        // unique violation rather than through a racy pre-check.
        let result = sqlx::query_as::<_, (i32,)>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await;

        let user_id = match result {
            Ok((id,)) => id,
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(AppError::Conflict(
                    "user with such email already exists".into(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        // Every user owns exactly one session row; it starts empty and is
        // populated on first successful session creation.
        sqlx::query("INSERT INTO sessions (user_id) VALUES ($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user_id)
    }

    async fn find_by_id(&self, id: i32) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        user.ok_or_else(|| AppError::NotFound("user not found".into()))
    }

    async fn set_session(
        &self,
        user_id: i32,
        refresh_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        // Single-statement upsert: the overwrite either lands whole or not
        // at all, and last writer wins under concurrent sign-ins.
        sqlx::query(
            "INSERT INTO sessions (user_id, refresh_token, expires_at) VALUES ($1, $2, $3)
             ON CONFLICT (user_id)
             DO UPDATE SET refresh_token = EXCLUDED.refresh_token, expires_at = EXCLUDED.expires_at",
        )
        .bind(user_id)
        .bind(refresh_token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session_by_refresh(&self, refresh_token: &str) -> Result<Session, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT user_id, refresh_token, expires_at FROM sessions WHERE refresh_token = $1",
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await?;

        session.ok_or_else(|| AppError::NotFound("session not found".into()))
    }
}
