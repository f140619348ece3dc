//!
//! # User Service
//!
//! Orchestrates sign-up, sign-in, token refresh and profile lookup over the
//! injected user repository, password hasher, token manager and notification
//! scheduler. This is the only place session lifecycle decisions are made:
//! every successful operation that authenticates a user ends in
//! `create_session`, which rotates the stored refresh token.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{PasswordHasher, Profile, TokenManager, TokenPair};
use crate::error::AppError;
use crate::models::NewUser;
use crate::repository::UserRepository;
use crate::services::email::{Email, NotificationScheduler};

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    token_manager: TokenManager,
    notifier: Arc<dyn NotificationScheduler>,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        token_manager: TokenManager,
        notifier: Arc<dyn NotificationScheduler>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            repo,
            hasher,
            token_manager,
            notifier,
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    /// Registers a new account and signs it in.
    ///
    /// The user row and its empty session row are created atomically;
    /// a duplicate email surfaces as `Conflict`. Tokens are only returned
    /// once the session is durably recorded. The welcome email is
    /// fire-and-forget.
    pub async fn sign_up(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<TokenPair, AppError> {
        let credential = self.hasher.hash(&password);

        let user_id = self
            .repo
            .insert_user(NewUser {
                name,
                email: email.clone(),
                password_hash: credential,
            })
            .await?;

        let tokens = self.create_session(user_id).await?;

        self.notify(Email {
            subject: "Registration".into(),
            body: "Welcome to Task Tracker!".into(),
            to: email,
        })
        .await;

        Ok(tokens)
    }

    /// Signs a user in by credential equality.
    ///
    /// The plaintext is hashed with the same deterministic hasher and the
    /// lookup matches `(email, credential)` exactly, so a wrong password
    /// and a nonexistent email both come back as `NotFound`.
    pub async fn sign_in(&self, email: String, password: String) -> Result<TokenPair, AppError> {
        let credential = self.hasher.hash(&password);

        let user = self.repo.find_by_credentials(&email, &credential).await?;

        let tokens = self.create_session(user.id).await?;

        self.notify(Email {
            subject: "Login".into(),
            body: "You signed in to your account.".into(),
            to: user.email,
        })
        .await;

        Ok(tokens)
    }

    /// Exchanges a refresh token for a brand-new token pair.
    ///
    /// Single-use rotation: the session row is overwritten on success, so
    /// presenting the same value twice fails the lookup. An expired session
    /// fails with `TokenExpired` even though the token value still matches.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let session = self.repo.find_session_by_refresh(refresh_token).await?;

        if session.is_expired(Utc::now()) {
            return Err(AppError::TokenExpired);
        }

        self.create_session(session.user_id).await
    }

    /// Pure read-through to the user repository.
    pub async fn get_user_by_id(&self, user_id: i32) -> Result<Profile, AppError> {
        let user = self.repo.find_by_id(user_id).await?;

        Ok(Profile {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }

    /// Issues a token pair and persists the refresh half.
    ///
    /// The session overwrite is the commit point: if it fails, no tokens
    /// leave this function, so a refresh token can never exist that the
    /// store does not know about.
    async fn create_session(&self, user_id: i32) -> Result<TokenPair, AppError> {
        let access_token = self
            .token_manager
            .new_access_token(user_id, self.access_token_ttl)?;

        let refresh_token = self.token_manager.new_refresh_token();

        let expires_at = Utc::now()
            + chrono::Duration::from_std(self.refresh_token_ttl).map_err(|e| {
                AppError::InternalServerError(format!("invalid refresh ttl: {}", e))
            })?;

        self.repo
            .set_session(user_id, &refresh_token, expires_at)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn notify(&self, email: Email) {
        if let Err(e) = self.notifier.schedule(email).await {
            log::error!("failed to schedule notification email: {}", e);
        }
    }
}
