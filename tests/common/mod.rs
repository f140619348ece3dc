//! Shared test fixtures: in-memory repositories and app state so the full
//! HTTP surface can be exercised without a database.

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use tasktracker::auth::{PasswordHasher, TokenManager};
use tasktracker::error::AppError;
use tasktracker::models::{NewUser, Session, Task, User};
use tasktracker::repository::{TaskRepository, UserRepository};
use tasktracker::services::{Email, NotificationScheduler, Services, TaskService, UserService};

pub const TEST_SECRET: &str = "integration-test-secret";

struct StoredUser {
    id: i32,
    name: String,
    email: String,
    password_hash: Vec<u8>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<StoredUser>>,
    sessions: Mutex<HashMap<i32, (Option<String>, Option<DateTime<Utc>>)>>,
}

impl InMemoryUserRepository {
    /// Backdates the expiry of the session holding the given refresh token.
    pub fn expire_session_by_token(&self, refresh_token: &str) {
        let mut sessions = self.sessions.lock().unwrap();
        for entry in sessions.values_mut() {
            if entry.0.as_deref() == Some(refresh_token) {
                entry.1 = Some(Utc::now() - Duration::hours(1));
            }
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_credentials(&self, email: &str, credential: &[u8]) -> Result<User, AppError> {
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| u.email == email && u.password_hash == credential)
            .map(|u| User {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
            })
            .ok_or_else(|| AppError::NotFound("user not found".into()))
    }

    async fn insert_user(&self, user: NewUser) -> Result<i32, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(
                "user with such email already exists".into(),
            ));
        }
        let id = users.len() as i32 + 1;
        users.push(StoredUser {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        });
        self.sessions.lock().unwrap().insert(id, (None, None));
        Ok(id)
    }

    async fn find_by_id(&self, id: i32) -> Result<User, AppError> {
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| u.id == id)
            .map(|u| User {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
            })
            .ok_or_else(|| AppError::NotFound("user not found".into()))
    }

    async fn set_session(
        &self,
        user_id: i32,
        refresh_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(user_id, (Some(refresh_token.to_string()), Some(expires_at)));
        Ok(())
    }

    async fn find_session_by_refresh(&self, refresh_token: &str) -> Result<Session, AppError> {
        let sessions = self.sessions.lock().unwrap();
        sessions
            .iter()
            .find(|(_, (token, _))| token.as_deref() == Some(refresh_token))
            .map(|(user_id, (token, expires_at))| Session {
                user_id: *user_id,
                refresh_token: token.clone(),
                expires_at: *expires_at,
            })
            .ok_or_else(|| AppError::NotFound("session not found".into()))
    }
}

#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<HashMap<Uuid, Task>>,
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), AppError> {
        self.tasks.lock().unwrap().insert(task.id, task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Task, AppError> {
        self.tasks
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("task not found".into()))
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, AppError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, task: &Task) -> Result<(), AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        if !tasks.contains_key(&task.id) {
            return Err(AppError::NotFound("task not found".into()));
        }
        tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.tasks
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("task not found".into()))
    }
}

/// Quiet scheduler for tests; delivery is out of scope here.
struct NoopNotifier;

#[async_trait]
impl NotificationScheduler for NoopNotifier {
    async fn schedule(&self, _email: Email) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct TestState {
    pub services: web::Data<Services>,
    pub token_manager: web::Data<TokenManager>,
    pub users: Arc<InMemoryUserRepository>,
}

/// Builds app state over fresh in-memory stores, mirroring the wiring in
/// `main.rs`.
pub fn state() -> TestState {
    let users = Arc::new(InMemoryUserRepository::default());
    let tasks = Arc::new(InMemoryTaskRepository::default());
    let token_manager = TokenManager::new(TEST_SECRET).unwrap();

    let services = web::Data::new(Services {
        users: UserService::new(
            users.clone(),
            PasswordHasher::new("integration-test-salt"),
            token_manager.clone(),
            Arc::new(NoopNotifier),
            std::time::Duration::from_secs(15 * 60),
            std::time::Duration::from_secs(30 * 24 * 60 * 60),
        ),
        tasks: TaskService::new(tasks),
    });

    TestState {
        services,
        token_manager: web::Data::new(token_manager),
        users,
    }
}
