use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::task::status;
use crate::models::{Task, TaskInput, TaskListing};
use crate::repository::TaskRepository;

/// Task CRUD over the injected repository. Ownership is enforced here:
/// a task that exists but belongs to another user is reported as not found.
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    /// Creates a task for the user. Status defaults to pending; a task
    /// created as completed is stamped immediately.
    pub async fn create_task(&self, user_id: i32, input: TaskInput) -> Result<Task, AppError> {
        let task_status = input.status.unwrap_or_else(|| status::PENDING.to_string());
        let completed_at = if task_status == status::PENDING {
            None
        } else {
            Some(Utc::now())
        };

        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            text: input.text,
            status: task_status,
            completed_at,
            created_at: Utc::now(),
        };

        self.repo.insert(&task).await?;

        Ok(task)
    }

    pub async fn get_task(&self, user_id: i32, task_id: Uuid) -> Result<Task, AppError> {
        let task = self.repo.find_by_id(task_id).await?;
        if task.user_id != user_id {
            return Err(AppError::NotFound("task not found".into()));
        }
        Ok(task)
    }

    /// Lists the user's tasks split into completed and pending groups.
    pub async fn list_tasks(&self, user_id: i32) -> Result<TaskListing, AppError> {
        let tasks = self.repo.list_for_user(user_id).await?;

        let (completed, pending) = tasks
            .into_iter()
            .partition(|task| task.status == status::COMPLETED);

        Ok(TaskListing { completed, pending })
    }

    /// Updates a task the user owns. Moving out of pending stamps the
    /// completion time; moving back to pending clears it.
    pub async fn update_task(
        &self,
        user_id: i32,
        task_id: Uuid,
        input: TaskInput,
    ) -> Result<Task, AppError> {
        let mut task = self.get_task(user_id, task_id).await?;

        task.title = input.title;
        task.text = input.text;
        task.status = input
            .status
            .unwrap_or_else(|| status::PENDING.to_string());
        task.completed_at = if task.status == status::PENDING {
            None
        } else {
            Some(Utc::now())
        };

        self.repo.update(&task).await?;

        Ok(task)
    }

    pub async fn delete_task(&self, user_id: i32, task_id: Uuid) -> Result<(), AppError> {
        // Ownership check before the delete; a foreign task 404s
        self.get_task(user_id, task_id).await?;
        self.repo.delete(task_id).await
    }
}
