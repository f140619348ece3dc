use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref STATUS_REGEX: regex::Regex = regex::Regex::new(r"^(pending|completed)$").unwrap();
}

/// Task statuses are plain strings at the storage level; these constants
/// are the only two values the API accepts.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const COMPLETED: &str = "completed";
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub text: Option<String>,

    /// Either "pending" or "completed". Optional on create (defaults to
    /// pending), required on update.
    #[validate(regex(path = "STATUS_REGEX", message = "Status must be pending or completed"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: i32,
    pub title: String,
    pub text: Option<String>,
    pub status: String,
    /// Stamped when the task leaves the pending state, cleared when it
    /// returns to it.
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A user's tasks grouped by completion, as returned by the listing
/// endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListing {
    pub completed: Vec<Task>,
    pub pending: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_task_input_validation() {
        let input = TaskInput {
            title: "Write report".to_string(),
            text: None,
            status: Some("pending".to_string()),
        };
        assert!(input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            text: None,
            status: None,
        };
        assert!(empty_title.validate().is_err());

        let bad_status = TaskInput {
            title: "Write report".to_string(),
            text: None,
            status: Some("done".to_string()),
        };
        assert!(bad_status.validate().is_err());
    }
}
