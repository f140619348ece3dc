use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::AppError;

/// A notification email job: serialized to JSON and handed to the queue
/// worker for asynchronous delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub subject: String,
    pub body: String,
    pub to: String,
}

/// Schedules notification emails for asynchronous delivery.
///
/// At-most-one delivery attempt is made per job. Callers treat scheduling
/// failure as non-fatal: the parent operation logs it and carries on.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    async fn schedule(&self, email: Email) -> Result<(), AppError>;
}

/// Queue-backed scheduler: jobs go into a bounded channel drained by a
/// background worker task.
pub struct QueueNotifier {
    tx: mpsc::Sender<Email>,
}

impl QueueNotifier {
    /// Starts the delivery worker and returns the scheduler handle.
    pub fn start(capacity: usize) -> Arc<Self> {
        let (tx, mut rx) = mpsc::channel::<Email>(capacity);

        tokio::spawn(async move {
            while let Some(email) = rx.recv().await {
                match serde_json::to_string(&email) {
                    Ok(payload) => {
                        log::info!("dispatching notification to {}: {}", email.to, payload);
                    }
                    Err(e) => {
                        log::error!("failed to serialize notification job: {}", e);
                    }
                }
            }
        });

        Arc::new(Self { tx })
    }
}

#[async_trait]
impl NotificationScheduler for QueueNotifier {
    async fn schedule(&self, email: Email) -> Result<(), AppError> {
        // A full or closed queue fails the scheduling attempt, not the
        // caller's operation; there is no retry here.
        self.tx.try_send(email).map_err(|e| {
            AppError::InternalServerError(format!("notification queue unavailable: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_schedule_accepts_job() {
        let notifier = QueueNotifier::start(8);
        let result = notifier
            .schedule(Email {
                subject: "Registration".into(),
                body: "Welcome!".into(),
                to: "ann@example.com".into(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[actix_rt::test]
    async fn test_schedule_fails_when_queue_full() {
        // Capacity 1 with a parked worker is hard to arrange; instead drop
        // the receiving side by building the notifier by hand.
        let (tx, rx) = mpsc::channel::<Email>(1);
        drop(rx);
        let notifier = QueueNotifier { tx };

        let result = notifier
            .schedule(Email {
                subject: "Login".into(),
                body: "You signed in.".into(),
                to: "ann@example.com".into(),
            })
            .await;
        assert!(result.is_err());
    }
}
