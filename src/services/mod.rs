//!
//! # Service Layer
//!
//! Business logic orchestrated over the repository traits. The HTTP layer
//! receives a `Services` aggregate as app data and never touches the
//! database or token machinery directly.

pub mod email;
pub mod tasks;
pub mod users;

pub use email::{Email, NotificationScheduler, QueueNotifier};
pub use tasks::TaskService;
pub use users::UserService;

/// All application services, bundled for registration as actix app data.
pub struct Services {
    pub users: UserService,
    pub tasks: TaskService,
}
