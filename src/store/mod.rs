//! Persistence for users and tasks.
//!
//! Handlers only see the [`Store`] trait. Every task operation takes the
//! caller's id and matches on it, which is the only thing keeping one user's
//! tasks away from another.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Message returned when registering an email that already has an account.
pub const DUPLICATE_EMAIL: &str = "Email exist!";

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Fails with `AppError::BadRequest(DUPLICATE_EMAIL)` if the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    /// Tasks owned by `user_id`, oldest first.
    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, AppError>;

    async fn insert_task(&self, task: &Task) -> Result<(), AppError>;

    async fn find_task(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, AppError>;

    /// Writes `name` and `status` of an existing task owned by `task.user_id`.
    /// Returns `None` if no such task exists anymore.
    async fn update_task(&self, task: &Task) -> Result<Option<Task>, AppError>;

    /// Removes and returns the task, if `user_id` owns it.
    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, AppError>;
}

/// Opens the store named by `DATABASE_URL`: `memory://` keeps everything in
/// process, anything else is treated as a Postgres URL.
pub async fn connect(config: &Config) -> Result<Arc<dyn Store>, AppError> {
    if config.database_url.starts_with("memory:") {
        log::warn!("Using the in-memory store; data is lost on shutdown");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = PgStore::connect(&config.database_url, config.database_max_connections).await?;
    Ok(Arc::new(store))
}
