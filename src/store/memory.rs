use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, DUPLICATE_EMAIL};
use crate::error::AppError;
use crate::models::{Task, User};

/// Process-local store. Vectors keep insertion order, which is also
/// creation order for tasks.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::BadRequest(DUPLICATE_EMAIL.into()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| t.user_id == user_id).cloned().collect())
    }

    async fn insert_task(&self, task: &Task) -> Result<(), AppError> {
        self.tasks.write().await.push(task.clone());
        Ok(())
    }

    async fn find_task(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn update_task(&self, task: &Task) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        let Some(stored) = tasks
            .iter_mut()
            .find(|t| t.id == task.id && t.user_id == task.user_id)
        else {
            return Ok(None);
        };
        stored.name = task.name.clone();
        stored.status = task.status.clone();
        Ok(Some(stored.clone()))
    }

    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        match tasks.iter().position(|t| t.id == id && t.user_id == user_id) {
            Some(index) => Ok(Some(tasks.remove(index))),
            None => Ok(None),
        }
    }
}
