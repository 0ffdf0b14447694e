use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use uuid::Uuid;

use super::{Store, DUPLICATE_EMAIL};
use crate::error::AppError;
use crate::models::{Task, User};

/// Creates the tables on first start. Existing tables are left untouched.
const SCHEMA: &str = r#"
DO $$ BEGIN
    CREATE TYPE task_status AS ENUM ('to_do', 'in_progress', 'done');
EXCEPTION
    WHEN duplicate_object THEN NULL;
END $$;

CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tasks (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    status task_status NOT NULL DEFAULT 'to_do',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    user_id UUID NOT NULL
);

CREATE INDEX IF NOT EXISTS tasks_user_id_idx ON tasks (user_id, created_at);
"#;

const TASK_COLUMNS: &str = "id, name, status, created_at, user_id";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        log::info!("Connected to Postgres");
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the schema if needed.
    pub async fn from_pool(pool: PgPool) -> Result<Self, AppError> {
        pool.execute(SCHEMA).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, password_hash FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let result = sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::BadRequest(DUPLICATE_EMAIL.into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at, id",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn insert_task(&self, task: &Task) -> Result<(), AppError> {
        sqlx::query("INSERT INTO tasks (id, name, status, created_at, user_id) VALUES ($1, $2, $3, $4, $5)")
            .bind(task.id)
            .bind(&task.name)
            .bind(&task.status)
            .bind(task.created_at)
            .bind(task.user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_task(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1 AND user_id = $2", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE tasks SET name = $1, status = $2 WHERE id = $3 AND user_id = $4 RETURNING {}",
            TASK_COLUMNS
        );
        let updated = sqlx::query_as::<_, Task>(&sql)
            .bind(&task.name)
            .bind(&task.status)
            .bind(task.id)
            .bind(task.user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "DELETE FROM tasks WHERE id = $1 AND user_id = $2 RETURNING {}",
            TASK_COLUMNS
        );
        let removed = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(removed)
    }
}
