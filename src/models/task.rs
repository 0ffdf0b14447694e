use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::TaskDraft;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    ToDo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "to_do",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the [`TaskStatus`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let allowed: Vec<&str> = TaskStatus::ALL.iter().map(TaskStatus::as_str).collect();
        write!(f, "\"status\" must be one of [{}]", allowed.join(", "))
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .iter()
            .find(|status| status.as_str() == s)
            .cloned()
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    match status.parse::<TaskStatus>() {
        Ok(_) => Ok(()),
        Err(unknown) => {
            let mut err = ValidationError::new("status");
            err.message = Some(Cow::from(unknown.to_string()));
            Err(err)
        }
    }
}

/// Body of `POST /tasks` and `PUT /tasks/{id}`.
///
/// Both fields are optional at the type level so that a missing `name` is
/// reported as a field error instead of a deserialization failure.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TaskInput {
    /// Must be between 3 and 20 characters.
    #[validate(required, length(min = 3, max = 20))]
    pub name: Option<String>,

    /// One of `to_do`, `in_progress`, `done`. New tasks default to `to_do`.
    #[validate(custom = "validate_status")]
    pub status: Option<String>,
}

/// A task as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub status: TaskStatus,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Owner. Every store query filters on it.
    pub user_id: Uuid,
}

impl Task {
    /// Builds a new task owned by `user_id` from a validated draft.
    pub fn new(draft: TaskDraft, user_id: Uuid) -> Self {
        let status = draft.status_or_default();
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            status,
            created_at: Utc::now(),
            user_id,
        }
    }

    /// Merges an update into the task. Status is only replaced when the
    /// update carried one.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.name = draft.name;
        if let Some(status) = draft.status {
            self.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let owner = Uuid::new_v4();
        let draft = TaskDraft {
            name: "Buy milk".to_string(),
            status: None,
        };

        let task = Task::new(draft, owner);
        assert_eq!(task.name, "Buy milk");
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.user_id, owner);
    }

    #[test]
    fn test_apply_keeps_status_when_absent() {
        let mut task = Task::new(
            TaskDraft {
                name: "Old name".to_string(),
                status: Some(TaskStatus::Done),
            },
            Uuid::new_v4(),
        );
        let created_at = task.created_at;
        let id = task.id;

        task.apply(TaskDraft {
            name: "New name".to_string(),
            status: None,
        });
        assert_eq!(task.name, "New name");
        assert_eq!(task.status, TaskStatus::Done);

        task.apply(TaskDraft {
            name: "New name".to_string(),
            status: Some(TaskStatus::InProgress),
        });
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.created_at, created_at);
        assert_eq!(task.id, id);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("to_do".parse::<TaskStatus>(), Ok(TaskStatus::ToDo));
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Done));
        assert!("to do".parse::<TaskStatus>().is_err());
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task::new(
            TaskDraft {
                name: "Read book".to_string(),
                status: None,
            },
            Uuid::new_v4(),
        );
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "to_do");
        assert!(json["createdAt"].is_string());
        assert!(json["userId"].is_string());
    }

    #[test]
    fn test_task_input_rejects_unknown_fields() {
        let parsed = serde_json::from_str::<TaskInput>(r#"{"name": "abc", "owner": "me"}"#);
        assert!(parsed.is_err());
    }
}
