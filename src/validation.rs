//! Request payload validation.
//!
//! The input structs in [`crate::models`] carry their rules as `validator`
//! derives. The functions here run those rules and turn the result into the
//! flat list of [`FieldError`]s the API returns, or into the typed values
//! handlers work with once validation passed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{TaskInput, TaskStatus, UserInput};

/// A single failed rule, reported to clients as `{message, path, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    pub path: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Error for a body that could not be deserialized at all.
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            kind: "body".to_string(),
        }
    }
}

/// Credentials that passed [`validate_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Task fields that passed [`validate_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    /// `None` when the payload left status out.
    pub status: Option<TaskStatus>,
}

impl TaskDraft {
    /// Status to use for a new task.
    pub fn status_or_default(&self) -> TaskStatus {
        self.status.clone().unwrap_or_default()
    }
}

/// Checks a registration payload: `email` must be present and well-formed and
/// `password` must be at least 6 characters.
pub fn validate_user(input: &UserInput) -> Result<Credentials, Vec<FieldError>> {
    input.validate().map_err(|e| field_errors(&e))?;
    Ok(Credentials {
        email: input.email.clone().unwrap_or_default(),
        password: input.password.clone().unwrap_or_default(),
    })
}

/// Checks a task payload: `name` must be 3 to 20 characters once trimmed and
/// `status`, if given, one of `to_do`, `in_progress`, `done`.
pub fn validate_task(input: &TaskInput) -> Result<TaskDraft, Vec<FieldError>> {
    let trimmed = TaskInput {
        name: input.name.as_deref().map(|name| name.trim().to_string()),
        status: input.status.clone(),
    };
    trimmed.validate().map_err(|e| field_errors(&e))?;
    // `validate_status` already rejected anything unparseable.
    let status = match trimmed.status.as_deref() {
        Some(raw) => Some(raw.parse::<TaskStatus>().map_err(|e| {
            vec![FieldError {
                message: e.to_string(),
                path: vec!["status".to_string()],
                kind: "status".to_string(),
            }]
        })?),
        None => None,
    };
    Ok(TaskDraft {
        name: trimmed.name.unwrap_or_default(),
        status,
    })
}

/// Flattens `validator` output into field errors sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<(&str, &Vec<ValidationError>)> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                message: describe(field, err),
                path: vec![field.to_string()],
                kind: err.code.to_string(),
            })
        })
        .collect()
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "required" => format!("\"{}\" is required", field),
        "email" => format!("\"{}\" must be a valid email", field),
        "length" => describe_length(field, &error.params),
        code => format!("\"{}\" failed the {} rule", field, code),
    }
}

fn describe_length(field: &str, params: &HashMap<std::borrow::Cow<'static, str>, serde_json::Value>) -> String {
    let len = params
        .get("value")
        .and_then(|v| v.as_str())
        .map(|s| s.chars().count() as u64);
    let min = params.get("min").and_then(|v| v.as_u64());
    let max = params.get("max").and_then(|v| v.as_u64());

    match (len, min, max) {
        (Some(len), Some(min), _) if len < min => {
            format!("\"{}\" length must be at least {} characters long", field, min)
        }
        (Some(_), _, Some(max)) => {
            format!("\"{}\" length must be less than or equal to {} characters long", field, max)
        }
        (None, Some(min), Some(max)) => {
            format!("\"{}\" length must be between {} and {} characters", field, min, max)
        }
        (_, Some(min), None) => {
            format!("\"{}\" length must be at least {} characters long", field, min)
        }
        _ => format!("\"{}\" has an invalid length", field),
    }
}
