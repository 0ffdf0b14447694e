#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Domain models, request validation, authentication, persistence and route"]
#![doc = "configuration for the task-tracking API. The binary (`main.rs`) loads the"]
#![doc = "configuration, opens the store and mounts `routes::config` under `/api`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod validation;

pub use crate::error::AppError;
