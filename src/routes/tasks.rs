use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput},
    store::Store,
    validation::validate_task,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

/// Path ids that are not UUIDs cannot name a task.
fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

/// Retrieves all tasks owned by the authenticated user, oldest first.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn get_tasks(
    store: web::Data<dyn Store>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = store.list_tasks(caller.id).await?;
    log::debug!("Listing {} tasks for user {}", tasks.len(), caller.id);
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `name`: 3 to 20 characters (required).
/// - `status` (optional): `to_do`, `in_progress` or `done`. Defaults to `to_do`.
///
/// ## Responses:
/// - `200 OK`: `{message, result}` with the created task.
/// - `400 Bad Request`: `{message: [field errors]}`.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    store: web::Data<dyn Store>,
    caller: AuthenticatedUser,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let draft = validate_task(&body).map_err(AppError::Validation)?;
    let task = Task::new(draft, caller.id);
    store.insert_task(&task).await?;

    log::debug!("User {} created task {}", caller.id, task.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Successful!",
        "result": task,
    })))
}

/// Retrieves one task by id.
///
/// ## Responses:
/// - `200 OK`: `{result}` if the task exists and belongs to the caller,
///   otherwise `{message: "Not found"}`.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<dyn Store>,
    caller: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;
    let task = store.find_task(id, caller.id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(json!({ "result": task })))
}

/// Updates a task owned by the caller.
///
/// The body is validated like `create_task`. `name` is replaced; `status` only
/// when present. `id`, `createdAt` and `userId` never change.
///
/// ## Responses:
/// - `200 OK`: `{message, result}` with the updated task, or `{message: "Not found"}`.
/// - `400 Bad Request`: `{message: [field errors]}`.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<dyn Store>,
    caller: AuthenticatedUser,
    task_id: web::Path<String>,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let draft = validate_task(&body).map_err(AppError::Validation)?;
    let id = parse_task_id(&task_id)?;

    let mut task = store.find_task(id, caller.id).await?.ok_or(AppError::NotFound)?;
    task.apply(draft);
    let updated = store.update_task(&task).await?.ok_or(AppError::NotFound)?;

    log::debug!("User {} updated task {}", caller.id, updated.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Update successful!",
        "result": updated,
    })))
}

/// Deletes a task owned by the caller and returns it.
///
/// ## Responses:
/// - `200 OK`: `{message, result}` with the removed task, or `{message: "Not found"}`.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn Store>,
    caller: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;
    let removed = store.delete_task(id, caller.id).await?.ok_or(AppError::NotFound)?;

    log::debug!("User {} deleted task {}", caller.id, removed.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Delete successful!",
        "result": removed,
    })))
}
