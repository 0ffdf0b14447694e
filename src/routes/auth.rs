use crate::{
    auth::AuthService,
    error::AppError,
    models::{LoginRequest, User, UserInput},
    store::{Store, DUPLICATE_EMAIL},
    validation::validate_user,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: `{message, result}` with the new user (no password hash).
/// - `400 Bad Request`: `{message: [field errors]}`, or the text `Email exist!`.
#[post("/register")]
pub async fn register(
    store: web::Data<dyn Store>,
    auth: web::Data<AuthService>,
    body: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    let credentials = validate_user(&body).map_err(AppError::Validation)?;
    let email = credentials.email.trim();

    if store.find_user_by_email(email).await?.is_some() {
        return Err(AppError::BadRequest(DUPLICATE_EMAIL.into()));
    }

    let password_hash = auth.hash_password(credentials.password).await?;
    let user = User::new(email, password_hash);
    store.insert_user(&user).await?;

    log::info!("Registered user {}", user.id);
    Ok(HttpResponse::Created().json(json!({
        "message": "Successful!",
        "result": user,
    })))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `{message, token}`.
/// - `400 Bad Request`: the text `Invalid email or password`, whether the email
///   is unknown, the password is wrong or the body is not a login payload.
#[post("/login")]
pub async fn login(
    store: web::Data<dyn Store>,
    auth: web::Data<AuthService>,
    body: Result<web::Json<LoginRequest>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let LoginRequest { email, password } = match body {
        Ok(body) => body.into_inner(),
        Err(err) => {
            log::debug!("Rejected login body: {}", err);
            return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
        }
    };
    let user = store.find_user_by_email(email.trim()).await?;

    if !auth.check_credentials(password, user.as_ref()).await? {
        log::warn!("Failed login attempt");
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }
    let Some(user) = user else {
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    };

    let token = auth.issue_token(&user)?;
    log::info!("User {} logged in", user.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "token": token,
    })))
}
