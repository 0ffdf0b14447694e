pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use actix_web::web;

use crate::{config::Config, error::AppError, models::User};

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};

/// Hashing and token operations shared by the auth routes and the middleware.
///
/// Registered as `web::Data<AuthService>`; everything in it is read-only after
/// construction. bcrypt work is pushed to actix's blocking pool.
#[derive(Clone)]
pub struct AuthService {
    tokens: TokenKeys,
    bcrypt_cost: u32,
    /// Verified against when no account matches a login, so both failure paths
    /// do the same amount of bcrypt work.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(jwt_secret: &str, token_ttl_hours: Option<i64>, bcrypt_cost: u32) -> Result<Self, AppError> {
        Ok(Self {
            tokens: TokenKeys::new(jwt_secret, token_ttl_hours),
            bcrypt_cost,
            dummy_hash: hash_password("no-such-account", bcrypt_cost)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.jwt_secret, config.token_ttl_hours, config.bcrypt_cost)
    }

    pub async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        web::block(move || hash_password(&password, cost)).await?
    }

    /// Checks `password` against `user`'s hash. Returns `false` when `user` is
    /// `None`, after spending the same effort as a real comparison.
    pub async fn check_credentials(&self, password: String, user: Option<&User>) -> Result<bool, AppError> {
        let (hash, known) = match user {
            Some(user) => (user.password_hash.clone(), true),
            None => (self.dummy_hash.clone(), false),
        };
        let matched = web::block(move || verify_password(&password, &hash)).await??;
        Ok(known && matched)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        self.tokens.issue(user)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        self.tokens.verify(token)
    }
}
