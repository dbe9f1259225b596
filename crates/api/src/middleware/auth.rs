//! # Authentication Module
//!
//! Password hashing for admin accounts and the admin gate guarding the write
//! routes. The gate is a plain HTTP Basic check against the admin store; when
//! no admin store is configured every request passes.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use eyre::Result;
use studiosync_core::errors::ScheduleError;
use tracing::warn;

use crate::{ApiState, middleware::error_handling::AppError};

/// Hashes a password using the Argon2 algorithm
///
/// Returns the hash in PHC string format (algorithm, version, parameters,
/// salt and hash), ready to store in `admin_users.password_hash`.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Extracts `(username, password)` from an `Authorization: Basic` header.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Rejects the request with 401 unless it carries valid admin credentials.
pub async fn require_admin(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(admins) = &state.admins else {
        return Ok(next.run(request).await);
    };

    let (username, password) = basic_credentials(request.headers()).ok_or_else(|| {
        ScheduleError::Authentication("Admin credentials required".to_string())
    })?;

    if !admins.verify_admin(&username, &password).await? {
        warn!(username = %username, "rejected admin credentials");
        return Err(AppError(ScheduleError::Authentication(
            "Invalid admin credentials".to_string(),
        )));
    }

    Ok(next.run(request).await)
}
