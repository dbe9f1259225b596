use crate::models::DbAdminUser;
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};

/// Creates the admin row, or replaces its password hash if it exists.
pub async fn upsert_admin_user(
    pool: &Pool<Postgres>,
    username: &str,
    password_hash: &str,
) -> Result<DbAdminUser> {
    let admin = sqlx::query_as::<_, DbAdminUser>(
        r#"
        INSERT INTO admin_users (username, password_hash, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash
        RETURNING username, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::debug!("Admin user stored: username={}", admin.username);
    Ok(admin)
}

pub async fn get_admin_user(pool: &Pool<Postgres>, username: &str) -> Result<Option<DbAdminUser>> {
    let admin = sqlx::query_as::<_, DbAdminUser>(
        r#"
        SELECT username, password_hash, created_at
        FROM admin_users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

/// Checks `password` against an Argon2 PHC hash string.
pub fn verify_password_hash(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(password_hash)
        .map_err(|e| eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(is_valid)
}

pub async fn verify_admin_password(
    pool: &Pool<Postgres>,
    username: &str,
    password: &str,
) -> Result<bool> {
    match get_admin_user(pool, username).await? {
        Some(admin) => verify_password_hash(&admin.password_hash, password),
        None => Ok(false),
    }
}
