use crate::models::DbTimeSlot;
use chrono::Utc;
use eyre::Result;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use studiosync_core::models::time_slot::{TimeSlot, WeekClasses};
use uuid::Uuid;

pub async fn create_time_slot(
    pool: &Pool<Postgres>,
    time_range: &str,
    classes: &WeekClasses,
) -> Result<DbTimeSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating time slot: id={}, time_range={}", id, time_range);

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, time_range, classes, version, created_at)
        VALUES ($1, $2, $3, 1, $4)
        RETURNING id, time_range, classes, version, created_at
        "#,
    )
    .bind(id)
    .bind(time_range)
    .bind(Json(classes))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(time_slot)
}

pub async fn list_time_slots(pool: &Pool<Postgres>) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, time_range, classes, version, created_at
        FROM time_slots
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!("Listed {} time slots", time_slots.len());
    Ok(time_slots)
}

pub async fn get_time_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, time_range, classes, version, created_at
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if time_slot.is_none() {
        tracing::debug!("Time slot not found: id={}", id);
    }

    Ok(time_slot)
}

/// Writes `slot`'s content over the stored row and bumps its version.
///
/// With `expected_version` set, the row is only written while its version
/// still matches. Returns `None` when no row was written.
pub async fn update_time_slot(
    pool: &Pool<Postgres>,
    slot: &TimeSlot,
    expected_version: Option<i64>,
) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET time_range = $2, classes = $3, version = version + 1
        WHERE id = $1 AND ($4::BIGINT IS NULL OR version = $4)
        RETURNING id, time_range, classes, version, created_at
        "#,
    )
    .bind(slot.id)
    .bind(&slot.time_range)
    .bind(Json(&slot.classes_by_day))
    .bind(expected_version)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

pub async fn count_time_slots(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM time_slots")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
