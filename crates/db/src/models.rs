use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use studiosync_core::models::time_slot::{TimeSlot, WeekClasses};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub time_range: String,
    pub classes: Json<WeekClasses>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        TimeSlot {
            id: row.id,
            time_range: row.time_range,
            classes_by_day: row.classes.0,
            version: row.version,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAdminUser {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
