//! Storage seam between the schedule service and the backing database.
//!
//! Every failure of the backing store surfaces as
//! [`ScheduleError::StorageUnavailable`]; nothing here retries.

use async_trait::async_trait;
use studiosync_core::{
    errors::{ScheduleError, ScheduleResult},
    models::{schedule::CreateTimeSlotRequest, time_slot::TimeSlot},
};
use uuid::Uuid;

use crate::{
    DbPool,
    repositories::{admin, time_slot},
};

/// Persistent collection of time slots.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All slots in insertion order.
    async fn list(&self) -> ScheduleResult<Vec<TimeSlot>>;

    async fn get(&self, id: Uuid) -> ScheduleResult<Option<TimeSlot>>;

    async fn insert(&self, request: &CreateTimeSlotRequest) -> ScheduleResult<TimeSlot>;

    /// Overwrites the stored slot with `slot`'s content and returns the
    /// stored result with its bumped version.
    ///
    /// Fails with `NotFound` if the id is unknown and with `Conflict` if
    /// `expected_version` is set and no longer matches.
    async fn replace(
        &self,
        slot: &TimeSlot,
        expected_version: Option<i64>,
    ) -> ScheduleResult<TimeSlot>;

    async fn count(&self) -> ScheduleResult<i64>;
}

/// Credential lookup for the admin gate.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn verify_admin(&self, username: &str, password: &str) -> ScheduleResult<bool>;
}

pub(crate) fn stale_version(id: Uuid, expected_version: Option<i64>) -> ScheduleError {
    ScheduleError::Conflict(format!(
        "Time slot {} changed since version {}",
        id,
        expected_version.unwrap_or_default()
    ))
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgScheduleStore {
    pool: DbPool,
}

impl PgScheduleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn list(&self) -> ScheduleResult<Vec<TimeSlot>> {
        let rows = time_slot::list_time_slots(&self.pool).await?;
        Ok(rows.into_iter().map(TimeSlot::from).collect())
    }

    async fn get(&self, id: Uuid) -> ScheduleResult<Option<TimeSlot>> {
        let row = time_slot::get_time_slot_by_id(&self.pool, id).await?;
        Ok(row.map(TimeSlot::from))
    }

    async fn insert(&self, request: &CreateTimeSlotRequest) -> ScheduleResult<TimeSlot> {
        let row =
            time_slot::create_time_slot(&self.pool, &request.time_range, &request.classes_by_day)
                .await?;
        Ok(row.into())
    }

    async fn replace(
        &self,
        slot: &TimeSlot,
        expected_version: Option<i64>,
    ) -> ScheduleResult<TimeSlot> {
        if let Some(row) = time_slot::update_time_slot(&self.pool, slot, expected_version).await? {
            return Ok(row.into());
        }

        // Nothing written: either the row is gone or the version guard failed.
        match time_slot::get_time_slot_by_id(&self.pool, slot.id).await? {
            Some(_) => Err(stale_version(slot.id, expected_version)),
            None => Err(ScheduleError::slot_not_found(slot.id)),
        }
    }

    async fn count(&self) -> ScheduleResult<i64> {
        Ok(time_slot::count_time_slots(&self.pool).await?)
    }
}

#[async_trait]
impl AdminStore for PgScheduleStore {
    async fn verify_admin(&self, username: &str, password: &str) -> ScheduleResult<bool> {
        Ok(admin::verify_admin_password(&self.pool, username, password).await?)
    }
}
