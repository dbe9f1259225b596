//! Process-local store for tests and `STORE=memory` runs.

use std::collections::HashMap;

use async_trait::async_trait;
use studiosync_core::{
    errors::{ScheduleError, ScheduleResult},
    models::{schedule::CreateTimeSlotRequest, time_slot::TimeSlot},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    repositories::admin::verify_password_hash,
    store::{AdminStore, ScheduleStore, stale_version},
};

#[derive(Default)]
pub struct InMemoryScheduleStore {
    slots: RwLock<Vec<TimeSlot>>,
    admins: RwLock<HashMap<String, String>>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an admin with an already hashed password.
    pub async fn add_admin(&self, username: &str, password_hash: &str) {
        self.admins
            .write()
            .await
            .insert(username.to_string(), password_hash.to_string());
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn list(&self) -> ScheduleResult<Vec<TimeSlot>> {
        Ok(self.slots.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> ScheduleResult<Option<TimeSlot>> {
        let slots = self.slots.read().await;
        Ok(slots.iter().find(|slot| slot.id == id).cloned())
    }

    async fn insert(&self, request: &CreateTimeSlotRequest) -> ScheduleResult<TimeSlot> {
        let slot = TimeSlot {
            id: Uuid::new_v4(),
            time_range: request.time_range.clone(),
            classes_by_day: request.classes_by_day.clone(),
            version: 1,
        };
        self.slots.write().await.push(slot.clone());
        Ok(slot)
    }

    async fn replace(
        &self,
        slot: &TimeSlot,
        expected_version: Option<i64>,
    ) -> ScheduleResult<TimeSlot> {
        let mut slots = self.slots.write().await;
        let stored = slots
            .iter_mut()
            .find(|stored| stored.id == slot.id)
            .ok_or_else(|| ScheduleError::slot_not_found(slot.id))?;

        if let Some(expected) = expected_version {
            if stored.version != expected {
                return Err(stale_version(slot.id, expected_version));
            }
        }

        stored.time_range = slot.time_range.clone();
        stored.classes_by_day = slot.classes_by_day.clone();
        stored.version += 1;
        Ok(stored.clone())
    }

    async fn count(&self) -> ScheduleResult<i64> {
        Ok(self.slots.read().await.len() as i64)
    }
}

#[async_trait]
impl AdminStore for InMemoryScheduleStore {
    async fn verify_admin(&self, username: &str, password: &str) -> ScheduleResult<bool> {
        let admins = self.admins.read().await;
        match admins.get(username) {
            Some(hash) => Ok(verify_password_hash(hash, password)?),
            None => Ok(false),
        }
    }
}
