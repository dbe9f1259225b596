//! # Schedule Service
//!
//! Validates and persists time slot changes, serves the full schedule, and
//! tells the [`ScheduleNotifier`] about every successful write.
//!
//! A write publishes exactly one event, and only after the store has
//! acknowledged it. Failed writes publish nothing.

use std::sync::Arc;

use studiosync_core::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        event::ScheduleEvent,
        schedule::{CreateTimeSlotRequest, UpdateTimeSlotRequest},
        time_slot::TimeSlot,
    },
};
use studiosync_db::store::ScheduleStore;
use tracing::{error, info};
use uuid::Uuid;

use crate::notifier::ScheduleNotifier;

#[derive(Clone)]
pub struct ScheduleService {
    store: Arc<dyn ScheduleStore>,
    notifier: ScheduleNotifier,
}

impl ScheduleService {
    pub fn new(store: Arc<dyn ScheduleStore>, notifier: ScheduleNotifier) -> Self {
        Self { store, notifier }
    }

    pub fn notifier(&self) -> &ScheduleNotifier {
        &self.notifier
    }

    /// Every time slot in store order. Every call reads the store.
    pub async fn list_schedule(&self) -> ScheduleResult<Vec<TimeSlot>> {
        self.store.list().await.inspect_err(|err| {
            error!(error = %err, "failed to list schedule");
        })
    }

    /// Merges `update` into slot `id` and persists it.
    ///
    /// # Errors
    ///
    /// - `Validation` if the payload is malformed; nothing is written
    /// - `NotFound` if `id` is unknown
    /// - `Conflict` if `update.version` is set and stale
    /// - `StorageUnavailable` if the store fails
    pub async fn update_slot(
        &self,
        id: Uuid,
        update: UpdateTimeSlotRequest,
    ) -> ScheduleResult<TimeSlot> {
        update.validate()?;

        let current = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| ScheduleError::slot_not_found(id))?;

        if let Some(expected) = update.version {
            if expected != current.version {
                return Err(ScheduleError::Conflict(format!(
                    "Time slot {} is at version {}, update was based on version {}",
                    id, current.version, expected
                )));
            }
        }

        let next = update.apply_to(&current);
        let stored = self.store.replace(&next, update.version).await?;

        info!(id = %stored.id, version = stored.version, "time slot updated");
        self.notifier.publish(ScheduleEvent::updated(stored.id));

        Ok(stored)
    }

    /// Adds a new row to the grid.
    pub async fn create_slot(&self, request: CreateTimeSlotRequest) -> ScheduleResult<TimeSlot> {
        request.validate()?;

        let stored = self.store.insert(&request).await?;

        info!(id = %stored.id, time_range = %stored.time_range, "time slot created");
        self.notifier.publish(ScheduleEvent::updated(stored.id));

        Ok(stored)
    }
}
