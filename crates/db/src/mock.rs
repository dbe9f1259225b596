use async_trait::async_trait;
use mockall::mock;
use studiosync_core::{
    errors::ScheduleResult,
    models::{schedule::CreateTimeSlotRequest, time_slot::TimeSlot},
};
use uuid::Uuid;

use crate::store::{AdminStore, ScheduleStore};

// Mock stores for testing
mock! {
    pub ScheduleStore {}

    #[async_trait]
    impl ScheduleStore for ScheduleStore {
        async fn list(&self) -> ScheduleResult<Vec<TimeSlot>>;

        async fn get(&self, id: Uuid) -> ScheduleResult<Option<TimeSlot>>;

        async fn insert(&self, request: &CreateTimeSlotRequest) -> ScheduleResult<TimeSlot>;

        async fn replace(
            &self,
            slot: &TimeSlot,
            expected_version: Option<i64>,
        ) -> ScheduleResult<TimeSlot>;

        async fn count(&self) -> ScheduleResult<i64>;
    }
}

mock! {
    pub AdminStore {}

    #[async_trait]
    impl AdminStore for AdminStore {
        async fn verify_admin(&self, username: &str, password: &str) -> ScheduleResult<bool>;
    }
}
