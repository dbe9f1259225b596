use async_trait::async_trait;
use eyre::Result;
use mockall::mock;
use studiosync_core::models::time_slot::TimeSlot;

use crate::source::ScheduleSource;

mock! {
    pub ScheduleSource {}

    #[async_trait]
    impl ScheduleSource for ScheduleSource {
        async fn fetch_schedule(&self) -> Result<Vec<TimeSlot>>;
    }
}
