//! Where a viewer reads the schedule from.

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use studiosync_core::models::time_slot::TimeSlot;

use crate::config::ViewerConfig;

#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// The whole schedule, in server order.
    async fn fetch_schedule(&self) -> Result<Vec<TimeSlot>>;
}

/// Reads `GET /api/schedule` from a running API server.
#[derive(Clone)]
pub struct HttpScheduleSource {
    client: reqwest::Client,
    url: String,
}

impl HttpScheduleSource {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.schedule_url(),
        }
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleSource {
    async fn fetch_schedule(&self) -> Result<Vec<TimeSlot>> {
        let slots = self
            .client
            .get(&self.url)
            .send()
            .await
            .wrap_err_with(|| format!("failed to reach {}", self.url))?
            .error_for_status()?
            .json::<Vec<TimeSlot>>()
            .await
            .wrap_err("schedule response was not a list of time slots")?;

        Ok(slots)
    }
}
