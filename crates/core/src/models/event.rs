use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event pushed to live viewers.
///
/// Events only say *that* the schedule changed; receivers refetch the whole
/// schedule. `id` names the slot that was written when known and is a hint
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ScheduleEvent {
    ScheduleUpdated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<Uuid>,
    },
}

impl ScheduleEvent {
    pub fn updated(id: Uuid) -> Self {
        ScheduleEvent::ScheduleUpdated { id: Some(id) }
    }

    /// Stand-in for one or more events a slow subscriber missed.
    pub fn coalesced() -> Self {
        ScheduleEvent::ScheduleUpdated { id: None }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScheduleEvent::ScheduleUpdated { .. } => "scheduleUpdated",
        }
    }
}
