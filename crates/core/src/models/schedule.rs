use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::time_slot::{ClassEntry, DayOfWeek, TimeSlot, WeekClasses};

/// Payload for creating a new row of the grid.
///
/// Also accepts the legacy field names `time` and `classes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
    #[serde(alias = "time")]
    pub time_range: String,
    #[serde(default, alias = "classes")]
    pub classes_by_day: WeekClasses,
}

impl CreateTimeSlotRequest {
    pub fn validate(&self) -> ScheduleResult<()> {
        validate_time_range(&self.time_range)
    }
}

/// Partial update of a time slot, merged into the stored row.
///
/// * `timeRange` replaces the display string when present.
/// * Each day present in `classesByDay` replaces that whole cell; `null`
///   clears it. Days not present are left untouched.
/// * `version`, when present, must match the stored version or the update is
///   rejected as stale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeSlotRequest {
    #[serde(default, alias = "time", skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    #[serde(default, alias = "classes", skip_serializing_if = "Option::is_none")]
    pub classes_by_day: Option<BTreeMap<DayOfWeek, Option<ClassEntry>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl UpdateTimeSlotRequest {
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.time_range.is_none() && self.classes_by_day.is_none() {
            return Err(ScheduleError::Validation(
                "update must supply timeRange or classesByDay".to_string(),
            ));
        }

        if let Some(time_range) = &self.time_range {
            validate_time_range(time_range)?;
        }

        if let Some(version) = self.version {
            if version < 1 {
                return Err(ScheduleError::Validation(format!(
                    "version must be positive, got {}",
                    version
                )));
            }
        }

        Ok(())
    }

    /// Returns `slot` with this update merged in. The version is carried over
    /// unchanged; the store bumps it on write.
    pub fn apply_to(&self, slot: &TimeSlot) -> TimeSlot {
        let mut next = slot.clone();

        if let Some(time_range) = &self.time_range {
            next.time_range = time_range.clone();
        }

        if let Some(days) = &self.classes_by_day {
            for (day, entry) in days {
                next.classes_by_day.set(*day, entry.clone());
            }
        }

        next
    }
}

fn validate_time_range(time_range: &str) -> ScheduleResult<()> {
    if time_range.trim().is_empty() {
        return Err(ScheduleError::Validation(
            "timeRange must not be blank".to_string(),
        ));
    }
    Ok(())
}
