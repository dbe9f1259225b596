use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Day codes of the weekly grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
            DayOfWeek::Sun => "Sun",
        }
    }
}

/// One cell of the grid: a class offered on a given day within a time slot.
///
/// Every field is free text and may be blank; a missing or `null` field reads
/// as blank. `type` is only conventionally restricted (see [`ClassCategory`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    #[serde(default, deserialize_with = "blank_if_null")]
    pub name: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub location: String,
    #[serde(default, rename = "type", deserialize_with = "blank_if_null")]
    pub class_type: String,
}

fn blank_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ClassEntry {
    pub fn new(name: &str, location: &str, class_type: &str) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            class_type: class_type.to_string(),
        }
    }

    pub fn category(&self) -> ClassCategory {
        ClassCategory::from_type(&self.class_type)
    }
}

/// Typed view over the conventional `type` values of a [`ClassEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassCategory {
    Personal,
    Online,
    SpecialProgram,
    Rest,
    Other(String),
}

impl ClassCategory {
    pub fn from_type(value: &str) -> Self {
        match value.trim() {
            "Personal" => ClassCategory::Personal,
            "Online" => ClassCategory::Online,
            "Special Program" => ClassCategory::SpecialProgram,
            "Rest" => ClassCategory::Rest,
            other => ClassCategory::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ClassCategory::Personal => "Personal",
            ClassCategory::Online => "Online",
            ClassCategory::SpecialProgram => "Special Program",
            ClassCategory::Rest => "Rest",
            ClassCategory::Other(label) => label,
        }
    }
}

/// The seven day cells of one slot. All seven keys are always serialized;
/// an empty cell is `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekClasses {
    #[serde(rename = "Mon", default)]
    pub mon: Option<ClassEntry>,
    #[serde(rename = "Tue", default)]
    pub tue: Option<ClassEntry>,
    #[serde(rename = "Wed", default)]
    pub wed: Option<ClassEntry>,
    #[serde(rename = "Thu", default)]
    pub thu: Option<ClassEntry>,
    #[serde(rename = "Fri", default)]
    pub fri: Option<ClassEntry>,
    #[serde(rename = "Sat", default)]
    pub sat: Option<ClassEntry>,
    #[serde(rename = "Sun", default)]
    pub sun: Option<ClassEntry>,
}

impl WeekClasses {
    fn slot(&self, day: DayOfWeek) -> &Option<ClassEntry> {
        match day {
            DayOfWeek::Mon => &self.mon,
            DayOfWeek::Tue => &self.tue,
            DayOfWeek::Wed => &self.wed,
            DayOfWeek::Thu => &self.thu,
            DayOfWeek::Fri => &self.fri,
            DayOfWeek::Sat => &self.sat,
            DayOfWeek::Sun => &self.sun,
        }
    }

    fn slot_mut(&mut self, day: DayOfWeek) -> &mut Option<ClassEntry> {
        match day {
            DayOfWeek::Mon => &mut self.mon,
            DayOfWeek::Tue => &mut self.tue,
            DayOfWeek::Wed => &mut self.wed,
            DayOfWeek::Thu => &mut self.thu,
            DayOfWeek::Fri => &mut self.fri,
            DayOfWeek::Sat => &mut self.sat,
            DayOfWeek::Sun => &mut self.sun,
        }
    }

    pub fn get(&self, day: DayOfWeek) -> Option<&ClassEntry> {
        self.slot(day).as_ref()
    }

    /// Replaces the whole cell for `day`; `None` clears it.
    pub fn set(&mut self, day: DayOfWeek, entry: Option<ClassEntry>) {
        *self.slot_mut(day) = entry;
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, Option<&ClassEntry>)> + '_ {
        DayOfWeek::ALL.into_iter().map(move |day| (day, self.get(day)))
    }

    /// Builds a week where every day holds the same entry.
    pub fn every_day(entry: ClassEntry) -> Self {
        let mut week = WeekClasses::default();
        for day in DayOfWeek::ALL {
            week.set(day, Some(entry.clone()));
        }
        week
    }
}

/// One row of the weekly class grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub time_range: String,
    pub classes_by_day: WeekClasses,
    /// Write counter, bumped by the store on every successful write.
    pub version: i64,
}
