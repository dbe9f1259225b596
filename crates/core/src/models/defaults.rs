//! The studio's standard week, used to seed an empty store and as the
//! viewer's placeholder when nothing could be fetched.

use uuid::Uuid;

use crate::models::schedule::CreateTimeSlotRequest;
use crate::models::time_slot::{ClassEntry, TimeSlot, WeekClasses};

fn week(days: [(&str, &str, &str); 7]) -> WeekClasses {
    let [mon, tue, wed, thu, fri, sat, sun] = days.map(|(name, location, class_type)| {
        Some(ClassEntry::new(name, location, class_type))
    });
    WeekClasses {
        mon,
        tue,
        wed,
        thu,
        fri,
        sat,
        sun,
    }
}

pub fn default_schedule() -> Vec<CreateTimeSlotRequest> {
    vec![
        CreateTimeSlotRequest {
            time_range: "06:00 AM - 07:00 AM".to_string(),
            classes_by_day: week([
                ("Morning Hatha", "Studio", "Personal"),
                ("Vinyasa Flow", "Studio", "Personal"),
                ("Morning Hatha", "Studio", "Personal"),
                ("Vinyasa Flow", "Studio", "Personal"),
                ("Morning Hatha", "Studio", "Personal"),
                ("Sunrise Yoga", "Studio", "Personal"),
                ("Gentle Flow", "Studio", "Personal"),
            ]),
        },
        CreateTimeSlotRequest {
            time_range: "07:30 AM - 08:30 AM".to_string(),
            classes_by_day: week([
                ("Power Yoga", "Studio", "Online"),
                ("Prenatal Yoga", "Studio", "Special Program"),
                ("Power Yoga", "Studio", "Online"),
                ("Prenatal Yoga", "Studio", "Special Program"),
                ("Power Yoga", "Studio", "Online"),
                ("Family Yoga", "Studio", "Special Program"),
                ("Meditation", "Studio", "Personal"),
            ]),
        },
        CreateTimeSlotRequest {
            time_range: "06:00 PM - 07:00 PM".to_string(),
            classes_by_day: week([
                ("Evening Flow", "Zoom", "Online"),
                ("Restorative", "Zoom", "Online"),
                ("Evening Flow", "Zoom", "Online"),
                ("Restorative", "Zoom", "Online"),
                ("Evening Flow", "Zoom", "Online"),
                ("Rest", "Rest", "Rest"),
                ("Rest", "Rest", "Rest"),
            ]),
        },
        CreateTimeSlotRequest {
            time_range: "07:30 PM - 08:30 PM".to_string(),
            classes_by_day: week([
                ("Yin Yoga", "Studio", "Personal"),
                ("Beginner Flow", "Studio", "Personal"),
                ("Yin Yoga", "Studio", "Personal"),
                ("Beginner Flow", "Studio", "Personal"),
                ("Yin Yoga", "Studio", "Personal"),
                ("Rest", "Rest", "Rest"),
                ("Rest", "Rest", "Rest"),
            ]),
        },
    ]
}

/// [`default_schedule`] as displayable slots. Ids are fixed and the version
/// is 0, which no stored slot ever has.
pub fn placeholder_schedule() -> Vec<TimeSlot> {
    default_schedule()
        .into_iter()
        .enumerate()
        .map(|(index, slot)| TimeSlot {
            id: Uuid::from_u128(index as u128 + 1),
            time_range: slot.time_range,
            classes_by_day: slot.classes_by_day,
            version: 0,
        })
        .collect()
}
