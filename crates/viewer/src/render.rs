use studiosync_core::models::time_slot::{ClassCategory, ClassEntry, DayOfWeek};

use crate::viewer::{ScheduleOrigin, ScheduleSnapshot};

const EMPTY_CELL: &str = "-";

fn cell(entry: Option<&ClassEntry>) -> String {
    let Some(entry) = entry else {
        return EMPTY_CELL.to_string();
    };
    match entry.category() {
        ClassCategory::Rest => "Rest".to_string(),
        category => format!("{} @ {} [{}]", entry.name, entry.location, category.label()),
    }
}

/// Renders the schedule as a fixed-width text grid, one row per time slot.
pub fn render_table(snapshot: &ScheduleSnapshot) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(snapshot.slots.len() + 1);
    rows.push(
        std::iter::once("Time".to_string())
            .chain(DayOfWeek::ALL.iter().map(|day| day.code().to_string()))
            .collect(),
    );
    for slot in &snapshot.slots {
        rows.push(
            std::iter::once(slot.time_range.clone())
                .chain(slot.classes_by_day.iter().map(|(_, entry)| cell(entry)))
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..=DayOfWeek::ALL.len())
        .map(|column| {
            rows.iter()
                .map(|row| row[column].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    match snapshot.origin {
        ScheduleOrigin::Live => {}
        ScheduleOrigin::LastKnownGood => {
            out.push_str("(offline: showing the last schedule received)\n");
        }
        ScheduleOrigin::Placeholder => {
            out.push_str("(offline: showing the studio's default week)\n");
        }
    }

    for (index, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, width)| format!("{:<width$}", text, width = width))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');

        if index == 0 {
            let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }

    out
}
