use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use daymind_core::time::local_to_utc;
use daymind_core::ScheduleItem;

pub struct CalendarEvent {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub summary: String,
    pub description: String,
}

/// Convert placed items (local wall-clock in `tz`) into UTC events.
pub fn items_to_events(items: &[ScheduleItem], tz: &str) -> Result<Vec<CalendarEvent>> {
    items
        .iter()
        .map(|item| {
            let start_utc = local_to_utc(item.start_time, tz)
                .with_context(|| format!("converting start of '{}'", item.title))?;
            let end_utc = local_to_utc(item.end_time, tz)
                .with_context(|| format!("converting end of '{}'", item.title))?;

            let mut description = format!("Type: {}\n", item.kind.as_str());
            if let Some(id) = item.task_id() {
                description.push_str(&format!("TaskId: {id}\n"));
            }
            if let Some(task) = item.task_summary() {
                description.push_str(&format!(
                    "Category: {}\nPriority: {}\n",
                    task.category.as_str(),
                    task.priority.as_str()
                ));
            }

            Ok(CalendarEvent {
                start_utc,
                end_utc,
                summary: item.title.clone(),
                description,
            })
        })
        .collect()
}

/// Emit a minimal ICS calendar containing VEVENT blocks.
///
/// DTSTART/DTEND are UTC. UIDs are positional, so re-exporting the same day
/// replaces events rather than duplicating them.
pub fn events_to_ics(events: &[CalendarEvent]) -> String {
    let mut s = String::new();
    s.push_str("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//Daymind//EN\n");

    for (i, e) in events.iter().enumerate() {
        let dtstart = e.start_utc.format("%Y%m%dT%H%M%SZ");
        let dtend = e.end_utc.format("%Y%m%dT%H%M%SZ");

        s.push_str("BEGIN:VEVENT\n");
        s.push_str(&format!("UID:daymind-{}-{}@daymind\n", e.start_utc.format("%Y%m%d"), i));
        s.push_str(&format!("DTSTART:{dtstart}\n"));
        s.push_str(&format!("DTEND:{dtend}\n"));
        s.push_str(&format!("SUMMARY:{}\n", escape_ics(&e.summary)));
        s.push_str(&format!("DESCRIPTION:{}\n", escape_ics(&e.description)));
        s.push_str("END:VEVENT\n");
    }

    s.push_str("END:VCALENDAR\n");
    s
}

fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
