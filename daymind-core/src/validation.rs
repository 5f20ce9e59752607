//! Input validation: the one place where loose wire data becomes domain types.
//!
//! Defaults applied here (and nowhere else):
//! - missing category -> WORK, missing priority -> MEDIUM, missing duration -> 60
//! - duration outside 5..=480 minutes is rejected
//! - unknown priority -> MEDIUM (logged)
//! - missing profile fields -> 07:00 / 23:00 / morning / 8h / UTC
//!
//! Everything else that does not parse is rejected.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, Result};
use crate::profile::UserProfile;
use crate::task::{Category, DayPeriod, Priority, Task};
use crate::time::parse_clock;

const DEFAULT_DURATION_MINUTES: i64 = 60;
/// Accepted task length in minutes, inclusive.
const DURATION_RANGE: std::ops::RangeInclusive<i64> = 5..=480;

/// A task as it arrives from the task store or a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskInput {
    /// Incomplete, and either undated or due no earlier than the start of `date`.
    pub fn is_pending_on(&self, date: NaiveDate) -> bool {
        if self.completed {
            return false;
        }
        match self.deadline {
            None => true,
            Some(dl) => dl.date_naive() >= date,
        }
    }

    pub fn into_task(self) -> Result<Task> {
        if self.id.trim().is_empty() {
            return Err(CoreError::invalid_task(&self.id, "id must be non-empty"));
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::invalid_task(&self.id, "title must be non-empty"));
        }

        let category = match self.category.as_deref() {
            None => Category::Work,
            Some(raw) => Category::parse(raw)
                .ok_or_else(|| {
                    CoreError::invalid_task(&self.id, format!("unknown category '{raw}'"))
                })?,
        };

        let priority = match self.priority.as_deref() {
            None => Priority::Medium,
            Some(raw) => Priority::parse(raw).unwrap_or_else(|| {
                warn!(task_id = %self.id, priority = raw, "unknown priority, using MEDIUM");
                Priority::Medium
            }),
        };

        let duration = self.duration.unwrap_or(DEFAULT_DURATION_MINUTES);
        if !DURATION_RANGE.contains(&duration) {
            return Err(CoreError::invalid_task(
                &self.id,
                format!(
                    "duration must be between {} and {} minutes, got {duration}",
                    DURATION_RANGE.start(),
                    DURATION_RANGE.end()
                ),
            ));
        }

        let preferred_time = match self.preferred_time.as_deref() {
            None => None,
            Some(raw) => Some(DayPeriod::parse(raw).ok_or_else(|| {
                CoreError::invalid_task(&self.id, format!("unknown preferred time '{raw}'"))
            })?),
        };

        Ok(Task {
            id: self.id,
            title: self.title,
            category,
            priority,
            duration,
            deadline: self.deadline,
            preferred_time,
        })
    }
}

/// Validate a whole batch. Ids must be unique.
pub fn validate_tasks(inputs: Vec<TaskInput>) -> Result<Vec<Task>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(inputs.len());
    for input in inputs {
        if !seen.insert(input.id.clone()) {
            return Err(CoreError::invalid_task(&input.id, "duplicate task id"));
        }
        out.push(input.into_task()?);
    }
    Ok(out)
}

/// A profile as stored in config: clock times are "HH:MM" strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub wake_up_time: Option<String>,
    #[serde(default)]
    pub bed_time: Option<String>,
    /// "morning", "afternoon", "evening", or "none" for no preference.
    #[serde(default)]
    pub energy_peak_time: Option<String>,
    #[serde(default)]
    pub sleep_hours: Option<u8>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl ProfileInput {
    pub fn into_profile(self) -> Result<UserProfile> {
        let defaults = UserProfile::default();

        let wake_up_time = match self.wake_up_time.as_deref() {
            Some(s) => parse_clock(s)?,
            None => defaults.wake_up_time,
        };
        let bed_time = match self.bed_time.as_deref() {
            Some(s) => parse_clock(s)?,
            None => defaults.bed_time,
        };

        let energy_peak = match self.energy_peak_time.as_deref() {
            None => defaults.energy_peak,
            Some(raw) if raw.trim().eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(DayPeriod::parse(raw).ok_or_else(|| {
                CoreError::InvalidProfile(format!("unknown energy peak time '{raw}'"))
            })?),
        };

        let sleep_hours = self.sleep_hours.unwrap_or(defaults.sleep_hours);
        if !(4..=12).contains(&sleep_hours) {
            return Err(CoreError::InvalidProfile(format!(
                "sleep hours must be between 4 and 12, got {sleep_hours}"
            )));
        }

        let timezone = self.timezone.unwrap_or(defaults.timezone);
        if timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(CoreError::InvalidProfile(format!("invalid timezone: {timezone}")));
        }

        let profile = UserProfile {
            wake_up_time,
            bed_time,
            energy_peak,
            sleep_hours,
            timezone,
        };
        profile.validate()?;
        Ok(profile)
    }
}
