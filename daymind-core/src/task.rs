//! Task model consumed by the slot allocator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Work,
    Study,
    Leisure,
    Rest,
    Sport,
    Social,
    Household,
    Personal,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Work,
        Category::Study,
        Category::Leisure,
        Category::Rest,
        Category::Sport,
        Category::Social,
        Category::Household,
        Category::Personal,
    ];

    /// Intensive categories compete for high-energy slots.
    pub fn is_intensive(self) -> bool {
        matches!(self, Category::Work | Category::Study)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "WORK",
            Category::Study => "STUDY",
            Category::Leisure => "LEISURE",
            Category::Rest => "REST",
            Category::Sport => "SPORT",
            Category::Social => "SOCIAL",
            Category::Household => "HOUSEHOLD",
            Category::Personal => "PERSONAL",
        }
    }

    /// Case-insensitive lookup by wire name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Scheduling weight: URGENT 4 .. LOW 1.
    pub fn weight(self) -> u8 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// URGENT and HIGH tasks are pulled towards the start of the day.
    pub fn prefers_early(self) -> bool {
        matches!(self, Priority::Urgent | Priority::High)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent]
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
    }
}

/// Coarse part of the day. Used both for a task's preferred time and for a
/// profile's energy peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    /// Bucket of an hour: morning < 12, afternoon 12..17, evening >= 17.
    pub fn of_hour(hour: u32) -> Self {
        match hour {
            h if h < 12 => DayPeriod::Morning,
            h if h < 17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Evening]
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
    }
}

/// A pending unit of work, as read from the task store.
///
/// The allocator never mutates tasks; placed items only keep the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub priority: Priority,

    /// Minutes, always > 0.
    pub duration: i64,

    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,

    #[serde(default)]
    pub preferred_time: Option<DayPeriod>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: Category::Work,
            priority: Priority::Medium,
            duration: 60,
            deadline: None,
            preferred_time: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_preferred_time(mut self, period: DayPeriod) -> Self {
        self.preferred_time = Some(period);
        self
    }

    pub fn is_intensive(&self) -> bool {
        self.category.is_intensive()
    }
}
