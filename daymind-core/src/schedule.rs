//! Placed calendar items.
//!
//! A day's schedule is a flat list of `ScheduleItem`s. Only TASK items may
//! point back at a task; the other kinds carry nothing but their interval.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::task::{Category, Priority, Task};

/// What the scorer needs to know about the task behind a TASK item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub title: String,
    pub category: Category,
    pub priority: Priority,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            category: task.category,
            priority: task.priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ItemKind {
    Task {
        /// Back-reference only; the task store owns the task.
        #[serde(default)]
        task_id: Option<String>,
        #[serde(default)]
        task: Option<TaskSummary>,
    },
    Break,
    Buffer,
    Lunch,
    Sleep,
}

impl ItemKind {
    /// BREAK, BUFFER, SLEEP and LUNCH never add to the mental load.
    pub fn counts_toward_load(&self) -> bool {
        matches!(self, ItemKind::Task { .. })
    }

    /// Items excluded from the time distribution. LUNCH is kept there (as REST).
    pub fn is_filler(&self) -> bool {
        matches!(self, ItemKind::Break | ItemKind::Buffer | ItemKind::Sleep)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Task { .. } => "TASK",
            ItemKind::Break => "BREAK",
            ItemKind::Buffer => "BUFFER",
            ItemKind::Lunch => "LUNCH",
            ItemKind::Sleep => "SLEEP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub title: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl ScheduleItem {
    pub fn new(
        title: impl Into<String>,
        kind: ItemKind,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            start_time,
            end_time,
        }
    }

    /// A placement of `task` over the given interval.
    pub fn for_task(task: &Task, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self::new(
            task.title.clone(),
            ItemKind::Task {
                task_id: Some(task.id.clone()),
                task: Some(TaskSummary::from(task)),
            },
            start_time,
            end_time,
        )
    }

    pub fn task_id(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Task { task_id, .. } => task_id.as_deref(),
            _ => None,
        }
    }

    pub fn task_summary(&self) -> Option<&TaskSummary> {
        match &self.kind {
            ItemKind::Task { task, .. } => task.as_ref(),
            _ => None,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self.kind, ItemKind::Task { .. })
    }

    /// Whole minutes; partial minutes are dropped.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn overlaps(&self, other: &ScheduleItem) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_time >= self.end_time {
            return Err(CoreError::InvalidItem {
                title: self.title.clone(),
                reason: format!(
                    "start {} must be before end {}",
                    self.start_time, self.end_time
                ),
            });
        }
        Ok(())
    }
}
