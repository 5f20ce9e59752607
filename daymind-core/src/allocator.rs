//! Slot allocator: greedy placement of a day's tasks onto a 30-minute grid.
//!
//! Algorithm (deterministic, no clock reads):
//! 1) build the slot grid from wake-up to bed time, tagging each slot's energy
//! 2) reserve lunch and occupy the slots it covers
//! 3) order tasks by priority weight DESC, then deadline ASC (deadline-less last)
//! 4) place each task in the free window with the strictly best score
//!    (first window wins ties)
//! 5) follow long intensive tasks with a short break when the next slot is free
//! 6) fill 5-30 minute gaps between consecutive items with transition buffers

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::profile::{EnergyLevel, UserProfile};
use crate::schedule::{ItemKind, ScheduleItem};
use crate::task::{DayPeriod, Task};

pub const LUNCH_TITLE: &str = "Lunch break";
pub const BREAK_TITLE: &str = "Break";
pub const BUFFER_TITLE: &str = "Transition";

/// Fixed knobs of the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorConfig {
    pub slot_minutes: i64,
    pub lunch_start: NaiveTime,
    pub lunch_end: NaiveTime,
    pub break_minutes: i64,
    /// Intensive tasks at least this long are followed by a break.
    pub break_after_minutes: i64,
    /// Gaps in `[min_buffer_minutes, max_buffer_minutes)` get a buffer.
    pub min_buffer_minutes: i64,
    pub max_buffer_minutes: i64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            slot_minutes: 30,
            lunch_start: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            lunch_end: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or(NaiveTime::MIN),
            break_minutes: 15,
            break_after_minutes: 60,
            min_buffer_minutes: 5,
            max_buffer_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
    occupied: bool,
    energy: EnergyLevel,
}

/// Result of one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Placed items ordered by start time.
    pub items: Vec<ScheduleItem>,
    /// Ids of tasks that found no free window, in placement order.
    pub omitted: Vec<String>,
}

impl Allocation {
    pub fn placed_task_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_task()).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlotAllocator {
    config: AllocatorConfig,
}

impl SlotAllocator {
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Place `tasks` on `date` for `profile`.
    ///
    /// Fails only on malformed input (wake >= bed, non-positive duration).
    /// Tasks with no free window are left out of `items` and listed in
    /// `omitted`.
    pub fn allocate(
        &self,
        tasks: &[Task],
        profile: &UserProfile,
        date: NaiveDate,
    ) -> Result<Allocation> {
        profile.validate()?;
        for t in tasks {
            if t.duration <= 0 {
                return Err(CoreError::invalid_task(
                    &t.id,
                    format!("duration must be positive, got {}", t.duration),
                ));
            }
        }

        let mut slots = self.build_grid(profile, date);
        let mut items = Vec::new();
        let mut omitted = Vec::new();

        let lunch_start = date.and_time(self.config.lunch_start);
        let lunch_end = date.and_time(self.config.lunch_end);
        items.push(ScheduleItem::new(LUNCH_TITLE, ItemKind::Lunch, lunch_start, lunch_end));

        // Slots touching lunch are taken, so an off-grid wake-up time cannot
        // put a task across it.
        for slot in slots.iter_mut() {
            if slot.start < lunch_end && lunch_start < slot.end {
                slot.occupied = true;
            }
        }

        for task in scheduling_order(tasks) {
            let needed = self.slots_needed(task.duration);

            let Some(index) = self.best_window(task, &slots, needed) else {
                debug!(
                    task_id = %task.id,
                    duration = task.duration,
                    "no free window; task omitted"
                );
                omitted.push(task.id.clone());
                continue;
            };

            for slot in &mut slots[index..index + needed] {
                slot.occupied = true;
            }

            let start = slots[index].start;
            let end = start + Duration::minutes(task.duration);
            debug!(task_id = %task.id, %start, %end, "placed task");
            items.push(ScheduleItem::for_task(task, start, end));

            if task.is_intensive() && task.duration >= self.config.break_after_minutes {
                let next = index + needed;
                if next < slots.len() && !slots[next].occupied {
                    slots[next].occupied = true;
                    items.push(ScheduleItem::new(
                        BREAK_TITLE,
                        ItemKind::Break,
                        end,
                        end + Duration::minutes(self.config.break_minutes),
                    ));
                }
            }
        }

        let items = self.insert_buffers(items);

        info!(
            %date,
            slots = slots.len(),
            placed = tasks.len() - omitted.len(),
            omitted = omitted.len(),
            items = items.len(),
            "schedule allocated"
        );

        Ok(Allocation { items, omitted })
    }

    /// Saturates instead of overflowing; an oversized task then finds no window.
    fn slots_needed(&self, duration: i64) -> usize {
        let slot = self.config.slot_minutes.max(1).unsigned_abs();
        let needed = duration.max(0).unsigned_abs().div_ceil(slot);
        usize::try_from(needed).unwrap_or(usize::MAX)
    }

    /// Consecutive fixed-length slots from wake-up while the slot start is
    /// before bed time. The last slot may run past bed time.
    fn build_grid(&self, profile: &UserProfile, date: NaiveDate) -> Vec<TimeSlot> {
        let step = Duration::minutes(self.config.slot_minutes.max(1));
        let bed = date.and_time(profile.bed_time);

        let mut slots = Vec::new();
        let mut cursor = date.and_time(profile.wake_up_time);
        while cursor < bed {
            slots.push(TimeSlot {
                start: cursor,
                end: cursor + step,
                occupied: false,
                energy: profile.energy_at(cursor.hour()),
            });
            cursor += step;
        }
        slots
    }

    /// First free window with the strictly greatest score.
    fn best_window(&self, task: &Task, slots: &[TimeSlot], needed: usize) -> Option<usize> {
        let total = slots.len();
        if needed == 0 || needed > total {
            return None;
        }

        let mut best_index = None;
        let mut best_score = -1.0_f64;

        for i in 0..=(total - needed) {
            if slots[i..i + needed].iter().any(|s| s.occupied) {
                continue;
            }

            let score = window_score(task, &slots[i], i, total);
            if score > best_score {
                best_score = score;
                best_index = Some(i);
            }
        }

        best_index
    }

    /// Sort by start and fill short gaps between neighbours with a buffer.
    fn insert_buffers(&self, mut items: Vec<ScheduleItem>) -> Vec<ScheduleItem> {
        items.sort_by_key(|i| i.start_time);

        let mut out = Vec::with_capacity(items.len() * 2);
        let mut iter = items.into_iter().peekable();
        while let Some(current) = iter.next() {
            let gap = iter.peek().map(|next| {
                (
                    current.end_time,
                    next.start_time,
                    (next.start_time - current.end_time).num_minutes(),
                )
            });
            out.push(current);

            if let Some((from, to, minutes)) = gap {
                if minutes >= self.config.min_buffer_minutes
                    && minutes < self.config.max_buffer_minutes
                {
                    out.push(ScheduleItem::new(BUFFER_TITLE, ItemKind::Buffer, from, to));
                }
            }
        }
        out
    }
}

/// Desirability of starting `task` at slot `index` of `total`.
fn window_score(task: &Task, first: &TimeSlot, index: usize, total: usize) -> f64 {
    let mut score = match (task.is_intensive(), first.energy) {
        (true, EnergyLevel::High) | (false, EnergyLevel::Low) => 3.0,
        (_, EnergyLevel::Medium) => 2.0,
        (true, EnergyLevel::Low) | (false, EnergyLevel::High) => 1.0,
    };

    if task.priority.prefers_early() {
        score += (total - index) as f64 / total as f64 * 2.0;
    }

    if task.preferred_time == Some(DayPeriod::of_hour(first.start.hour())) {
        score += 2.0;
    }

    score
}

/// Placement order: priority weight DESC, then
/// deadline ASC with deadline-less tasks last. Stable.
pub fn scheduling_order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| match (a.deadline, b.deadline) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
    ordered
}

/// Allocate with `AllocatorConfig::default()`.
pub fn optimize_schedule(
    tasks: &[Task],
    profile: &UserProfile,
    date: NaiveDate,
) -> Result<Allocation> {
    SlotAllocator::default().allocate(tasks, profile, date)
}
