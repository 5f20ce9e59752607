//! daymind-core: slot allocation and mental load scoring for a single day.
//!
//! Everything here is pure and synchronous: callers pass tasks, a profile and
//! an explicit date, and get placed items and scores back.

pub mod allocator;
pub mod error;
pub mod load;
pub mod profile;
pub mod schedule;
pub mod task;
pub mod time;
pub mod validation;

pub use allocator::{
    optimize_schedule, scheduling_order, Allocation, AllocatorConfig, SlotAllocator,
};
pub use error::{CoreError, Result};
pub use load::{
    calculate_time_distribution, generate_overload_suggestions, mental_load_level, CategoryShare,
    LoadLevel, LoadScorer, LoadWeights, MentalLoadResult, Suggestion, SuggestionKind,
};
pub use profile::{energy_level, EnergyLevel, UserProfile};
pub use schedule::{ItemKind, ScheduleItem, TaskSummary};
pub use task::{Category, DayPeriod, Priority, Task};
pub use validation::{validate_tasks, ProfileInput, TaskInput};
