//! User scheduling preferences and the energy curve derived from them.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::task::DayPeriod;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub wake_up_time: NaiveTime,
    pub bed_time: NaiveTime,

    /// Part of the day the user is most productive in. `None` falls back to
    /// a generic 9-12 / 14-17 curve.
    pub energy_peak: Option<DayPeriod>,

    pub sleep_hours: u8,

    /// IANA timezone of the user's wall clock. Only used when exporting.
    pub timezone: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            wake_up_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            bed_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN),
            energy_peak: Some(DayPeriod::Morning),
            sleep_hours: 8,
            timezone: "UTC".to_string(),
        }
    }
}

impl UserProfile {
    pub fn with_waking_hours(mut self, wake_up_time: NaiveTime, bed_time: NaiveTime) -> Self {
        self.wake_up_time = wake_up_time;
        self.bed_time = bed_time;
        self
    }

    pub fn with_energy_peak(mut self, peak: Option<DayPeriod>) -> Self {
        self.energy_peak = peak;
        self
    }

    /// Wake-up must strictly precede bed time on the same day (no overnight wrap).
    pub fn validate(&self) -> Result<()> {
        if self.wake_up_time >= self.bed_time {
            return Err(CoreError::InvalidProfile(format!(
                "wake-up time {} must be before bed time {}",
                self.wake_up_time.format("%H:%M"),
                self.bed_time.format("%H:%M")
            )));
        }
        Ok(())
    }

    pub fn energy_at(&self, hour: u32) -> EnergyLevel {
        energy_level(hour, self.energy_peak)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

/// Energy label for an hour of the day given the user's peak.
pub fn energy_level(hour: u32, peak: Option<DayPeriod>) -> EnergyLevel {
    let (high, medium) = match peak {
        Some(DayPeriod::Morning) => (6..12, 12..17),
        Some(DayPeriod::Afternoon) => (12..17, 6..12),
        Some(DayPeriod::Evening) => (17..22, 12..17),
        None => (9..12, 14..17),
    };

    if high.contains(&hour) {
        EnergyLevel::High
    } else if medium.contains(&hour) {
        EnergyLevel::Medium
    } else {
        EnergyLevel::Low
    }
}
