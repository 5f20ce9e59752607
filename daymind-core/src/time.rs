//! Time utilities: clock parsing and timezone-aware export of local placements.

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::error::{CoreError, Result};

/// HH:MM, 24h, optional leading zero on the hour.
const CLOCK_PATTERN: &str = r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$";

/// Parse a clock time like "07:00" or "7:30".
pub fn parse_clock(s: &str) -> Result<NaiveTime> {
    let re = Regex::new(CLOCK_PATTERN).map_err(|e| CoreError::InvalidProfile(e.to_string()))?;
    let caps = re
        .captures(s.trim())
        .ok_or_else(|| CoreError::InvalidProfile(format!("invalid clock time '{s}' (HH:MM)")))?;

    let hour: u32 = caps[1]
        .parse()
        .map_err(|_| CoreError::InvalidProfile(format!("invalid hour in '{s}'")))?;
    let minute: u32 = caps[2]
        .parse()
        .map_err(|_| CoreError::InvalidProfile(format!("invalid minute in '{s}'")))?;

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| CoreError::InvalidProfile(format!("invalid clock time '{s}'")))
}

/// Interpret a wall-clock placement in an IANA tz like "Europe/Paris",
/// returning UTC.
pub fn local_to_utc(local: NaiveDateTime, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| CoreError::InvalidProfile(format!("invalid timezone: {tz}")))?;

    let local_dt = tz.from_local_datetime(&local).single().ok_or_else(|| {
        CoreError::InvalidProfile(format!("ambiguous or invalid local time (DST?): {local} {tz}"))
    })?;

    Ok(local_dt.with_timezone(&Utc))
}
