//! Timezone conversion: an instant plus an IANA name in, local wall-clock out.
//!
//! Every function is deterministic given the IANA database compiled into
//! `chrono-tz`. When that database is updated, DST rules (and therefore
//! results) may change; that is an external dependency, not a bug.
//!
//! Unknown timezone names are reported as [`EngineError::InvalidTimezone`] and
//! are never replaced by a default zone.

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::{OffsetComponents, Tz};
use serde::Serialize;

use crate::error::{EngineError, Result};

/// An instant as seen on a wall clock in one timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalTime {
    /// The IANA timezone name used.
    pub timezone: String,
    /// Local hour (0-23).
    pub hour: u32,
    /// Local minute (0-59).
    pub minute: u32,
    /// Local day of the week.
    pub weekday: Weekday,
    /// 12-hour clock label (e.g., "10:00 AM").
    pub label: String,
    /// The UTC offset at this instant (e.g., "-04:00").
    pub utc_offset: String,
    /// Whether Daylight Saving Time is in effect at this instant.
    pub dst_active: bool,
}

/// How an event instant reads for someone opening a shared link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerTime {
    /// The instant in UTC (RFC 3339).
    pub utc: String,
    /// The instant in the viewer's timezone (RFC 3339 with offset).
    pub local: String,
    /// The viewer's IANA timezone name.
    pub timezone: String,
    /// The UTC offset at this instant (e.g., "+09:00").
    pub utc_offset: String,
    /// Whether Daylight Saving Time is in effect at this instant.
    pub dst_active: bool,
    /// Human-readable form (e.g., "Tuesday, March 12, 2024 at 10:00 AM EDT").
    pub display: String,
}

/// Validate an IANA timezone name and return the compiled zone.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| EngineError::InvalidTimezone(format!("'{s}'")))
}

/// Parse an RFC 3339 datetime string into an instant.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| EngineError::InvalidDatetime(format!("'{s}': {e}")))
}

/// Convert `instant` to wall-clock fields in `timezone`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimezone`] if `timezone` is not a known IANA name.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc, Weekday};
/// use tzlink_engine::convert::to_local;
///
/// let instant = Utc.with_ymd_and_hms(2024, 3, 12, 14, 0, 0).unwrap();
/// let local = to_local(instant, "America/New_York").unwrap();
/// assert_eq!(local.hour, 10);
/// assert_eq!(local.weekday, Weekday::Tue);
/// assert_eq!(local.label, "10:00 AM");
/// ```
pub fn to_local(instant: DateTime<Utc>, timezone: &str) -> Result<LocalTime> {
    let tz = parse_timezone(timezone)?;
    Ok(to_local_in(instant, tz))
}

/// Same as [`to_local`] for an already-validated zone.
pub fn to_local_in(instant: DateTime<Utc>, tz: Tz) -> LocalTime {
    let local = instant.with_timezone(&tz);
    LocalTime {
        timezone: tz.name().to_string(),
        hour: local.hour(),
        minute: local.minute(),
        weekday: local.weekday(),
        label: local.format("%-I:%M %p").to_string(),
        utc_offset: format_utc_offset(&local),
        dst_active: is_dst_active(&local),
    }
}

/// Express an event instant in a viewer's timezone.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimezone`] if `viewer_timezone` is unknown.
pub fn convert_for_viewer(instant: DateTime<Utc>, viewer_timezone: &str) -> Result<ViewerTime> {
    let tz = parse_timezone(viewer_timezone)?;
    let local = instant.with_timezone(&tz);

    Ok(ViewerTime {
        utc: instant.to_rfc3339(),
        local: local.to_rfc3339(),
        timezone: viewer_timezone.to_string(),
        utc_offset: format_utc_offset(&local),
        dst_active: is_dst_active(&local),
        display: local.format("%A, %B %-d, %Y at %-I:%M %p %Z").to_string(),
    })
}

/// The IANA name of the timezone the host is configured with.
///
/// Reads the operating system setting once per call; the engine itself never
/// calls this, callers pass the result in.
///
/// # Errors
///
/// Returns [`EngineError::HostTimezone`] if the host reports no zone, or a zone
/// unknown to the compiled database.
pub fn resolve_host_timezone() -> Result<String> {
    let name = iana_time_zone::get_timezone()
        .map_err(|e| EngineError::HostTimezone(e.to_string()))?;
    parse_timezone(&name).map_err(|_| {
        EngineError::HostTimezone(format!("host zone '{name}' is not in the IANA database"))
    })?;
    Ok(name)
}

fn is_dst_active(dt: &DateTime<Tz>) -> bool {
    !dt.offset().dst_offset().is_zero()
}

/// Format the UTC offset as a string (e.g., "-05:00", "+05:30").
fn format_utc_offset<T: TimeZone>(dt: &DateTime<T>) -> String {
    let offset_secs = dt.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs_secs / 3600, (abs_secs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_to_local_new_york_summer_time() {
        let local = to_local(at(2024, 3, 12, 14, 0), "America/New_York").unwrap();
        assert_eq!(local.hour, 10);
        assert_eq!(local.utc_offset, "-04:00");
        assert!(local.dst_active);
    }

    #[test]
    fn test_to_local_tokyo_crosses_midnight() {
        let local = to_local(at(2024, 3, 12, 15, 30), "Asia/Tokyo").unwrap();
        assert_eq!(local.hour, 0);
        assert_eq!(local.minute, 30);
        assert_eq!(local.weekday, Weekday::Wed);
        assert_eq!(local.label, "12:30 AM");
        assert!(!local.dst_active);
    }

    #[test]
    fn test_to_local_half_hour_offset() {
        let local = to_local(at(2024, 1, 10, 12, 0), "Asia/Kolkata").unwrap();
        assert_eq!(local.utc_offset, "+05:30");
        assert_eq!(local.label, "5:30 PM");
    }

    #[test]
    fn test_to_local_southern_hemisphere_dst() {
        // January is summer in Sydney.
        let summer = to_local(at(2024, 1, 15, 0, 0), "Australia/Sydney").unwrap();
        assert!(summer.dst_active);
        assert_eq!(summer.utc_offset, "+11:00");

        let winter = to_local(at(2024, 7, 15, 0, 0), "Australia/Sydney").unwrap();
        assert!(!winter.dst_active);
        assert_eq!(winter.utc_offset, "+10:00");
    }

    #[test]
    fn test_to_local_invalid_timezone_is_error() {
        let err = to_local(at(2024, 1, 1, 0, 0), "Invalid/Zone").unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_convert_for_viewer() {
        let viewer = convert_for_viewer(at(2024, 3, 12, 14, 0), "America/New_York").unwrap();
        assert_eq!(viewer.utc, "2024-03-12T14:00:00+00:00");
        assert_eq!(viewer.local, "2024-03-12T10:00:00-04:00");
        assert_eq!(viewer.display, "Tuesday, March 12, 2024 at 10:00 AM EDT");
        assert!(viewer.dst_active);
    }

    #[test]
    fn test_convert_for_viewer_invalid_timezone() {
        assert!(convert_for_viewer(at(2024, 3, 12, 14, 0), "Nowhere").is_err());
    }

    #[test]
    fn test_parse_instant() {
        let instant = parse_instant("2024-03-12T10:00:00-04:00").unwrap();
        assert_eq!(instant, at(2024, 3, 12, 14, 0));
    }

    #[test]
    fn test_parse_instant_invalid() {
        let err = parse_instant("yesterday-ish").unwrap_err();
        assert!(err.to_string().contains("Invalid datetime"), "got: {err}");
    }
}
