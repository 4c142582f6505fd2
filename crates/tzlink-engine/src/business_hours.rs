//! Per-region business-hours classification for a single instant.
//!
//! A pure map over the region list: one [`RegionStatus`] per input region, in
//! input order, duplicates included. Nothing is filtered or cached.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{BusinessHoursWindow, Region};
use crate::convert::{parse_timezone, to_local_in};
use crate::error::Result;

/// Whether one region is inside working hours at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionStatus {
    pub region: Region,
    /// Local wall-clock label (e.g., "10:00 AM").
    pub local_time: String,
    pub is_business_hours: bool,
}

/// Classify `instant` for every region.
///
/// # Errors
///
/// Returns [`crate::EngineError::InvalidTimezone`] if any region names an
/// unknown timezone; no partial result is produced.
pub fn classify(
    instant: DateTime<Utc>,
    regions: &[Region],
    window: &BusinessHoursWindow,
) -> Result<Vec<RegionStatus>> {
    regions
        .iter()
        .map(|region| {
            let tz = parse_timezone(&region.timezone)?;
            let local = to_local_in(instant, tz);
            Ok(RegionStatus {
                region: region.clone(),
                is_business_hours: window.contains(local.hour, local.weekday),
                local_time: local.label,
            })
        })
        .collect()
}

/// Fraction of statuses inside business hours; 0.0 for an empty list.
pub fn coverage_score(statuses: &[RegionStatus]) -> f64 {
    if statuses.is_empty() {
        return 0.0;
    }
    let open = statuses.iter().filter(|s| s.is_business_hours).count();
    open as f64 / statuses.len() as f64
}
