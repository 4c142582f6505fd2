//! Meeting-time search: scan hourly candidates around a base instant and rank
//! them by how many regions are in business hours at once.
//!
//! Candidates are `base + k hours` for `k` in `-radius..=radius`, generated and
//! evaluated in ascending `k`. Candidates scoring at or below `min_score` are
//! dropped, the rest are stable-sorted by score (highest first) so equal scores
//! stay in chronological order, and the list is cut to `max_results`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::business_hours::{classify, coverage_score, RegionStatus};
use crate::config::{BusinessHoursWindow, Region, SearchOptions};
use crate::error::Result;

/// One ranked meeting time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingSuggestion {
    pub instant: DateTime<Utc>,
    /// Whole hours from the base instant (negative means earlier).
    pub offset_hours: i64,
    /// Fraction of regions in business hours, always above the search's `min_score`.
    pub score: f64,
    pub statuses: Vec<RegionStatus>,
}

/// Rank meeting times around `base`.
///
/// An empty result is valid: it means no candidate cleared `min_score`. An
/// empty region list always yields an empty result.
///
/// Candidates that would fall outside the representable date range are
/// skipped.
///
/// # Errors
///
/// Returns [`crate::EngineError::InvalidConfig`] if `options` fail
/// [`SearchOptions::validate`], or [`crate::EngineError::InvalidTimezone`] if
/// any region names an unknown timezone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tzlink_engine::config::{BusinessHoursWindow, Region, SearchOptions};
/// use tzlink_engine::optimal::find_optimal;
///
/// let base = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
/// let regions = [
///     Region::new("NY", "America/New_York"),
///     Region::new("London", "Europe/London"),
/// ];
/// let found = find_optimal(base, &regions, &BusinessHoursWindow::default(), &SearchOptions::default())
///     .unwrap();
/// let offsets: Vec<i64> = found.iter().map(|s| s.offset_hours).collect();
/// assert_eq!(offsets, [1, 2, 3]);
/// ```
pub fn find_optimal(
    base: DateTime<Utc>,
    regions: &[Region],
    window: &BusinessHoursWindow,
    options: &SearchOptions,
) -> Result<Vec<MeetingSuggestion>> {
    options.validate()?;
    if regions.is_empty() {
        debug!("no regions given, nothing to rank");
        return Ok(Vec::new());
    }

    let candidates = (-options.radius_hours..=options.radius_hours)
        .filter_map(|k| score_candidate(base, k, regions, window).transpose())
        .collect::<Result<Vec<_>>>()?;
    let scanned = candidates.len();

    let mut kept: Vec<MeetingSuggestion> = candidates
        .into_iter()
        .filter(|c| c.score > options.min_score)
        .collect();

    // `sort_by` is stable: equal scores keep ascending-offset order.
    kept.sort_by(|a, b| b.score.total_cmp(&a.score));
    kept.truncate(options.max_results);

    debug!(
        scanned,
        returned = kept.len(),
        min_score = options.min_score,
        "meeting-time search finished"
    );
    Ok(kept)
}

fn score_candidate(
    base: DateTime<Utc>,
    offset_hours: i64,
    regions: &[Region],
    window: &BusinessHoursWindow,
) -> Result<Option<MeetingSuggestion>> {
    let Some(instant) = chrono::Duration::try_hours(offset_hours)
        .and_then(|offset| base.checked_add_signed(offset))
    else {
        return Ok(None);
    };
    let statuses = classify(instant, regions, window)?;
    Ok(Some(MeetingSuggestion {
        instant,
        offset_hours,
        score: coverage_score(&statuses),
        statuses,
    }))
}
