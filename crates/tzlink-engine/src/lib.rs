//! # tzlink-engine
//!
//! Scheduling intelligence for shareable timezone links.
//!
//! Every function is pure: the reference "now" is always passed in, nothing is
//! persisted, and the only external input is the IANA database compiled into
//! `chrono-tz`.
//!
//! ## Modules
//!
//! - [`convert`] — Instant + IANA timezone → local wall-clock fields, host timezone lookup
//! - [`parser`] — Natural-language phrases ("tomorrow 2 PM", "next Monday") → instant
//! - [`business_hours`] — Per-region business-hours status for one instant
//! - [`optimal`] — Rank meeting times around a base instant by business-hours coverage
//! - [`slug`] — URL slugs for shared event links
//! - [`config`] — Regions, business-hours window, search options
//! - [`engine`] — Configured façade over the operations above
//! - [`error`] — Error types

pub mod business_hours;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod optimal;
pub mod parser;
pub mod slug;

use chrono::{DateTime, Utc};

pub use business_hours::{classify, coverage_score, RegionStatus};
pub use config::{default_regions, BusinessHoursWindow, EngineConfig, Region, SearchOptions};
pub use convert::{
    convert_for_viewer, parse_instant, parse_timezone, resolve_host_timezone, to_local, LocalTime,
    ViewerTime,
};
pub use engine::SchedulingEngine;
pub use error::{EngineError, Result};
pub use optimal::{find_optimal, MeetingSuggestion};
pub use parser::parse_natural_language;
pub use slug::generate_slug;

/// Business-hours status for `instant`, using the default regions when
/// `regions` is `None` and the default 9-17 Monday-Friday window.
pub fn get_business_hours_status(
    instant: DateTime<Utc>,
    regions: Option<&[Region]>,
) -> Result<Vec<RegionStatus>> {
    SchedulingEngine::default().business_hours_status(instant, regions)
}

/// Up to five meeting times around `base`, using the default regions when
/// `regions` is `None` and the default window and search options.
pub fn get_optimal_meeting_times(
    base: DateTime<Utc>,
    regions: Option<&[Region]>,
) -> Result<Vec<MeetingSuggestion>> {
    SchedulingEngine::default().optimal_meeting_times(base, regions)
}
