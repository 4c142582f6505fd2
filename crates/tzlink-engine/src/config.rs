//! Explicit configuration values for the classifier and the meeting-time search.
//!
//! Nothing here is a hidden global: the default region list and the default
//! business-hours window are produced by functions and passed in by the caller,
//! so any of them can be overridden per call.

use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::convert::parse_timezone;
use crate::error::{EngineError, Result};

// ── Region ──────────────────────────────────────────────────────────────────

/// A named place whose working hours matter for a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Display name (e.g., "US East Coast").
    pub name: String,
    /// IANA timezone name (e.g., "America/New_York").
    pub timezone: String,
}

impl Region {
    pub fn new(name: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timezone: timezone.into(),
        }
    }
}

/// Parses `NAME=IANA`, e.g. `"Tokyo office=Asia/Tokyo"`.
impl FromStr for Region {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, timezone) = s
            .split_once('=')
            .ok_or_else(|| EngineError::InvalidRegion(format!("expected NAME=TIMEZONE: '{s}'")))?;
        let (name, timezone) = (name.trim(), timezone.trim());
        if name.is_empty() {
            return Err(EngineError::InvalidRegion(format!("empty name in '{s}'")));
        }
        parse_timezone(timezone)?;
        Ok(Region::new(name, timezone))
    }
}

/// The six regions shipped with the engine, in display order.
pub fn default_regions() -> Vec<Region> {
    vec![
        Region::new("US East Coast", "America/New_York"),
        Region::new("US West Coast", "America/Los_Angeles"),
        Region::new("Europe", "Europe/London"),
        Region::new("Asia Pacific", "Asia/Tokyo"),
        Region::new("Pakistan", "Asia/Karachi"),
        Region::new("Australia", "Australia/Sydney"),
    ]
}

// ── BusinessHoursWindow ─────────────────────────────────────────────────────

/// Local working hours, applied identically to every region.
///
/// The window is half-open: an hour `h` is inside when
/// `start_hour <= h < end_hour`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessHoursWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub workdays: Vec<Weekday>,
}

impl Default for BusinessHoursWindow {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            workdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        }
    }
}

impl BusinessHoursWindow {
    /// Whether a local wall-clock hour on `weekday` falls inside the window.
    pub fn contains(&self, hour: u32, weekday: Weekday) -> bool {
        self.start_hour <= hour && hour < self.end_hour && self.workdays.contains(&weekday)
    }

    /// Check that the window is non-empty and ends no later than midnight.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] describing the first violated bound.
    pub fn validate(&self) -> Result<()> {
        if self.end_hour > 24 {
            return Err(EngineError::InvalidConfig(format!(
                "end_hour must be at most 24, got {}",
                self.end_hour
            )));
        }
        if self.start_hour >= self.end_hour {
            return Err(EngineError::InvalidConfig(format!(
                "start_hour ({}) must be before end_hour ({})",
                self.start_hour, self.end_hour
            )));
        }
        Ok(())
    }
}

// ── SearchOptions ───────────────────────────────────────────────────────────

/// Tuning for [`crate::optimal::find_optimal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Candidates are generated at `base + k hours` for `k` in `-radius..=radius`.
    pub radius_hours: i64,
    /// Candidates scoring at or below this are discarded.
    pub min_score: f64,
    /// Maximum number of suggestions returned.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            radius_hours: 12,
            min_score: 0.5,
            max_results: 5,
        }
    }
}

impl SearchOptions {
    /// Largest accepted `radius_hours`: one week either side of the base.
    pub const MAX_RADIUS_HOURS: i64 = 24 * 7;

    /// Check the radius is within `0..=MAX_RADIUS_HOURS` and `min_score` in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] describing the first violated bound.
    pub fn validate(&self) -> Result<()> {
        if !(0..=Self::MAX_RADIUS_HOURS).contains(&self.radius_hours) {
            return Err(EngineError::InvalidConfig(format!(
                "radius_hours must be between 0 and {}, got {}",
                Self::MAX_RADIUS_HOURS,
                self.radius_hours
            )));
        }
        if !(0.0..1.0).contains(&self.min_score) {
            return Err(EngineError::InvalidConfig(format!(
                "min_score must be in [0, 1), got {}",
                self.min_score
            )));
        }
        Ok(())
    }
}

// ── EngineConfig ────────────────────────────────────────────────────────────

/// Everything a [`crate::engine::SchedulingEngine`] needs; every field is
/// optional when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub regions: Vec<Region>,
    pub business_hours: BusinessHoursWindow,
    pub search: SearchOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            business_hours: BusinessHoursWindow::default(),
            search: SearchOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the window, the search bounds, and every region's timezone.
    pub fn validate(&self) -> Result<()> {
        self.business_hours.validate()?;
        self.search.validate()?;
        for region in &self.regions {
            parse_timezone(&region.timezone)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_regions_order() {
        let names: Vec<String> = default_regions().into_iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "US East Coast",
                "US West Coast",
                "Europe",
                "Asia Pacific",
                "Pakistan",
                "Australia"
            ]
        );
    }

    #[test]
    fn test_default_regions_are_valid_timezones() {
        for region in default_regions() {
            assert!(parse_timezone(&region.timezone).is_ok(), "{}", region.timezone);
        }
    }

    #[test]
    fn test_window_is_half_open() {
        let window = BusinessHoursWindow::default();
        assert!(!window.contains(8, Weekday::Tue));
        assert!(window.contains(9, Weekday::Tue));
        assert!(window.contains(16, Weekday::Tue));
        assert!(!window.contains(17, Weekday::Tue));
    }

    #[test]
    fn test_window_excludes_weekend() {
        let window = BusinessHoursWindow::default();
        assert!(!window.contains(12, Weekday::Sat));
        assert!(!window.contains(12, Weekday::Sun));
        assert!(window.contains(12, Weekday::Fri));
    }

    #[test]
    fn test_window_validate_rejects_inverted_hours() {
        let window = BusinessHoursWindow {
            start_hour: 17,
            end_hour: 9,
            ..Default::default()
        };
        assert!(window.validate().is_err());
    }

    #[test]
    fn test_region_from_str() {
        let region: Region = "Tokyo office=Asia/Tokyo".parse().unwrap();
        assert_eq!(region, Region::new("Tokyo office", "Asia/Tokyo"));
    }

    #[test]
    fn test_region_from_str_missing_separator() {
        let err = "Asia/Tokyo".parse::<Region>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidRegion(_)), "got: {err}");
    }

    #[test]
    fn test_region_from_str_bad_timezone() {
        let err = "Mars=Mars/Olympus".parse::<Region>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidTimezone(_)), "got: {err}");
    }

    #[test]
    fn test_config_from_empty_json_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_from_json_partial_override() {
        let config = EngineConfig::from_json(
            r#"{
                "regions": [{"name": "Berlin", "timezone": "Europe/Berlin"}],
                "business_hours": {"start_hour": 8, "end_hour": 16},
                "search": {"max_results": 3}
            }"#,
        )
        .unwrap();
        assert_eq!(config.regions, vec![Region::new("Berlin", "Europe/Berlin")]);
        assert_eq!(config.business_hours.start_hour, 8);
        assert_eq!(config.business_hours.workdays.len(), 5);
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.search.radius_hours, 12);
    }

    #[test]
    fn test_config_from_json_rejects_bad_timezone() {
        let err = EngineConfig::from_json(r#"{"regions": [{"name": "X", "timezone": "Nope/Nope"}]}"#)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTimezone(_)), "got: {err}");
    }

    #[test]
    fn test_config_from_json_rejects_huge_radius() {
        let err = EngineConfig::from_json(r#"{"search": {"radius_hours": 3000000000}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)), "got: {err}");
        assert!(err.to_string().contains("radius_hours"), "got: {err}");
    }

    #[test]
    fn test_search_radius_bounds() {
        let at_cap = SearchOptions {
            radius_hours: SearchOptions::MAX_RADIUS_HOURS,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());

        let above_cap = SearchOptions {
            radius_hours: SearchOptions::MAX_RADIUS_HOURS + 1,
            ..Default::default()
        };
        assert!(above_cap.validate().is_err());

        let negative = SearchOptions {
            radius_hours: -1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_config_from_json_rejects_malformed() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)), "got: {err}");
    }
}
