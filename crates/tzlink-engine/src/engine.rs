//! A configured entry point bundling regions, business hours, and search
//! options, for callers that want one object instead of threading settings
//! through every call.

use chrono::{DateTime, NaiveDate, Utc};

use crate::business_hours::{classify, RegionStatus};
use crate::config::{EngineConfig, Region};
use crate::error::Result;
use crate::optimal::{find_optimal, MeetingSuggestion};
use crate::{parser, slug};

#[derive(Debug, Clone, Default)]
pub struct SchedulingEngine {
    config: EngineConfig,
}

impl SchedulingEngine {
    /// Build an engine from a validated config.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// See [`parser::parse_natural_language`].
    pub fn parse_natural_language(
        &self,
        text: &str,
        now: DateTime<Utc>,
        timezone: &str,
    ) -> Result<Option<DateTime<Utc>>> {
        parser::parse_natural_language(text, now, timezone)
    }

    /// Classify `instant` for `regions`, or the configured regions when `None`.
    pub fn business_hours_status(
        &self,
        instant: DateTime<Utc>,
        regions: Option<&[Region]>,
    ) -> Result<Vec<RegionStatus>> {
        classify(
            instant,
            regions.unwrap_or(self.config.regions.as_slice()),
            &self.config.business_hours,
        )
    }

    /// Rank meeting times around `base` for `regions`, or the configured
    /// regions when `None`.
    pub fn optimal_meeting_times(
        &self,
        base: DateTime<Utc>,
        regions: Option<&[Region]>,
    ) -> Result<Vec<MeetingSuggestion>> {
        find_optimal(
            base,
            regions.unwrap_or(self.config.regions.as_slice()),
            &self.config.business_hours,
            &self.config.search,
        )
    }

    pub fn slug(&self, title: &str, date: NaiveDate) -> String {
        slug::generate_slug(title, date)
    }
}
