use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tzlink_engine::{parse_instant, Region};

/// tzlink - schedule across timezones from the command line
#[derive(Debug, Parser)]
#[command(name = "tzlink")]
#[command(about = "Parse event times, check business hours, and suggest meeting times across timezones", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON engine config (regions, business_hours, search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Turn a phrase like "tomorrow 2pm" into an instant (prints null if unrecognized)
    Parse {
        /// The phrase to parse
        text: String,

        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,

        /// IANA timezone the phrase is meant in; defaults to the host timezone
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Show which regions are in business hours at an instant
    Status {
        /// Instant to check (RFC 3339); defaults to the current time
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,

        /// Region as NAME=TIMEZONE; repeat for several (defaults to the configured regions)
        #[arg(long = "region", value_name = "NAME=TIMEZONE")]
        regions: Vec<Region>,
    },

    /// Suggest meeting times around an instant
    #[command(alias = "optimal")]
    Suggest {
        /// Base instant (RFC 3339); defaults to the current time
        #[arg(long, value_parser = parse_instant)]
        base: Option<DateTime<Utc>>,

        /// Region as NAME=TIMEZONE; repeat for several (defaults to the configured regions)
        #[arg(long = "region", value_name = "NAME=TIMEZONE")]
        regions: Vec<Region>,
    },

    /// Build a URL slug for an event
    Slug {
        /// Event title
        title: String,

        /// Event date (YYYY-MM-DD); defaults to today in UTC
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show an instant as a viewer in another timezone sees it
    Convert {
        /// Instant (RFC 3339)
        #[arg(value_parser = parse_instant)]
        instant: DateTime<Utc>,

        /// Viewer's IANA timezone
        timezone: String,
    },
}
