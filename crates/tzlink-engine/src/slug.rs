//! URL slugs for shared event links.
//!
//! Slugs are deterministic and lossy. They carry no uniqueness guarantee: two
//! events with the same title on the same date get the same slug, and the
//! caller is responsible for resolving collisions.

use chrono::NaiveDate;

/// Longest title part kept in a slug.
const MAX_TITLE_LEN: usize = 50;

/// Build a slug like `"weekly-sync-2024-03-12"` from a title and event date.
///
/// ASCII letters and digits are lower-cased and kept; every run of anything
/// else becomes a single `-`. A title with nothing usable yields the date alone.
///
/// ```
/// use chrono::NaiveDate;
/// use tzlink_engine::slug::generate_slug;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
/// assert_eq!(generate_slug("Weekly Sync!", date), "weekly-sync-2024-03-12");
/// ```
pub fn generate_slug(title: &str, date: NaiveDate) -> String {
    let mut base = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            base.push(ch.to_ascii_lowercase());
        } else if !base.is_empty() && !base.ends_with('-') {
            base.push('-');
        }
    }
    base.truncate(MAX_TITLE_LEN);
    let base = base.trim_end_matches('-');

    let date = date.format("%Y-%m-%d");
    if base.is_empty() {
        date.to_string()
    } else {
        format!("{base}-{date}")
    }
}
