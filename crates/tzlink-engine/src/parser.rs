//! Natural-language time parsing for event scheduling.
//!
//! Turns short phrases such as `"tomorrow 2 PM"`, `"next friday at 10:30am"`
//! or `"2:30 pm"` into an absolute instant. The reference "now" and the
//! timezone the phrase is meant in are always explicit inputs; nothing here
//! reads the system clock.
//!
//! Unrecognized input is an expected outcome and yields `None`, not an error.
//! Timezone abbreviations in the text (`"2pm PST"`) are ignored, and no check is
//! made that the result lies in the future.
//!
//! # Patterns
//!
//! Tried in this order; the first match wins:
//!
//! 1. [`Pattern::Tomorrow`] — `tomorrow [time]`, default 09:00
//! 2. [`Pattern::NextWeekday`] — `next <weekday> [time]`, default 09:00; on the
//!    named weekday itself this means seven days later, never today
//! 3. [`Pattern::BareTime`] — a time on the current local date
//!
//! Times are `H[:MM] am|pm` (meridiem attached or separate, `a.m.`/`p.m.`
//! accepted) or a 24-hour `HH:MM`.

use chrono::{
    DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::convert::parse_timezone;
use crate::error::Result;

/// Hour used when a phrase names a day but no time.
const DEFAULT_HOUR: u32 = 9;

// ── Public API ──────────────────────────────────────────────────────────────

/// Half of a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// Convert a 12-hour clock hour to 24-hour.
///
/// `pm` adds 12 unless the hour is already 12; `am` maps 12 to 0 and leaves the
/// rest unchanged. Returns `None` for hours outside `1..=12`.
pub fn to_24_hour(hour: u32, meridiem: Meridiem) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    Some(match (hour, meridiem) {
        (12, Meridiem::Pm) => 12,
        (12, Meridiem::Am) => 0,
        (h, Meridiem::Pm) => h + 12,
        (h, Meridiem::Am) => h,
    })
}

/// The phrase shapes the parser understands, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Tomorrow,
    NextWeekday,
    BareTime,
}

impl Pattern {
    /// Matching order. Earlier patterns take precedence.
    pub const ORDER: [Pattern; 3] = [Pattern::Tomorrow, Pattern::NextWeekday, Pattern::BareTime];

    /// Try this pattern alone against tokenized input.
    pub fn match_tokens(self, tokens: &[&str]) -> Option<Phrase> {
        match self {
            Pattern::Tomorrow => match_tomorrow(tokens),
            Pattern::NextWeekday => match_next_weekday(tokens),
            Pattern::BareTime => match_bare_time(tokens),
        }
    }
}

/// What a matcher extracted, before it is anchored to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    Tomorrow { time: Option<NaiveTime> },
    NextWeekday { weekday: Weekday, time: Option<NaiveTime> },
    BareTime { time: NaiveTime },
}

/// Find the first pattern matching `text`.
pub fn recognize(text: &str) -> Option<Phrase> {
    let lowered = text.to_lowercase();
    let tokens = tokenize(&lowered);

    for pattern in Pattern::ORDER {
        if let Some(phrase) = pattern.match_tokens(&tokens) {
            debug!(?pattern, ?phrase, "matched time phrase");
            return Some(phrase);
        }
    }
    trace!(text, "no time phrase matched");
    None
}

/// Parse `text` relative to `now`, reading wall-clock times in `tz`.
///
/// Returns `None` when no pattern matches.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tzlink_engine::parser::parse;
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap();
/// let parsed = parse("tomorrow 2 pm", now, chrono_tz::UTC).unwrap();
/// assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 11, 14, 0, 0).unwrap());
/// ```
pub fn parse(text: &str, now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
    let phrase = recognize(text)?;
    let today = now.with_timezone(&tz).date_naive();
    let default_time = NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0)?;

    let (date, time) = match phrase {
        Phrase::Tomorrow { time } => (today.succ_opt()?, time.unwrap_or(default_time)),
        Phrase::NextWeekday { weekday, time } => {
            (next_weekday(today, weekday)?, time.unwrap_or(default_time))
        }
        Phrase::BareTime { time } => (today, time),
    };

    localize(&tz, date.and_time(time)).map(|dt| dt.with_timezone(&Utc))
}

/// String-typed entry point: `timezone` is an IANA name.
///
/// # Errors
///
/// Returns [`crate::EngineError::InvalidTimezone`] for an unknown timezone. An
/// unrecognized phrase is `Ok(None)`.
pub fn parse_natural_language(
    text: &str,
    now: DateTime<Utc>,
    timezone: &str,
) -> Result<Option<DateTime<Utc>>> {
    let tz = parse_timezone(timezone)?;
    Ok(parse(text, now, tz))
}

// ── Matchers ────────────────────────────────────────────────────────────────

fn match_tomorrow(tokens: &[&str]) -> Option<Phrase> {
    let idx = tokens.iter().position(|&t| t == "tomorrow")?;
    Some(Phrase::Tomorrow {
        time: find_time(&tokens[idx + 1..]),
    })
}

fn match_next_weekday(tokens: &[&str]) -> Option<Phrase> {
    tokens.windows(2).enumerate().find_map(|(idx, pair)| {
        if pair[0] != "next" {
            return None;
        }
        let weekday = parse_weekday(pair[1])?;
        Some(Phrase::NextWeekday {
            weekday,
            time: find_time(&tokens[idx + 2..]),
        })
    })
}

fn match_bare_time(tokens: &[&str]) -> Option<Phrase> {
    find_time(tokens).map(|time| Phrase::BareTime { time })
}

// ── Date arithmetic ─────────────────────────────────────────────────────────

/// Date of the next `target` strictly after `today` (1 to 7 days ahead).
fn next_weekday(today: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let days_ahead =
        (target.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };
    today.checked_add_days(Days::new(u64::from(days_ahead)))
}

/// Pin a wall-clock time to the zone.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times inside a
/// spring-forward gap move to the first minute after the gap.
fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=24 * 60).find_map(|minutes| {
            let shifted = naive.checked_add_signed(chrono::Duration::minutes(minutes))?;
            tz.from_local_datetime(&shifted).earliest()
        }),
    }
}

// ── Token helpers ───────────────────────────────────────────────────────────

fn tokenize(lowered: &str) -> Vec<&str> {
    lowered
        .split_whitespace()
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Strip surrounding punctuation, sentence-ending dots and a possessive `'s`.
///
/// Dropping every trailing `.` keeps meridiems intact: `"p.m."` becomes `"p.m"`,
/// which [`split_meridiem`] accepts.
fn clean_token(token: &str) -> &str {
    let token = token
        .trim_matches(|c| matches!(c, ',' | '!' | '?' | ';' | '(' | ')' | '"'))
        .trim_end_matches('.');
    token
        .strip_suffix("'s")
        .or_else(|| token.strip_suffix("\u{2019}s"))
        .unwrap_or(token)
}

/// Parse a weekday name (full or abbreviated, already lower-cased).
fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// First time token anywhere in `tokens`.
fn find_time(tokens: &[&str]) -> Option<NaiveTime> {
    (0..tokens.len()).find_map(|i| time_at(tokens, i))
}

/// A time starting at `tokens[i]`, possibly using `tokens[i + 1]` as meridiem.
fn time_at(tokens: &[&str], i: usize) -> Option<NaiveTime> {
    let token = tokens[i];

    if let Some((digits, meridiem)) = split_meridiem(token) {
        return if digits.is_empty() {
            None
        } else {
            parse_twelve_hour(digits, meridiem)
        };
    }

    match tokens.get(i + 1).and_then(|next| meridiem_word(next)) {
        Some(meridiem) => parse_twelve_hour(token, meridiem),
        None => parse_twenty_four_hour(token),
    }
}

/// Split `"2:30pm"` into `("2:30", Pm)`. A lone `"pm"` yields `("", Pm)`.
fn split_meridiem(token: &str) -> Option<(&str, Meridiem)> {
    const SUFFIXES: [(&str, Meridiem); 6] = [
        ("a.m.", Meridiem::Am),
        ("p.m.", Meridiem::Pm),
        ("a.m", Meridiem::Am),
        ("p.m", Meridiem::Pm),
        ("am", Meridiem::Am),
        ("pm", Meridiem::Pm),
    ];
    SUFFIXES
        .iter()
        .find_map(|&(suffix, meridiem)| token.strip_suffix(suffix).map(|rest| (rest, meridiem)))
}

fn meridiem_word(token: &str) -> Option<Meridiem> {
    match split_meridiem(token) {
        Some(("", meridiem)) => Some(meridiem),
        _ => None,
    }
}

/// `"H"` or `"H:MM"` with H in 1..=12.
fn parse_twelve_hour(s: &str, meridiem: Meridiem) -> Option<NaiveTime> {
    let (hour, minute) = split_clock(s)?;
    NaiveTime::from_hms_opt(to_24_hour(hour, meridiem)?, minute, 0)
}

/// `"HH:MM"` on a 24-hour clock; the colon is required.
fn parse_twenty_four_hour(s: &str) -> Option<NaiveTime> {
    if !s.contains(':') {
        return None;
    }
    let (hour, minute) = split_clock(s)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Split `"H"` / `"H:MM"` into numbers. Hours are 1-2 digits, minutes exactly 2.
fn split_clock(s: &str) -> Option<(u32, u32)> {
    let (hour, minute) = match s.split_once(':') {
        Some((h, m)) if m.len() == 2 => (h, Some(m)),
        Some(_) => return None,
        None => (s, None),
    };
    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let minute = match minute {
        Some(m) if m.bytes().all(|b| b.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    if minute > 59 {
        return None;
    }
    Some((hour.parse().ok()?, minute))
}
