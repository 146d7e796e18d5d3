//! Resolution of day labels and event time labels into absolute instants.
//!
//! All schedule times are interpreted in the festival's own timezone,
//! independent of where this process runs. Year and timezone are explicit
//! parameters so historical running orders parse deterministically.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;
use regex::Regex;

use crate::error::ExtractError;
use crate::model::TimeRange;

/// The timezone the festival takes place in (Tolmin, Slovenia).
pub const FESTIVAL_TZ: Tz = chrono_tz::Europe::Ljubljana;

/// Events starting before this hour belong to the night after their nominal
/// day. The running order labels post-midnight slots with the small hours of
/// the previous day's lineup; nothing is scheduled before 10:00.
const ROLLOVER_HOUR: u32 = 10;

const DAY_PATTERN: &str = "Weekday DD.MM.";
const EVENT_PATTERN: &str = "HH:MM - HH:MM";

/// Day labels look like "Saturday 22.07.". The weekday name is matched but
/// deliberately not cross-checked against the date; the source has used
/// mismatched weekdays before.
static DAY_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday) (\d{1,2})\.(\d{1,2})\.$")
        .unwrap()
});

fn bad_label(label: &str, expected: &'static str) -> ExtractError {
    ExtractError::TimeFormat {
        label: label.to_string(),
        expected,
    }
}

/// Midnight of the labeled date in `year`, in the festival timezone.
pub fn resolve_day_start(year: i32, tz: Tz, label: &str) -> Result<DateTime<Tz>, ExtractError> {
    let caps = DAY_LABEL_RE
        .captures(label)
        .ok_or_else(|| bad_label(label, DAY_PATTERN))?;

    let day: u32 = caps[1].parse().map_err(|_| bad_label(label, DAY_PATTERN))?;
    let month: u32 = caps[2].parse().map_err(|_| bad_label(label, DAY_PATTERN))?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| bad_label(label, DAY_PATTERN))?;

    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| bad_label(label, DAY_PATTERN))
}

/// Time range covering the labeled calendar day: midnight to midnight of the
/// following day, as calendar arithmetic in the festival timezone.
pub fn resolve_day_range(year: i32, tz: Tz, label: &str) -> Result<TimeRange, ExtractError> {
    let start = resolve_day_start(year, tz, label)?;

    let next = start
        .date_naive()
        .succ_opt()
        .ok_or_else(|| bad_label(label, DAY_PATTERN))?;
    let end = tz
        .from_local_datetime(&next.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| bad_label(label, DAY_PATTERN))?;

    Ok(TimeRange {
        start: start.timestamp(),
        end: end.timestamp(),
    })
}

/// Absolute time range of an event on the day starting at `day_start`.
///
/// The trimmed sentinel "-" marks an event without a scheduled time and
/// resolves to `None`. Any other label must be two "HH:MM" clock times joined
/// by " - ".
pub fn resolve_event_range(
    day_start: DateTime<Tz>,
    label: &str,
) -> Result<Option<TimeRange>, ExtractError> {
    if label.trim() == "-" {
        return Ok(None);
    }

    let halves: Vec<&str> = label.split(" - ").collect();
    let (start_label, end_label) = match halves.as_slice() {
        [start, end] => (*start, *end),
        _ => return Err(bad_label(label, EVENT_PATTERN)),
    };

    let start = resolve_clock_time(&day_start, label, start_label)?;
    let end = resolve_clock_time(&day_start, label, end_label)?;

    Ok(Some(TimeRange {
        start: start.timestamp(),
        end: end.timestamp(),
    }))
}

fn resolve_clock_time(
    day_start: &DateTime<Tz>,
    label: &str,
    clock: &str,
) -> Result<DateTime<Tz>, ExtractError> {
    let parsed =
        NaiveTime::parse_from_str(clock, "%H:%M").map_err(|_| bad_label(label, EVENT_PATTERN))?;

    let mut date = day_start.date_naive();
    if parsed.hour() < ROLLOVER_HOUR {
        date = date
            .succ_opt()
            .ok_or_else(|| bad_label(label, EVENT_PATTERN))?;
    }

    day_start
        .timezone()
        .from_local_datetime(&date.and_time(parsed))
        .earliest()
        .ok_or_else(|| bad_label(label, EVENT_PATTERN))
}
