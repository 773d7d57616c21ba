//! Calendar math used by the journal views.
//!
//! Months are 0-based throughout (`0` = January) and weekdays count from
//! Sunday (`0`). Month and day arguments overflow the way a calendar does:
//! month 12 of 2023 is January 2024, day 32 of January is February 1st.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Folds an overflowing 0-based month into its (year, 1-based month).
pub fn normalize_month(year: i32, month0: i32) -> (i32, u32) {
    let total = year as i64 * 12 + month0 as i64;
    let year = total.div_euclid(12) as i32;
    let month = total.rem_euclid(12) as u32 + 1;
    (year, month)
}

pub fn days_in_month(year: i32, month0: i32) -> u32 {
    let (year, month) = normalize_month(year, month0);
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Weekday of the month's first day, 0 = Sunday.
pub fn first_weekday_of_month(year: i32, month0: i32) -> u32 {
    // Sakamoto's method, valid for any proleptic Gregorian year.
    const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let (year, month) = normalize_month(year, month0);
    let y = if month < 3 { year as i64 - 1 } else { year as i64 };
    let weekday = y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        + OFFSETS[(month - 1) as usize]
        + 1;
    weekday.rem_euclid(7) as u32
}

/// `YYYY-MM-DD`, zero-padded.
pub fn format_date<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Same year, month and day of month. Time of day is ignored.
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Builds a calendar date, rolling overflowing months and days forward (or
/// backward for day 0 and negatives). None only outside chrono's range.
pub fn date_for(year: i32, month0: i32, day: i32) -> Option<NaiveDate> {
    let (year, month) = normalize_month(year, month0);
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(Duration::days(day as i64 - 1))
}

/// Current instant as an ISO-8601 UTC string with millisecond precision.
pub fn now_timestamp() -> String {
    to_timestamp(Utc::now())
}

pub fn to_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an entry date: RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// UTC calendar day of an entry date. Falls back to the raw prefix before
/// `T` when the value does not parse.
pub fn utc_day_key(value: &str) -> String {
    match parse_timestamp(value) {
        Some(instant) => format_date(&instant),
        None => value.split('T').next().unwrap_or_default().to_string(),
    }
}
