use std::sync::LazyLock;

use chrono::{Datelike, Days, Month, NaiveDate, Weekday};
use regex::Regex;

use crate::error::{Error, Result};

static LONG_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]+)\s+(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]+)\s+(\d{4})\s*$").unwrap()
});

/// Ordinal suffix for a day of the month.
pub fn day_suffix(day: u32) -> &'static str {
    match day {
        4..=20 | 24..=30 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// "Tuesday 2nd September 2025" -> "Tuesday 9th September 2025".
pub fn next_week(date: &str) -> Result<String> {
    let caps = LONG_DATE_RE.captures(date).ok_or_else(|| {
        Error::DateParse(format!("'{}' is not '<Weekday> <day> <Month> <Year>'", date))
    })?;

    caps[1]
        .parse::<Weekday>()
        .map_err(|_| Error::DateParse(format!("unknown weekday '{}'", &caps[1])))?;
    let month = caps[3]
        .parse::<Month>()
        .map_err(|_| Error::DateParse(format!("unknown month '{}'", &caps[3])))?;
    let day: u32 = caps[2]
        .parse()
        .map_err(|_| Error::DateParse(format!("bad day '{}'", &caps[2])))?;
    let year: i32 = caps[4]
        .parse()
        .map_err(|_| Error::DateParse(format!("bad year '{}'", &caps[4])))?;

    let parsed = NaiveDate::from_ymd_opt(year, month.number_from_month(), day).ok_or_else(|| {
        Error::DateParse(format!("{} {} {} is not a calendar date", day, &caps[3], year))
    })?;
    let next = parsed
        .checked_add_days(Days::new(7))
        .ok_or_else(|| Error::DateParse(format!("{} is out of range", date)))?;

    let day = next.day();
    Ok(format!(
        "{} {}{} {}",
        next.format("%A"),
        day,
        day_suffix(day),
        next.format("%B %Y")
    ))
}
