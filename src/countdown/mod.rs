// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Countdown to the ceremony

use derive_more::{Display, Error};
use once_cell::sync::OnceCell;
use regex::Regex;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, Weekday,
    format_description::BorrowedFormatItem, macros::format_description,
};

/// UTC offset of Philippine time in hours.
pub const DEFAULT_UTC_OFFSET_HOURS: i8 = 8;

/// Assumed if the time of day cannot be parsed.
pub const DEFAULT_TIME: Time = time::macros::time!(15:00);

/// Long month name, unpadded day, year, e.g. `February 6, 2026`
const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

// 12-hour clock, e.g. `1:00 PM`
const TIME_OF_DAY_REGEX_STR: &str = r"(?i)(\d+):(\d+)\s*(AM|PM)";

static TIME_OF_DAY_REGEX: OnceCell<Regex> = OnceCell::new();

#[must_use]
fn time_of_day_regex() -> &'static Regex {
    TIME_OF_DAY_REGEX.get_or_init(|| TIME_OF_DAY_REGEX_STR.parse().unwrap())
}

/// A parsing error
#[derive(Debug, Display, Error)]
pub enum ParseError {
    /// The date does not match `<Month> <day>, <year>`.
    #[display("invalid ceremony date: {_0}")]
    Date(time::error::Parse),

    /// The UTC offset is out of range.
    #[display("invalid UTC offset: {_0}")]
    UtcOffset(time::error::ComponentRange),
}

/// Parse a time of day like `1:00 PM` or `3:00 PM, PH Time`.
///
/// Returns `None` if no time of day is found or if it is out of range.
#[must_use]
pub fn parse_time_of_day(input: &str) -> Option<Time> {
    let input = input.split(',').next().unwrap_or_default().trim();
    let captures = time_of_day_regex().captures(input)?;
    let hour = captures[1].parse::<u8>().ok()?;
    let minute = captures[2].parse::<u8>().ok()?;
    let is_pm = captures[3].eq_ignore_ascii_case("PM");
    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (hour, true) => hour.checked_add(12)?,
        (hour, false) => hour,
    };
    Time::from_hms(hour, minute, 0).ok()
}

/// The start of the ceremony
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ceremony {
    starts_at: OffsetDateTime,
}

impl Ceremony {
    /// Create a ceremony from its local start time.
    #[must_use]
    pub const fn new(starts_at: OffsetDateTime) -> Self {
        Self { starts_at }
    }

    /// Parse the ceremony date and time, given in local time at the UTC offset.
    ///
    /// The time defaults to [`DEFAULT_TIME`] if it cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the date is invalid or the offset is out
    /// of range.
    pub fn parse(date: &str, time: &str, utc_offset_hours: i8) -> Result<Self, ParseError> {
        let date = Date::parse(date.trim(), DATE_FORMAT).map_err(ParseError::Date)?;
        let time = parse_time_of_day(time).unwrap_or_else(|| {
            log::warn!("Unrecognized ceremony time {time:?}, assuming {DEFAULT_TIME}");
            DEFAULT_TIME
        });
        let offset = UtcOffset::from_hms(utc_offset_hours, 0, 0).map_err(ParseError::UtcOffset)?;
        let starts_at = PrimitiveDateTime::new(date, time).assume_offset(offset);
        Ok(Self { starts_at })
    }

    /// The start in local time.
    #[must_use]
    pub const fn starts_at(&self) -> OffsetDateTime {
        self.starts_at
    }

    /// The day of the week in local time.
    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        self.starts_at.weekday()
    }

    /// The time left from now.
    #[must_use]
    pub fn time_left(&self) -> TimeLeft {
        TimeLeft::until(self.starts_at, OffsetDateTime::now_utc())
    }
}

/// Remaining time, split into calendar units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLeft {
    /// Whole days
    pub days: u64,

    /// Hours, 0..=23
    pub hours: u8,

    /// Minutes, 0..=59
    pub minutes: u8,

    /// Seconds, 0..=59
    pub seconds: u8,
}

impl TimeLeft {
    /// The time left from `now` until `target`, truncated to whole seconds.
    ///
    /// Zero if `now` is not before `target`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn until(target: OffsetDateTime, now: OffsetDateTime) -> Self {
        let difference = target - now;
        if !difference.is_positive() {
            return Self::default();
        }
        let total_seconds = difference.whole_seconds().unsigned_abs();
        Self {
            days: total_seconds / 86_400,
            hours: (total_seconds / 3_600 % 24) as u8,
            minutes: (total_seconds / 60 % 60) as u8,
            seconds: (total_seconds % 60) as u8,
        }
    }

    /// Check if the countdown has elapsed.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}
