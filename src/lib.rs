mod clock;
mod consts;
mod convert;
mod julian;
pub mod leap;
pub mod normalize;
mod prelude;
mod range;

pub use clock::{ClockError, GregorianClock};
pub use consts::*;
pub use convert::{days_in_year, jalali_to_jdn, jdn_to_jalali, month_length, ordinal};
pub use julian::{floor_div, gregorian_to_jdn, jdn_to_gregorian};
pub use leap::{LeapYearResult, is_leap_year};
pub use normalize::normalize_date;
pub use range::{JalaliDateRange, JalaliDays, RangeError};

use crate::prelude::*;
use chrono::Weekday;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A valid date in the Jalali calendar.
///
/// `1 <= month <= 12` and `1 <= day <= month_length(month, year)` always hold;
/// every constructor and mutator either validates or normalizes. Years use
/// astronomical numbering and may be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{:02}-{:02}", "pad_year(*year)", "month", "day")]
pub struct JalaliDate {
    year: i64,
    month: u8,
    day: u8,
}

/// A date field outside its allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{reason}: {value} (max {max})")]
pub struct ValidationError {
    pub reason: &'static str,
    pub value: i64,
    pub max: i64,
}

impl ValidationError {
    pub const YEAR_OUT_OF_RANGE: &'static str = "year out of range";
    pub const DAY_OUT_OF_RANGE: &'static str = "day out of range";
    pub const MONTH_OUT_OF_RANGE: &'static str = "month out of range";
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid date: {_0}")]
    Validation(ValidationError),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn pad_year(year: i64) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    }
}

impl JalaliDate {
    /// Creates a date, rejecting out-of-range years, months and days.
    ///
    /// Years must lie in `MIN_YEAR..=MAX_YEAR`.
    ///
    /// # Errors
    /// Returns `ValidationError` naming the first offending field and its maximum.
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self, ValidationError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError {
                reason: ValidationError::YEAR_OUT_OF_RANGE,
                value: year,
                max: MAX_YEAR,
            });
        }
        let max_month = i64::from(MAX_MONTH);
        if !(i64::from(FARVARDIN)..=max_month).contains(&month) {
            return Err(ValidationError {
                reason: ValidationError::MONTH_OUT_OF_RANGE,
                value: month,
                max: max_month,
            });
        }
        let max_day = month_length(month, year);
        if !(i64::from(MIN_DAY)..=max_day).contains(&day) {
            return Err(ValidationError {
                reason: ValidationError::DAY_OUT_OF_RANGE,
                value: day,
                max: max_day,
            });
        }
        Ok(Self::from_valid(year, month, day))
    }

    /// Creates a date from any triple, carrying or borrowing overflowing
    /// months and days.
    ///
    /// ```
    /// use jalali_date::JalaliDate;
    ///
    /// let date = JalaliDate::normalized(1395, 13, 5);
    /// assert_eq!(date.to_string(), "1396-01-05");
    /// ```
    pub fn normalized(year: i64, month: i64, day: i64) -> Self {
        let (year, month, day) = normalize_date(year, month, day);
        Self::from_valid(year, month, day)
    }

    /// Triples coming out of the engine are already in range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_valid(year: i64, month: i64, day: i64) -> Self {
        debug_assert!((1..=i64::from(MAX_MONTH)).contains(&month));
        debug_assert!((1..=i64::from(FIRST_HALF_MONTH_DAYS)).contains(&day));
        Self {
            year,
            month: month as u8,
            day: day as u8,
        }
    }

    /// Creates the date for a Julian Day Number
    pub fn from_jdn(jdn: i64) -> Self {
        let (year, month, day) = jdn_to_jalali(jdn);
        Self::from_valid(year, month, day)
    }

    /// Creates the date falling on a proleptic Gregorian date.
    ///
    /// ```
    /// use jalali_date::JalaliDate;
    ///
    /// let date = JalaliDate::from_gregorian(1988, 12, 22);
    /// assert_eq!(date.to_string(), "1367-10-01");
    /// ```
    pub fn from_gregorian(year: i64, month: i64, day: i64) -> Self {
        Self::from_jdn(gregorian_to_jdn(year, month, day))
    }

    /// Reads the calendar date of a Gregorian clock value
    pub fn from_clock<C: GregorianClock + ?Sized>(clock: &C) -> Self {
        let (year, month, day) = clock.gregorian_ymd();
        Self::from_gregorian(year, month, day)
    }

    /// Writes this date into a Gregorian clock value, keeping its time of day.
    ///
    /// # Errors
    /// Returns `ClockError` if the clock cannot represent the date.
    pub fn write_to_clock<C: GregorianClock + ?Sized>(
        &self,
        clock: &mut C,
    ) -> Result<(), ClockError> {
        let (year, month, day) = self.to_gregorian();
        clock.set_gregorian_ymd(year, month, day)
    }

    pub const fn year(&self) -> i64 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Julian Day Number of this date
    pub fn jdn(&self) -> i64 {
        jalali_to_jdn(self.year, i64::from(self.month), i64::from(self.day))
    }

    /// Proleptic Gregorian `(year, month, day)` of this date
    pub fn to_gregorian(&self) -> (i64, i64, i64) {
        jdn_to_gregorian(self.jdn())
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year, false)
    }

    pub fn days_in_month(&self) -> u8 {
        // Month lengths are 29..=31
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let days = month_length(i64::from(self.month), self.year) as u8;
        days
    }

    pub fn days_in_year(&self) -> i64 {
        days_in_year(self.year)
    }

    /// Day of the year, starting at 1 on Nowruz
    pub const fn ordinal(&self) -> i64 {
        ordinal(self.month as i64, self.day as i64)
    }

    /// Day of the week
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn weekday(&self) -> Weekday {
        WEEKDAYS[self.jdn().rem_euclid(DAYS_PER_WEEK) as usize]
    }

    /// Position in the Persian week: `0` for Saturday through `6` for Friday
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn weekday_index(&self) -> u8 {
        (self.jdn() + 2).rem_euclid(DAYS_PER_WEEK) as u8
    }

    /// Season of the year, `1..=4`, three months each
    pub const fn quarter(&self) -> u8 {
        (self.month - 1) / MONTHS_PER_QUARTER + 1
    }

    /// Saturday-based week of the month; week 1 contains the first day
    pub fn week_of_month(&self) -> u8 {
        let lead = self.first_day_of_month().weekday_index();
        (self.day - 1 + lead) / 7 + 1
    }

    /// Saturday-based week of the year; week 1 contains Nowruz
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn week_of_year(&self) -> u8 {
        let lead = Self::from_valid(self.year, 1, 1).weekday_index();
        ((self.ordinal() - 1 + i64::from(lead)) / DAYS_PER_WEEK + 1) as u8
    }

    pub const fn first_day_of_month(&self) -> Self {
        Self {
            day: MIN_DAY,
            ..*self
        }
    }

    pub fn last_day_of_month(&self) -> Self {
        Self {
            day: self.days_in_month(),
            ..*self
        }
    }

    /// Replaces the year; Esfand 30 moves to Farvardin 1 in a common year
    pub fn with_year(&self, year: i64) -> Self {
        Self::normalized(year, i64::from(self.month), i64::from(self.day))
    }

    /// Replaces the month, carrying overflow into the year
    pub fn with_month(&self, month: i64) -> Self {
        Self::normalized(self.year, month, i64::from(self.day))
    }

    /// Replaces the day, carrying overflow into later months
    pub fn with_day(&self, day: i64) -> Self {
        Self::normalized(self.year, i64::from(self.month), day)
    }

    pub fn add_years(&self, years: i64) -> Self {
        self.with_year(self.year + years)
    }

    /// Adds months; a day past the end of the target month carries forward.
    ///
    /// ```
    /// use jalali_date::JalaliDate;
    ///
    /// let date = JalaliDate::new(1395, 6, 31).unwrap();
    /// assert_eq!(date.add_months(1).to_string(), "1395-08-01");
    /// ```
    pub fn add_months(&self, months: i64) -> Self {
        self.with_month(i64::from(self.month) + months)
    }

    pub fn add_days(&self, days: i64) -> Self {
        self.with_day(i64::from(self.day) + days)
    }
}

impl Add<i64> for JalaliDate {
    type Output = Self;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for JalaliDate {
    type Output = Self;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

/// Days between two dates
impl Sub<Self> for JalaliDate {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        self.jdn() - rhs.jdn()
    }
}

impl FromStr for JalaliDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (negative, body) = match trimmed.strip_prefix(DATE_SEPARATOR) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let has_hyphen = body.contains(DATE_SEPARATOR);
        let has_slash = body.contains(ALT_DATE_SEPARATOR);
        let separator = match (has_hyphen, has_slash) {
            (true, true) => {
                return Err(ParseError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {ALT_DATE_SEPARATOR})"
                )));
            }
            (true, false) => DATE_SEPARATOR,
            (false, true) => ALT_DATE_SEPARATOR,
            (false, false) => {
                return Err(ParseError::InvalidFormat(format!(
                    "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD: {trimmed}"
                )));
            }
        };

        let parts: Vec<&str> = body.split(separator).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected 2 {separator} separators, found {}",
                parts.len() - 1
            )));
        };

        let year = Self::parse_component(year)?;
        let month = Self::parse_component(month)?;
        let day = Self::parse_component(day)?;

        Self::new(if negative { -year } else { year }, month, day).map_err(ParseError::from)
    }
}

impl JalaliDate {
    /// Parses one unsigned numeric field
    fn parse_component(s: &str) -> Result<i64, ParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<i64>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl serde::Serialize for JalaliDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for JalaliDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i64, month: i64, day: i64) -> JalaliDate {
        JalaliDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_new_valid() {
        let d = date(1395, 12, 30);
        assert_eq!((d.year(), d.month(), d.day()), (1395, 12, 30));
        assert!(JalaliDate::new(1395, 1, 31).is_ok());
        assert!(JalaliDate::new(1395, 7, 30).is_ok());
    }

    #[test]
    fn test_new_rejects_day_out_of_range() {
        assert_eq!(
            JalaliDate::new(1396, 12, 30),
            Err(ValidationError {
                reason: "day out of range",
                value: 30,
                max: 29,
            })
        );
        assert_eq!(
            JalaliDate::new(1395, 7, 31),
            Err(ValidationError {
                reason: "day out of range",
                value: 31,
                max: 30,
            })
        );
        assert!(matches!(
            JalaliDate::new(1395, 1, 0),
            Err(ValidationError { max: 31, .. })
        ));
    }

    #[test]
    fn test_new_rejects_month_out_of_range() {
        let err = JalaliDate::new(1395, 13, 1).unwrap_err();
        assert_eq!(err.reason, ValidationError::MONTH_OUT_OF_RANGE);
        assert_eq!(err.max, 12);
        assert!(JalaliDate::new(1395, 0, 1).is_err());
    }

    #[test]
    fn test_new_rejects_year_out_of_range() {
        let err = JalaliDate::new(MAX_YEAR + 1, 1, 1).unwrap_err();
        assert_eq!(err.reason, ValidationError::YEAR_OUT_OF_RANGE);
        assert!(JalaliDate::new(MIN_YEAR - 1, 1, 1).is_err());
        assert!(JalaliDate::new(MAX_YEAR, 12, 1).is_ok());
        assert!(JalaliDate::new(MIN_YEAR, 1, 1).is_ok());
    }

    #[test]
    fn test_parse_rejects_oversized_year() {
        for input in [
            "9223372036854775807-12-01",
            "-9223372036854775807-12-01",
            "10000000000-12-01",
            "99999999999999999999-01-01",
        ] {
            assert!(input.parse::<JalaliDate>().is_err(), "{input}");
        }

        let result = "100001-01-01".parse::<JalaliDate>();
        assert!(matches!(
            result,
            Err(ParseError::Validation(ValidationError {
                reason: ValidationError::YEAR_OUT_OF_RANGE,
                ..
            }))
        ));

        let result: Result<JalaliDate, _> = serde_json::from_str(r#""9223372036854775807-01-01""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_known_fixed_conversion() {
        let d = JalaliDate::from_gregorian(1988, 12, 22);
        assert_eq!(d, date(1367, 10, 1));
        assert_eq!(d.to_gregorian(), (1988, 12, 22));
        assert_eq!(d.jdn(), gregorian_to_jdn(1988, 12, 22));
    }

    #[test]
    fn test_from_jdn_unix_epoch() {
        assert_eq!(JalaliDate::from_jdn(2_440_588), date(1348, 10, 11));
    }

    #[test]
    fn test_clock_round_trip() {
        let clock = NaiveDate::from_ymd_opt(2017, 3, 20).unwrap();
        let d = JalaliDate::from_clock(&clock);
        assert_eq!(d, date(1395, 12, 30));

        let mut clock = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        d.add_days(1).write_to_clock(&mut clock).unwrap();
        assert_eq!(clock, NaiveDate::from_ymd_opt(2017, 3, 21).unwrap());
    }

    #[test]
    fn test_accessors() {
        let d = date(1367, 10, 1);
        assert_eq!(d.weekday(), Weekday::Thu);
        assert_eq!(d.weekday_index(), 5);
        assert_eq!(d.quarter(), 4);
        assert_eq!(d.ordinal(), 6 * 31 + 3 * 30 + 1);
        assert_eq!(d.days_in_month(), 30);
        assert!(!d.is_leap_year());
        assert_eq!(d.days_in_year(), 365);

        let leap = date(1395, 12, 1);
        assert!(leap.is_leap_year());
        assert_eq!(leap.days_in_month(), 30);
        assert_eq!(leap.days_in_year(), 366);
        assert_eq!(leap.last_day_of_month(), date(1395, 12, 30));
        assert_eq!(leap.first_day_of_month(), leap);
    }

    #[test]
    fn test_quarters() {
        let quarters: Vec<u8> = (1..=12).map(|m| date(1400, m, 1).quarter()).collect();
        assert_eq!(quarters, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn test_weeks_start_on_saturday() {
        // 1395-01-01 is Sunday, 20 March 2016
        let nowruz = date(1395, 1, 1);
        assert_eq!(nowruz.weekday(), Weekday::Sun);
        assert_eq!(nowruz.weekday_index(), 1);
        assert_eq!(nowruz.week_of_year(), 1);
        assert_eq!(date(1395, 1, 6).week_of_year(), 1);
        assert_eq!(date(1395, 1, 7).weekday(), Weekday::Sat);
        assert_eq!(date(1395, 1, 7).week_of_year(), 2);
        assert_eq!(date(1395, 1, 6).week_of_month(), 1);
        assert_eq!(date(1395, 1, 7).week_of_month(), 2);
        assert_eq!(date(1395, 12, 30).week_of_year(), 53);
    }

    #[test]
    fn test_with_and_add_route_through_normalization() {
        let d = date(1395, 12, 30);
        assert_eq!(d.with_year(1396), date(1397, 1, 1));
        assert_eq!(d.add_years(4), date(1399, 12, 30));
        assert_eq!(d.with_month(13), date(1396, 1, 30));
        assert_eq!(d.with_day(0), date(1395, 11, 30));
        assert_eq!(d.add_months(-12), date(1395, 1, 1));
        assert_eq!(date(1395, 6, 31).add_months(1), date(1395, 8, 1));
        assert_eq!(d.add_days(1), date(1396, 1, 1));
        assert_eq!(d.add_days(-365), date(1395, 1, 1));
    }

    #[test]
    fn test_day_arithmetic_operators() {
        let d = date(1395, 12, 30);
        assert_eq!(d + 1, date(1396, 1, 1));
        assert_eq!(d - 30, date(1395, 11, 30));
        assert_eq!(date(1396, 1, 1) - date(1395, 1, 1), 366);
        assert_eq!(date(1397, 1, 1) - date(1396, 1, 1), 365);
        assert_eq!(d + 1000 - 1000, d);
    }

    #[test]
    fn test_normalized_invariant_and_idempotence() {
        let cases = [
            (1395, 13, 5),
            (1395, 1, -1),
            (1, -25, 400),
            (-5, 0, 0),
            (3177, 30, -90),
        ];
        for (y, m, d) in cases {
            let once = JalaliDate::normalized(y, m, d);
            assert!((1..=12).contains(&once.month()));
            assert!((1..=once.days_in_month()).contains(&once.day()));
            let twice = JalaliDate::normalized(
                once.year(),
                i64::from(once.month()),
                i64::from(once.day()),
            );
            assert_eq!(once, twice);
        }
        assert_eq!(JalaliDate::normalized(1395, 13, 5), date(1396, 1, 5));
        assert_eq!(JalaliDate::normalized(1395, 1, -1), date(1394, 12, 28));
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dates = [
            date(-5, 12, 29),
            date(0, 1, 1),
            date(1394, 12, 29),
            date(1395, 1, 1),
            date(1395, 1, 2),
        ];
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].jdn() < pair[1].jdn());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(date(1395, 1, 5).to_string(), "1395-01-05");
        assert_eq!(date(5, 7, 30).to_string(), "0005-07-30");
        assert_eq!(date(-5, 7, 30).to_string(), "-0005-07-30");
    }

    #[test]
    fn test_parse_iso_and_slash() {
        assert_eq!("1395-01-05".parse::<JalaliDate>().unwrap(), date(1395, 1, 5));
        assert_eq!("1395/1/5".parse::<JalaliDate>().unwrap(), date(1395, 1, 5));
        assert_eq!(" 1367 / 10 / 01 ".parse::<JalaliDate>().unwrap(), date(1367, 10, 1));
        assert_eq!("-0005-07-30".parse::<JalaliDate>().unwrap(), date(-5, 7, 30));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<JalaliDate>(), Err(ParseError::EmptyInput));
        assert!(matches!(
            "1395-01/05".parse::<JalaliDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1395".parse::<JalaliDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1395-01-05-01".parse::<JalaliDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1395-aa-05".parse::<JalaliDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1395--1-05".parse::<JalaliDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_validation_error() {
        let result = "1396-12-30".parse::<JalaliDate>();
        assert_eq!(
            result,
            Err(ParseError::Validation(ValidationError {
                reason: "day out of range",
                value: 30,
                max: 29,
            }))
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid date: day out of range: 30 (max 29)"
        );

        let result = "1395-13-01".parse::<JalaliDate>();
        assert!(matches!(
            result,
            Err(ParseError::Validation(ValidationError { max: 12, .. }))
        ));
    }

    #[test]
    fn test_display_parse_round_trip() {
        for d in [date(1395, 12, 30), date(-61, 1, 1), date(0, 6, 31), date(3178, 1, 1)] {
            assert_eq!(d.to_string().parse::<JalaliDate>().unwrap(), d);
        }
    }

    #[test]
    fn test_serde() {
        let d = date(1395, 1, 5);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""1395-01-05""#);
        let parsed: JalaliDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn test_serde_validation() {
        let result: Result<JalaliDate, _> = serde_json::from_str(r#""1396-12-30""#);
        assert!(result.is_err());

        let result: Result<JalaliDate, _> = serde_json::from_str(r#""1395-12-30""#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_constants() {
        assert_eq!(HEGIRA_STARTING_YEAR, 621);
        assert_eq!(BREAK_POINTS.len(), 20);
        assert!(BREAK_POINTS.windows(2).all(|w| w[0] < w[1]));
    }
}
