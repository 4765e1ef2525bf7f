//! Gregorian date/time values that Jalali dates read from and write back to.
//!
//! Only the calendar fields cross this boundary; time of day and time zone
//! stay with the Gregorian value.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};

/// Error writing a Gregorian date into a clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The date is invalid or outside the value's representable range.
    #[error("Gregorian date {year}-{month:02}-{day:02} cannot be represented")]
    OutOfRange { year: i64, month: i64, day: i64 },

    /// The preserved wall time does not map to a single instant on that date.
    #[error("Local time on {year}-{month:02}-{day:02} is ambiguous or skipped")]
    AmbiguousLocalTime { year: i64, month: i64, day: i64 },
}

/// A value carrying a proleptic Gregorian calendar date.
pub trait GregorianClock {
    /// Returns the `(year, month, day)` of this value
    fn gregorian_ymd(&self) -> (i64, i64, i64);

    /// Replaces the calendar date, keeping everything else.
    ///
    /// # Errors
    /// Returns `ClockError` if the date cannot be stored; `self` is left unchanged.
    fn set_gregorian_ymd(&mut self, year: i64, month: i64, day: i64) -> Result<(), ClockError>;
}

fn naive_date(year: i64, month: i64, day: i64) -> Result<NaiveDate, ClockError> {
    let out_of_range = ClockError::OutOfRange { year, month, day };
    let y = i32::try_from(year).map_err(|_| out_of_range)?;
    let m = u32::try_from(month).map_err(|_| out_of_range)?;
    let d = u32::try_from(day).map_err(|_| out_of_range)?;
    NaiveDate::from_ymd_opt(y, m, d).ok_or(out_of_range)
}

impl GregorianClock for NaiveDate {
    fn gregorian_ymd(&self) -> (i64, i64, i64) {
        (
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.day()),
        )
    }

    fn set_gregorian_ymd(&mut self, year: i64, month: i64, day: i64) -> Result<(), ClockError> {
        *self = naive_date(year, month, day)?;
        Ok(())
    }
}

impl GregorianClock for NaiveDateTime {
    fn gregorian_ymd(&self) -> (i64, i64, i64) {
        self.date().gregorian_ymd()
    }

    fn set_gregorian_ymd(&mut self, year: i64, month: i64, day: i64) -> Result<(), ClockError> {
        *self = naive_date(year, month, day)?.and_time(self.time());
        Ok(())
    }
}

/// Reads and writes the local calendar date in the value's own time zone.
impl<Tz: TimeZone> GregorianClock for DateTime<Tz> {
    fn gregorian_ymd(&self) -> (i64, i64, i64) {
        self.date_naive().gregorian_ymd()
    }

    fn set_gregorian_ymd(&mut self, year: i64, month: i64, day: i64) -> Result<(), ClockError> {
        let local = naive_date(year, month, day)?.and_time(self.time());
        *self = self
            .timezone()
            .from_local_datetime(&local)
            .single()
            .ok_or(ClockError::AmbiguousLocalTime { year, month, day })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime, Timelike, Utc};

    #[test]
    fn test_naive_date_get_set() {
        let mut date = NaiveDate::from_ymd_opt(1988, 12, 22).unwrap();
        assert_eq!(date.gregorian_ymd(), (1988, 12, 22));

        date.set_gregorian_ymd(2016, 3, 20).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2016, 3, 20).unwrap());
    }

    #[test]
    fn test_naive_date_rejects_invalid() {
        let original = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let mut date = original;

        let result = date.set_gregorian_ymd(2023, 2, 29);
        assert!(matches!(
            result,
            Err(ClockError::OutOfRange {
                year: 2023,
                month: 2,
                day: 29
            })
        ));

        let result = date.set_gregorian_ymd(i64::from(i32::MAX) + 1, 1, 1);
        assert!(matches!(result, Err(ClockError::OutOfRange { .. })));

        let result = date.set_gregorian_ymd(2000, -1, 1);
        assert!(matches!(result, Err(ClockError::OutOfRange { .. })));

        assert_eq!(date, original);
    }

    #[test]
    fn test_naive_datetime_keeps_time() {
        let time = NaiveTime::from_hms_opt(13, 45, 10).unwrap();
        let mut value = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_time(time);

        value.set_gregorian_ymd(2017, 3, 21).unwrap();
        assert_eq!(value.gregorian_ymd(), (2017, 3, 21));
        assert_eq!(value.time(), time);
    }

    #[test]
    fn test_datetime_uses_local_date() {
        let tehran = FixedOffset::east_opt(3 * 3600 + 1800).unwrap();
        // 22:00 UTC is already the next day in Tehran
        let utc = Utc.with_ymd_and_hms(2016, 3, 19, 22, 0, 0).unwrap();
        let mut local = utc.with_timezone(&tehran);
        assert_eq!(utc.gregorian_ymd(), (2016, 3, 19));
        assert_eq!(local.gregorian_ymd(), (2016, 3, 20));

        local.set_gregorian_ymd(2016, 3, 21).unwrap();
        assert_eq!(local.gregorian_ymd(), (2016, 3, 21));
        assert_eq!(local.hour(), 1);
        assert_eq!(local.minute(), 30);
        assert_eq!(local.offset(), &tehran);
    }

    #[test]
    fn test_error_display() {
        let err = ClockError::OutOfRange {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(
            err.to_string(),
            "Gregorian date 2023-02-29 cannot be represented"
        );
    }
}
