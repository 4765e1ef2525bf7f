//! Jalali dates to and from Julian Day Numbers.

use crate::consts::{
    COMMON_YEAR_DAYS, ESFAND, ESFAND_DAYS, ESFAND_DAYS_LEAP, FIRST_HALF_DAYS,
    FIRST_HALF_MONTH_DAYS, HEGIRA_STARTING_YEAR, MEHR, ROLLBACK_DAYS, SECOND_HALF_MONTH_DAYS,
};
use crate::julian::{floor_div, jdn_to_gregorian};
use crate::leap::{is_leap_year, query};

const FIRST_HALF_MONTH: i64 = FIRST_HALF_MONTH_DAYS as i64;
const SECOND_HALF_MONTH: i64 = SECOND_HALF_MONTH_DAYS as i64;

/// Day of the year (1-based) of a Jalali month and day.
///
/// Months 1-6 have 31 days and months 7-12 have 30, except a common Esfand.
/// Neither field is validated.
#[inline]
pub const fn ordinal(month: i64, day: i64) -> i64 {
    (month - 1) * FIRST_HALF_MONTH - floor_div(month, MEHR as i64) * (month - MEHR as i64) + day
}

/// Number of days in `month` of the Jalali `year`.
///
/// ```
/// use jalali_date::month_length;
///
/// assert_eq!(month_length(1, 1395), 31);
/// assert_eq!(month_length(7, 1395), 30);
/// assert_eq!(month_length(12, 1395), 30);
/// assert_eq!(month_length(12, 1396), 29);
/// ```
pub fn month_length(month: i64, year: i64) -> i64 {
    debug_assert!((1..=ESFAND as i64).contains(&month));

    let days = if month < MEHR as i64 {
        FIRST_HALF_MONTH_DAYS
    } else if month < ESFAND as i64 {
        SECOND_HALF_MONTH_DAYS
    } else if is_leap_year(year, false) {
        ESFAND_DAYS_LEAP
    } else {
        ESFAND_DAYS
    };
    i64::from(days)
}

/// Number of days in the Jalali `year`
pub fn days_in_year(year: i64) -> i64 {
    COMMON_YEAR_DAYS + i64::from(is_leap_year(year, false))
}

/// Converts a Jalali date to its Julian Day Number.
///
/// Month and day are not validated, so `(y, 1, 0)` is the day before Nowruz.
///
/// ```
/// use jalali_date::{gregorian_to_jdn, jalali_to_jdn};
///
/// assert_eq!(jalali_to_jdn(1367, 10, 1), gregorian_to_jdn(1988, 12, 22));
/// ```
pub fn jalali_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    query(year, false).nowruz_jdn() + ordinal(month, day) - 1
}

/// Converts a Julian Day Number to a Jalali `(year, month, day)`.
///
/// ```
/// use jalali_date::{gregorian_to_jdn, jdn_to_jalali};
///
/// assert_eq!(jdn_to_jalali(gregorian_to_jdn(1988, 12, 22)), (1367, 10, 1));
/// ```
pub fn jdn_to_jalali(jdn: i64) -> (i64, i64, i64) {
    let (gregorian_year, _, _) = jdn_to_gregorian(jdn);
    let mut year = gregorian_year - HEGIRA_STARTING_YEAR;
    let leap = query(year, false);
    let mut passed = jdn - leap.nowruz_jdn();

    if passed < 0 {
        // Before Nowruz: the date is in the second half of the previous year
        year -= 1;
        passed += ROLLBACK_DAYS;
        if is_leap_year(year, false) {
            passed += 1;
        }
    } else if passed < FIRST_HALF_DAYS {
        return (
            year,
            1 + floor_div(passed, FIRST_HALF_MONTH),
            passed % FIRST_HALF_MONTH + 1,
        );
    } else {
        passed -= FIRST_HALF_DAYS;
    }

    (
        year,
        MEHR as i64 + floor_div(passed, SECOND_HALF_MONTH),
        passed % SECOND_HALF_MONTH + 1,
    )
}
