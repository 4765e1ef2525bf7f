//! Proleptic Gregorian dates to and from Julian Day Numbers.
//!
//! Years use astronomical numbering: 1 BC is `0`, 2 BC is `-1`, and so on.

/// Day offset between the Julian Day Number and days since 1970-01-01
const UNIX_EPOCH_JDN: i64 = 2_440_588;
/// Days from 0000-03-01 to 1970-01-01
const CIVIL_EPOCH_SHIFT: i64 = 719_468;
/// Days in a 400-year Gregorian era
const DAYS_PER_ERA: i64 = 146_097;
const YEARS_PER_ERA: i64 = 400;

/// Integer division rounding toward negative infinity.
///
/// Rust's `/` truncates toward zero, which breaks the calendar formulas for
/// negative years and day numbers.
///
/// ```
/// use jalali_date::floor_div;
///
/// assert_eq!(floor_div(7, 2), 3);
/// assert_eq!(floor_div(-7, 2), -4);
/// assert_eq!(floor_div(7, -2), -4);
/// ```
#[inline]
pub const fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Converts a proleptic Gregorian date to its Julian Day Number.
///
/// Fields are not validated; out-of-range months and days extrapolate linearly
/// within the March-based year.
///
/// ```
/// use jalali_date::gregorian_to_jdn;
///
/// assert_eq!(gregorian_to_jdn(2000, 1, 1), 2_451_545);
/// ```
pub const fn gregorian_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    // Years start in March so the leap day is the last day of the year
    let year = if month <= 2 { year - 1 } else { year };
    let era = floor_div(year, YEARS_PER_ERA);
    let year_of_era = year - era * YEARS_PER_ERA;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = floor_div(153 * shifted_month + 2, 5) + day - 1;
    let day_of_era = year_of_era * 365 + floor_div(year_of_era, 4) - floor_div(year_of_era, 100)
        + day_of_year;
    era * DAYS_PER_ERA + day_of_era - CIVIL_EPOCH_SHIFT + UNIX_EPOCH_JDN
}

/// Converts a Julian Day Number to a proleptic Gregorian `(year, month, day)`.
///
/// ```
/// use jalali_date::jdn_to_gregorian;
///
/// assert_eq!(jdn_to_gregorian(2_451_545), (2000, 1, 1));
/// ```
pub const fn jdn_to_gregorian(jdn: i64) -> (i64, i64, i64) {
    let days = jdn - UNIX_EPOCH_JDN + CIVIL_EPOCH_SHIFT;
    let era = floor_div(days, DAYS_PER_ERA);
    let day_of_era = days - era * DAYS_PER_ERA;
    let year_of_era = floor_div(
        day_of_era - floor_div(day_of_era, 1460) + floor_div(day_of_era, 36_524)
            - floor_div(day_of_era, DAYS_PER_ERA - 1),
        365,
    );
    let day_of_year =
        day_of_era - (365 * year_of_era + floor_div(year_of_era, 4) - floor_div(year_of_era, 100));
    let shifted_month = floor_div(5 * day_of_year + 2, 153);
    let day = day_of_year - floor_div(153 * shifted_month + 2, 5) + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * YEARS_PER_ERA + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
