//! Carrying and borrowing out-of-range Jalali months and days.
//!
//! Every function here is total: any `(year, month, day)` triple maps to a
//! date satisfying `1 <= month <= 12` and `1 <= day <= month_length(month, year)`.

use tracing::trace;

use crate::consts::{ESFAND, FARVARDIN};
use crate::convert::month_length;
use crate::julian::floor_div;

const MONTHS: i64 = ESFAND as i64;

/// Folds `month` into `1..=12`, moving whole years into `year`.
///
/// Month `0` is Esfand of the previous year and month `13` is Farvardin of the
/// next one.
///
/// ```
/// use jalali_date::normalize::normalize_month;
///
/// assert_eq!(normalize_month(1395, 13), (1396, 1));
/// assert_eq!(normalize_month(1395, 0), (1394, 12));
/// assert_eq!(normalize_month(1395, -12), (1393, 12));
/// ```
pub const fn normalize_month(year: i64, month: i64) -> (i64, i64) {
    if month < FARVARDIN as i64 {
        let magnitude = -month;
        (
            year - 1 - floor_div(magnitude, MONTHS),
            MONTHS - magnitude % MONTHS,
        )
    } else if month > MONTHS {
        let year = year + floor_div(month, MONTHS);
        match month % MONTHS {
            0 => (year - 1, MONTHS),
            month => (year, month),
        }
    } else {
        (year, month)
    }
}

/// Folds `day` into the month, borrowing from earlier months or carrying into
/// later ones. `month` may be out of range.
///
/// ```
/// use jalali_date::normalize::normalize_day;
///
/// assert_eq!(normalize_day(1395, 12, 31), (1396, 1, 1));
/// assert_eq!(normalize_day(1396, 1, 0), (1395, 12, 30));
/// ```
pub fn normalize_day(year: i64, month: i64, day: i64) -> (i64, i64, i64) {
    let (mut year, mut month) = normalize_month(year, month);
    let mut day = day;

    while day < 1 {
        (year, month) = normalize_month(year, month - 1);
        day += month_length(month, year);
    }

    loop {
        let length = month_length(month, year);
        if day <= length {
            break;
        }
        day -= length;
        (year, month) = normalize_month(year, month + 1);
    }

    (year, month, day)
}

/// Normalizes an arbitrary triple into a valid Jalali date.
///
/// Months are folded first, then days are carried through the resulting
/// months, so `(1395, 13, 5)` is `(1396, 1, 5)` and `(1395, 1, -1)` is the
/// second-to-last day of 1394.
///
/// ```
/// use jalali_date::normalize::normalize_date;
///
/// assert_eq!(normalize_date(1395, 13, 5), (1396, 1, 5));
/// assert_eq!(normalize_date(1395, 1, -1), (1394, 12, 28));
/// ```
pub fn normalize_date(year: i64, month: i64, day: i64) -> (i64, i64, i64) {
    let normalized = normalize_day(year, month, day);
    if normalized != (year, month, day) {
        trace!(
            year,
            month,
            day,
            normalized = ?normalized,
            "normalized out-of-range Jalali date"
        );
    }
    normalized
}
