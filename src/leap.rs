//! Jalali leap years.
//!
//! Inside the break-point table leap years follow the observed 33-year
//! cadence. Outside it they follow Birashk's 2820-year arithmetic cycle, and
//! Nowruz is carried over from the nearest table edge so that year lengths stay
//! continuous across the seam.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::consts::{
    BREAK_POINTS, COMMON_YEAR_DAYS, FIRST_QUAD_CYCLE, FIRST_QUAD_CYCLE_COUNT,
    GRAND_CYCLE_BEGINNING, GRAND_CYCLE_LEAP_YEARS, GRAND_CYCLE_LENGTH, HEGIRA_STARTING_YEAR,
    JALALI_LEAP_SEED, LEAP_CADENCE, LEAP_YEAR_CYCLE, LEAPS_PER_CADENCE, QUAD_CYCLE_BREAK_POINTS,
    SECOND_QUAD_CYCLE,
};
use crate::julian::{floor_div, gregorian_to_jdn};

/// March day of Nowruz before leap corrections
const NOWRUZ_BASE_MARCH_DAY: i64 = 20;
/// Gregorian leap accumulator offset aligning it with the Jalali one
const GREGORIAN_LEAP_SEED: i64 = 150;

const FIRST_BREAK_POINT: i64 = BREAK_POINTS[0];
const LAST_BREAK_POINT: i64 = BREAK_POINTS[BREAK_POINTS.len() - 1];

/// Leap information for one Jalali year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeapYearResult {
    /// `0` when the year is leap, otherwise years elapsed since the last leap year (1-4)
    pub leap_offset: i64,
    /// Gregorian year in which the Jalali year begins
    pub gregorian_anchor_year: i64,
    /// Day of March (in `gregorian_anchor_year`) on which Nowruz falls
    pub march_offset: i64,
}

impl LeapYearResult {
    /// Returns `true` if the queried year is a leap year
    #[inline]
    pub const fn is_leap(&self) -> bool {
        self.leap_offset == 0
    }

    /// Julian Day Number of Nowruz of the queried year
    #[inline]
    pub const fn nowruz_jdn(&self) -> i64 {
        gregorian_to_jdn(self.gregorian_anchor_year, 3, self.march_offset)
    }
}

/// Computes leap information for `year`.
///
/// `year` is a Jalali year unless `year_is_gregorian` is set, in which case
/// the Jalali year beginning in that Gregorian year is queried. Intended for
/// years in `MIN_YEAR..=MAX_YEAR`; far outside that range the cycle search
/// grows linearly and the day arithmetic overflows.
///
/// ```
/// use jalali_date::leap::query;
///
/// let result = query(1367, false);
/// assert_eq!(result.gregorian_anchor_year, 1988);
/// assert_eq!(result.march_offset, 21);
/// assert_eq!(result.leap_offset, 1);
/// ```
pub fn query(year: i64, year_is_gregorian: bool) -> LeapYearResult {
    let jalali_year = if year_is_gregorian {
        year - HEGIRA_STARTING_YEAR
    } else {
        year
    };

    if (FIRST_BREAK_POINT..LAST_BREAK_POINT).contains(&jalali_year) {
        astronomical(jalali_year)
    } else {
        trace!(
            year = jalali_year,
            "year outside break-point table, using arithmetic leap model"
        );
        arithmetic(jalali_year)
    }
}

/// Returns `true` if `year` is a leap year.
///
/// ```
/// use jalali_date::is_leap_year;
///
/// assert!(is_leap_year(1395, false));
/// assert!(!is_leap_year(1396, false));
/// assert!(is_leap_year(2016, true));
/// ```
pub fn is_leap_year(year: i64, year_is_gregorian: bool) -> bool {
    query(year, year_is_gregorian).is_leap()
}

/// Walks the break-point table. `jalali_year` must lie inside it.
fn astronomical(jalali_year: i64) -> LeapYearResult {
    let gregorian_year = jalali_year + HEGIRA_STARTING_YEAR;

    let mut jalali_leaps = JALALI_LEAP_SEED;
    let mut previous = FIRST_BREAK_POINT;
    let mut jump = 0;
    for &next in &BREAK_POINTS[1..] {
        jump = next - previous;
        if jalali_year < next {
            break;
        }
        jalali_leaps += floor_div(jump, LEAP_CADENCE) * LEAPS_PER_CADENCE
            + floor_div(jump % LEAP_CADENCE, LEAP_YEAR_CYCLE);
        previous = next;
    }

    let mut years_passed = jalali_year - previous;
    jalali_leaps += floor_div(years_passed, LEAP_CADENCE) * LEAPS_PER_CADENCE
        + floor_div(years_passed % LEAP_CADENCE + 3, LEAP_YEAR_CYCLE);
    if jump % LEAP_CADENCE == LEAP_YEAR_CYCLE && jump - years_passed == LEAP_YEAR_CYCLE {
        jalali_leaps += 1;
    }

    let gregorian_leaps = floor_div(gregorian_year, 4)
        - floor_div((floor_div(gregorian_year, 100) + 1) * 3, 4)
        - GREGORIAN_LEAP_SEED;
    let march_offset = NOWRUZ_BASE_MARCH_DAY + jalali_leaps - gregorian_leaps;

    // The last years before a break belong to the next cadence
    if jump - years_passed < 6 {
        years_passed = years_passed - jump + floor_div(jump + 4, LEAP_CADENCE) * LEAP_CADENCE;
    }
    let mut leap_offset = ((years_passed + 1) % LEAP_CADENCE - 1) % LEAP_YEAR_CYCLE;
    if leap_offset == -1 {
        leap_offset = LEAP_YEAR_CYCLE;
    }

    LeapYearResult {
        leap_offset,
        gregorian_anchor_year: gregorian_year,
        march_offset,
    }
}

/// Leap information outside the table, anchored on its nearest edge.
fn arithmetic(jalali_year: i64) -> LeapYearResult {
    let gregorian_year = jalali_year + HEGIRA_STARTING_YEAR;

    let nowruz = if jalali_year < FIRST_BREAK_POINT {
        let years = FIRST_BREAK_POINT - jalali_year;
        let leaps = arithmetic_leaps_before(FIRST_BREAK_POINT + HEGIRA_STARTING_YEAR)
            - arithmetic_leaps_before(gregorian_year);
        astronomical(FIRST_BREAK_POINT).nowruz_jdn() - years * COMMON_YEAR_DAYS - leaps
    } else {
        let last = astronomical(LAST_BREAK_POINT - 1);
        let years = jalali_year - LAST_BREAK_POINT;
        let leaps = arithmetic_leaps_before(gregorian_year)
            - arithmetic_leaps_before(LAST_BREAK_POINT + HEGIRA_STARTING_YEAR);
        last.nowruz_jdn()
            + COMMON_YEAR_DAYS
            + i64::from(last.is_leap())
            + years * COMMON_YEAR_DAYS
            + leaps
    };

    let leap_offset = (0..LEAP_YEAR_CYCLE)
        .find(|&back| is_leap_unchecked(jalali_year - back))
        .unwrap_or(LEAP_YEAR_CYCLE);

    LeapYearResult {
        leap_offset,
        gregorian_anchor_year: gregorian_year,
        march_offset: nowruz - gregorian_to_jdn(gregorian_year, 3, 1) + 1,
    }
}

/// Leap flag of a Jalali year without computing its anchor.
fn is_leap_unchecked(jalali_year: i64) -> bool {
    if (FIRST_BREAK_POINT..LAST_BREAK_POINT).contains(&jalali_year) {
        astronomical(jalali_year).is_leap()
    } else {
        arithmetic_is_leap(jalali_year, false)
    }
}

/// Location of a Gregorian year inside the arithmetic grand cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GrandCyclePosition {
    /// Signed number of grand cycles since `GRAND_CYCLE_BEGINNING`
    cycle: i64,
    /// First Gregorian year of the containing grand cycle
    boundary: i64,
    /// 1-based year within the grand cycle
    year_in_grand_cycle: i64,
}

fn grand_cycle_position(gregorian_year: i64) -> GrandCyclePosition {
    let mut boundary = GRAND_CYCLE_BEGINNING;
    let mut cycle = 0;
    while gregorian_year < boundary {
        boundary -= GRAND_CYCLE_LENGTH;
        cycle -= 1;
    }
    while gregorian_year >= boundary + GRAND_CYCLE_LENGTH {
        boundary += GRAND_CYCLE_LENGTH;
        cycle += 1;
    }
    GrandCyclePosition {
        cycle,
        boundary,
        year_in_grand_cycle: (gregorian_year - boundary).abs() + 1,
    }
}

/// Decides leap-ness with the 2820-year arithmetic model.
///
/// A grand cycle is 21 quad cycles of 128 years followed by one of 132. Each
/// quad cycle splits into sub-blocks of 29, 33, 33 and 33 (or 37) years whose
/// every fourth year, except the first, is leap.
///
/// ```
/// use jalali_date::leap::arithmetic_is_leap;
///
/// assert!(arithmetic_is_leap(1395, false));
/// assert!(!arithmetic_is_leap(475, false));
/// ```
pub fn arithmetic_is_leap(year: i64, year_is_gregorian: bool) -> bool {
    let gregorian_year = if year_is_gregorian {
        year
    } else {
        year + HEGIRA_STARTING_YEAR
    };

    let year_in_grand_cycle = grand_cycle_position(gregorian_year).year_in_grand_cycle;
    let year_in_quad_cycle = if year_in_grand_cycle > GRAND_CYCLE_LENGTH - SECOND_QUAD_CYCLE {
        year_in_grand_cycle - FIRST_QUAD_CYCLE_COUNT * FIRST_QUAD_CYCLE
    } else {
        match year_in_grand_cycle % FIRST_QUAD_CYCLE {
            0 => FIRST_QUAD_CYCLE,
            rem => rem,
        }
    };

    let position = year_in_quad_cycle - 1;
    let block_start = QUAD_CYCLE_BREAK_POINTS
        .iter()
        .copied()
        .rev()
        .find(|&start| start <= position)
        .unwrap_or(0);
    let offset = position - block_start;
    offset != 0 && offset % LEAP_YEAR_CYCLE == 0
}

/// Arithmetic leap years among the first `elapsed` years of a quad cycle.
fn quad_cycle_leaps(elapsed: i64, quad_cycle_length: i64) -> i64 {
    let [first, second, third] = QUAD_CYCLE_BREAK_POINTS;
    [0, first, second, third, quad_cycle_length]
        .windows(2)
        .filter(|block| elapsed > block[0])
        .map(|block| (elapsed.min(block[1]) - block[0] - 1) / LEAP_YEAR_CYCLE)
        .sum()
}

/// Signed count of arithmetic leap years in `[GRAND_CYCLE_BEGINNING, gregorian_year)`.
fn arithmetic_leaps_before(gregorian_year: i64) -> i64 {
    let position = grand_cycle_position(gregorian_year);
    let elapsed = position.year_in_grand_cycle - 1;
    let regular_span = FIRST_QUAD_CYCLE_COUNT * FIRST_QUAD_CYCLE;

    let within = if elapsed <= regular_span {
        (elapsed / FIRST_QUAD_CYCLE) * quad_cycle_leaps(FIRST_QUAD_CYCLE, FIRST_QUAD_CYCLE)
            + quad_cycle_leaps(elapsed % FIRST_QUAD_CYCLE, FIRST_QUAD_CYCLE)
    } else {
        FIRST_QUAD_CYCLE_COUNT * quad_cycle_leaps(FIRST_QUAD_CYCLE, FIRST_QUAD_CYCLE)
            + quad_cycle_leaps(elapsed - regular_span, SECOND_QUAD_CYCLE)
    };
    position.cycle * GRAND_CYCLE_LEAP_YEARS + within
}
