/// Offset between Jalali and Gregorian year numbers (Jalali year 1 starts in 622 CE)
pub const HEGIRA_STARTING_YEAR: i64 = 621;

/// Jalali years where the 33-year leap cadence shifts, derived from observed
/// equinoxes. The astronomical model is valid for `BREAK_POINTS[0]..BREAK_POINTS[19]`.
pub const BREAK_POINTS: [i64; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Seed of the Jalali leap accumulator at the first break point
pub(crate) const JALALI_LEAP_SEED: i64 = -14;

/// Length of the astronomical leap cadence
pub(crate) const LEAP_CADENCE: i64 = 33;
/// Leap years in one full cadence
pub(crate) const LEAPS_PER_CADENCE: i64 = 8;

/// Gregorian year in which the arithmetic grand cycle begins (Jalali 475)
pub const GRAND_CYCLE_BEGINNING: i64 = 1096;
/// Years in one arithmetic grand cycle
pub const GRAND_CYCLE_LENGTH: i64 = 2820;
/// Leap years in one arithmetic grand cycle
pub const GRAND_CYCLE_LEAP_YEARS: i64 = 683;
/// Regular quad cycle length; 21 of these open every grand cycle
pub const FIRST_QUAD_CYCLE: i64 = 128;
/// Closing quad cycle of a grand cycle
pub const SECOND_QUAD_CYCLE: i64 = 132;
/// Number of regular quad cycles in a grand cycle
pub(crate) const FIRST_QUAD_CYCLE_COUNT: i64 = 21;
/// Sub-block boundaries inside a quad cycle; the last block runs to the quad cycle's end
pub(crate) const QUAD_CYCLE_BREAK_POINTS: [i64; 3] = [29, 62, 95];
/// Every fourth year of a sub-block is leap
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;

/// Maximum valid month (Esfand)
pub const MAX_MONTH: u8 = 12;
/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;
/// Month number for Farvardin
pub const FARVARDIN: u8 = 1;
/// Month number for Mehr, the first 30-day month
pub const MEHR: u8 = 7;
/// Month number for Esfand
pub const ESFAND: u8 = 12;

/// Days in the first six months
pub const FIRST_HALF_MONTH_DAYS: u8 = 31;
/// Days in months seven to eleven
pub const SECOND_HALF_MONTH_DAYS: u8 = 30;
/// Days in Esfand in a common year
pub const ESFAND_DAYS: u8 = 29;
/// Days in Esfand in a leap year
pub const ESFAND_DAYS_LEAP: u8 = 30;
/// Days in a common year
pub const COMMON_YEAR_DAYS: i64 = 365;
/// Days in the first half of the year, six 31-day months
pub(crate) const FIRST_HALF_DAYS: i64 = 186;
/// Days from Mehr 1 to the following Nowruz when Esfand has 29 days
pub(crate) const ROLLBACK_DAYS: i64 = 179;

/// Earliest Jalali year accepted by validating constructors. The arithmetic
/// model drifts from the Gregorian year by about a day every 3200 years, and
/// conversion stays exact while Nowruz remains within a few months of March.
pub const MIN_YEAR: i64 = -100_000;
/// Latest Jalali year accepted by validating constructors
pub const MAX_YEAR: i64 = 100_000;

/// Months per season
pub(crate) const MONTHS_PER_QUARTER: u8 = 3;
/// Days per week
pub(crate) const DAYS_PER_WEEK: i64 = 7;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Date component separator common in Persian writing
pub const ALT_DATE_SEPARATOR: char = '/';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
