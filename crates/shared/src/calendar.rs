//! Calendar arithmetic and French calendar vocabulary.
//!
//! All computations are performed on UTC timestamps.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};

/// Full French weekday names, Monday first.
pub const WEEKDAY_NAMES_FR: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// Abbreviated French weekday names, Monday first.
pub const WEEKDAY_SHORT_FR: [&str; 7] = ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."];

/// Full French month names, January first.
pub const MONTH_NAMES_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Month spellings seen in hand-typed reports that lack accents.
const UNACCENTED_MONTHS_FR: [&str; 3] = ["fevrier", "aout", "decembre"];

/// Returns the abbreviated French name of a weekday.
pub fn weekday_short_fr(weekday: Weekday) -> &'static str {
    WEEKDAY_SHORT_FR[weekday.num_days_from_monday() as usize]
}

/// Returns the French name of a month (1-based). Out-of-range months clamp.
pub fn month_name_fr(month: u32) -> &'static str {
    let index = month.clamp(1, 12) - 1;
    MONTH_NAMES_FR[index as usize]
}

/// Whether a lowercase word is a French weekday name.
pub fn is_weekday_name(word: &str) -> bool {
    WEEKDAY_NAMES_FR.contains(&word)
}

/// Whether a lowercase word is a French month name, accented or not.
pub fn is_month_name(word: &str) -> bool {
    MONTH_NAMES_FR.contains(&word) || UNACCENTED_MONTHS_FR.contains(&word)
}

/// Midnight (UTC) of the day containing `at`.
pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&at.date_naive().and_time(NaiveTime::default()))
}

/// Start of the hour containing `at`.
pub fn start_of_hour(at: DateTime<Utc>) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(at.hour(), 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&at.date_naive().and_time(time))
}

/// Midnight of the Monday starting the week that contains `at`.
pub fn start_of_week(at: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_monday = at.weekday().num_days_from_monday() as i64;
    start_of_day(at) - chrono::Duration::days(days_since_monday)
}

/// Midnight of the first day of `(year, month)` shifted by `delta` months.
///
/// `month` is 1-based; the shift may cross year boundaries in either direction.
pub fn month_start(year: i32, month: u32, delta: i32) -> DateTime<Utc> {
    let (year, month) = shift_month(year, month, delta);
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Shifts a 1-based `(year, month)` pair by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year * 12 + (month as i32 - 1) + delta;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// Midnight of January 1st of `year`.
pub fn year_start(year: i32) -> DateTime<Utc> {
    month_start(year, 1, 0)
}
