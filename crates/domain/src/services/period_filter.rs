//! Period filtering of order records.
//!
//! Windows are calendar-aligned in UTC:
//! - `day`: the calendar day containing the reference
//! - `week`: the Monday-start week containing the reference
//! - `month` / `year`: the containing calendar month / year
//! - `all`: no filtering

use chrono::{DateTime, Datelike, Duration, Utc};
use shared::calendar::{month_start, start_of_day, start_of_week, year_start};

use crate::models::{OrderRecord, PeriodType, PeriodWindow};

/// Computes the window selected by `period` around `reference`.
pub fn period_window(period: PeriodType, reference: DateTime<Utc>) -> PeriodWindow {
    match period {
        PeriodType::Day => {
            let start = start_of_day(reference);
            PeriodWindow::bounded(period, start, start + Duration::days(1))
        }
        PeriodType::Week => {
            let start = start_of_week(reference);
            PeriodWindow::bounded(period, start, start + Duration::days(7))
        }
        PeriodType::Month => PeriodWindow::bounded(
            period,
            month_start(reference.year(), reference.month(), 0),
            month_start(reference.year(), reference.month(), 1),
        ),
        PeriodType::Year => PeriodWindow::bounded(
            period,
            year_start(reference.year()),
            year_start(reference.year() + 1),
        ),
        PeriodType::All => PeriodWindow::unbounded(),
    }
}

/// Keeps the records created inside `window`, preserving their order.
pub fn filter_by_window<'a, I>(orders: I, window: &PeriodWindow) -> Vec<&'a OrderRecord>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    orders
        .into_iter()
        .filter(|order| window.contains(order.created_at))
        .collect()
}

/// Keeps the records created inside the window of `period` around `reference`.
pub fn filter_by_period(
    orders: &[OrderRecord],
    period: PeriodType,
    reference: DateTime<Utc>,
) -> Vec<&OrderRecord> {
    filter_by_window(orders, &period_window(period, reference))
}
