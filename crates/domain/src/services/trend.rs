//! Revenue and volume trend series.
//!
//! | period | buckets | width   | last bucket          |
//! |--------|---------|---------|----------------------|
//! | day    | 24      | 1 hour  | reference hour       |
//! | week   | 7       | 1 day   | reference day        |
//! | month  | 30      | 1 day   | reference day        |
//! | year   | 12      | 1 month | reference month      |
//! | all    | 1/month | 1 month | latest month in data |
//!
//! A delivered order with a final price lands in the bucket whose half-open
//! interval `[start, end)` contains its creation time.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use shared::calendar::{month_name_fr, month_start, start_of_day, start_of_hour, weekday_short_fr};
use std::collections::BTreeSet;

use crate::models::{OrderRecord, PeriodType, TrendPoint};

pub const DAY_BUCKETS: i64 = 24;
pub const WEEK_BUCKETS: i64 = 7;
pub const MONTH_BUCKETS: i64 = 30;
pub const YEAR_BUCKETS: i32 = 12;

/// Builds the trend series of `period` ending at `reference`.
///
/// Buckets trail back from `reference` rather than following the calendar
/// window of the period filter: `month` covers the 30 days ending on the
/// reference day, so on the 31st the 1st of the month falls in no bucket.
/// Orders created after the last bucket are not counted either.
pub fn revenue_trend(
    orders: &[&OrderRecord],
    period: PeriodType,
    reference: DateTime<Utc>,
) -> Vec<TrendPoint> {
    let mut buckets = match period {
        PeriodType::Day => hourly_buckets(reference),
        PeriodType::Week => daily_buckets(reference, WEEK_BUCKETS, weekday_label),
        PeriodType::Month => daily_buckets(reference, MONTH_BUCKETS, date_label),
        PeriodType::Year => trailing_month_buckets(reference),
        PeriodType::All => data_month_buckets(orders),
    };

    for order in orders {
        let Some(revenue) = order.delivered_revenue() else {
            continue;
        };
        if let Some(bucket) = find_bucket(&mut buckets, order.created_at) {
            bucket.revenue += revenue;
            bucket.order_count += 1;
        }
    }

    buckets
}

fn find_bucket(buckets: &mut [TrendPoint], at: DateTime<Utc>) -> Option<&mut TrendPoint> {
    // Buckets are contiguous and sorted
    let idx = buckets.partition_point(|b| b.end <= at);
    buckets.get_mut(idx).filter(|b| b.start <= at)
}

fn empty_bucket(label: String, start: DateTime<Utc>, end: DateTime<Utc>) -> TrendPoint {
    TrendPoint {
        label,
        start,
        end,
        revenue: 0.0,
        order_count: 0,
    }
}

fn hourly_buckets(reference: DateTime<Utc>) -> Vec<TrendPoint> {
    let last = start_of_hour(reference);
    (0..DAY_BUCKETS)
        .rev()
        .map(|back| {
            let start = last - Duration::hours(back);
            empty_bucket(format!("{:02}h", start.hour()), start, start + Duration::hours(1))
        })
        .collect()
}

fn daily_buckets(
    reference: DateTime<Utc>,
    count: i64,
    label: fn(DateTime<Utc>) -> String,
) -> Vec<TrendPoint> {
    let last = start_of_day(reference);
    (0..count)
        .rev()
        .map(|back| {
            let start = last - Duration::days(back);
            empty_bucket(label(start), start, start + Duration::days(1))
        })
        .collect()
}

fn weekday_label(day: DateTime<Utc>) -> String {
    weekday_short_fr(day.weekday()).to_string()
}

fn date_label(day: DateTime<Utc>) -> String {
    format!("{:02}/{:02}", day.day(), day.month())
}

fn month_label(month: DateTime<Utc>) -> String {
    format!("{} {}", month_name_fr(month.month()), month.year())
}

fn month_bucket(year: i32, month: u32, delta: i32) -> TrendPoint {
    let start = month_start(year, month, delta);
    let end = month_start(year, month, delta + 1);
    empty_bucket(month_label(start), start, end)
}

fn trailing_month_buckets(reference: DateTime<Utc>) -> Vec<TrendPoint> {
    (0..YEAR_BUCKETS)
        .rev()
        .map(|back| month_bucket(reference.year(), reference.month(), -back))
        .collect()
}

fn data_month_buckets(orders: &[&OrderRecord]) -> Vec<TrendPoint> {
    let months: BTreeSet<(i32, u32)> = orders
        .iter()
        .filter(|o| o.delivered_revenue().is_some())
        .map(|o| (o.created_at.year(), o.created_at.month()))
        .collect();

    months
        .into_iter()
        .map(|(year, month)| month_bucket(year, month, 0))
        .collect()
}
