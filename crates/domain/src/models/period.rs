//! Reporting periods and the time windows they select.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Granularity selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Error returned for an unknown period selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown period type: {0}")]
pub struct ParsePeriodError(pub String);

impl FromStr for PeriodType {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            "all" => Ok(Self::All),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}

/// Half-open time window `[start, end)` selected by a period.
///
/// Both bounds are `None` for [`PeriodType::All`], which selects everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PeriodWindow {
    pub period: PeriodType,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl PeriodWindow {
    /// Window that applies no filtering.
    pub fn unbounded() -> Self {
        Self {
            period: PeriodType::All,
            start: None,
            end: None,
        }
    }

    /// Bounded window; bounds are swapped if given out of order.
    pub fn bounded(period: PeriodType, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            period,
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether `at` lies inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at < end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}
