//! Structured facts extracted from generated text reports.
//!
//! Every amount and statistic is kept as the display string found in the
//! report; numeric views are derived on demand.

use serde::{Deserialize, Serialize};
use shared::amount::{extract_amount_value, format_fcfa};
use shared::ratio::percentage_f64;

/// Granularity of a report section, inferred from its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriodType {
    Daily,
    Weekly,
    Monthly,
    All,
}

/// Section-level payment totals as display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaymentSummary {
    pub paid: String,
    pub pending: String,
    pub failed: String,
}

impl Default for PaymentSummary {
    fn default() -> Self {
        let zero = format_fcfa(0.0);
        Self {
            paid: zero.clone(),
            pending: zero.clone(),
            failed: zero,
        }
    }
}

/// One course line of an operator block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CourseDetail {
    pub time: String,
    pub from: String,
    pub to: String,
    /// Amount with currency suffix, e.g. `"2 500 FCFA"`.
    pub amount: String,
    pub status: String,
    pub reference: String,
}

impl CourseDetail {
    pub fn amount_value(&self) -> f64 {
        extract_amount_value(&self.amount)
    }
}

/// Courses listed under one operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OperatorCourses {
    pub operator_name: String,
    pub courses: Vec<CourseDetail>,
}

/// Operator summary line and its payment breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OperatorSummary {
    pub name: String,
    pub total_amount: String,
    pub courses_count: String,
    pub paid: String,
    pub pending: String,
    pub failed: String,
}

impl OperatorSummary {
    /// Parsed course count, 0 when the text is not a number.
    pub fn courses_count_value(&self) -> u64 {
        self.courses_count.trim().parse().unwrap_or(0)
    }

    pub fn total_amount_value(&self) -> f64 {
        extract_amount_value(&self.total_amount)
    }
}

/// Per-operator statistics, verbatim from the report. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GlobalStats {
    pub success_rate: String,
    pub best_city: String,
    pub best_client: String,
    pub best_day: String,
    pub best_week: String,
    pub best_month: String,
}

/// Operator summary paired with its statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OperatorReport {
    pub summary: OperatorSummary,
    pub stats: GlobalStats,
}

/// Everything extracted from one period section of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ParsedPeriodReport {
    pub title: String,
    pub period_type: ReportPeriodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpaid_warning: Option<String>,
    pub payment_summary: PaymentSummary,
    pub courses_by_operator: Vec<OperatorCourses>,
    pub operator_summaries: Vec<OperatorReport>,
}

/// Numeric view of a section's payment summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportTotals {
    pub paid: f64,
    pub pending: f64,
    pub failed: f64,
    /// Paid share of all amounts, in percent.
    pub collected_rate: u32,
}

impl ParsedPeriodReport {
    /// Empty section with the given title.
    pub fn new(title: impl Into<String>, period_type: ReportPeriodType) -> Self {
        Self {
            title: title.into(),
            period_type,
            unpaid_warning: None,
            payment_summary: PaymentSummary::default(),
            courses_by_operator: Vec::new(),
            operator_summaries: Vec::new(),
        }
    }

    /// Converts the payment summary into numbers.
    pub fn totals(&self) -> ReportTotals {
        let paid = extract_amount_value(&self.payment_summary.paid);
        let pending = extract_amount_value(&self.payment_summary.pending);
        let failed = extract_amount_value(&self.payment_summary.failed);

        ReportTotals {
            paid,
            pending,
            failed,
            collected_rate: percentage_f64(paid, paid + pending + failed),
        }
    }

    /// Number of courses across all operators.
    pub fn course_count(&self) -> usize {
        self.courses_by_operator.iter().map(|o| o.courses.len()).sum()
    }
}
