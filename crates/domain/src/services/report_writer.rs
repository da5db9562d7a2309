//! Renders parsed period reports back to text.

use shared::amount::CURRENCY_SUFFIX;

use crate::models::{OperatorReport, ParsedPeriodReport};
use crate::services::report_format::*;

/// Renders reports in the text format read by
/// [`parse_report`](crate::services::report_parser::parse_report).
pub fn render_report(reports: &[ParsedPeriodReport]) -> String {
    let mut out = String::new();
    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            out.push_str(SECTION_DELIMITER);
            out.push('\n');
        }
        for line in render_section(report) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn render_section(report: &ParsedPeriodReport) -> Vec<String> {
    let mut lines = vec![format!("{} {}", TITLE_GLYPH, report.title)];
    if let Some(warning) = &report.unpaid_warning {
        lines.push(format!("{} {}", WARNING_GLYPH, warning));
    }

    let payments = &report.payment_summary;
    lines.push(String::new());
    lines.push(PAYMENTS_HEADER.to_string());
    lines.push(format!("{} {} : {}", PAID_GLYPH, PAID_LABEL, payments.paid));
    lines.push(format!("{} {} : {}", PENDING_GLYPH, PENDING_LABEL, payments.pending));
    lines.push(format!("{} {} : {}", FAILED_GLYPH, FAILED_LABEL, payments.failed));

    for operator in &report.courses_by_operator {
        lines.push(String::new());
        lines.push(format!("{} {}", OPERATOR_GLYPH, operator.operator_name));
        for course in &operator.courses {
            let fields = [
                course.time.as_str(),
                course.from.as_str(),
                course.to.as_str(),
                course.amount.as_str(),
                course.status.as_str(),
                course.reference.as_str(),
            ];
            lines.push(format!("{} {}", COURSE_GLYPH, fields.join(" | ")));
        }
    }

    if !report.operator_summaries.is_empty() {
        lines.push(String::new());
        lines.push(SUMMARY_HEADER.to_string());
        for operator in &report.operator_summaries {
            lines.extend(render_operator_summary(operator));
        }
    }

    lines
}

fn render_operator_summary(operator: &OperatorReport) -> Vec<String> {
    let summary = &operator.summary;
    let total = if summary.total_amount.contains(CURRENCY_SUFFIX) {
        summary.total_amount.clone()
    } else {
        format!("{} {}", summary.total_amount.trim(), CURRENCY_SUFFIX)
    };

    let mut lines = vec![format!(
        "{} {} {} ({} Courses)",
        SUMMARY_BULLET,
        summary.name,
        total,
        summary.courses_count_value()
    )];

    let stats = &operator.stats;
    let entries = [
        (SUCCESS_RATE_LABEL, &stats.success_rate),
        (BEST_CITY_LABEL, &stats.best_city),
        (BEST_CLIENT_LABEL, &stats.best_client),
        (BEST_DAY_LABEL, &stats.best_day),
        (BEST_WEEK_LABEL, &stats.best_week),
        (BEST_MONTH_LABEL, &stats.best_month),
        (PAID_LABEL, &summary.paid),
        (PENDING_LABEL, &summary.pending),
        (FAILED_LABEL, &summary.failed),
    ];
    lines.extend(
        entries
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| format!("   {} {} : {}", STAT_BULLET, label, value)),
    );

    lines
}
