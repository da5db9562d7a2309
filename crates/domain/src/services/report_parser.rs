//! Permissive parser for generated text reports.
//!
//! The report may be hand-edited, so nothing here fails: lines that do not
//! match a known shape are skipped and missing parts come back empty or
//! zero-valued.

use regex::Regex;
use shared::amount::{format_fcfa, CURRENCY_SUFFIX};
use shared::calendar::{is_month_name, is_weekday_name};

use crate::models::{
    CourseDetail, OperatorCourses, OperatorReport, OperatorSummary, ParsedPeriodReport,
    PaymentSummary, ReportPeriodType,
};
use crate::services::report_format::*;

lazy_static::lazy_static! {
    static ref PAID_LINE: Regex =
        Regex::new(r"^✅\s*Payé\s*:\s*(?P<amount>.+?)\s*$").unwrap();
    static ref PENDING_LINE: Regex =
        Regex::new(r"^⏳\s*En attente\s*:\s*(?P<amount>.+?)\s*$").unwrap();
    static ref FAILED_LINE: Regex =
        Regex::new(r"^❌\s*Échoué\s*:\s*(?P<amount>.+?)\s*$").unwrap();
    /// `<name> <amount> FCFA (<n> Courses)`, optionally bulleted.
    static ref OPERATOR_SUMMARY_LINE: Regex = Regex::new(
        r"^(?:[•◦*\-]\s*)?(?P<name>.+?)\s*:?\s+(?P<amount>[0-9][0-9\s.,]*?)\s*FCFA\s*\(\s*(?P<count>[0-9]+)\s*(?i:courses?)\s*\)\s*$"
    )
    .unwrap();
}

/// Parses every period section of a report, in input order.
///
/// Sections are separated by [`SECTION_DELIMITER`] lines; blank sections
/// are skipped.
pub fn parse_report(text: &str) -> Vec<ParsedPeriodReport> {
    let reports: Vec<ParsedPeriodReport> = split_sections(text)
        .iter()
        .map(|lines| parse_section(lines))
        .collect();

    tracing::debug!(sections = reports.len(), "Parsed text report");
    reports
}

fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim() == SECTION_DELIMITER {
            push_section(&mut sections, std::mem::take(&mut current));
        } else {
            current.push(line);
        }
    }
    push_section(&mut sections, current);

    sections
}

fn push_section<'a>(sections: &mut Vec<Vec<&'a str>>, lines: Vec<&'a str>) {
    if lines.iter().any(|line| !line.trim().is_empty()) {
        sections.push(lines);
    }
}

/// Parses the lines of one period section.
pub fn parse_section(lines: &[&str]) -> ParsedPeriodReport {
    let title = lines
        .iter()
        .find_map(|line| line.trim().strip_prefix(TITLE_GLYPH))
        .map(|title| title.trim().to_string())
        .unwrap_or_default();
    let period_type = classify_period(&title);

    ParsedPeriodReport {
        period_type,
        unpaid_warning: find_unpaid_warning(lines),
        payment_summary: parse_payment_summary(lines),
        courses_by_operator: parse_operator_courses(lines),
        operator_summaries: parse_operator_summaries(lines),
        title,
    }
}

/// Infers the period granularity from a section title.
///
/// Checked in order: weekday name, the word "semaine", month name.
pub fn classify_period(title: &str) -> ReportPeriodType {
    let lower = title.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    if words.iter().any(|word| is_weekday_name(word)) {
        ReportPeriodType::Daily
    } else if lower.contains(WEEK_KEYWORD) {
        ReportPeriodType::Weekly
    } else if words.iter().any(|word| is_month_name(word)) {
        ReportPeriodType::Monthly
    } else {
        ReportPeriodType::All
    }
}

fn find_unpaid_warning(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.starts_with(COURSE_GLYPH))
        .map(|line| line.trim_start_matches(['⚠', '\u{fe0f}']).trim())
        .find(|line| line.to_lowercase().contains(UNPAID_MARKER))
        .map(str::to_string)
}

fn capture_amount(lines: &[&str], pattern: &Regex) -> Option<String> {
    lines.iter().find_map(|line| {
        pattern
            .captures(line.trim())
            .and_then(|caps| caps.name("amount"))
            .map(|amount| amount.as_str().to_string())
    })
}

fn parse_payment_summary(lines: &[&str]) -> PaymentSummary {
    let zero = || format_fcfa(0.0);
    PaymentSummary {
        paid: capture_amount(lines, &PAID_LINE).unwrap_or_else(zero),
        pending: capture_amount(lines, &PENDING_LINE).unwrap_or_else(zero),
        failed: capture_amount(lines, &FAILED_LINE).unwrap_or_else(zero),
    }
}

/// Splits a course line into a [`CourseDetail`].
///
/// Returns `None` for lines that are not course lines or carry fewer than
/// [`MIN_COURSE_FIELDS`] fields.
pub fn parse_course_line(line: &str) -> Option<CourseDetail> {
    let body = line.trim().strip_prefix(COURSE_GLYPH)?;
    if !body.contains(COURSE_FIELD_SEPARATOR) {
        return None;
    }

    let fields: Vec<&str> = body.split(COURSE_FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() < MIN_COURSE_FIELDS {
        tracing::debug!(
            line = %line.trim(),
            fields = fields.len(),
            "Dropping course line with too few fields"
        );
        return None;
    }

    Some(CourseDetail {
        time: fields[0].to_string(),
        from: fields[1].to_string(),
        to: fields[2].to_string(),
        amount: fields[3].to_string(),
        status: fields[4].to_string(),
        reference: fields.get(5).map(|r| r.to_string()).unwrap_or_default(),
    })
}

fn parse_operator_courses(lines: &[&str]) -> Vec<OperatorCourses> {
    let mut operators = Vec::new();
    let mut current: Option<OperatorCourses> = None;

    for line in lines {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix(OPERATOR_GLYPH) {
            operators.extend(current.take());
            current = Some(OperatorCourses {
                operator_name: name.trim().to_string(),
                courses: Vec::new(),
            });
            continue;
        }

        if !trimmed.starts_with(COURSE_GLYPH) {
            continue;
        }
        let Some(course) = parse_course_line(trimmed) else {
            continue;
        };
        match current.as_mut() {
            Some(operator) => operator.courses.push(course),
            None => tracing::debug!(
                reference = %course.reference,
                "Dropping course line outside any operator block"
            ),
        }
    }
    operators.extend(current);

    operators
}

fn parse_operator_summaries(lines: &[&str]) -> Vec<OperatorReport> {
    let mut reports = Vec::new();

    for (at, line) in lines.iter().enumerate() {
        let Some(caps) = OPERATOR_SUMMARY_LINE.captures(line.trim()) else {
            continue;
        };

        let mut report = OperatorReport {
            summary: OperatorSummary {
                name: caps["name"].trim().to_string(),
                total_amount: format!("{} {}", caps["amount"].trim(), CURRENCY_SUFFIX),
                courses_count: caps["count"].to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        for next in lines.iter().skip(at + 1).take(STATS_LOOKAHEAD) {
            if OPERATOR_SUMMARY_LINE.is_match(next.trim()) {
                break;
            }
            apply_stat_line(&mut report, next);
        }

        for amount in [
            &mut report.summary.paid,
            &mut report.summary.pending,
            &mut report.summary.failed,
        ] {
            if amount.is_empty() {
                *amount = format_fcfa(0.0);
            }
        }

        reports.push(report);
    }

    reports
}

fn apply_stat_line(report: &mut OperatorReport, line: &str) {
    let Some((label, value)) = line.split_once(':') else {
        return;
    };
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    let slots: [(&str, &mut String); 9] = [
        (SUCCESS_RATE_LABEL, &mut report.stats.success_rate),
        (BEST_CITY_LABEL, &mut report.stats.best_city),
        (BEST_CLIENT_LABEL, &mut report.stats.best_client),
        (BEST_DAY_LABEL, &mut report.stats.best_day),
        (BEST_WEEK_LABEL, &mut report.stats.best_week),
        (BEST_MONTH_LABEL, &mut report.stats.best_month),
        (PAID_LABEL, &mut report.summary.paid),
        (PENDING_LABEL, &mut report.summary.pending),
        (FAILED_LABEL, &mut report.summary.failed),
    ];

    for (needle, slot) in slots {
        if label.contains(needle) {
            if slot.is_empty() {
                *slot = value.to_string();
            }
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(body: &str) -> String {
        body.lines().map(str::trim_start).collect::<Vec<_>>().join("\n")
    }

    fn daily_section() -> String {
        section(
            "📅 Rapport du lundi 15 janvier 2024
            ⚠️ 2 courses non payées

            💰 Paiements
            ✅ Payé : 12 500 FCFA
            ⏳ En attente : 2 500 FCFA
            ❌ Échoué : 1 000 FCFA

            👤 Awa Koné
            🚚 08:30 | Plateau | Cocody | 2 500 FCFA | Payé | CMD-001
            🚚 10:15 | Cocody | Marcory | 10 000 FCFA | Payé | CMD-002
            👤 Moussa Diallo
            🚚 11:00 | Adjamé | Yopougon | 2 500 FCFA | En attente | CMD-003

            📊 Récapitulatif par livreur
            • Awa Koné 12 500 FCFA (2 Courses)
            ◦ Payé : 12 500 FCFA
            ◦ Taux de réussite : 100%
            ◦ Meilleure ville : Cocody
            ◦ Meilleur client : Aya Traoré
            ◦ Meilleur jour : lundi
            • Moussa Diallo 2 500 FCFA (1 Courses)
            ◦ En attente : 2 500 FCFA
            ◦ Taux de réussite : 0%",
        )
    }

    #[test]
    fn test_parse_full_section() {
        let reports = parse_report(&daily_section());
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert_eq!(report.title, "Rapport du lundi 15 janvier 2024");
        assert_eq!(report.period_type, ReportPeriodType::Daily);
        assert_eq!(report.unpaid_warning.as_deref(), Some("2 courses non payées"));
        assert_eq!(report.payment_summary.paid, "12 500 FCFA");
        assert_eq!(report.payment_summary.pending, "2 500 FCFA");
        assert_eq!(report.payment_summary.failed, "1 000 FCFA");

        assert_eq!(report.courses_by_operator.len(), 2);
        assert_eq!(report.courses_by_operator[0].operator_name, "Awa Koné");
        assert_eq!(report.courses_by_operator[0].courses.len(), 2);
        assert_eq!(report.courses_by_operator[1].operator_name, "Moussa Diallo");
        assert_eq!(report.courses_by_operator[1].courses[0].status, "En attente");

        assert_eq!(report.operator_summaries.len(), 2);
        let awa = &report.operator_summaries[0];
        assert_eq!(awa.summary.name, "Awa Koné");
        assert_eq!(awa.summary.total_amount, "12 500 FCFA");
        assert_eq!(awa.summary.courses_count, "2");
        assert_eq!(awa.summary.paid, "12 500 FCFA");
        assert_eq!(awa.summary.pending, "0 FCFA");
        assert_eq!(awa.stats.success_rate, "100%");
        assert_eq!(awa.stats.best_city, "Cocody");
        assert_eq!(awa.stats.best_client, "Aya Traoré");
        assert_eq!(awa.stats.best_day, "lundi");
        assert_eq!(awa.stats.best_week, "");

        let moussa = &report.operator_summaries[1];
        assert_eq!(moussa.summary.pending, "2 500 FCFA");
        assert_eq!(moussa.stats.success_rate, "0%");
        assert_eq!(moussa.stats.best_city, "");
    }

    #[test]
    fn test_single_course_line_fields() {
        let text = "👤 Awa\n🚚  08:30 |  Plateau | Cocody |2 500 FCFA| Payé | CMD-9 ";
        let reports = parse_report(text);
        let courses = &reports[0].courses_by_operator[0].courses;

        assert_eq!(courses.len(), 1);
        assert_eq!(
            courses[0],
            CourseDetail {
                time: "08:30".to_string(),
                from: "Plateau".to_string(),
                to: "Cocody".to_string(),
                amount: "2 500 FCFA".to_string(),
                status: "Payé".to_string(),
                reference: "CMD-9".to_string(),
            }
        );
        assert_eq!(courses[0].amount_value(), 2500.0);
    }

    #[test]
    fn test_short_course_line_is_dropped() {
        let text = "👤 Awa\n🚚 08:30 | Plateau | Cocody | 2 500 FCFA\n🚚 09:00 | A | B | 500 FCFA | Payé";
        let reports = parse_report(text);
        let courses = &reports[0].courses_by_operator[0].courses;

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].time, "09:00");
        assert_eq!(courses[0].reference, "");
        assert!(reports[0]
            .courses_by_operator
            .iter()
            .flat_map(|o| o.courses.iter())
            .all(|c| c.amount != "2 500 FCFA"));
    }

    #[test]
    fn test_course_before_operator_is_dropped() {
        let text = "🚚 08:30 | Plateau | Cocody | 2 500 FCFA | Payé | CMD-1\n👤 Awa";
        let reports = parse_report(text);
        assert_eq!(reports[0].courses_by_operator.len(), 1);
        assert!(reports[0].courses_by_operator[0].courses.is_empty());
    }

    #[test]
    fn test_two_sections_in_order() {
        let text = format!(
            "📅 Rapport du mardi 16 janvier 2024\n✅ Payé : 500 FCFA\n{}\n📅 Rapport de la semaine du 15 janvier\n",
            SECTION_DELIMITER
        );
        let reports = parse_report(&text);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].period_type, ReportPeriodType::Daily);
        assert_eq!(reports[0].payment_summary.paid, "500 FCFA");
        assert_eq!(reports[1].period_type, ReportPeriodType::Weekly);
        assert_eq!(reports[1].payment_summary.paid, "0 FCFA");
    }

    #[test]
    fn test_blank_sections_are_skipped() {
        let text = format!(
            "{d}\n📅 Rapport de janvier 2024\n{d}\n   \n{d}\n",
            d = SECTION_DELIMITER
        );
        let reports = parse_report(&text);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].period_type, ReportPeriodType::Monthly);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(parse_report("").is_empty());

        let reports = parse_report("n'importe quoi\n| a | b |\n🚚 pas une course");
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.title, "");
        assert_eq!(report.period_type, ReportPeriodType::All);
        assert!(report.unpaid_warning.is_none());
        assert_eq!(report.payment_summary, PaymentSummary::default());
        assert!(report.courses_by_operator.is_empty());
        assert!(report.operator_summaries.is_empty());
    }

    #[test]
    fn test_singular_unpaid_warning() {
        let reports = parse_report("📅 Rapport du lundi\n⚠️ 1 course non payée");
        assert_eq!(reports[0].unpaid_warning.as_deref(), Some("1 course non payée"));

        let reports = parse_report("📅 Rapport du lundi\n⚠️ 3 COURSES NON PAYÉES");
        assert_eq!(reports[0].unpaid_warning.as_deref(), Some("3 COURSES NON PAYÉES"));
    }

    #[test]
    fn test_unpaid_course_status_is_not_a_warning() {
        let text = "📅 Rapport du lundi\n👤 Awa Koné\n🚚 08:30 | Plateau | Cocody | 2 500 FCFA | Non payée";
        let reports = parse_report(text);
        assert!(reports[0].unpaid_warning.is_none());
        assert_eq!(reports[0].courses_by_operator[0].courses[0].status, "Non payée");
    }

    #[test]
    fn test_classify_period() {
        assert_eq!(classify_period("Rapport du Vendredi 19 avril"), ReportPeriodType::Daily);
        assert_eq!(classify_period("SEMAINE 16"), ReportPeriodType::Weekly);
        assert_eq!(classify_period("Semaine du 15 avril"), ReportPeriodType::Weekly);
        assert_eq!(classify_period("Rapport d'Août 2024"), ReportPeriodType::Monthly);
        assert_eq!(classify_period("Rapport de fevrier"), ReportPeriodType::Monthly);
        assert_eq!(classify_period("Rapport global"), ReportPeriodType::All);
        assert_eq!(classify_period("Maison mère"), ReportPeriodType::All);
    }

    #[test]
    fn test_stats_lookahead_is_bounded() {
        let mut text = String::from("• Awa 1 000 FCFA (1 Courses)\n");
        for _ in 0..STATS_LOOKAHEAD {
            text.push_str("ligne sans statistique\n");
        }
        text.push_str("◦ Meilleure ville : Bouaké\n");

        let reports = parse_report(&text);
        assert_eq!(reports[0].operator_summaries.len(), 1);
        assert_eq!(reports[0].operator_summaries[0].stats.best_city, "");
    }

    #[test]
    fn test_stats_lookahead_stops_at_next_summary() {
        let text = "Awa 1 000 FCFA (1 Courses)\nMoussa 2 000 FCFA (2 courses)\nTaux de réussite : 50%";
        let reports = parse_report(text);
        let summaries = &reports[0].operator_summaries;

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].stats.success_rate, "");
        assert_eq!(summaries[1].summary.name, "Moussa");
        assert_eq!(summaries[1].summary.courses_count_value(), 2);
        assert_eq!(summaries[1].stats.success_rate, "50%");
    }

    #[test]
    fn test_summary_with_colon_separator() {
        let reports = parse_report("• Awa Koné : 7 500 FCFA (3 Courses)");
        let summary = &reports[0].operator_summaries[0].summary;
        assert_eq!(summary.name, "Awa Koné");
        assert_eq!(summary.total_amount, "7 500 FCFA");
        assert_eq!(summary.courses_count, "3");
    }

    #[test]
    fn test_payment_lines_are_not_operator_summaries() {
        let reports = parse_report(&daily_section());
        assert!(reports[0]
            .operator_summaries
            .iter()
            .all(|o| o.summary.name != "✅ Payé"));
    }
}
