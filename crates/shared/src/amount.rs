//! Monetary amount parsing and display helpers.
//!
//! Amounts travel through generated reports as display strings such as
//! `"12 500 FCFA"`. These helpers turn such strings back into numbers and
//! format numbers the same way the report generator does.

use regex::Regex;

/// Currency suffix used in every displayed amount.
pub const CURRENCY_SUFFIX: &str = "FCFA";

lazy_static::lazy_static! {
    /// First run of digits followed by digits, whitespace or separators,
    /// with an optional leading minus sign.
    static ref AMOUNT_RUN: Regex =
        Regex::new(r"(?P<sign>-)?(?P<digits>[0-9][0-9\s.,]*)").unwrap();
}

/// Extracts the numeric value of an amount display string.
///
/// Takes the first run of digits, whitespace and `.`/`,` separators,
/// drops the whitespace (including non-breaking spaces used as digit
/// grouping) and normalizes separators:
/// - when both `.` and `,` appear, the last one is the decimal separator;
/// - a single separator followed by one or two digits is decimal;
/// - any other separator is digit grouping.
///
/// A `-` directly before the digits makes the amount negative unless it
/// follows a letter or digit (`CMD-001` reads as 1).
///
/// Returns `0.0` when the text holds no digits.
pub fn extract_amount_value(text: &str) -> f64 {
    let Some(caps) = AMOUNT_RUN.captures(text) else {
        return 0.0;
    };
    let Some(run) = caps.name("digits") else {
        return 0.0;
    };
    let negative = caps.name("sign").is_some_and(|sign| {
        !text[..sign.start()]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    });

    let compact: String = run
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let compact = compact.trim_end_matches(['.', ',']);

    let value = normalize_separators(compact).parse::<f64>().unwrap_or(0.0);
    if negative {
        -value
    } else {
        value
    }
}

fn normalize_separators(digits: &str) -> String {
    let last_dot = digits.rfind('.');
    let last_comma = digits.rfind(',');

    let decimal_at = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => Some(dot.max(comma)),
        (Some(at), None) | (None, Some(at)) => {
            let separator = digits.as_bytes()[at];
            let occurrences = digits.bytes().filter(|b| *b == separator).count();
            let fraction_len = digits.len() - at - 1;
            (occurrences == 1 && (1..=2).contains(&fraction_len)).then_some(at)
        }
        (None, None) => None,
    };

    digits
        .char_indices()
        .filter_map(|(at, c)| {
            if c.is_ascii_digit() {
                Some(c)
            } else if Some(at) == decimal_at {
                Some('.')
            } else {
                None
            }
        })
        .collect()
}

/// Formats an amount as a whole-unit display string: `12500.0` → `"12 500 FCFA"`.
pub fn format_fcfa(value: f64) -> String {
    let rounded = value.round();
    let units = rounded.abs() as u64;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{} {}", grouped, CURRENCY_SUFFIX)
    } else {
        format!("{} {}", grouped, CURRENCY_SUFFIX)
    }
}
