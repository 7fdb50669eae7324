//! Presentation helpers shared by every screen.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use once_cell::sync::Lazy;

pub const FALLBACK_COLOR: &str = "#6B7280";

static NAMED_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("red", "#EF4444"),
        ("orange", "#F97316"),
        ("amber", "#F59E0B"),
        ("yellow", "#EAB308"),
        ("green", "#10B981"),
        ("teal", "#14B8A6"),
        ("blue", "#3B82F6"),
        ("indigo", "#6366F1"),
        ("purple", "#8B5CF6"),
        ("pink", "#EC4899"),
    ])
});

/// Hex colours pass through, known colour names map to hex, anything else is grey.
pub fn normalize_color(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with('#') {
        return trimmed.to_string();
    }
    NAMED_COLORS
        .get(trimmed.to_lowercase().as_str())
        .copied()
        .unwrap_or(FALLBACK_COLOR)
        .to_string()
}

fn currency_prefix(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        other => format!("{other} "),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two-decimal amount with a currency symbol and thousands separators.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!(
        "{sign}{}{}.{fraction}",
        currency_prefix(currency),
        group_thousands(whole)
    )
}

/// Signed percentage with one decimal, e.g. `+12.5%`.
pub fn format_percent_change(value: f64) -> String {
    let prefix = if value >= 0.0 { "+" } else { "" };
    format!("{prefix}{value:.1}%")
}

/// Short date such as `May 1, 2024`.
pub fn format_date(at: &DateTime<FixedOffset>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Twelve-hour clock time such as `3:05 PM`.
pub fn format_time(at: &DateTime<FixedOffset>) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Heading used for a date bucket, e.g. `Wednesday, May 1, 2024`.
pub fn group_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
