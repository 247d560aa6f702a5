//! Report formatting utilities for terminal output
//!
//! Small helpers shared by the dashboard and breakdown views.

use crate::models::Money;

/// Share of `part` in `total` as a percentage
pub fn percentage_of(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        0.0
    } else {
        part.cents() as f64 / total.cents() as f64 * 100.0
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar scaled against `max`
pub fn format_bar(value: Money, max: Money, width: usize) -> String {
    if !max.is_positive() || !value.is_positive() {
        return " ".repeat(width);
    }

    let filled = ((value.cents() as f64 / max.cents() as f64) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Centre a title within `width` columns
pub fn format_header(title: &str, width: usize) -> String {
    let padding = width.saturating_sub(title.chars().count()) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}
