/// Create a simple ASCII progress bar for a `[0, 1]` fraction
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let ratio = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Format a `[0, 1]` fraction as a whole percent, e.g. "40%"
pub fn format_fraction(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// "1 day" / "N days"
pub fn format_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Checklist mark for a requirement
pub fn check_mark(met: bool) -> &'static str {
    if met { "✓" } else { "✗" }
}
