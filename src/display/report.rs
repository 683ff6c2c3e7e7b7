//! Report formatting utilities for terminal output
//!
//! Small helpers shared by the analysis and record views.

/// Format a percentage with precision shrinking as magnitude grows
///
/// Savings rates go negative in deficit months, so the magnitude decides.
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation, capped at full width
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Center a title within `width` columns
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
