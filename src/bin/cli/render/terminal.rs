use chrono::{DateTime, Utc};

use recall_lib::flashcards::intervals::format_duration;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str, use_color: bool) -> String {
    paint(text, Color::BOLD, use_color)
}

/// "due now", "in 3h" or "in 2d"
pub fn format_due(next_review_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if next_review_at <= now {
        "due now".to_string()
    } else {
        format!("in {}", format_duration(next_review_at - now))
    }
}

/// Colored percentage: green from 80%, yellow from 60%, red below
pub fn format_accuracy(rate: f64, use_color: bool) -> String {
    let text = format!("{:.0}%", rate * 100.0);
    let color = if rate >= 0.8 {
        Color::GREEN
    } else if rate >= 0.6 {
        Color::YELLOW
    } else {
        Color::RED
    };
    paint(&text, color, use_color)
}

/// Truncate to `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        single_line
    } else {
        let cut: String = single_line.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
