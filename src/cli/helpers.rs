//! Shared helper functions for CLI commands

use chrono::{DateTime, Utc};
use console::{style, StyledObject};

use crate::entities::front::FrontStatus;

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Shorten an entity id for table columns
pub fn format_short_id(id: &str) -> String {
    if id.len() > 16 {
        format!("{}...", &id[..13])
    } else {
        id.to_string()
    }
}

/// Render a review timestamp the way the list views show it
pub fn relative_time(at: Option<DateTime<Utc>>) -> String {
    let Some(at) = at else {
        return "never".to_string();
    };
    let elapsed = Utc::now().signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if elapsed.num_hours() < 24 {
        format!("{} h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 30 {
        format!("{} d ago", elapsed.num_days())
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}

/// Color a front status for terminal output
pub fn style_status(status: FrontStatus) -> StyledObject<String> {
    let text = status.to_string();
    match status {
        FrontStatus::Controlled => style(text).green(),
        FrontStatus::Observation => style(text).yellow(),
        FrontStatus::Attention => style(text).red().bold(),
        FrontStatus::NoRecentReview => style(text).dim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn test_format_short_id() {
        assert_eq!(format_short_id("SHORT"), "SHORT");
        assert_eq!(
            format_short_id("FRONT-01J123456789ABCDEF123456"),
            "FRONT-01J1234..."
        );
    }

    #[test]
    fn test_relative_time_never() {
        assert_eq!(relative_time(None), "never");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(relative_time(Some(now)), "just now");
        assert_eq!(
            relative_time(Some(now - Duration::minutes(5))),
            "5 min ago"
        );
        assert_eq!(relative_time(Some(now - Duration::hours(3))), "3 h ago");
        assert_eq!(relative_time(Some(now - Duration::days(2))), "2 d ago");
    }
}
