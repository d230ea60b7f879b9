//! Shared text formatting for table output.

use chrono::{DateTime, NaiveDateTime, Utc};

use storywatch_core::Story;

/// Format an engagement count with thousands separators, matching the
/// dashboard's display.
pub(crate) fn fmt_engagement(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate display text to `max` characters, appending `...` when cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Render a timestamp as a relative age ("5m ago").
///
/// Accepts RFC 3339 as well as the backend's naive forms, both read as UTC:
/// the minute-precision story timestamp ("2026-08-20 14:30") and bare ISO
/// 8601 without an offset. Unparseable timestamps are shown verbatim rather
/// than dropped.
pub(crate) fn fmt_ago(timestamp: &str, now: DateTime<Utc>) -> String {
    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M").map(|t| t.and_utc())
        })
        .or_else(|_| timestamp.parse::<NaiveDateTime>().map(|t| t.and_utc()));
    let Ok(parsed) = parsed else {
        return timestamp.to_string();
    };
    let minutes = now.signed_duration_since(parsed).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

/// Render stories as an aligned table, one row per story.
pub(crate) fn story_table(stories: &[Story], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<9}{:<13}{:<11}{:<6}{:<10}HEADLINE\n",
        "VELOCITY", "PLATFORM", "ENGAGE", "CRED", "AGE"
    ));
    for story in stories {
        // Pre-rendered so the width specifiers pad plain strings; the
        // velocity Display impl does not pad itself.
        let velocity = story.velocity.to_string();
        let credibility = format!("{}%", story.credibility);
        let row = format!(
            "{:<9}{:<13}{:<11}{:<6}{:<10}{}\n",
            velocity,
            truncate(&story.platform, 12),
            fmt_engagement(story.engagement),
            credibility,
            fmt_ago(&story.timestamp, now),
            truncate(&story.headline, 48),
        );
        out.push_str(&row);
    }
    out
}

#[cfg(test)]
mod tests {
    use storywatch_core::Velocity;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn engagement_groups_thousands() {
        assert_eq!(fmt_engagement(0), "0");
        assert_eq!(fmt_engagement(999), "999");
        assert_eq!(fmt_engagement(1_000), "1,000");
        assert_eq!(fmt_engagement(18_200), "18,200");
        assert_eq!(fmt_engagement(1_234_567), "1,234,567");
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
    }

    #[test]
    fn truncate_cuts_long_text_with_ellipsis() {
        assert_eq!(truncate("a very long headline indeed", 11), "a very long...");
    }

    #[test]
    fn ago_buckets_by_age() {
        let now = fixed_now();
        assert_eq!(fmt_ago("2024-06-01T11:59:30Z", now), "just now");
        assert_eq!(fmt_ago("2024-06-01T11:55:00Z", now), "5m ago");
        assert_eq!(fmt_ago("2024-06-01T09:00:00Z", now), "3h ago");
        assert_eq!(fmt_ago("2024-05-30T12:00:00Z", now), "2d ago");
    }

    #[test]
    fn ago_reads_offsetless_timestamps_as_utc() {
        assert_eq!(fmt_ago("2024-06-01T09:30:00", fixed_now()), "2h ago");
    }

    #[test]
    fn ago_reads_minute_precision_story_timestamps() {
        assert_eq!(fmt_ago("2024-06-01 09:30", fixed_now()), "2h ago");
        assert_eq!(fmt_ago("2024-06-01 11:55", fixed_now()), "5m ago");
    }

    #[test]
    fn ago_passes_garbage_through() {
        assert_eq!(fmt_ago("not-a-timestamp", fixed_now()), "not-a-timestamp");
    }

    #[test]
    fn table_includes_header_and_rows() {
        let story = Story {
            id: "s1".to_owned(),
            headline: "Fuel subsidy protest gains momentum".to_owned(),
            source: "@nairobi_wire".to_owned(),
            platform: "Twitter/X".to_owned(),
            engagement: 18_200,
            velocity: Velocity::High,
            reason: "Velocity spike across three platforms".to_owned(),
            timestamp: "2024-06-01 09:30".to_owned(),
            credibility: 88,
            url: "https://example.com/story/1".to_owned(),
        };
        let table = story_table(&[story], fixed_now());
        assert!(table.starts_with("VELOCITY"));
        assert!(table.contains("Fuel subsidy protest gains momentum"));
        assert!(table.contains("18,200"));
        assert!(table.contains("88%"));
        assert!(
            table.contains("2h ago"),
            "backend story timestamps must humanize, not pass through"
        );
    }
}
