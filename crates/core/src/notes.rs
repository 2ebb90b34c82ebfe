//! Note constants, validation rules, and the "last edited" label.

use chrono::{DateTime, TimeZone};

/// Maximum length of a note title in characters.
pub const MAX_NOTE_TITLE_LENGTH: usize = 200;

/// Name of the category a new note falls into when none is supplied.
/// Matched case-insensitively against the owner's categories.
pub const DEFAULT_NOTE_CATEGORY: &str = "Random Thoughts";

/// Validate a note title. Empty titles are allowed.
pub fn validate_note_title(title: &str) -> Result<(), String> {
    if title.chars().count() > MAX_NOTE_TITLE_LENGTH {
        return Err(format!(
            "Title must be at most {MAX_NOTE_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Human label for a note's last-edited time, relative to `now`.
///
/// Both instants must already be in the timezone the comparison should
/// happen in (the server's local timezone in production):
///
/// - same calendar date as `now` -> `"Today"`
/// - exactly one calendar day earlier -> `"Yesterday"`
/// - otherwise -> abbreviated month + zero-padded day, e.g. `"Jan 05"`
pub fn last_edited_label<Tz: TimeZone>(updated_at: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let updated = updated_at.date_naive();
    let today = now.date_naive();

    if updated == today {
        return "Today".to_string();
    }
    if today.pred_opt() == Some(updated) {
        return "Yesterday".to_string();
    }
    updated_at.format("%b %d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_title_length_boundary() {
        assert!(validate_note_title("").is_ok());
        assert!(validate_note_title(&"x".repeat(MAX_NOTE_TITLE_LENGTH)).is_ok());
        assert!(validate_note_title(&"x".repeat(MAX_NOTE_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_label_today() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 18, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2025, 6, 15, 0, 30, 0).unwrap();
        assert_eq!(last_edited_label(&updated, &now), "Today");
    }

    #[test]
    fn test_label_yesterday() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 1, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2025, 6, 14, 23, 59, 0).unwrap();
        assert_eq!(last_edited_label(&updated, &now), "Yesterday");
    }

    #[test]
    fn test_label_older_is_month_and_zero_padded_day() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap();
        assert_eq!(last_edited_label(&updated, &now), "Jan 05");
    }

    #[test]
    fn test_label_two_days_ago_is_not_yesterday() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let updated = now - Duration::days(2);
        assert_eq!(last_edited_label(&updated, &now), "Jun 13");
    }

    #[test]
    fn test_label_crosses_month_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2025, 2, 28, 20, 0, 0).unwrap();
        assert_eq!(last_edited_label(&updated, &now), "Yesterday");
    }
}
