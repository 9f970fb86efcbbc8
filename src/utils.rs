/// Utility functions for value cleanup and formatting
use time::macros::format_description;
use time::OffsetDateTime;

/// Values stations send in place of a reading they do not have.
pub const PLACEHOLDERS: &[&str] = &["--", "--.-", "---.-", "----", "-"];

/// Whether a raw value carries no reading at all
///
/// Empty strings and the dash placeholders consoles emit for disconnected
/// sensors count as absent. They are skipped, not reported as failures.
pub fn is_placeholder(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed)
}

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    let format = format_description!("[day].[month].[year] - [hour]:[minute]:[second]");
    dt.format(format).unwrap_or_else(|_| dt.to_string())
}
