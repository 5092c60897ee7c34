//! Utility functions for fog
//!
//! Small helpers used by the listing, session and page code.

use rand::Rng;

/// Placeholder shown wherever a name would otherwise be empty
pub const FOG_PLACEHOLDER: &str = "hidden in the fog";

/// Generate a random 32-byte token, hex encoded
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    hex::encode(bytes)
}

/// Truncate a display string to `max_chars` characters with an ellipsis
///
/// Counts characters rather than bytes so multi-byte names are never split.
/// The result is at most `max_chars` characters, the last three being `...`.
pub fn truncate_display(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Format file size for display
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
