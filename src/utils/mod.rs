//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

/// Truncate text to a maximum number of characters for log output
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("this is a long text", 10), "this is...");
    }

    #[test]
    fn test_truncate_text_multibyte() {
        assert_eq!(truncate_text("Paraíba, São Paulo", 8), "Paraí...");
    }
}
