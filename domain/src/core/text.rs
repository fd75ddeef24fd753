//! Text helpers for the domain layer.

/// Truncate a string to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte input never splits.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Collapse all runs of whitespace (including newlines) into single spaces.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_unchanged() {
        assert_eq!(truncate("harbor", 10), "harbor");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_truncate_long_input() {
        assert_eq!(truncate("lighthouse keeper", 8), "light...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("日本語テスト", 6), "日本語テスト");
        assert_eq!(truncate("日本語テスト文字列", 5), "日本...");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  a\n b\t\tc  "), "a b c");
    }
}
