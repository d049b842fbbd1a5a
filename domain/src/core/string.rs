//! String utilities for the domain layer.

/// Take at most `max_chars` characters from the start of `s`.
///
/// Counts Unicode scalar values rather than bytes, so quoting a statement
/// never splits a multi-byte character.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate a string to `max_chars` characters, appending `...` when cut.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let head = take_chars(s, max_chars);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_ascii() {
        assert_eq!(take_chars("hello world", 5), "hello");
        assert_eq!(take_chars("hi", 10), "hi");
        assert_eq!(take_chars("", 10), "");
    }

    #[test]
    fn test_take_chars_multibyte() {
        assert_eq!(take_chars("あのね", 2), "あの");
        assert_eq!(take_chars("👋🌍🎉", 1), "👋");
        assert_eq!(take_chars("あのね", 3), "あのね");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello world", 5), "hello...");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
        assert_eq!(truncate_with_ellipsis("日本語テスト", 3), "日本語...");
    }
}
