// src/util/text.rs
use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::SHORT_ID_DIGITS;

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("Failed to compile whitespace regex");
}

/// Split a comma-separated tag input into trimmed, non-empty tags.
///
/// Duplicates are kept; the service decides whether they matter.
///
/// # Examples
///
/// ```
/// use smartnotes::util::text::split_tags;
///
/// assert_eq!(split_tags("rust, cli,,  "), vec!["rust", "cli"]);
/// ```
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// First non-empty line of `content`, trimmed.
pub fn first_line(content: &str) -> &str {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Single-line preview of `content` with internal whitespace collapsed,
/// cut to at most `max_chars` characters (an ellipsis marks the cut).
pub fn preview(content: &str, max_chars: usize) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(content.trim(), " ");
    if collapsed.chars().count() <= max_chars {
        return collapsed.into_owned();
    }
    let mut cut: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Last few digits of a local identifier, used in short labels.
pub fn short_id(id: u64) -> String {
    let digits = id.to_string();
    let start = digits.len().saturating_sub(SHORT_ID_DIGITS);
    digits[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_comma_list_with_blanks_when_splitting_then_drops_empty_tags() {
        assert_eq!(split_tags(" a , b,, c ,"), vec!["a", "b", "c"]);
    }

    #[test]
    fn given_empty_input_when_splitting_then_returns_no_tags() {
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ,").is_empty());
    }

    #[test]
    fn given_duplicate_tags_when_splitting_then_keeps_them() {
        assert_eq!(split_tags("x,x"), vec!["x", "x"]);
    }

    #[test]
    fn given_leading_blank_lines_when_taking_first_line_then_skips_them() {
        assert_eq!(first_line("\n   \n  Hello  \nWorld"), "Hello");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn given_long_content_when_previewing_then_truncates_with_ellipsis() {
        let result = preview("one   two\nthree four", 10);

        assert_eq!(result, "one two t…");
        assert_eq!(result.chars().count(), 10);
    }

    #[test]
    fn given_short_content_when_previewing_then_collapses_whitespace_only() {
        assert_eq!(preview("  a\n\tb  ", 10), "a b");
    }

    #[test]
    fn given_timestamp_id_when_shortening_then_keeps_last_four_digits() {
        assert_eq!(short_id(1_717_171_234_567), "4567");
        assert_eq!(short_id(42), "42");
    }
}
