//! Truncating summarizer.

/// Keep the first `max_fragments` period-delimited fragments of `text`.
///
/// Fragments are rejoined with `.`, so the result never ends with the
/// trailing period that closed the last kept fragment.
pub fn summarize(text: &str, max_fragments: usize) -> String {
    text.split('.')
        .take(max_fragments)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_five_fragments() {
        let text = "One. Two. Three. Four. Five. Six. Seven.";
        assert_eq!(summarize(text, 5), "One. Two. Three. Four. Five");
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(summarize("Only one fragment", 5), "Only one fragment");
        assert_eq!(summarize("A. B.", 5), "A. B.");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(summarize("", 5), "");
    }

    #[test]
    fn test_fragment_count_is_respected() {
        assert_eq!(summarize("a.b.c.d", 2), "a.b");
        assert_eq!(summarize("a.b.c.d", 0), "");
    }
}
