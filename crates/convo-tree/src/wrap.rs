//! Greedy word wrapping for text drawn inside a fixed-width box.

/// Pack whitespace-separated words into lines no wider than `max_width`.
///
/// `measure` returns the drawn width of a candidate line. A word that
/// does not fit starts a new line; the final group is always emitted,
/// even if it overflows. A single word wider than the line is kept whole.
pub fn wrap_words<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn packs_words_up_to_the_width() {
        let lines = wrap_words("the quick brown fox jumps", 10.0, chars);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn collapses_newlines_and_runs_of_space() {
        let lines = wrap_words("one\n\r two   three", 100.0, chars);
        assert_eq!(lines, vec!["one two three"]);
    }

    #[test]
    fn overlong_word_is_kept_whole() {
        let lines = wrap_words("a supercalifragilistic b", 5.0, chars);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_words("   ", 10.0, chars).is_empty());
    }

    #[test]
    fn measure_scale_is_respected() {
        // 10 units per char, as in a zoomed canvas
        let lines = wrap_words("ab cd ef", 50.0, |s| chars(s) * 10.0);
        assert_eq!(lines, vec!["ab cd", "ef"]);
    }
}
