use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wrap text to fit within a given display width. Words longer than the
/// width are split.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > max_width {
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }
            for c in word.chars() {
                let cw = c.width().unwrap_or(0);
                if current_width + cw > max_width {
                    lines.push(std::mem::take(&mut current_line));
                    current_width = 0;
                }
                current_line.push(c);
                current_width += cw;
            }
        } else if current_width == 0 {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::replace(&mut current_line, word.to_string()));
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Mask a secret for display: one mask glyph per character
pub fn mask(secret: &str, glyph: &str) -> String {
    glyph.repeat(secret.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_text("select some code", 11), vec!["select some", "code"]);
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn empty_text_yields_one_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn mask_counts_chars_not_bytes() {
        assert_eq!(mask("sk-é", "•"), "••••");
        assert_eq!(mask("", "•"), "");
    }
}
