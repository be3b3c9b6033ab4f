//! Syntax highlighting for fenced code blocks in explanations.
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use ratatui::style::Color;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

type HighlightResult = Vec<Vec<(Color, String)>>;
static HIGHLIGHT_CACHE: LazyLock<Mutex<HashMap<(String, String), Arc<HighlightResult>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

const CACHE_LIMIT: usize = 32;
const CODE_THEME: &str = "base16-ocean.dark";

fn to_ratatui_color(color: syntect::highlighting::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Highlight `code` as the language named by a fence info string (`rust`,
/// `py`, `javascript`...). Unknown or empty languages fall back to plain text.
///
/// Returns one entry per source line, each a list of (color, text) runs.
pub fn highlight_code(lang: &str, code: &str) -> Arc<HighlightResult> {
    let key = (lang.to_string(), code.to_string());
    {
        let cache = HIGHLIGHT_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(&key) {
            return Arc::clone(cached);
        }
    }

    let result = Arc::new(do_highlight(find_syntax(lang), code));

    let mut cache = HIGHLIGHT_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    if cache.len() >= CACHE_LIMIT {
        cache.clear();
    }
    cache.insert(key, Arc::clone(&result));
    result
}

fn find_syntax(lang: &str) -> &'static SyntaxReference {
    let lang = lang.trim();
    if lang.is_empty() {
        return SYNTAX_SET.find_syntax_plain_text();
    }
    SYNTAX_SET
        .find_syntax_by_token(lang)
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

fn do_highlight(syntax: &SyntaxReference, code: &str) -> HighlightResult {
    let Some(theme) = THEME_SET.themes.get(CODE_THEME) else {
        return plain(code);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut result = Vec::new();

    for line in LinesWithEndings::from(code) {
        let ranges: Vec<(Style, &str)> = highlighter.highlight_line(line, &SYNTAX_SET).unwrap_or_default();
        let spans = ranges
            .into_iter()
            .map(|(style, text)| (to_ratatui_color(style.foreground), text.trim_end_matches(['\n', '\r']).to_string()))
            .collect();
        result.push(spans);
    }

    result
}

fn plain(code: &str) -> HighlightResult {
    code.lines().map(|l| vec![(Color::Reset, l.to_string())]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(result: &HighlightResult) -> Vec<String> {
        result.iter().map(|runs| runs.iter().map(|(_, t)| t.as_str()).collect()).collect()
    }

    #[test]
    fn keeps_text_and_line_count() {
        let code = "fn main() {\n    let x = 1;\n}\n";
        let out = highlight_code("rust", code);
        assert_eq!(joined(&out), vec!["fn main() {", "    let x = 1;", "}"]);
    }

    #[test]
    fn unknown_language_is_plain_text() {
        let out = highlight_code("no-such-lang", "a\nb");
        assert_eq!(joined(&out), vec!["a", "b"]);
    }

    #[test]
    fn rust_gets_more_than_one_color() {
        let out = highlight_code("rs", "fn main() { let s = \"x\"; }\n");
        let colors: std::collections::HashSet<_> = out[0].iter().map(|(c, _)| format!("{c:?}")).collect();
        assert!(colors.len() > 1);
    }
}
