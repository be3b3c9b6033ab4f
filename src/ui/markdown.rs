//! Minimal markdown rendering for explanations: headings, bullets, numbered
//! items, tables, fenced code and inline bold/italic/code/links.
use ratatui::prelude::*;
use unicode_width::UnicodeWidthStr;

use dm_base::config::THEME;

use super::highlight::highlight_code;
use super::theme;

/// Render a markdown document into display lines
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut source = text.lines().peekable();

    while let Some(line) = source.next() {
        let trimmed = line.trim_start();

        if let Some(info) = trimmed.strip_prefix("```") {
            let lang = info.trim().to_string();
            let mut code = String::new();
            for inner in source.by_ref() {
                if inner.trim_start().starts_with("```") {
                    break;
                }
                code.push_str(inner);
                code.push('\n');
            }
            lines.extend(render_code_block(&lang, &code));
            continue;
        }

        if trimmed.starts_with('|') {
            let mut rows = vec![line];
            while let Some(next) = source.peek() {
                if !next.trim_start().starts_with('|') {
                    break;
                }
                rows.push(*next);
                source.next();
            }
            lines.extend(render_table(&rows).into_iter().map(Line::from));
            continue;
        }

        lines.push(Line::from(parse_markdown_line(line)));
    }

    lines
}

fn render_code_block(lang: &str, code: &str) -> Vec<Line<'static>> {
    let bg = theme::bg_surface();
    highlight_code(lang, code)
        .iter()
        .map(|runs| {
            let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
            spans.extend(runs.iter().map(|(color, text)| {
                let style = match color {
                    Color::Reset => Style::default().fg(theme::text()),
                    c => Style::default().fg(*c),
                };
                Span::styled(text.clone(), style.bg(bg))
            }));
            Line::from(spans)
        })
        .collect()
}

/// Display width of cell text once inline markers are stripped
fn display_width(text: &str) -> usize {
    parse_inline_markdown(text).iter().map(|s| s.content.width()).sum()
}

fn render_table(lines: &[&str]) -> Vec<Vec<Span<'static>>> {
    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| {
            let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
            inner.split('|').map(|c| c.trim().to_string()).collect()
        })
        .collect();
    let separator: Vec<bool> = rows
        .iter()
        .map(|cells| cells.iter().all(|c| !c.is_empty() && c.chars().all(|ch| matches!(ch, '-' | ':' | ' '))))
        .collect();

    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut col_widths = vec![0; num_cols];
    for (row, _) in rows.iter().zip(&separator).filter(|(_, sep)| !**sep) {
        for (col, cell) in row.iter().enumerate() {
            col_widths[col] = col_widths[col].max(display_width(cell));
        }
    }

    let border = Style::default().fg(theme::border());
    rows.iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let mut spans = Vec::new();
            for (col, width) in col_widths.iter().enumerate() {
                if separator[row_idx] {
                    if col > 0 {
                        spans.push(Span::styled("─┼─", border));
                    }
                    spans.push(Span::styled("─".repeat(*width), border));
                    continue;
                }
                if col > 0 {
                    spans.push(Span::styled(" │ ", border));
                }
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                if row_idx == 0 {
                    spans.push(Span::styled(cell.to_string(), Style::default().fg(theme::accent()).bold()));
                } else {
                    spans.extend(parse_inline_markdown(cell));
                }
                let pad = width.saturating_sub(display_width(cell));
                if pad > 0 {
                    spans.push(Span::raw(" ".repeat(pad)));
                }
            }
            spans
        })
        .collect()
}

/// Block-level styling for a single line
fn parse_markdown_line(line: &str) -> Vec<Span<'static>> {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();

    if trimmed.starts_with('#') {
        let level = trimmed.chars().take_while(|&c| c == '#').count();
        let content = trimmed[level..].trim_start();
        let style = match level {
            1 => Style::default().fg(theme::accent()).bold(),
            2 => Style::default().fg(theme::accent()),
            3 => Style::default().fg(theme::accent()).italic(),
            _ => Style::default().fg(theme::text_secondary()).italic(),
        };
        return vec![Span::styled(content.to_string(), style)];
    }

    let bullet = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* "));
    if let Some(content) = bullet {
        let mut spans = vec![
            Span::raw(" ".repeat(indent)),
            Span::styled(THEME.icons.bullet.clone(), Style::default().fg(theme::accent_dim())),
        ];
        spans.extend(parse_inline_markdown(content));
        return spans;
    }

    if let Some((number, content)) = numbered_item(trimmed) {
        let mut spans = vec![
            Span::raw(" ".repeat(indent)),
            Span::styled(format!("{number}. "), Style::default().fg(theme::accent_dim())),
        ];
        spans.extend(parse_inline_markdown(content));
        return spans;
    }

    parse_inline_markdown(line)
}

/// `"12. text"` -> `("12", "text")`
fn numbered_item(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix(". ")?;
    Some((&line[..digits], rest))
}

/// Inline markdown: `code`, **bold**, *italic*, [links](url)
pub fn parse_inline_markdown(text: &str) -> Vec<Span<'static>> {
    let plain = Style::default().fg(theme::text());
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    let flush = |current: &mut String, spans: &mut Vec<Span<'static>>| {
        if !current.is_empty() {
            spans.push(Span::styled(std::mem::take(current), plain));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '`' => {
                let code: String = chars.by_ref().take_while(|&n| n != '`').collect();
                flush(&mut current, &mut spans);
                if !code.is_empty() {
                    spans.push(Span::styled(code, Style::default().fg(theme::warning())));
                }
            }
            // snake_case identifiers are not emphasis
            '_' if current.chars().last().is_some_and(char::is_alphanumeric) => current.push(c),
            '*' | '_' if chars.peek() == Some(&c) => {
                chars.next();
                let mut bold = String::new();
                let mut closed = false;
                while let Some(n) = chars.next() {
                    if n == c && chars.peek() == Some(&c) {
                        chars.next();
                        closed = true;
                        break;
                    }
                    bold.push(n);
                }
                if closed && !bold.is_empty() {
                    flush(&mut current, &mut spans);
                    spans.push(Span::styled(bold, plain.bold()));
                } else {
                    current.push(c);
                    current.push(c);
                    current.push_str(&bold);
                }
            }
            '*' | '_' => {
                let mut italic = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == c {
                        closed = true;
                        break;
                    }
                    italic.push(n);
                }
                if closed && !italic.is_empty() {
                    flush(&mut current, &mut spans);
                    spans.push(Span::styled(italic, plain.italic()));
                } else {
                    current.push(c);
                    current.push_str(&italic);
                    if closed {
                        current.push(c);
                    }
                }
            }
            '[' => {
                let mut label = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == ']' {
                        closed = true;
                        break;
                    }
                    label.push(n);
                }
                if closed && chars.peek() == Some(&'(') {
                    chars.next();
                    // URL is dropped; only the label is shown
                    for n in chars.by_ref() {
                        if n == ')' {
                            break;
                        }
                    }
                    flush(&mut current, &mut spans);
                    spans.push(Span::styled(label, Style::default().fg(theme::accent()).underlined()));
                } else {
                    current.push('[');
                    current.push_str(&label);
                    if closed {
                        current.push(']');
                    }
                }
            }
            _ => current.push(c),
        }
    }

    flush(&mut current, &mut spans);
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn inline_markers_are_stripped() {
        let spans = parse_inline_markdown("call `foo()` on **this** *now* via [docs](http://x)");
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "call foo() on this now via docs");
        assert!(spans.iter().any(|s| s.content == "this" && s.style.add_modifier.contains(Modifier::BOLD)));
        assert!(spans.iter().any(|s| s.content == "now" && s.style.add_modifier.contains(Modifier::ITALIC)));
    }

    #[test]
    fn unclosed_markers_stay_literal() {
        let text: String = parse_inline_markdown("a * b").iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "a * b");
        let text: String = parse_inline_markdown("see **c").iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "see **c");
        let text: String = parse_inline_markdown("x[1] = 2").iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "x[1] = 2");
    }

    #[test]
    fn snake_case_is_not_italic() {
        let spans = parse_inline_markdown("call read_selection_text now");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "call read_selection_text now");
    }

    #[test]
    fn headings_bullets_and_numbers() {
        let lines = render_markdown("## Summary\n- first\n  * nested\n3. third");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["Summary", "• first", "  • nested", "3. third"]);
    }

    #[test]
    fn fenced_code_keeps_lines() {
        let lines = render_markdown("Before\n```rust\nlet a = 1;\nlet b = 2;\n```\nAfter");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["Before", " let a = 1;", " let b = 2;", "After"]);
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let lines = render_markdown("```\nx\ny");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn table_columns_align() {
        let lines = render_markdown("| a | long |\n|---|---|\n| **bb** | c |");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts[0], "a  │ long");
        assert_eq!(texts[1], "───┼─────");
        assert_eq!(texts[2], "bb │ c   ");
    }
}
