//! Popup colors, read from the embedded theme.
use ratatui::style::Color;

use dm_base::config::THEME;

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

pub fn accent() -> Color {
    rgb(THEME.colors.accent)
}
pub fn accent_dim() -> Color {
    rgb(THEME.colors.accent_dim)
}
pub fn warning() -> Color {
    rgb(THEME.colors.warning)
}
pub fn error() -> Color {
    rgb(THEME.colors.error)
}
pub fn text() -> Color {
    rgb(THEME.colors.text)
}
pub fn text_secondary() -> Color {
    rgb(THEME.colors.text_secondary)
}
pub fn text_muted() -> Color {
    rgb(THEME.colors.text_muted)
}
pub fn bg_base() -> Color {
    rgb(THEME.colors.bg_base)
}
pub fn bg_surface() -> Color {
    rgb(THEME.colors.bg_surface)
}
pub fn bg_input() -> Color {
    rgb(THEME.colors.bg_input)
}
pub fn border() -> Color {
    rgb(THEME.colors.border)
}
pub fn border_focus() -> Color {
    rgb(THEME.colors.border_focus)
}
