//! YAML configuration loader for the prompt template, UI strings, and theme.
use std::sync::LazyLock;

use serde::Deserialize;

// ============================================================================
// Prompts Configuration
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PromptsConfig {
    pub demystify: DemystifyPrompt,
}

#[derive(Debug, Deserialize)]
pub struct DemystifyPrompt {
    /// Instruction block placed before the selection. Holds `{max_tokens}`
    /// and `{not_code_reply}` placeholders.
    pub template: String,
}

// ============================================================================
// UI Configuration
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UiConfig {
    pub title: String,
    pub placeholder: String,
    pub loading: String,
    pub settings: SettingsStrings,
    pub status: StatusStrings,
    pub spinner: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettingsStrings {
    pub label: String,
    pub hint: String,
    pub mask: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusStrings {
    pub popup: String,
    pub settings: String,
}

// ============================================================================
// Theme Configuration
// ============================================================================

/// RGB color as [r, g, b] array
pub type RgbColor = [u8; 3];

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub icons: ThemeIcons,
    pub colors: ThemeColors,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeIcons {
    pub settings: String,
    pub error: String,
    pub bullet: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeColors {
    pub accent: RgbColor,
    pub accent_dim: RgbColor,
    pub success: RgbColor,
    pub warning: RgbColor,
    pub error: RgbColor,
    pub text: RgbColor,
    pub text_secondary: RgbColor,
    pub text_muted: RgbColor,
    pub bg_base: RgbColor,
    pub bg_surface: RgbColor,
    pub bg_input: RgbColor,
    pub border: RgbColor,
    pub border_focus: RgbColor,
}

// ============================================================================
// Loading Functions
// ============================================================================

fn parse_yaml<T: for<'de> Deserialize<'de>>(name: &str, content: &str) -> T {
    serde_yaml::from_str(content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

// ============================================================================
// Global Configuration (embedded at compile time)
// ============================================================================

pub static PROMPTS: LazyLock<PromptsConfig> =
    LazyLock::new(|| parse_yaml("prompts.yaml", include_str!("../../yamls/prompts.yaml")));
pub static UI: LazyLock<UiConfig> = LazyLock::new(|| parse_yaml("ui.yaml", include_str!("../../yamls/ui.yaml")));
pub static THEME: LazyLock<Theme> = LazyLock::new(|| parse_yaml("theme.yaml", include_str!("../../yamls/theme.yaml")));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_yamls_parse() {
        assert!(PROMPTS.demystify.template.contains("{max_tokens}"));
        assert!(PROMPTS.demystify.template.contains("{not_code_reply}"));
        assert_eq!(UI.title, "Demystify code");
        assert!(!UI.spinner.is_empty());
        assert_eq!(THEME.colors.accent, [218, 118, 89]);
    }

    #[test]
    fn template_ends_with_code_heading() {
        assert!(PROMPTS.demystify.template.trim_end().ends_with("## Code"));
    }
}
