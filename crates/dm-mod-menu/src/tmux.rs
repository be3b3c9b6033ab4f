use std::process::Command;

use crate::item::{MenuContext, MenuItem};
use crate::{MenuError, MenuRegistry};

/// Default copy-mode key for the entry
pub const DEFAULT_KEY: &str = "D";

/// Copy-mode key tables: a key bound there is only reachable while selecting
const COPY_MODE_TABLES: &[&str] = &["copy-mode-vi", "copy-mode"];

/// Registers menu items as tmux copy-mode bindings that copy the selection
/// and open the popup in a `display-popup`.
pub struct TmuxRegistry {
    key: String,
    /// Program invoked inside the popup (normally the current executable)
    program: String,
    /// Collect commands instead of running them
    dry_run: bool,
    issued: Vec<Vec<String>>,
}

impl TmuxRegistry {
    pub fn new(key: impl Into<String>, program: impl Into<String>) -> Self {
        Self { key: key.into(), program: program.into(), dry_run: false, issued: Vec::new() }
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Commands issued (or collected, in dry-run mode) so far
    pub fn issued(&self) -> &[Vec<String>] {
        &self.issued
    }

    /// Render issued commands as `tmux.conf` lines
    pub fn to_conf(&self) -> String {
        self.issued.iter().map(|args| conf_line(args)).collect::<Vec<_>>().join("\n")
    }

    /// `tmux` argument lists binding `item` in every table matching its contexts
    pub fn commands_for(&self, item: &MenuItem) -> Vec<Vec<String>> {
        let popup_cmd = format!("{} menu-click {}", shell_quote(&self.program), item.id);
        let tables = item.contexts.iter().flat_map(|ctx| match ctx {
            MenuContext::Selection => COPY_MODE_TABLES.iter().copied(),
        });

        tables
            .map(|table| {
                [
                    "bind-key",
                    "-N",
                    item.title,
                    "-T",
                    table,
                    self.key.as_str(),
                    "send-keys",
                    "-X",
                    "copy-selection-and-cancel",
                    ";",
                    "display-popup",
                    "-E",
                    "-w",
                    "80%",
                    "-h",
                    "80%",
                    popup_cmd.as_str(),
                ]
                .iter()
                .map(|s| s.to_string())
                .collect()
            })
            .collect()
    }
}

impl MenuRegistry for TmuxRegistry {
    fn create(&mut self, item: &MenuItem) -> Result<(), MenuError> {
        for args in self.commands_for(item) {
            if !self.dry_run {
                let output = Command::new("tmux").args(&args).output()?;
                if !output.status.success() {
                    return Err(MenuError::Rejected {
                        command: conf_line(&args),
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    });
                }
            }
            self.issued.push(args);
        }
        Ok(())
    }
}

fn conf_line(args: &[String]) -> String {
    args.iter()
        .map(|a| if a == ";" { "\\;".to_string() } else { shell_quote(a) })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote for tmux/sh when the word contains anything but safe characters.
fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '%' | ':' | '='));
    if safe { word.to_string() } else { format!("'{}'", word.replace('\'', r"'\''")) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MenuRegistrar;

    #[test]
    fn binds_in_both_copy_mode_tables() {
        let mut registry = TmuxRegistry::new("D", "/usr/bin/demystify").dry_run();
        MenuRegistrar::new().register(&mut registry).unwrap();

        let issued = registry.issued();
        assert_eq!(issued.len(), 2);
        assert_eq!(issued[0][4], "copy-mode-vi");
        assert_eq!(issued[1][4], "copy-mode");
        assert_eq!(issued[0][5], "D");
        assert_eq!(issued[0].last().unwrap(), "/usr/bin/demystify menu-click demystify-code");
    }

    #[test]
    fn conf_output_escapes_separator_and_quotes() {
        let mut registry = TmuxRegistry::new("D", "/opt/my tools/demystify").dry_run();
        MenuRegistrar::new().register(&mut registry).unwrap();

        let conf = registry.to_conf();
        let first = conf.lines().next().unwrap();
        assert!(first.starts_with("bind-key -N 'Demystify code' -T copy-mode-vi D"));
        assert!(first.contains(" \\; display-popup -E"));
        assert!(first.contains("''\\''"), "nested quote of the program path: {}", first);
    }

    #[test]
    fn shell_quote_cases() {
        assert_eq!(shell_quote("copy-mode-vi"), "copy-mode-vi");
        assert_eq!(shell_quote("80%"), "80%");
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }
}
