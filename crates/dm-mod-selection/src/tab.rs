use std::path::PathBuf;

/// Where a selection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabKind {
    /// Most recent tmux copy-mode buffer
    Tmux,
    /// Wayland primary selection
    Wayland,
    /// X11 primary selection
    X11,
    /// Whole contents of a file
    File(PathBuf),
    /// Text piped on stdin at startup
    Stdin,
}

impl TabKind {
    /// Parse a `--source` name. File and stdin tabs have their own flags.
    pub fn from_source_name(name: &str) -> Option<TabKind> {
        match name.to_ascii_lowercase().as_str() {
            "tmux" => Some(TabKind::Tmux),
            "wayland" | "wl" => Some(TabKind::Wayland),
            "x11" | "x" => Some(TabKind::X11),
            "stdin" | "-" => Some(TabKind::Stdin),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TabKind::Tmux => "tmux",
            TabKind::Wayland => "wayland",
            TabKind::X11 => "x11",
            TabKind::File(_) => "file",
            TabKind::Stdin => "stdin",
        }
    }
}

/// A resolved selection source. `id` is the address the host captures from
/// (tmux pane, display name, file path); a tab without one cannot be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: Option<String>,
    pub kind: TabKind,
}

impl Tab {
    pub fn new(kind: TabKind, id: Option<String>) -> Self {
        Self { id, kind }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = Some(path.to_string_lossy().into_owned());
        Self { id, kind: TabKind::File(path) }
    }

    pub fn stdin() -> Self {
        Self { id: Some("stdin".to_string()), kind: TabKind::Stdin }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The platform side of selection reading.
pub trait TabHost {
    /// The tab that currently has focus, if any
    fn active_tab(&self) -> Option<Tab>;

    /// Capture the selected text of `tab`, addressed by `id`.
    /// `Ok(None)` means the tab has nothing selected.
    fn capture_selection(&self, tab: &Tab, id: &str) -> Result<Option<String>, CaptureError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_names() {
        assert_eq!(TabKind::from_source_name("TMUX"), Some(TabKind::Tmux));
        assert_eq!(TabKind::from_source_name("wl"), Some(TabKind::Wayland));
        assert_eq!(TabKind::from_source_name("x11"), Some(TabKind::X11));
        assert_eq!(TabKind::from_source_name("-"), Some(TabKind::Stdin));
        assert_eq!(TabKind::from_source_name("chrome"), None);
    }

    #[test]
    fn file_tab_uses_path_as_id() {
        let tab = Tab::file("/tmp/snippet.rs");
        assert_eq!(tab.id.as_deref(), Some("/tmp/snippet.rs"));
        assert_eq!(tab.kind.name(), "file");
    }
}
