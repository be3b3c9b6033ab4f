use std::fs;
use std::process::Command;

use crate::tab::{CaptureError, Tab, TabHost, TabKind};

/// Snapshot of the environment variables that decide the active tab.
#[derive(Debug, Clone, Default)]
pub struct HostEnv {
    pub tmux: Option<String>,
    pub tmux_pane: Option<String>,
    pub wayland_display: Option<String>,
    pub display: Option<String>,
}

impl HostEnv {
    pub fn from_process() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            tmux: var("TMUX"),
            tmux_pane: var("TMUX_PANE"),
            wayland_display: var("WAYLAND_DISPLAY"),
            display: var("DISPLAY"),
        }
    }
}

/// Selection host backed by tmux, wl-paste, xclip, files, and stdin.
pub struct SystemHost {
    env: HostEnv,
    stdin_text: Option<String>,
}

impl SystemHost {
    pub fn new(env: HostEnv) -> Self {
        Self { env, stdin_text: None }
    }

    /// Attach text read from stdin at startup, served by the stdin tab.
    pub fn with_stdin(mut self, text: String) -> Self {
        self.stdin_text = Some(text);
        self
    }

    /// Build the tab for an explicitly named source kind, resolving its id
    /// from the environment.
    pub fn tab_for(&self, kind: TabKind) -> Tab {
        match kind {
            TabKind::Tmux => Tab::new(TabKind::Tmux, self.tmux_id()),
            TabKind::Wayland => Tab::new(TabKind::Wayland, self.env.wayland_display.clone()),
            TabKind::X11 => Tab::new(TabKind::X11, self.env.display.clone()),
            TabKind::File(path) => Tab::file(path),
            TabKind::Stdin => Tab::stdin(),
        }
    }

    fn tmux_id(&self) -> Option<String> {
        self.env.tmux.as_ref()?;
        // A popup started by display-popup has no pane of its own
        Some(self.env.tmux_pane.clone().unwrap_or_else(|| "popup".to_string()))
    }
}

impl TabHost for SystemHost {
    fn active_tab(&self) -> Option<Tab> {
        if self.stdin_text.is_some() {
            return Some(Tab::stdin());
        }
        if self.env.tmux.is_some() {
            return Some(self.tab_for(TabKind::Tmux));
        }
        if self.env.wayland_display.is_some() {
            return Some(self.tab_for(TabKind::Wayland));
        }
        if self.env.display.is_some() {
            return Some(self.tab_for(TabKind::X11));
        }
        None
    }

    fn capture_selection(&self, tab: &Tab, id: &str) -> Result<Option<String>, CaptureError> {
        match &tab.kind {
            TabKind::Tmux => run_capture("tmux", &["show-buffer"], None),
            TabKind::Wayland => run_capture("wl-paste", &["--primary", "--no-newline"], Some(("WAYLAND_DISPLAY", id))),
            TabKind::X11 => run_capture("xclip", &["-o", "-selection", "primary"], Some(("DISPLAY", id))),
            TabKind::File(path) => fs::read_to_string(path)
                .map(non_empty)
                .map_err(|source| CaptureError::Read { path: id.to_string(), source }),
            TabKind::Stdin => Ok(self.stdin_text.clone().and_then(non_empty)),
        }
    }
}

/// Run a selection command. A non-zero exit means "nothing selected"
/// (tmux with no buffers, wl-paste with no selection), not an error.
fn run_capture(program: &'static str, args: &[&str], env: Option<(&str, &str)>) -> Result<Option<String>, CaptureError> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some((key, value)) = env {
        cmd.env(key, value);
    }

    let output = cmd.output().map_err(|source| CaptureError::Spawn { program, source })?;
    if !output.status.success() {
        tracing::debug!(program, status = %output.status, "selection command reported no selection");
        return Ok(None);
    }
    Ok(non_empty(String::from_utf8_lossy(&output.stdout).into_owned()))
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::read;

    fn env(tmux: bool, wayland: bool, x11: bool) -> HostEnv {
        HostEnv {
            tmux: tmux.then(|| "/tmp/tmux-1000/default,1,0".to_string()),
            tmux_pane: tmux.then(|| "%4".to_string()),
            wayland_display: wayland.then(|| "wayland-0".to_string()),
            display: x11.then(|| ":0".to_string()),
        }
    }

    #[test]
    fn active_tab_precedence() {
        assert_eq!(SystemHost::new(env(true, true, true)).active_tab().unwrap().kind, TabKind::Tmux);
        assert_eq!(SystemHost::new(env(false, true, true)).active_tab().unwrap().kind, TabKind::Wayland);
        assert_eq!(SystemHost::new(env(false, false, true)).active_tab().unwrap().kind, TabKind::X11);
        assert!(SystemHost::new(env(false, false, false)).active_tab().is_none());
    }

    #[test]
    fn stdin_text_takes_focus() {
        let host = SystemHost::new(env(true, false, false)).with_stdin("let x = 1;".into());
        assert_eq!(host.active_tab().unwrap().kind, TabKind::Stdin);
        assert_eq!(read(&host, None).as_str(), "let x = 1;");
    }

    #[test]
    fn tmux_tab_carries_pane_id() {
        let tab = SystemHost::new(env(true, false, false)).tab_for(TabKind::Tmux);
        assert_eq!(tab.id.as_deref(), Some("%4"));
    }

    #[test]
    fn explicit_source_without_display_has_no_id() {
        let host = SystemHost::new(env(false, false, false));
        let tab = host.tab_for(TabKind::X11);
        assert!(tab.id.is_none());
        assert!(read(&host, Some(&tab)).is_empty());
    }

    #[test]
    fn file_tab_reads_contents_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  def f(x): return x+1").unwrap();
        let host = SystemHost::new(HostEnv::default());
        let sel = read(&host, Some(&Tab::file(file.path())));
        assert_eq!(sel.as_str(), "  def f(x): return x+1\n");
    }

    #[test]
    fn missing_file_is_empty() {
        let host = SystemHost::new(HostEnv::default());
        assert!(read(&host, Some(&Tab::file("/definitely/not/here.rs"))).is_empty());
    }

    #[test]
    fn empty_stdin_is_empty() {
        let host = SystemHost::new(HostEnv::default()).with_stdin(String::new());
        assert!(read(&host, None).is_empty());
    }
}
