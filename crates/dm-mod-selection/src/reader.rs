use dm_base::state::Selection;

use crate::tab::{Tab, TabHost};

/// Read the current selection.
///
/// Uses `requested` when given, otherwise the host's active tab. Returns an
/// empty selection when no tab or tab id can be resolved, or when the
/// capture fails.
pub fn read(host: &dyn TabHost, requested: Option<&Tab>) -> Selection {
    let active;
    let tab = match requested {
        Some(tab) => tab,
        None => match host.active_tab() {
            Some(tab) => {
                active = tab;
                &active
            }
            None => {
                tracing::debug!("no active tab, selection unavailable");
                return Selection::empty();
            }
        },
    };

    let Some(id) = tab.id.as_deref() else {
        tracing::debug!(kind = tab.kind.name(), "tab has no id, selection unavailable");
        return Selection::empty();
    };

    match host.capture_selection(tab, id) {
        Ok(Some(text)) => {
            tracing::debug!(kind = tab.kind.name(), chars = text.chars().count(), "captured selection");
            Selection::from(text)
        }
        Ok(None) => Selection::empty(),
        Err(e) => {
            tracing::warn!(kind = tab.kind.name(), error = %e, "selection capture failed");
            Selection::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::tab::{CaptureError, TabKind};

    struct FakeHost {
        active: Option<Tab>,
        text: Option<String>,
        fail: bool,
        captured: RefCell<Vec<(TabKind, String)>>,
    }

    impl FakeHost {
        fn new(active: Option<Tab>, text: Option<&str>) -> Self {
            Self { active, text: text.map(str::to_string), fail: false, captured: RefCell::new(Vec::new()) }
        }
    }

    impl TabHost for FakeHost {
        fn active_tab(&self) -> Option<Tab> {
            self.active.clone()
        }

        fn capture_selection(&self, tab: &Tab, id: &str) -> Result<Option<String>, CaptureError> {
            self.captured.borrow_mut().push((tab.kind.clone(), id.to_string()));
            if self.fail {
                return Err(CaptureError::Spawn { program: "xclip", source: std::io::Error::other("missing") });
            }
            Ok(self.text.clone())
        }
    }

    #[test]
    fn reads_active_tab_when_none_requested() {
        let host = FakeHost::new(Some(Tab::new(TabKind::Tmux, Some("%1".into()))), Some("fn main() {}"));
        let sel = read(&host, None);
        assert_eq!(sel.as_str(), "fn main() {}");
        assert_eq!(host.captured.borrow().as_slice(), &[(TabKind::Tmux, "%1".to_string())]);
    }

    #[test]
    fn requested_tab_overrides_active() {
        let host = FakeHost::new(Some(Tab::new(TabKind::Tmux, Some("%1".into()))), Some("x"));
        let requested = Tab::new(TabKind::X11, Some(":0".into()));
        read(&host, Some(&requested));
        assert_eq!(host.captured.borrow()[0], (TabKind::X11, ":0".to_string()));
    }

    #[test]
    fn no_active_tab_is_empty_without_capture() {
        let host = FakeHost::new(None, Some("ignored"));
        assert!(read(&host, None).is_empty());
        assert!(host.captured.borrow().is_empty());
    }

    #[test]
    fn tab_without_id_is_empty_without_capture() {
        let host = FakeHost::new(Some(Tab::new(TabKind::Tmux, None)), Some("ignored"));
        assert!(read(&host, None).is_empty());
        assert!(host.captured.borrow().is_empty());
    }

    #[test]
    fn nothing_selected_is_empty() {
        let host = FakeHost::new(Some(Tab::new(TabKind::Wayland, Some("wayland-0".into()))), None);
        assert!(read(&host, None).is_empty());
    }

    #[test]
    fn capture_error_collapses_to_empty() {
        let mut host = FakeHost::new(Some(Tab::new(TabKind::X11, Some(":0".into()))), Some("x"));
        host.fail = true;
        assert!(read(&host, None).is_empty());
    }
}
