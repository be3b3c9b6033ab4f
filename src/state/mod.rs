pub mod persistence;

/// UI-side state of the popup. Flow state lives in the flow; this only
/// tracks presentation concerns.
#[derive(Debug, Default)]
pub struct State {
    /// Settings form shown instead of the content pane
    pub show_settings: bool,
    /// Content pane scroll offset, in wrapped lines
    pub scroll: u16,
    /// Largest useful scroll offset, computed at render time
    pub max_scroll: u16,
    /// Current spinner frame index
    pub spinner_frame: usize,
    /// Name of the selection source, shown in the header
    pub source_label: Option<String>,
    /// Needs a redraw
    pub dirty: bool,
}

impl State {
    pub fn new(source_label: Option<String>) -> Self {
        Self { source_label, dirty: true, ..Default::default() }
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
        self.dirty = true;
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_add(amount).min(self.max_scroll);
        self.dirty = true;
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_clamped() {
        let mut state = State::new(None);
        state.max_scroll = 5;
        state.scroll_down(3);
        state.scroll_down(10);
        assert_eq!(state.scroll, 5);
        state.scroll_up(2);
        assert_eq!(state.scroll, 3);
        state.scroll_up(10);
        assert_eq!(state.scroll, 0);
    }
}
