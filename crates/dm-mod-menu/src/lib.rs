//! Context entry that opens the popup while text is being selected.

mod item;
mod tmux;

pub use item::{ClickOutcome, MENU_ITEM_ID, MENU_ITEM_TITLE, MenuContext, MenuItem};
pub use tmux::{DEFAULT_KEY, TmuxRegistry};

use dm_base::state::Selection;

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("failed to run tmux: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("tmux rejected `{command}`: {stderr}")]
    Rejected { command: String, stderr: String },
}

/// A surface that can display context entries.
pub trait MenuRegistry {
    fn create(&mut self, item: &MenuItem) -> Result<(), MenuError>;
}

/// Owns the single "Demystify code" entry.
pub struct MenuRegistrar {
    item: MenuItem,
}

impl MenuRegistrar {
    pub fn new() -> Self {
        Self { item: MenuItem::demystify() }
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn register(&self, registry: &mut dyn MenuRegistry) -> Result<(), MenuError> {
        registry.create(&self.item)?;
        tracing::info!(id = self.item.id, "menu entry registered");
        Ok(())
    }

    /// The entry only shows up while something is selected.
    pub fn is_visible(&self, selection: &Selection) -> bool {
        self.item.contexts.iter().any(|ctx| match ctx {
            MenuContext::Selection => !selection.is_empty(),
        })
    }

    /// Clicking opens the popup; it never hands over the selection itself.
    pub fn handle_click(&self, item_id: &str) -> ClickOutcome {
        if item_id == self.item.id { ClickOutcome::OpenPopup } else { ClickOutcome::Ignored }
    }
}

impl Default for MenuRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRegistry {
        created: Vec<MenuItem>,
    }

    impl MenuRegistry for RecordingRegistry {
        fn create(&mut self, item: &MenuItem) -> Result<(), MenuError> {
            self.created.push(item.clone());
            Ok(())
        }
    }

    #[test]
    fn registers_single_entry() {
        let mut registry = RecordingRegistry::default();
        MenuRegistrar::new().register(&mut registry).unwrap();
        assert_eq!(registry.created.len(), 1);
        assert_eq!(registry.created[0].id, "demystify-code");
        assert_eq!(registry.created[0].title, "Demystify code");
    }

    #[test]
    fn visible_only_with_selection() {
        let registrar = MenuRegistrar::new();
        assert!(registrar.is_visible(&Selection::from("x = 1")));
        assert!(!registrar.is_visible(&Selection::empty()));
    }

    #[test]
    fn click_routing() {
        let registrar = MenuRegistrar::new();
        assert_eq!(registrar.handle_click("demystify-code"), ClickOutcome::OpenPopup);
        assert_eq!(registrar.handle_click("something-else"), ClickOutcome::Ignored);
    }
}
