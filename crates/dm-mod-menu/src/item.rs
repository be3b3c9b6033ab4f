pub const MENU_ITEM_ID: &str = "demystify-code";
pub const MENU_ITEM_TITLE: &str = "Demystify code";

/// When an entry is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuContext {
    Selection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub title: &'static str,
    pub contexts: Vec<MenuContext>,
}

impl MenuItem {
    pub fn demystify() -> Self {
        Self { id: MENU_ITEM_ID, title: MENU_ITEM_TITLE, contexts: vec![MenuContext::Selection] }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    OpenPopup,
    Ignored,
}
