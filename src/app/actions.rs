/// Things the popup can be asked to do, produced by [`super::events::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    ToggleSettings,
    EditCredential(CredentialEdit),
    ScrollUp(u16),
    ScrollDown(u16),
    ScrollTop,
    RereadSelection,
}

/// A single edit of the password field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialEdit {
    Insert(char),
    Paste(String),
    Backspace,
    Clear,
}

/// Apply an edit to the current credential text. The cursor is always at the end.
pub fn apply_credential_edit(current: &str, edit: &CredentialEdit) -> String {
    match edit {
        CredentialEdit::Insert(c) => {
            let mut next = current.to_string();
            next.push(*c);
            next
        }
        // Keys are single-line; a paste usually drags a trailing newline along
        CredentialEdit::Paste(text) => {
            let mut next = current.to_string();
            next.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
            next
        }
        CredentialEdit::Backspace => {
            let mut next = current.to_string();
            next.pop();
            next
        }
        CredentialEdit::Clear => String::new(),
    }
}
