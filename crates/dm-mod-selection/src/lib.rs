//! Selection reading: resolve a tab (selection source) and capture its selected text.
//!
//! A "tab" is anything that can hold a text selection: the tmux paste buffer,
//! the Wayland or X11 primary selection, a file, or text piped on stdin.
//! Reading never fails: an unresolvable tab or a failed capture yields an
//! empty [`Selection`].

mod reader;
mod system;
mod tab;

pub use reader::read;
pub use system::{HostEnv, SystemHost};
pub use tab::{CaptureError, Tab, TabHost, TabKind};
