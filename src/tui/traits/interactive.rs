//! Interactive trait for components that handle keyboard input
//!
//! The App routes keys it does not handle globally to the focused component.

use super::{Component, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or if it should
/// bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global: Ctrl+S, Ctrl+O, F2-F4, Tab, Esc)
///    │
///    │ if not handled
///    ▼
/// Focused Component (via Interactive)
/// ```
pub trait Interactive: Component {
    /// Returns `Handled::Yes` if the component consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints shown in the status bar while focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}

/// Paging keys shared by every scrollable interactive component
///
/// Line-level Up/Down are left to the component, since a selectable list
/// moves its selection rather than the viewport.
pub trait ScrollableInteractive: Interactive + Scrollable {
    /// Handles Home, End, PageUp and PageDown
    fn handle_scroll_keys(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

// Anything that implements both traits gets this for free
impl<T: Interactive + Scrollable> ScrollableInteractive for T {}
