//! Core component trait
//!
//! Every UI element that can be rendered implements `Component`.

use crate::tui::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Unique identifier for a component
///
/// Used for focus tracking and event routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Syllabus text and attachment
    Input,
    /// Rendered units and topics
    Results,
    /// Toast notification (non-focusable)
    Toast,
    /// Title bar (non-focusable)
    TitleBar,
    /// Status bar (non-focusable)
    StatusBar,
    /// Loading overlay (non-focusable)
    Loading,
}

impl ComponentId {
    pub fn is_focusable(&self) -> bool {
        matches!(self, ComponentId::Input | ComponentId::Results)
    }

    /// Cycle to next focusable component (Tab behavior)
    pub fn next_focus(self) -> Self {
        match self {
            Self::Input => Self::Results,
            Self::Results => Self::Input,
            other => other,
        }
    }
}

/// Immutable context passed to components during rendering
///
/// Components only see what they need, never mutable app state.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,

    /// Animation frame counter (for spinners, blinking cursors)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focus: ComponentId, animation_frame: usize) -> Self {
        Self {
            theme,
            focus,
            animation_frame,
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Get spinner character for current animation frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Blinking text cursor, visible on even half-seconds
    pub fn cursor_visible(&self) -> bool {
        (self.animation_frame / 3) % 2 == 0
    }
}

/// Base trait for all UI components
///
/// This is the minimum contract; most components also implement
/// `Interactive`, `Scrollable` or `Copyable`.
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render the component to the given area
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_between_panels() {
        assert_eq!(ComponentId::Input.next_focus(), ComponentId::Results);
        assert_eq!(ComponentId::Results.next_focus(), ComponentId::Input);
        assert_eq!(ComponentId::Toast.next_focus(), ComponentId::Toast);
        assert!(!ComponentId::Loading.is_focusable());
    }

    #[test]
    fn test_spinner_wraps() {
        let theme = Theme::default();
        let a = RenderContext::new(&theme, ComponentId::Input, 1);
        let b = RenderContext::new(&theme, ComponentId::Input, 5);
        assert_eq!(a.spinner_char(), b.spinner_char());
        assert!(b.is_focused(ComponentId::Input));
    }
}
