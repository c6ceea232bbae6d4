//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after its duration. Renders in
//! the bottom-right corner on top of all other content.

use crate::tui::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Copy feedback duration
pub const SHORT: Duration = Duration::from_millis(1500);

/// Default duration for confirmations
pub const NORMAL: Duration = Duration::from_secs(3);

/// Errors stay long enough to read
pub const LONG: Duration = Duration::from_secs(6);

/// Widest a toast grows before wrapping
const MAX_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// A toast notification that auto-dismisses
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info, NORMAL)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success, NORMAL)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error, LONG)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Placement inside `area`: bottom-right, 2 cells from the edges
    fn placement(&self, area: Rect) -> Rect {
        // Display width, not byte length: icons and accents are multi-byte
        let text_width = self.message.width() as u16;
        let max_width = MAX_WIDTH.min(area.width.saturating_sub(4)).max(5);
        let width = (text_width + 4).min(max_width);
        let inner = width.saturating_sub(4).max(1);
        let rows = text_width.div_ceil(inner).max(1);
        let height = (rows + 2).min(area.height);

        let x = area.right().saturating_sub(width + 2).max(area.x);
        let y = area.bottom().saturating_sub(height + 2).max(area.y);
        Rect::new(x, y, width, height)
    }
}

impl Component for Toast {
    fn id(&self) -> ComponentId {
        ComponentId::Toast
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let accent = match self.kind {
            ToastKind::Info => theme.highlight,
            ToastKind::Success => theme.success,
            ToastKind::Error => theme.error,
        };

        let toast_area = self.placement(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.bg));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(theme.fg))
            .block(block);

        // Clear the area first so toast appears on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let toast = Toast::success("✓ Copied").with_duration(Duration::ZERO);
        assert!(toast.is_expired());
        assert!(!Toast::error("Server error").is_expired());
    }

    #[test]
    fn test_placement_uses_display_width() {
        let area = Rect::new(0, 0, 100, 40);
        let toast = Toast::info("✓ Copied");
        let rect = toast.placement(area);
        assert_eq!(rect.width, 8 + 4);
        assert_eq!(rect.height, 3);
        assert_eq!(rect.right(), 98);
        assert_eq!(rect.bottom(), 38);
    }

    #[test]
    fn test_long_message_wraps_within_area() {
        let area = Rect::new(0, 0, 40, 20);
        let toast = Toast::error("x".repeat(100));
        let rect = toast.placement(area);
        assert!(rect.width <= 36);
        assert!(rect.height > 3);
        assert!(rect.bottom() <= area.bottom());
    }
}
