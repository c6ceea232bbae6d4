//! Loading overlay shown while an analysis is in flight

use crate::tui::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;

pub const MESSAGE: &str = "Analyzing syllabus…";

/// Centered spinner box
#[derive(Debug, Clone, Copy)]
pub struct LoadingOverlay {
    pub elapsed: Duration,
}

impl LoadingOverlay {
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed }
    }
}

impl Component for LoadingOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::Loading
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let width = 34.min(area.width);
        let height = 4.min(area.height);
        let overlay = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        let lines = vec![
            Line::styled(
                format!("{} {}", ctx.spinner_char(), MESSAGE),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format!("{}s", self.elapsed.as_secs()),
                Style::default().fg(theme.muted),
            ),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .style(Style::default().bg(theme.bg));

        f.render_widget(Clear, overlay);
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            overlay,
        );
    }
}
