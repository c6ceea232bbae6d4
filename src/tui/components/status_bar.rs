// Status bar component
//
// Key hints for the focused panel, plus the latest warning or error from the
// log buffer when there is one.

use crate::logging::{LogEntry, LogLevel};
use crate::tui::layout::Breakpoint;
use crate::tui::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GLOBAL_HINTS: &str =
    "Ctrl+S:analyze  Ctrl+T:text only  Ctrl+F:file only  Tab:focus  F3:playlists  F4:export PDF  Esc:quit";
const GLOBAL_HINTS_COMPACT: &str = "^S:analyze  Tab  F3  F4:pdf  Esc";

pub struct StatusBar {
    pub focus_hint: Option<&'static str>,
    pub latest: Option<LogEntry>,
}

impl StatusBar {
    fn hints(&self, width: u16) -> String {
        let global = if Breakpoint::from_width(width).at_least(Breakpoint::Wide) {
            GLOBAL_HINTS
        } else {
            GLOBAL_HINTS_COMPACT
        };
        match self.focus_hint {
            Some(hint) => format!(" {} │ {}", hint, global),
            None => format!(" {}", global),
        }
    }
}

impl Component for StatusBar {
    fn id(&self) -> ComponentId {
        ComponentId::StatusBar
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let mut lines = vec![Line::styled(
            self.hints(area.width),
            Style::default().fg(theme.status_bar),
        )];

        if let Some(entry) = &self.latest {
            let color = match entry.level {
                LogLevel::Error => theme.error,
                _ => theme.warn,
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" [{}] {:5} ", entry.timestamp.format("%H:%M:%S"), entry.level.as_str()),
                    Style::default().fg(color),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(theme.muted)),
            ]));
        }

        let status = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
        f.render_widget(status, area);
    }
}
