// Title bar component
//
// App name, the current subject, and the state of the two toggles.

use crate::tui::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the title bar shows, borrowed from App for one frame
pub struct TitleBar<'a> {
    pub subject: Option<&'a str>,
    pub include_enrichment: bool,
    pub busy: bool,
}

impl TitleBar<'_> {
    fn text(&self, ctx: &RenderContext) -> String {
        let spinner = if self.busy {
            format!(" {} analyzing", ctx.spinner_char())
        } else {
            String::new()
        };
        match self.subject {
            Some(subject) => format!(" 📚 Study Buddy{} ──── {}", spinner, subject),
            None => format!(" 📚 Study Buddy{}", spinner),
        }
    }
}

impl Component for TitleBar<'_> {
    fn id(&self) -> ComponentId {
        ComponentId::TitleBar
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let playlists = if self.include_enrichment {
            Span::styled(" 🎬 Playlists: on ", Style::default().fg(theme.success))
        } else {
            Span::styled(" 🎬 Playlists: off ", Style::default().fg(theme.muted))
        };
        let toggle = Span::styled(
            format!(" F2:{} ", theme.preference.toggle_label()),
            Style::default().fg(theme.muted),
        );

        let title = Paragraph::new(self.text(ctx))
            .style(theme.title_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.title))
                    .title_top(Line::from(vec![playlists, toggle]).right_aligned()),
            );

        f.render_widget(title, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::Theme;

    #[test]
    fn test_title_text() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, ComponentId::Input, 0);

        let idle = TitleBar {
            subject: Some("Physics"),
            include_enrichment: true,
            busy: false,
        };
        assert_eq!(idle.text(&ctx), " 📚 Study Buddy ──── Physics");

        let busy = TitleBar {
            subject: None,
            include_enrichment: true,
            busy: true,
        };
        assert!(busy.text(&ctx).ends_with("analyzing"));
    }
}
