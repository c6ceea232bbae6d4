//! Results panel component
//!
//! Shows the analysed units, each with its topics grouped by tier, and the
//! enrichment links when enabled. Owns the last rendered result so the
//! enrichment toggle can re-render without another request.
//!
//! Implements Component, Scrollable, Selectable, Copyable and Interactive.
//! Selection is per unit; `y` copies the selected unit.

use super::scrollbar::render_scrollbar;
use crate::export::LINK_TEXT;
use crate::model::{AnalysisResult, Tier};
use crate::orchestrator::ResultRenderer;
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable,
    ScrollableInteractive, Selectable,
};
use crate::view::{self, VisibleTopic, VisibleUnit};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a unit's copy hint reads "✓ Copied"
pub const COPIED_FEEDBACK: Duration = Duration::from_millis(1500);

const EMPTY_HINT: &str = "No analysis yet. Type or paste a syllabus, or attach a PDF / image with Ctrl+O, then press Ctrl+S.";

/// Results panel component
#[derive(Default)]
pub struct ResultsPanel {
    /// Model of the last successful analysis
    result: Option<Arc<AnalysisResult>>,

    /// What is currently on screen, projected from `result`
    units: Vec<VisibleUnit>,

    selected: Option<usize>,

    scroll: ScrollState,

    /// Unit whose copy hint is showing feedback, and since when
    copied: Option<(usize, Instant)>,
}

impl ResultsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the panel content with a fresh projection of `result`
    pub fn show(&mut self, result: Arc<AnalysisResult>, enrichment_enabled: bool) {
        self.units = view::project(&result, enrichment_enabled);
        self.result = Some(result);
        self.selected = if self.units.is_empty() { None } else { Some(0) };
        self.copied = None;
        self.scroll.scroll_to_top();
        self.sync_dimensions(self.scroll.viewport());
    }

    /// Re-project the current model with a new enrichment flag
    ///
    /// Only link presence changes; selection and scroll stay put.
    pub fn rerender(&mut self, enrichment_enabled: bool) {
        if let Some(result) = &self.result {
            self.units = view::project(result, enrichment_enabled);
        }
        self.sync_dimensions(self.scroll.viewport());
    }

    /// Units exactly as displayed
    pub fn visible_units(&self) -> &[VisibleUnit] {
        &self.units
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        self.result.as_ref()
    }

    pub fn has_results(&self) -> bool {
        !self.units.is_empty()
    }

    pub fn selected_unit(&self) -> Option<&VisibleUnit> {
        self.selected.and_then(|i| self.units.get(i))
    }

    /// Start the "✓ Copied" feedback on the selected unit
    pub fn mark_copied(&mut self) {
        if let Some(idx) = self.selected {
            self.copied = Some((idx, Instant::now()));
        }
    }

    fn copied_unit(&self) -> Option<usize> {
        self.copied
            .filter(|(_, at)| at.elapsed() < COPIED_FEEDBACK)
            .map(|(idx, _)| idx)
    }

    /// Record the viewport height and clamp scrolling to the content
    ///
    /// Call before rendering with the inner height of the panel.
    pub fn sync_dimensions(&mut self, viewport: usize) {
        let total = self.units.iter().map(unit_height).sum();
        self.scroll.update_dimensions(total, viewport);
    }

    /// First and one-past-last line of a unit
    fn unit_span(&self, index: usize) -> (usize, usize) {
        let start: usize = self.units.iter().take(index).map(unit_height).sum();
        let end = start + self.units.get(index).map(unit_height).unwrap_or(0);
        (start, end)
    }

    fn all_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let copied = self.copied_unit();
        self.units
            .iter()
            .enumerate()
            .flat_map(|(i, unit)| {
                unit_lines(
                    unit,
                    theme,
                    self.selected == Some(i),
                    copied == Some(i),
                )
            })
            .collect()
    }

    fn title(&self) -> String {
        match self.result.as_ref().and_then(|r| r.subject.as_deref()) {
            Some(subject) => format!(" Results: {} ", subject),
            None => " Results ".to_string(),
        }
    }
}

impl ResultRenderer for ResultsPanel {
    fn render(&mut self, result: Arc<AnalysisResult>, enrichment_enabled: bool) {
        self.show(result, enrichment_enabled);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for ResultsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Results
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(focused))
            .title(Span::styled(self.title(), theme.title_style()));

        if self.units.is_empty() {
            let hint = Paragraph::new(EMPTY_HINT)
                .style(Style::default().fg(theme.muted))
                .wrap(ratatui::widgets::Wrap { trim: true })
                .block(block);
            f.render_widget(hint, area);
            return;
        }

        let scroll = self.scroll_state();
        let (start, end) = scroll.visible_range();
        let lines: Vec<Line> = self
            .all_lines(theme)
            .into_iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
        render_scrollbar(f, area, scroll);
    }
}

impl Scrollable for ResultsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for ResultsPanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select a unit and scroll it into view
    fn select(&mut self, index: usize) {
        if self.units.is_empty() {
            self.selected = None;
            return;
        }
        let index = index.min(self.units.len() - 1);
        self.selected = Some(index);
        let (start, end) = self.unit_span(index);
        self.scroll.reveal(start, end);
    }

    fn item_count(&self) -> usize {
        self.units.len()
    }
}

impl Copyable for ResultsPanel {
    fn copy_text(&self) -> Option<String> {
        self.selected_unit().map(view::unit_text)
    }

    fn copy_description(&self) -> String {
        String::new()
    }
}

impl Interactive for ResultsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            _ => self.handle_scroll_keys(key),
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:unit  PgUp/PgDn:scroll  y:copy unit")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Line layout
// ═══════════════════════════════════════════════════════════════════════════

/// Rendered height of a unit, matching `unit_lines`
fn unit_height(unit: &VisibleUnit) -> usize {
    let headings = Tier::ORDER
        .iter()
        .filter(|tier| unit.topics.iter().any(|t| t.tier == **tier))
        .count();
    let body = if unit.topics.is_empty() {
        1
    } else {
        headings + unit.topics.len() + unit.link_count()
    };
    // header + body + trailing blank
    1 + body + 1
}

fn unit_lines(
    unit: &VisibleUnit,
    theme: &Theme,
    selected: bool,
    copied: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(unit_height(unit));

    let marker = if selected { "▸ " } else { "  " };
    let name_style = if selected {
        theme.selected_style()
    } else {
        Style::default()
            .fg(theme.unit_header)
            .add_modifier(Modifier::BOLD)
    };
    let copy_hint = if copied {
        Span::styled("  ✓ Copied", Style::default().fg(theme.success))
    } else if selected {
        Span::styled("  📋 Copy [y]", Style::default().fg(theme.muted))
    } else {
        Span::raw("")
    };
    lines.push(Line::from(vec![
        Span::styled(marker, name_style),
        Span::styled(unit.name.clone(), name_style),
        copy_hint,
    ]));

    if unit.topics.is_empty() {
        lines.push(Line::styled(
            "    (no topics)",
            Style::default().fg(theme.muted),
        ));
    }

    for tier in Tier::ORDER {
        let topics: Vec<&VisibleTopic> = unit.topics.iter().filter(|t| t.tier == tier).collect();
        if topics.is_empty() {
            continue;
        }
        lines.push(Line::styled(
            format!("    {}", tier.label()),
            theme.tier_style(tier),
        ));
        for topic in topics {
            lines.push(Line::from(vec![
                Span::styled("      • ", theme.tier_style(tier)),
                Span::styled(topic.label.clone(), Style::default().fg(theme.fg)),
            ]));
            if let Some(url) = &topic.link {
                lines.push(Line::from(vec![
                    Span::styled(format!("        ▶ {}: ", LINK_TEXT), Style::default().fg(theme.muted)),
                    Span::styled(url.clone(), theme.link_style()),
                ]));
            }
        }
    }

    lines.push(Line::raw(""));
    lines
}
