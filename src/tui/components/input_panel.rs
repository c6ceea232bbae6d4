//! Input panel component
//!
//! Multi-line syllabus text editor plus the attachment preview. Ctrl+O
//! switches the bottom line into a path prompt; the App validates the path
//! and attaches the file.

use crate::orchestrator::InputState;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PLACEHOLDER: &str = "Paste your syllabus here…";

/// Input panel component
#[derive(Debug, Default)]
pub struct InputPanel {
    /// Text and attachment awaiting submission
    pub inputs: InputState,

    /// Byte offset of the cursor in `inputs.text`
    cursor: usize,

    /// Path being typed after Ctrl+O
    prompt: Option<String>,
}

impl InputPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(inputs: InputState) -> Self {
        let cursor = inputs.text.len();
        Self {
            inputs,
            cursor,
            prompt: None,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Attachment prompt
    // ─────────────────────────────────────────────────────────────

    pub fn open_prompt(&mut self) {
        self.prompt = Some(String::new());
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    /// Close the prompt, returning the typed path if it is not blank
    pub fn finish_prompt(&mut self) -> Option<String> {
        self.prompt
            .take()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    // ─────────────────────────────────────────────────────────────
    // Text editing
    // ─────────────────────────────────────────────────────────────

    /// Insert pasted text at the cursor (or into the prompt)
    pub fn insert_str(&mut self, s: &str) {
        if let Some(prompt) = &mut self.prompt {
            // Paths are single-line
            prompt.push_str(s.lines().next().unwrap_or(""));
            return;
        }
        self.clamp_cursor();
        let s = s.replace("\r\n", "\n").replace('\r', "\n");
        self.inputs.text.insert_str(self.cursor, &s);
        self.cursor += s.len();
    }

    fn insert_char(&mut self, c: char) {
        self.inputs.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if let Some(c) = self.inputs.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.inputs.text.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.inputs.text.len() {
            self.inputs.text.remove(self.cursor);
        }
    }

    fn move_left(&mut self) {
        if let Some(c) = self.inputs.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    fn move_right(&mut self) {
        if let Some(c) = self.inputs.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn line_start(&self, at: usize) -> usize {
        self.inputs.text[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.inputs.text[at..]
            .find('\n')
            .map(|i| at + i)
            .unwrap_or(self.inputs.text.len())
    }

    /// Byte offset of char column `col` on the line starting at `start`
    fn offset_in_line(&self, start: usize, col: usize) -> usize {
        let end = self.line_end(start);
        self.inputs.text[start..end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    fn column(&self) -> usize {
        let start = self.line_start(self.cursor);
        self.inputs.text[start..self.cursor].chars().count()
    }

    fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let col = self.column();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, col);
    }

    fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.inputs.text.len() {
            self.cursor = end;
            return;
        }
        let col = self.column();
        self.cursor = self.offset_in_line(end + 1, col);
    }

    /// The text may have been cleared by the orchestrator since the last key
    fn clamp_cursor(&mut self) {
        let len = self.inputs.text.len();
        self.cursor = self.cursor.min(len);
        while !self.inputs.text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Handled {
        let Some(prompt) = &mut self.prompt else {
            return Handled::No;
        };
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => prompt.push(c),
            KeyCode::Backspace => {
                prompt.pop();
            }
            KeyCode::Esc => self.cancel_prompt(),
            // Enter is left to the App, which validates and attaches
            _ => return Handled::No,
        }
        Handled::Yes
    }

    /// Cursor position as (line, column) in chars
    fn cursor_position(&self) -> (usize, usize) {
        let cursor = self.cursor.min(self.inputs.text.len());
        let before = self.inputs.text.get(..cursor).unwrap_or("");
        let line = before.matches('\n').count();
        let col = before.rsplit('\n').next().unwrap_or("").chars().count();
        (line, col)
    }

    fn text_lines(&self, ctx: &RenderContext, height: usize) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id()) && !self.is_prompting();

        if self.inputs.text.is_empty() {
            let mut spans = Vec::new();
            if focused && ctx.cursor_visible() {
                spans.push(Span::styled("▏", Style::default().fg(theme.highlight)));
            }
            spans.push(Span::styled(PLACEHOLDER, Style::default().fg(theme.muted)));
            return vec![Line::from(spans)];
        }

        let (cursor_line, cursor_col) = self.cursor_position();
        let skip = cursor_line.saturating_sub(height.saturating_sub(1));

        self.inputs
            .text
            .split('\n')
            .enumerate()
            .skip(skip)
            .take(height.max(1))
            .map(|(i, line)| {
                if !(focused && i == cursor_line) {
                    return Line::styled(line.to_string(), Style::default().fg(theme.fg));
                }
                let split = line
                    .char_indices()
                    .nth(cursor_col)
                    .map(|(b, _)| b)
                    .unwrap_or(line.len());
                let (head, tail) = line.split_at(split);
                let mut tail_chars = tail.chars();
                let under = tail_chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
                let cursor_style = if ctx.cursor_visible() {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(head.to_string(), Style::default().fg(theme.fg)),
                    Span::styled(under, cursor_style.fg(theme.fg)),
                    Span::styled(tail_chars.as_str().to_string(), Style::default().fg(theme.fg)),
                ])
            })
            .collect()
    }

    fn attachment_line(&self, ctx: &RenderContext) -> Line<'static> {
        let theme = ctx.theme;

        if let Some(prompt) = &self.prompt {
            let cursor = if ctx.cursor_visible() { "▏" } else { " " };
            return Line::from(vec![
                Span::styled("Attach file: ", Style::default().fg(theme.highlight)),
                Span::styled(format!("{}{}", prompt, cursor), Style::default().fg(theme.fg)),
                Span::styled("  Enter:attach  Esc:cancel", Style::default().fg(theme.muted)),
            ]);
        }

        match &self.inputs.attachment {
            Some(file) => Line::from(vec![
                Span::styled(
                    file.preview(),
                    Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  Ctrl+X:remove", Style::default().fg(theme.muted)),
            ]),
            None => Line::styled(
                "No file attached  Ctrl+O:attach PDF / image",
                Style::default().fg(theme.muted),
            ),
        }
    }
}

impl Component for InputPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Input
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(ctx.is_focused(self.id())))
            .title(Span::styled(" Syllabus ", theme.title_style()));

        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let text = Paragraph::new(self.text_lines(ctx, chunks[0].height as usize));
        f.render_widget(text, chunks[0]);
        f.render_widget(Paragraph::new(self.attachment_line(ctx)), chunks[1]);
    }
}

impl Interactive for InputPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if self.is_prompting() {
            return self.handle_prompt_key(key);
        }

        self.clamp_cursor();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.inputs.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char(_) if ctrl => return Handled::No,
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Enter => self.insert_char('\n'),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.cursor = self.line_start(self.cursor),
            KeyCode::End => self.cursor = self.line_end(self.cursor),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        if self.is_prompting() {
            Some("Enter:attach  Esc:cancel")
        } else {
            Some("type/paste syllabus  Ctrl+U:clear")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Attachment;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(panel: &mut InputPanel, s: &str) {
        for c in s.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            panel.handle_key(key(code));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut panel = InputPanel::new();
        type_str(&mut panel, "Unit 1: Sets\nUnit 2: Café");
        assert_eq!(panel.inputs.text, "Unit 1: Sets\nUnit 2: Café");

        panel.handle_key(key(KeyCode::Backspace));
        assert_eq!(panel.inputs.text, "Unit 1: Sets\nUnit 2: Caf");
    }

    #[test]
    fn test_cursor_movement_across_lines() {
        let mut panel = InputPanel::with_inputs(InputState {
            text: "abcdef\nxy".to_string(),
            attachment: None,
        });

        // End of "xy", up lands at column 2 of the first line
        panel.handle_key(key(KeyCode::Up));
        panel.handle_key(key(KeyCode::Char('_')));
        assert_eq!(panel.inputs.text, "ab_cdef\nxy");

        panel.handle_key(key(KeyCode::End));
        panel.handle_key(key(KeyCode::Down));
        panel.handle_key(key(KeyCode::Char('!')));
        assert_eq!(panel.inputs.text, "ab_cdef\nxy!");

        panel.handle_key(key(KeyCode::Home));
        panel.handle_key(key(KeyCode::Delete));
        assert_eq!(panel.inputs.text, "ab_cdef\ny!");
    }

    #[test]
    fn test_external_clear_resets_cursor() {
        let mut panel = InputPanel::new();
        type_str(&mut panel, "Thermodynamics");
        panel.inputs.clear();

        type_str(&mut panel, "Optics");
        assert_eq!(panel.inputs.text, "Optics");
    }

    #[test]
    fn test_paste_normalizes_newlines() {
        let mut panel = InputPanel::new();
        panel.insert_str("Unit 1\r\nUnit 2");
        assert_eq!(panel.inputs.text, "Unit 1\nUnit 2");
        assert_eq!(panel.cursor_position(), (1, 6));
    }

    #[test]
    fn test_prompt_flow() {
        let mut panel = InputPanel::new();
        panel.open_prompt();
        type_str(&mut panel, " ~/syllabus.pdf ");
        assert!(panel.inputs.text.is_empty());

        // Enter is left to the App
        assert_eq!(panel.handle_key(key(KeyCode::Enter)), Handled::No);
        assert_eq!(panel.finish_prompt().as_deref(), Some("~/syllabus.pdf"));
        assert!(!panel.is_prompting());
    }

    #[test]
    fn test_prompt_escape_and_blank() {
        let mut panel = InputPanel::new();
        panel.open_prompt();
        panel.handle_key(key(KeyCode::Esc));
        assert!(!panel.is_prompting());

        panel.open_prompt();
        type_str(&mut panel, "   ");
        assert_eq!(panel.finish_prompt(), None);
    }

    #[test]
    fn test_control_keys_bubble_up() {
        let mut panel = InputPanel::new();
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(panel.handle_key(ctrl_s), Handled::No);

        panel.inputs.attachment = Some(Attachment::new(PathBuf::from("scan.png")));
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        type_str(&mut panel, "text");
        assert_eq!(panel.handle_key(ctrl_u), Handled::Yes);
        assert!(panel.inputs.text.is_empty());
        assert!(panel.inputs.attachment.is_some());
    }
}
