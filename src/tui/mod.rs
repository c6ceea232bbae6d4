// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, paste, timer ticks)
// - Receiving analysis outcomes from background requests

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod ui;

use crate::client::HttpAnalysisClient;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::orchestrator::{InputState, SubmitMode};
use crate::prefs::PreferenceStore;
use anyhow::{Context, Result};
use app::{App, Outcome};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::ComponentId;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: Config, log_buffer: LogBuffer, inputs: InputState) -> Result<()> {
    let client = HttpAnalysisClient::new(config.api_url.clone(), config.request_timeout())?;
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(8);
    let mut app = App::new(
        config,
        log_buffer,
        PreferenceStore::default_location(),
        client,
        outcome_tx,
    )
    .with_inputs(inputs);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut outcome_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on terminal input, the redraw tick and finished requests with
/// tokio::select!, handling whichever arrives first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcome_rx: &mut mpsc::Receiver<Outcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => handle_key_event(app, key),
                        Ok(Event::Paste(text)) => handle_paste(app, &text),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(outcome) = outcome_rx.recv() => {
                app.on_outcome(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Layered dispatch: attachment prompt → global keys → focused component
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.input_panel.is_prompting() {
        handle_prompt_key(app, key);
        return;
    }

    if handle_global_keys(app, key) {
        return;
    }

    if app.dispatch_to_focused(key).was_handled() {
        return;
    }

    // Keys the focused panel left alone
    if app.focus == ComponentId::Results && key.code == KeyCode::Char('y') {
        app.copy_selected();
    }
}

/// While the attachment path prompt is open it takes every key except Ctrl+C
fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if key.code == KeyCode::Enter {
        if let Some(path) = app.input_panel.finish_prompt() {
            app.attach(&path);
        }
        return;
    }

    app.focus = ComponentId::Input;
    app.dispatch_to_focused(key);
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') if ctrl => app.submit(SubmitMode::Auto),
        KeyCode::Char('t') if ctrl => app.submit(SubmitMode::TextOnly),
        KeyCode::Char('f') if ctrl => app.submit(SubmitMode::FileOnly),
        KeyCode::Char('o') if ctrl => {
            app.focus = ComponentId::Input;
            app.input_panel.open_prompt();
        }
        KeyCode::Char('x') if ctrl => app.remove_attachment(),
        KeyCode::Tab | KeyCode::BackTab => app.focus_next(),
        KeyCode::F(2) => app.toggle_theme(),
        KeyCode::F(3) => app.toggle_enrichment(),
        KeyCode::F(4) => app.export(),
        _ => return false,
    }
    true
}

/// Bracketed paste goes to the input panel regardless of focus
fn handle_paste(app: &mut App, text: &str) {
    app.focus = ComponentId::Input;
    app.input_panel.insert_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_app(dir: &Path) -> App {
        let (tx, _rx) = mpsc::channel(1);
        let client =
            HttpAnalysisClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        App::new(
            Config::default(),
            LogBuffer::new(),
            PreferenceStore::at(dir.join("state.toml")),
            client,
            tx,
        )
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_key_event(app, KeyEvent::new(code, modifiers));
    }

    #[test]
    fn test_typing_goes_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        for c in "Unit 1".chars() {
            press(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert_eq!(app.input_panel.inputs.text, "Unit 1");
    }

    #[test]
    fn test_tab_switches_focus() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, ComponentId::Results);

        // 'y' with nothing selected copies nothing
        press(&mut app, KeyCode::Char('y'), KeyModifiers::NONE);
        assert_eq!(app.toast.as_ref().unwrap().message, "Nothing to copy");
    }

    #[test]
    fn test_attach_prompt_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        let pdf = dir.path().join("course.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();

        press(&mut app, KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert!(app.input_panel.is_prompting());

        handle_paste(&mut app, &pdf.to_string_lossy());
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(!app.input_panel.is_prompting());
        assert_eq!(
            app.input_panel.inputs.attachment.as_ref().map(|a| a.path.clone()),
            Some(pdf)
        );
        assert!(app.input_panel.inputs.text.is_empty());
    }

    #[test]
    fn test_esc_cancels_prompt_before_quitting() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        press(&mut app, KeyCode::Char('o'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.input_panel.is_prompting());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn test_f3_toggles_enrichment() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        let before = app.include_enrichment;

        press(&mut app, KeyCode::F(3), KeyModifiers::NONE);
        assert_eq!(app.include_enrichment, !before);
    }
}
