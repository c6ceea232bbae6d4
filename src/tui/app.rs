// TUI application state
//
// App owns the panels, the request orchestrator and the HTTP client. Key
// handling lives in `tui::mod`; this module holds the state transitions those
// keys trigger.

use super::clipboard;
use super::components::{toast, InputPanel, ResultsPanel, Toast};
use super::theme::Theme;
use super::traits::{ComponentId, Copyable, Handled, Interactive};
use crate::client::{Attachment, HttpAnalysisClient};
use crate::config::Config;
use crate::error::AnalyzeError;
use crate::export;
use crate::logging::LogBuffer;
use crate::orchestrator::{InputState, RequestOrchestrator, SubmitMode};
use crate::prefs::PreferenceStore;
use crossterm::event::KeyEvent;
use serde_json::Value;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// What a finished request sends back to the event loop
pub type Outcome = Result<Value, AnalyzeError>;

/// Main application state for the TUI
pub struct App {
    pub config: Config,
    pub theme: Theme,
    prefs: PreferenceStore,

    /// Whether rendered topics show playlist links
    pub include_enrichment: bool,

    pub input_panel: InputPanel,
    pub results_panel: ResultsPanel,
    pub orchestrator: RequestOrchestrator,

    /// Which panel receives keys
    pub focus: ComponentId,

    pub toast: Option<Toast>,
    pub log_buffer: LogBuffer,

    /// Animation frame counter for spinners (advances on each tick)
    pub animation_frame: usize,

    pub should_quit: bool,

    client: HttpAnalysisClient,
    outcome_tx: mpsc::Sender<Outcome>,
}

impl App {
    pub fn new(
        config: Config,
        log_buffer: LogBuffer,
        prefs: PreferenceStore,
        client: HttpAnalysisClient,
        outcome_tx: mpsc::Sender<Outcome>,
    ) -> Self {
        let theme = Theme::for_preference(prefs.load_theme());
        Self {
            include_enrichment: config.include_enrichment,
            config,
            theme,
            prefs,
            input_panel: InputPanel::new(),
            results_panel: ResultsPanel::new(),
            orchestrator: RequestOrchestrator::new(),
            focus: ComponentId::Input,
            toast: None,
            log_buffer,
            animation_frame: 0,
            should_quit: false,
            client,
            outcome_tx,
        }
    }

    /// Start with some inputs already filled in (e.g. `--attach`)
    pub fn with_inputs(mut self, inputs: InputState) -> Self {
        self.input_panel = InputPanel::with_inputs(inputs);
        self
    }

    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    pub fn focus_next(&mut self) {
        let next = self.focus.next_focus();
        if next.is_focusable() {
            self.focus = next;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Analysis
    // ─────────────────────────────────────────────────────────────

    /// Start an analysis in the background
    ///
    /// The outcome comes back through the channel and is applied by
    /// `on_outcome`. Validation and busy errors are reported immediately.
    pub fn submit(&mut self, mode: SubmitMode) {
        let request = match self.orchestrator.begin_with(
            mode,
            &mut self.input_panel.inputs,
            self.include_enrichment,
        ) {
            Ok(request) => request,
            Err(e) => {
                self.show_toast(Toast::error(e.user_message()));
                return;
            }
        };

        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = request.send(&client).await;
            if tx.send(outcome).await.is_err() {
                tracing::debug!("Dropping analysis outcome, UI has exited");
            }
        });
    }

    pub fn on_outcome(&mut self, outcome: Outcome) {
        let settled = self.orchestrator.settle(
            outcome,
            &mut self.input_panel.inputs,
            &mut self.results_panel,
            self.include_enrichment,
        );

        match settled {
            Ok(result) => {
                let units = result.units.len();
                self.focus = ComponentId::Results;
                self.show_toast(Toast::success(format!(
                    "✓ {} unit{} analyzed",
                    units,
                    if units == 1 { "" } else { "s" }
                )));
            }
            Err(e) => self.show_toast(Toast::error(e.user_message())),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Toggles
    // ─────────────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) {
        let preference = self.theme.preference.toggled();
        self.theme = Theme::for_preference(preference);
        if let Err(e) = self.prefs.save_theme(preference) {
            tracing::warn!("Failed to save theme preference: {:#}", e);
        }
    }

    /// Show or hide playlist links without a new request
    pub fn toggle_enrichment(&mut self) {
        self.include_enrichment = !self.include_enrichment;
        self.results_panel.rerender(self.include_enrichment);
        tracing::debug!("Enrichment display: {}", self.include_enrichment);
    }

    // ─────────────────────────────────────────────────────────────
    // Actions on results
    // ─────────────────────────────────────────────────────────────

    /// Write the rendered results to a PDF
    pub fn export(&mut self) {
        let dir = self.config.resolved_export_dir();
        match export::export_to(&dir, self.results_panel.visible_units()) {
            Ok(path) => {
                self.show_toast(
                    Toast::success(format!("✓ Saved {}", path.display())).with_duration(toast::LONG),
                );
            }
            Err(e) => {
                tracing::warn!("PDF export failed: {}", e);
                self.show_toast(Toast::error(e.to_string()));
            }
        }
    }

    /// Copy the selected unit to the clipboard
    pub fn copy_selected(&mut self) {
        let result = clipboard::copy(
            self.results_panel.copy_text(),
            self.results_panel.copy_description(),
        );
        if result.is_success() {
            self.results_panel.mark_copied();
            self.show_toast(Toast::success(result.toast_message()).with_duration(toast::SHORT));
        } else {
            self.show_toast(Toast::error(result.toast_message()));
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Attachments
    // ─────────────────────────────────────────────────────────────

    pub fn attach(&mut self, path: &str) {
        match Attachment::open(expand_home(path)) {
            Ok(file) => {
                tracing::info!("Attached {}", file.file_name());
                self.show_toast(Toast::info(format!("Attached {}", file.file_name())));
                self.input_panel.inputs.attachment = Some(file);
            }
            Err(e) => self.show_toast(Toast::error(e.to_string())),
        }
    }

    pub fn remove_attachment(&mut self) {
        if self.input_panel.inputs.attachment.is_some() {
            self.input_panel.inputs.remove_attachment();
            self.show_toast(Toast::info("Attachment removed").with_duration(toast::SHORT));
        }
    }

    /// Route a key the global handlers did not take to the focused panel
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            ComponentId::Input => self.input_panel.handle_key(key),
            ComponentId::Results => self.results_panel.handle_key(key),
            _ => Handled::No,
        }
    }

    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            ComponentId::Input => self.input_panel.focus_hint(),
            ComponentId::Results if self.results_panel.has_results() => {
                self.results_panel.focus_hint()
            }
            _ => None,
        }
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::orchestrator::EMPTY_INPUT_MESSAGE;
    use crate::prefs::ThemePreference;
    use crate::tui::components::toast::ToastKind;
    use serde_json::json;
    use std::time::Duration;

    fn app_in(dir: &std::path::Path) -> (App, mpsc::Receiver<Outcome>) {
        let (tx, rx) = mpsc::channel(4);
        let config = Config {
            export_dir: Some(dir.to_path_buf()),
            ..Config::default()
        };
        let client =
            HttpAnalysisClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let prefs = PreferenceStore::at(dir.join("state.toml"));
        let app = App::new(config, LogBuffer::new(), prefs, client, tx);
        (app, rx)
    }

    fn sample() -> Value {
        json!({
            "subject": "Physics",
            "units": [{
                "unit_name": "Mechanics",
                "very_important": [{ "topic": "Newton's laws", "playlist": { "url": "https://youtube.com/p1" } }],
                "important": ["Friction"]
            }]
        })
    }

    #[test]
    fn test_empty_submit_shows_validation_toast() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());

        app.submit(SubmitMode::Auto);

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message, EMPTY_INPUT_MESSAGE);
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(!app.orchestrator.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_sends_outcome_through_channel() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, mut rx) = app_in(dir.path());
        app.input_panel.inputs.text = "Unit 1: Kinematics".to_string();

        app.submit(SubmitMode::Auto);
        assert!(app.orchestrator.is_submitting());

        // Nothing listens on the discard port, so this is a transport error
        let outcome = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(outcome, Err(AnalyzeError::Transport(_))));

        app.on_outcome(outcome);
        assert!(!app.orchestrator.is_submitting());
        assert_eq!(app.input_panel.inputs.text, "Unit 1: Kinematics");
        assert!(!app.results_panel.has_results());
    }

    #[test]
    fn test_successful_outcome_renders_and_clears_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());
        app.input_panel.inputs.text = "syllabus".to_string();
        app.orchestrator
            .begin(&app.input_panel.inputs, true)
            .unwrap();

        app.on_outcome(Ok(sample()));

        assert!(app.results_panel.has_results());
        assert!(app.input_panel.inputs.text.is_empty());
        assert_eq!(app.focus, ComponentId::Results);
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_failed_outcome_keeps_previous_results() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());
        app.input_panel.inputs.text = "first".to_string();
        app.orchestrator.begin(&app.input_panel.inputs, true).unwrap();
        app.on_outcome(Ok(sample()));

        app.input_panel.inputs.text = "second".to_string();
        app.orchestrator.begin(&app.input_panel.inputs, true).unwrap();
        app.on_outcome(Err(AnalyzeError::Transport(TransportError::Status(502))));

        assert!(app.results_panel.has_results());
        assert_eq!(app.input_panel.inputs.text, "second");
        assert_eq!(app.toast.as_ref().unwrap().message, "Server error");
    }

    #[test]
    fn test_toggle_enrichment_hides_links() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());
        app.input_panel.inputs.text = "syllabus".to_string();
        app.orchestrator.begin(&app.input_panel.inputs, true).unwrap();
        app.on_outcome(Ok(sample()));

        let has_link = |app: &App| {
            app.results_panel
                .visible_units()
                .iter()
                .any(|u| u.link_count() > 0)
        };
        assert!(has_link(&app));

        app.toggle_enrichment();
        assert!(!app.include_enrichment);
        assert!(!has_link(&app));
    }

    #[test]
    fn test_export_without_results() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());

        app.export();

        assert_eq!(app.toast.as_ref().unwrap().message, "No results to download");
        assert!(!dir.path().join(export::EXPORT_FILE_NAME).exists());
    }

    #[test]
    fn test_export_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());
        app.input_panel.inputs.text = "syllabus".to_string();
        app.orchestrator.begin(&app.input_panel.inputs, true).unwrap();
        app.on_outcome(Ok(sample()));

        app.export();

        assert!(dir.path().join(export::EXPORT_FILE_NAME).exists());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_export_is_logged_once() {
        use crate::logging::TuiLogLayer;
        use tracing_subscriber::layer::SubscriberExt;

        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());
        app.input_panel.inputs.text = "syllabus".to_string();
        app.orchestrator.begin(&app.input_panel.inputs, true).unwrap();
        app.on_outcome(Ok(sample()));

        let logs = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(logs.clone()));
        tracing::subscriber::with_default(subscriber, || app.export());

        let exported: Vec<String> = logs
            .messages()
            .into_iter()
            .filter(|m| m.starts_with("Exported"))
            .collect();
        assert_eq!(
            exported,
            vec![format!(
                "Exported 1 unit(s) on 1 page(s) with 1 link(s) to {}",
                dir.path().join(export::EXPORT_FILE_NAME).display()
            )]
        );
    }

    #[test]
    fn test_toggle_theme_persists() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());
        assert_eq!(app.theme.preference, ThemePreference::Light);

        app.toggle_theme();

        assert_eq!(app.theme.preference, ThemePreference::Dark);
        let reloaded = PreferenceStore::at(dir.path().join("state.toml"));
        assert_eq!(reloaded.load_theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_attach_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());
        let missing = dir.path().join("nope.pdf");

        app.attach(&missing.to_string_lossy());

        assert!(app.input_panel.inputs.attachment.is_none());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Error);
    }

    #[test]
    fn test_attach_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = app_in(dir.path());
        let pdf = dir.path().join("syllabus.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();

        app.attach(&pdf.to_string_lossy());
        assert!(app.input_panel.inputs.attachment.is_some());

        app.remove_attachment();
        assert!(app.input_panel.inputs.attachment.is_none());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/a.pdf"), PathBuf::from("/tmp/a.pdf"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/a.pdf"), home.join("a.pdf"));
        }
    }
}
