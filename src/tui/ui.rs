// Frame rendering
//
// Builds the RenderContext once per frame and hands each component its area.
// Overlays (loading, toast) are drawn last so they sit on top.

use super::app::App;
use super::components::{LoadingOverlay, StatusBar, TitleBar};
use super::layout::ScreenLayout;
use super::traits::{Component, RenderContext};
use ratatui::{widgets::Block, Frame};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let latest = app.log_buffer.latest_notable();
    let layout = ScreenLayout::split(area, latest.is_some());

    // Scroll math needs the real viewport before the panel renders
    app.results_panel
        .sync_dimensions(layout.results.height.saturating_sub(2) as usize);

    let app = &*app;
    let ctx = RenderContext::new(&app.theme, app.focus, app.animation_frame);

    f.render_widget(Block::default().style(app.theme.base_style()), area);

    let title = TitleBar {
        subject: app
            .results_panel
            .result()
            .and_then(|r| r.subject.as_deref()),
        include_enrichment: app.include_enrichment,
        busy: app.orchestrator.loading().is_visible(),
    };
    title.render(f, layout.title, &ctx);

    app.input_panel.render(f, layout.input, &ctx);
    Component::render(&app.results_panel, f, layout.results, &ctx);

    let status = StatusBar {
        focus_hint: app.focus_hint(),
        latest,
    };
    status.render(f, layout.status, &ctx);

    if let Some(elapsed) = app.orchestrator.loading().elapsed() {
        LoadingOverlay::new(elapsed).render(f, layout.results, &ctx);
    }

    if let Some(toast) = &app.toast {
        toast.render(f, area, &ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpAnalysisClient;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::prefs::PreferenceStore;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_results_and_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::channel(1);
        let client =
            HttpAnalysisClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut app = App::new(
            Config::default(),
            LogBuffer::new(),
            PreferenceStore::at(dir.path().join("state.toml")),
            client,
            tx,
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let before = screen_text(&terminal);
        assert!(before.contains("Study Buddy"));
        assert!(before.contains("Paste your syllabus here"));

        app.input_panel.inputs.text = "syllabus".to_string();
        app.orchestrator.begin(&app.input_panel.inputs, true).unwrap();
        app.on_outcome(Ok(json!({
            "subject": "Chemistry",
            "units": [{ "unit_name": "Atoms", "very_important": ["Bohr model"], "important": [] }]
        })));

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let after = screen_text(&terminal);
        assert!(after.contains("Chemistry"));
        assert!(after.contains("Atoms"));
        assert!(after.contains("Bohr model"));
    }
}
