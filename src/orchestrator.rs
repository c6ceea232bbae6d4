//! Request lifecycle: one analysis in flight at a time
//!
//! ```text
//!            begin()                     settle()
//!   Idle ─────────────▶ Submitting ─────────────────▶ Idle
//!    │                      │            ├─ Success: normalize, render, clear inputs
//!    │ empty input          │ begin()    └─ Failed: report, keep inputs and results
//!    ▼                      ▼
//!  Validation             Busy
//! ```
//!
//! The orchestrator owns the loading indicator. It is raised before the
//! request leaves and lowered on settlement before anything is rendered or
//! reported.

use crate::client::{AnalysisClient, AnalysisRequest, Attachment, Endpoint, Payload};
use crate::error::AnalyzeError;
use crate::model::{self, AnalysisResult};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shown when a submission has neither text nor a file
pub const EMPTY_INPUT_MESSAGE: &str = "Enter syllabus text or attach a PDF / image";

/// Anything that can display a freshly normalized result
pub trait ResultRenderer {
    /// Replace whatever is shown with `result`
    fn render(&mut self, result: Arc<AnalysisResult>, enrichment_enabled: bool);
}

// ─────────────────────────────────────────────────────────────────────────────
// Inputs
// ─────────────────────────────────────────────────────────────────────────────

/// User input awaiting submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl InputState {
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty() || self.attachment.is_some()
    }

    pub fn remove_attachment(&mut self) {
        self.attachment = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.attachment = None;
    }
}

/// How a submission treats the two inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    /// Send the attachment if there is one, otherwise the text
    #[default]
    Auto,
    /// Drop the attachment first
    TextOnly,
    /// Drop the typed text first
    FileOnly,
}

impl SubmitMode {
    fn prepare(self, inputs: &mut InputState) {
        match self {
            Self::Auto => {}
            Self::TextOnly => inputs.remove_attachment(),
            Self::FileOnly => inputs.text.clear(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading Indicator
// ─────────────────────────────────────────────────────────────────────────────

/// Single loading slot
#[derive(Debug, Default)]
pub struct LoadingIndicator {
    since: Option<Instant>,
}

impl LoadingIndicator {
    fn show(&mut self) {
        self.since = Some(Instant::now());
    }

    /// Safe to call when already hidden
    fn hide(&mut self) {
        self.since = None;
    }

    pub fn is_visible(&self) -> bool {
        self.since.is_some()
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.since.map(|t| t.elapsed())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting(Endpoint),
}

/// Owns the lifecycle of the single analysis request
#[derive(Debug, Default)]
pub struct RequestOrchestrator {
    state: RequestState,
    loading: LoadingIndicator,
}

impl RequestOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, RequestState::Submitting(_))
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// Apply `mode` to the inputs and start a request
    ///
    /// Checks for an in-flight request before touching the inputs, so a
    /// rejected submission never clears anything.
    pub fn begin_with(
        &mut self,
        mode: SubmitMode,
        inputs: &mut InputState,
        include_enrichment: bool,
    ) -> Result<AnalysisRequest, AnalyzeError> {
        if self.is_submitting() {
            return Err(AnalyzeError::Busy);
        }
        mode.prepare(inputs);
        self.begin(inputs, include_enrichment)
    }

    /// Move `Idle → Submitting` and build the request to send
    ///
    /// # Errors
    /// `Busy` while another request is in flight, `Validation` when there is
    /// nothing to send. Neither changes any state.
    pub fn begin(
        &mut self,
        inputs: &InputState,
        include_enrichment: bool,
    ) -> Result<AnalysisRequest, AnalyzeError> {
        if self.is_submitting() {
            tracing::debug!("Rejecting submission while a request is in flight");
            return Err(AnalyzeError::Busy);
        }
        if !inputs.has_content() {
            return Err(AnalyzeError::validation(EMPTY_INPUT_MESSAGE));
        }

        let endpoint = Endpoint::select(inputs.attachment.as_ref());
        let payload = match &inputs.attachment {
            Some(file) => Payload::File(file.clone()),
            None => Payload::Text(inputs.text.trim().to_string()),
        };

        self.loading.show();
        self.state = RequestState::Submitting(endpoint);
        tracing::info!(
            "Submitting analysis to {} (enrichment: {})",
            endpoint.path(),
            include_enrichment
        );

        Ok(AnalysisRequest {
            endpoint,
            payload,
            include_enrichment,
        })
    }

    /// Apply a request's outcome and return to `Idle`
    ///
    /// On success the result is rendered and the inputs are cleared. On
    /// failure neither the inputs nor the renderer are touched.
    pub fn settle<R: ResultRenderer>(
        &mut self,
        outcome: Result<Value, AnalyzeError>,
        inputs: &mut InputState,
        renderer: &mut R,
        include_enrichment: bool,
    ) -> Result<Arc<AnalysisResult>, AnalyzeError> {
        let elapsed = self.loading.elapsed();
        self.loading.hide();
        let finished = std::mem::take(&mut self.state);

        let result = outcome.and_then(|raw| model::normalize(&raw).map_err(AnalyzeError::from));

        match result {
            Ok(result) => {
                let result = Arc::new(result);
                tracing::info!(
                    "Analysis complete: {} unit(s), {} topic(s) in {:?}",
                    result.units.len(),
                    result.topic_count(),
                    elapsed.unwrap_or_default()
                );
                renderer.render(Arc::clone(&result), include_enrichment);
                inputs.clear();
                Ok(result)
            }
            Err(e) => {
                match finished {
                    RequestState::Submitting(endpoint) => {
                        tracing::warn!("Analysis failed ({}): {}", endpoint.path(), e)
                    }
                    RequestState::Idle => tracing::warn!("Analysis failed: {}", e),
                }
                Err(e)
            }
        }
    }

    /// begin, send, settle in one call
    pub async fn run<C, R>(
        &mut self,
        client: &C,
        mode: SubmitMode,
        inputs: &mut InputState,
        renderer: &mut R,
        include_enrichment: bool,
    ) -> Result<Arc<AnalysisResult>, AnalyzeError>
    where
        C: AnalysisClient,
        R: ResultRenderer,
    {
        let request = self.begin_with(mode, inputs, include_enrichment)?;
        let outcome = request.send(client).await;
        self.settle(outcome, inputs, renderer, include_enrichment)
    }
}
