//! HTTP multipart client for the analysis service

use super::{AnalysisClient, Attachment, Endpoint};
use crate::error::{AnalyzeError, TransportError};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

/// Analysis client speaking the service's multipart form API
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }

    async fn post(&self, endpoint: Endpoint, form: Form) -> Result<Value, AnalyzeError> {
        let url = self.url(endpoint);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        tracing::debug!("{} responded {} ({} bytes)", url, status, body.len());
        interpret_response(status.as_u16(), &body)
    }

    async fn post_file(
        &self,
        endpoint: Endpoint,
        file: &Attachment,
        include_enrichment: bool,
    ) -> Result<Value, AnalyzeError> {
        let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
            AnalyzeError::validation(format!("Cannot read {}: {}", file.file_name(), e))
        })?;

        let part = Part::bytes(bytes)
            .file_name(file.file_name())
            .mime_str(file.mime_type())
            .map_err(|e| AnalyzeError::validation(format!("Invalid attachment type: {}", e)))?;

        let form = base_form(include_enrichment).part(endpoint.field(), part);
        self.post(endpoint, form).await
    }
}

fn base_form(include_enrichment: bool) -> Form {
    Form::new().text("include_playlists", include_enrichment.to_string())
}

impl AnalysisClient for HttpAnalysisClient {
    async fn analyze_text(&self, text: &str, include_enrichment: bool) -> Result<Value, AnalyzeError> {
        let form = base_form(include_enrichment).text(Endpoint::Text.field(), text.to_string());
        self.post(Endpoint::Text, form).await
    }

    async fn analyze_document(
        &self,
        file: &Attachment,
        include_enrichment: bool,
    ) -> Result<Value, AnalyzeError> {
        self.post_file(Endpoint::Document, file, include_enrichment)
            .await
    }

    async fn analyze_image(
        &self,
        file: &Attachment,
        include_enrichment: bool,
    ) -> Result<Value, AnalyzeError> {
        self.post_file(Endpoint::Image, file, include_enrichment).await
    }
}

/// Classify a response body
///
/// An `error` field wins over the status code, so the service's own message
/// reaches the user. A non-success status without one is a transport
/// failure.
pub fn interpret_response(status: u16, body: &str) -> Result<Value, AnalyzeError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if let Some(message) = parsed.as_ref().and_then(error_field) {
        return Err(AnalyzeError::Application(message));
    }

    if !(200..300).contains(&status) {
        tracing::debug!("Analysis service answered HTTP {} without an error message", status);
        return Err(TransportError::Status(status).into());
    }

    parsed.ok_or_else(|| {
        let preview: String = body.chars().take(80).collect();
        TransportError::InvalidBody(preview).into()
    })
}

fn error_field(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
