//! Analysis service transport
//!
//! Three logical operations (text, document, image) behind the
//! [`AnalysisClient`] trait. The HTTP implementation lives in [`http`];
//! tests and headless runs can substitute their own.
//!
//! ```text
//! InputState ──▶ Endpoint::select ──▶ AnalysisRequest ──▶ AnalysisClient
//!                 (pure)                                   ├─ analyze_text
//!                                                          ├─ analyze_document
//!                                                          └─ analyze_image
//! ```

mod attachment;
mod http;

pub use attachment::{Attachment, AttachmentKind};
pub use http::HttpAnalysisClient;

use crate::error::AnalyzeError;
use serde_json::Value;
use std::future::Future;

/// Service route chosen for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Text,
    Document,
    Image,
}

impl Endpoint {
    /// Pick the route from the attachment alone
    ///
    /// An attachment always wins over typed text.
    pub fn select(attachment: Option<&Attachment>) -> Self {
        match attachment.map(|a| a.kind) {
            Some(AttachmentKind::Image) => Self::Image,
            Some(AttachmentKind::Document) => Self::Document,
            None => Self::Text,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Text => "/analyze-text",
            Self::Document => "/analyze-pdf",
            Self::Image => "/analyze-image",
        }
    }

    /// Multipart field carrying the content
    pub fn field(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Document => "pdf",
            Self::Image => "image",
        }
    }
}

/// Content of one request: exactly one of text or file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    File(Attachment),
}

/// A fully decided request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub endpoint: Endpoint,
    pub payload: Payload,
    pub include_enrichment: bool,
}

impl AnalysisRequest {
    /// Dispatch to the matching client operation
    pub async fn send<C: AnalysisClient>(&self, client: &C) -> Result<Value, AnalyzeError> {
        match (&self.payload, self.endpoint) {
            (Payload::Text(text), _) => client.analyze_text(text, self.include_enrichment).await,
            (Payload::File(file), Endpoint::Image) => {
                client.analyze_image(file, self.include_enrichment).await
            }
            (Payload::File(file), _) => {
                client.analyze_document(file, self.include_enrichment).await
            }
        }
    }
}

/// Remote analysis operations
///
/// Each returns the raw JSON payload on success. Classifying failures into
/// transport and application errors is the implementation's job.
pub trait AnalysisClient {
    fn analyze_text(
        &self,
        text: &str,
        include_enrichment: bool,
    ) -> impl Future<Output = Result<Value, AnalyzeError>> + Send;

    fn analyze_document(
        &self,
        file: &Attachment,
        include_enrichment: bool,
    ) -> impl Future<Output = Result<Value, AnalyzeError>> + Send;

    fn analyze_image(
        &self,
        file: &Attachment,
        include_enrichment: bool,
    ) -> impl Future<Output = Result<Value, AnalyzeError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn attachment(name: &str) -> Attachment {
        Attachment::new(PathBuf::from(name))
    }

    #[test]
    fn test_endpoint_selection() {
        assert_eq!(Endpoint::select(None), Endpoint::Text);
        assert_eq!(
            Endpoint::select(Some(&attachment("scan.JPG"))),
            Endpoint::Image
        );
        assert_eq!(
            Endpoint::select(Some(&attachment("syllabus.pdf"))),
            Endpoint::Document
        );
        assert_eq!(
            Endpoint::select(Some(&attachment("notes"))),
            Endpoint::Document
        );
    }

    #[test]
    fn test_endpoint_follows_attachment_kind() {
        let mislabelled = Attachment {
            path: PathBuf::from("photo.pdf"),
            kind: AttachmentKind::Image,
        };
        assert_eq!(Endpoint::select(Some(&mislabelled)), Endpoint::Image);
        assert_eq!(Endpoint::Image.field(), "image");
    }

    #[test]
    fn test_endpoint_routes() {
        assert_eq!(Endpoint::Text.path(), "/analyze-text");
        assert_eq!(Endpoint::Document.path(), "/analyze-pdf");
        assert_eq!(Endpoint::Image.path(), "/analyze-image");
        assert_eq!(Endpoint::Document.field(), "pdf");
    }
}
