//! File attachments
//!
//! The kind decides the endpoint, so it is fixed when the file is attached.

use crate::model::ValidationError;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
}

impl AttachmentKind {
    /// Classify by file extension, anything unrecognised is a document
    pub fn from_path(path: &Path) -> Self {
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

        if is_image {
            Self::Image
        } else {
            Self::Document
        }
    }

    /// Preview icon shown next to the file name
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Image => "🖼️",
            Self::Document => "📄",
        }
    }
}

/// A file selected for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: PathBuf,
    pub kind: AttachmentKind,
}

impl Attachment {
    /// Build without touching the filesystem
    pub fn new(path: PathBuf) -> Self {
        let kind = AttachmentKind::from_path(&path);
        Self { path, kind }
    }

    /// Attach an existing file
    ///
    /// # Errors
    /// `ValidationError` when the path is not a readable regular file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ValidationError::new(format!(
                "Attachment not found: {}",
                path.display()
            )));
        }
        Ok(Self::new(path.to_path_buf()))
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "tif" | "tiff" => "image/tiff",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
    }

    /// `🖼️ scan.png` style preview line
    pub fn preview(&self) -> String {
        format!("{} {}", self.kind.icon(), self.file_name())
    }
}
