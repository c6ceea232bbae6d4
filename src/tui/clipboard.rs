//! Clipboard helper for copying text to the system clipboard
//!
//! Uses `arboard` for cross-platform support. The clipboard is created fresh
//! each time to avoid holding resources.

use crate::tui::traits::CopyResult;
use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Copy `text` if there is any, reporting the outcome for a toast
pub fn copy(text: Option<String>, description: impl Into<String>) -> CopyResult {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return CopyResult::Empty;
    };

    match copy_to_clipboard(&text) {
        Ok(()) => {
            tracing::debug!("Copied {} chars to clipboard", text.chars().count());
            CopyResult::success(description, text.len())
        }
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            CopyResult::error("Failed to copy")
        }
    }
}
