//! Copyable trait for components that provide clipboard content

use super::Component;

/// Trait for components that can provide content for the clipboard
///
/// When the user presses `y`, the focused component's implementation
/// determines what gets copied.
pub trait Copyable: Component {
    /// Human-readable text for the clipboard, `None` when there is nothing
    fn copy_text(&self) -> Option<String>;

    /// What will be copied, for the toast message
    fn copy_description(&self) -> String {
        format!("{:?}", self.id())
    }
}

/// Result of a copy operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyResult {
    Success {
        /// What was copied
        description: String,
        /// Number of bytes copied
        length: usize,
    },
    /// Nothing to copy (empty selection, no content)
    Empty,
    /// Clipboard access failed
    Error(String),
}

impl CopyResult {
    pub fn success(description: impl Into<String>, length: usize) -> Self {
        Self::Success {
            description: description.into(),
            length,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    /// Get a toast message for this result
    pub fn toast_message(&self) -> String {
        match self {
            Self::Success { description, .. } if description.is_empty() => "✓ Copied".to_string(),
            Self::Success { description, .. } => format!("✓ Copied {}", description),
            Self::Empty => "Nothing to copy".to_string(),
            Self::Error(msg) => format!("✗ {}", msg),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_messages() {
        assert_eq!(CopyResult::success("", 10).toast_message(), "✓ Copied");
        assert_eq!(
            CopyResult::success("Algebra", 10).toast_message(),
            "✓ Copied Algebra"
        );
        assert_eq!(CopyResult::Empty.toast_message(), "Nothing to copy");
        assert_eq!(
            CopyResult::error("Failed to copy").toast_message(),
            "✗ Failed to copy"
        );
        assert!(!CopyResult::Empty.is_success());
    }
}
