//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use std::path::Path;

/// Quote and escape a string as a TOML basic string
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

fn quoted_path(path: &Path) -> String {
    quoted(&path.display().to_string())
}

impl Config {
    /// Render the full config as a commented TOML document
    pub fn to_toml(&self) -> String {
        let export_dir = match &self.export_dir {
            Some(dir) => format!("export_dir = {}", quoted_path(dir)),
            None => "# export_dir = \"~/Documents/syllabi\"  # default: Downloads".to_string(),
        };

        format!(
            r#"# study-buddy configuration

# Analysis service base URL (STUDY_BUDDY_API_URL overrides)
api_url = {api_url}

# Seconds to wait for an analysis before giving up
request_timeout_secs = {timeout}

# Ask the service for playlist links (F3 toggles at runtime)
include_enrichment = {enrichment}

# Directory for exported PDFs (STUDY_BUDDY_EXPORT_DIR overrides)
{export_dir}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON file logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            api_url = quoted(&self.api_url),
            timeout = self.request_timeout_secs,
            enrichment = self.include_enrichment,
            export_dir = export_dir,
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted_path(&self.logging.file_dir),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
