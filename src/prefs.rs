//! Persisted UI preferences
//!
//! Only the theme survives a restart. It lives in its own small TOML file
//! next to the config so that toggling never rewrites the user's config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    #[default]
    Light,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Label for the toggle hint, naming the theme it switches to
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "☀️ Light",
            Self::Light => "🌙 Dark",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    theme: Option<ThemePreference>,
}

/// Reads and writes `state.toml`
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// `~/.config/study-buddy/state.toml`
    pub fn default_location() -> Self {
        Self {
            path: dirs::home_dir().map(|h| h.join(".config").join("study-buddy").join("state.toml")),
        }
    }

    #[cfg(test)]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Where the state file lives, `None` without a home directory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Missing, unreadable or unparseable state all mean light
    pub fn load_theme(&self) -> ThemePreference {
        let Some(path) = &self.path else {
            return ThemePreference::default();
        };

        let Ok(content) = std::fs::read_to_string(path) else {
            return ThemePreference::default();
        };

        match toml::from_str::<StateFile>(&content) {
            Ok(state) => state.theme.unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Ignoring unreadable state file {}: {}", path.display(), e);
                ThemePreference::default()
            }
        }
    }

    pub fn save_theme(&self, theme: ThemePreference) -> anyhow::Result<()> {
        use anyhow::Context;

        let Some(path) = &self.path else {
            anyhow::bail!("Could not determine state file location");
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string(&StateFile { theme: Some(theme) })
            .context("Failed to serialize UI state")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::debug!("Saved theme preference: {:?}", theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_state_is_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::at(dir.path().join("state.toml"));
        assert_eq!(store.load_theme(), ThemePreference::Light);
    }

    #[test]
    fn test_theme_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.toml");
        let store = PreferenceStore::at(&path);

        store.save_theme(ThemePreference::Dark).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap().trim(),
            r#"theme = "dark""#
        );
        assert_eq!(store.load_theme(), ThemePreference::Dark);

        store.save_theme(ThemePreference::Dark.toggled()).unwrap();
        assert_eq!(store.load_theme(), ThemePreference::Light);
    }

    #[test]
    fn test_garbage_state_is_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "theme = \"purple\"").unwrap();
        assert_eq!(PreferenceStore::at(path).load_theme(), ThemePreference::Light);
    }

    #[test]
    fn test_store_reports_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        assert_eq!(PreferenceStore::at(&path).path(), Some(path.as_path()));

        if let Some(path) = PreferenceStore::default_location().path() {
            assert!(path.ends_with(".config/study-buddy/state.toml"));
        }
    }

    #[test]
    fn test_toggle_label_names_target() {
        assert_eq!(ThemePreference::Dark.toggle_label(), "☀️ Light");
        assert_eq!(ThemePreference::Light.toggle_label(), "🌙 Dark");
    }
}
