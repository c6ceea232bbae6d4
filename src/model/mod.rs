//! Analysis result model
//!
//! The analysis service returns a loosely-shaped JSON payload. This module
//! normalizes it at the boundary into an immutable [`AnalysisResult`] so the
//! renderer and exporter never have to inspect wire shapes.
//!
//! # Wire format
//!
//! ```text
//! {
//!   "subject": "Linear Algebra",
//!   "units": [
//!     {
//!       "unit_name": "Matrices",
//!       "very_important": ["Rank", { "topic": "Eigenvalues", "playlist": { "url": "…" } }],
//!       "important": [ … ]
//!     }
//!   ]
//! }
//! ```
//!
//! # Degrade policy
//!
//! Only a missing `units` array fails the whole payload. A malformed unit
//! degrades to an empty-tier unit, and a malformed topic is dropped.

mod raw;

use serde_json::Value;
use std::fmt;

pub use raw::RawTopic;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Bad or missing local input: an unusable payload or an empty submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

// ─────────────────────────────────────────────────────────────────────────────
// Model Types
// ─────────────────────────────────────────────────────────────────────────────

/// Importance bucket for topics within a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    VeryImportant,
    Important,
}

impl Tier {
    /// Fixed presentation order: very important first
    pub const ORDER: [Tier; 2] = [Tier::VeryImportant, Tier::Important];

    /// Key used by the analysis service
    pub fn wire_key(&self) -> &'static str {
        match self {
            Tier::VeryImportant => "very_important",
            Tier::Important => "important",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::VeryImportant => "Very important",
            Tier::Important => "Important",
        }
    }
}

/// Supplementary resource attached to a topic (a curated playlist)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub url: String,
    pub title: Option<String>,
}

/// A single topic, normalized from either wire shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub label: String,
    pub enrichment: Option<Enrichment>,
}

impl Topic {
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enrichment: None,
        }
    }

    #[cfg(test)]
    pub fn enriched(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enrichment: Some(Enrichment {
                url: url.into(),
                title: None,
            }),
        }
    }
}

/// One syllabus subdivision with its tiered topics
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unit {
    pub name: String,
    pub very_important: Vec<Topic>,
    pub important: Vec<Topic>,
}

impl Unit {
    pub fn topics(&self, tier: Tier) -> &[Topic] {
        match tier {
            Tier::VeryImportant => &self.very_important,
            Tier::Important => &self.important,
        }
    }

    /// All topics in presentation order, tagged with their tier
    pub fn tiered_topics(&self) -> impl Iterator<Item = (Tier, &Topic)> + '_ {
        Tier::ORDER
            .into_iter()
            .flat_map(move |tier| self.topics(tier).iter().map(move |t| (tier, t)))
    }

    pub fn topic_count(&self) -> usize {
        self.very_important.len() + self.important.len()
    }
}

/// Normalized analysis response. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResult {
    pub subject: Option<String>,
    pub units: Vec<Unit>,
}

impl AnalysisResult {
    /// Emit the canonical wire shape for this result
    ///
    /// Unenriched topics become bare strings, enriched ones become records,
    /// so normalizing the output yields an equal result.
    pub fn to_raw(&self) -> Value {
        let units: Vec<Value> = self
            .units
            .iter()
            .map(|unit| {
                let mut obj = serde_json::Map::new();
                obj.insert("unit_name".to_string(), Value::String(unit.name.clone()));
                for tier in Tier::ORDER {
                    let topics = unit
                        .topics(tier)
                        .iter()
                        .map(|topic| RawTopic::from(topic).to_value())
                        .collect();
                    obj.insert(tier.wire_key().to_string(), Value::Array(topics));
                }
                Value::Object(obj)
            })
            .collect();

        let mut root = serde_json::Map::new();
        if let Some(subject) = &self.subject {
            root.insert("subject".to_string(), Value::String(subject.clone()));
        }
        root.insert("units".to_string(), Value::Array(units));
        Value::Object(root)
    }

    pub fn topic_count(&self) -> usize {
        self.units.iter().map(Unit::topic_count).sum()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalization
// ─────────────────────────────────────────────────────────────────────────────

/// Normalize a raw service payload
///
/// # Errors
/// Returns `ValidationError("missing units")` when `units` is absent or not
/// an array. Nothing below the top level can fail the payload.
pub fn normalize(raw: &Value) -> Result<AnalysisResult, ValidationError> {
    let units = raw
        .get("units")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::new("missing units"))?;

    let subject = raw
        .get("subject")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(AnalysisResult {
        subject,
        units: units.iter().map(normalize_unit).collect(),
    })
}

fn normalize_unit(raw: &Value) -> Unit {
    let Some(obj) = raw.as_object() else {
        tracing::debug!("Unit is not an object, rendering as empty unit");
        return Unit::default();
    };

    let name = obj.get("unit_name").and_then(Value::as_str);

    // A tier that is present but not a list poisons the whole unit
    let tiers_ok = Tier::ORDER.iter().all(|tier| {
        matches!(
            obj.get(tier.wire_key()),
            None | Some(Value::Null) | Some(Value::Array(_))
        )
    });

    let Some(name) = name.filter(|_| tiers_ok) else {
        tracing::debug!(
            unit_name = name.unwrap_or(""),
            "Malformed unit, keeping name with empty tiers"
        );
        return Unit {
            name: name.unwrap_or_default().to_string(),
            ..Unit::default()
        };
    };

    let tier = |tier: Tier| -> Vec<Topic> {
        obj.get(tier.wire_key())
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(normalize_topic).collect())
            .unwrap_or_default()
    };

    Unit {
        name: name.to_string(),
        very_important: tier(Tier::VeryImportant),
        important: tier(Tier::Important),
    }
}

fn normalize_topic(raw: &Value) -> Option<Topic> {
    match RawTopic::parse(raw) {
        Some(topic) => Some(topic.into()),
        None => {
            tracing::debug!("Dropping malformed topic: {}", raw);
            None
        }
    }
}
