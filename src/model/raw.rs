//! Wire shapes for topics
//!
//! A topic arrives either as a bare label or as a record carrying an
//! optional playlist. Both shapes collapse into [`Topic`] here and nowhere
//! else.

use super::{Enrichment, Topic};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Topic as sent by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTopic {
    Label(String),
    Record {
        topic: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        playlist: Option<RawPlaylist>,
    },
}

/// Playlist enrichment as sent by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlaylist {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RawPlaylist {
    /// A playlist needs a string `url`; a `title` of any other type is dropped
    fn parse(raw: &Value) -> Option<Self> {
        let url = raw.get("url")?.as_str()?.to_string();
        let title = raw.get("title").and_then(Value::as_str).map(str::to_string);
        Some(Self { url, title })
    }
}

impl RawTopic {
    /// Parse one topic value, `None` when neither shape matches
    ///
    /// A playlist that is not a `{ url }` record is discarded rather than
    /// failing the topic.
    pub fn parse(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(label) => Some(Self::Label(label.clone())),
            Value::Object(obj) => {
                let topic = obj.get("topic")?.as_str()?.to_string();
                let playlist = obj.get("playlist").and_then(RawPlaylist::parse);
                Some(Self::Record { topic, playlist })
            }
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<RawTopic> for Topic {
    fn from(raw: RawTopic) -> Self {
        match raw {
            RawTopic::Label(label) => Topic::plain(label),
            RawTopic::Record { topic, playlist } => Topic {
                label: topic,
                enrichment: playlist.map(|p| Enrichment {
                    url: p.url,
                    title: p.title,
                }),
            },
        }
    }
}

impl From<&Topic> for RawTopic {
    fn from(topic: &Topic) -> Self {
        match &topic.enrichment {
            None => RawTopic::Label(topic.label.clone()),
            Some(enrichment) => RawTopic::Record {
                topic: topic.label.clone(),
                playlist: Some(RawPlaylist {
                    url: enrichment.url.clone(),
                    title: enrichment.title.clone(),
                }),
            },
        }
    }
}
