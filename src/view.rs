//! Visible projection of an analysis result
//!
//! Both the results panel and the PDF exporter consume [`VisibleUnit`]s
//! instead of the model. Whatever the panel hides (enrichment links when the
//! flag is off) is absent from copies and exports as well.

use crate::model::{AnalysisResult, Tier};

/// A topic line as it currently appears in the results panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleTopic {
    pub label: String,
    pub tier: Tier,
    /// Enrichment URL, present only when enrichment is shown
    pub link: Option<String>,
}

/// A unit block as it currently appears in the results panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleUnit {
    pub name: String,
    pub topics: Vec<VisibleTopic>,
}

impl VisibleUnit {
    pub fn link_count(&self) -> usize {
        self.topics.iter().filter(|t| t.link.is_some()).count()
    }
}

/// Project a result for display
///
/// `enrichment_enabled` is read once for the whole pass.
pub fn project(result: &AnalysisResult, enrichment_enabled: bool) -> Vec<VisibleUnit> {
    result
        .units
        .iter()
        .map(|unit| VisibleUnit {
            name: unit.name.clone(),
            topics: unit
                .tiered_topics()
                .map(|(tier, topic)| VisibleTopic {
                    label: topic.label.clone(),
                    tier,
                    link: topic
                        .enrichment
                        .as_ref()
                        .filter(|_| enrichment_enabled)
                        .map(|e| e.url.clone()),
                })
                .collect(),
        })
        .collect()
}

/// Plain-text form of a unit for the clipboard
///
/// Format: `Unit: <name>` followed by a blank line and one `• <topic>` line
/// per visible topic. Links and UI chrome never appear.
pub fn unit_text(unit: &VisibleUnit) -> String {
    let mut text = format!("Unit: {}\n\n", unit.name);
    for topic in &unit.topics {
        text.push_str("• ");
        text.push_str(&topic.label);
        text.push('\n');
    }
    text.trim_end().to_string()
}

/// Plain-text form of every unit, separated by blank lines
pub fn results_text(units: &[VisibleUnit]) -> String {
    units
        .iter()
        .map(unit_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalize;
    use serde_json::json;

    fn algebra() -> AnalysisResult {
        normalize(&json!({
            "units": [{
                "unit_name": "Algebra",
                "very_important": ["Matrices"],
                "important": [{ "topic": "Sets", "playlist": { "url": "http://x" } }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_algebra_with_enrichment_shows_link() {
        let units = project(&algebra(), true);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].name, "Algebra");
        assert_eq!(units[0].topics.len(), 2);
        assert_eq!(units[0].topics[0].link, None);
        assert_eq!(units[0].topics[1].link.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_algebra_without_enrichment_hides_links() {
        let units = project(&algebra(), false);
        assert_eq!(units[0].topics.len(), 2);
        assert!(units[0].topics.iter().all(|t| t.link.is_none()));
    }

    #[test]
    fn test_toggle_only_changes_links() {
        let result = algebra();
        let on = project(&result, true);
        let off = project(&result, false);

        let strip = |units: &[VisibleUnit]| -> Vec<(String, Vec<(String, Tier)>)> {
            units
                .iter()
                .map(|u| {
                    (
                        u.name.clone(),
                        u.topics.iter().map(|t| (t.label.clone(), t.tier)).collect(),
                    )
                })
                .collect()
        };
        assert_eq!(strip(&on), strip(&off));
        assert_eq!(on[0].link_count(), 1);
        assert_eq!(off[0].link_count(), 0);
    }

    #[test]
    fn test_unit_text_format() {
        let units = project(&algebra(), true);
        assert_eq!(unit_text(&units[0]), "Unit: Algebra\n\n• Matrices\n• Sets");
    }

    #[test]
    fn test_unit_text_never_includes_links() {
        let result = algebra();
        for flag in [true, false] {
            let text = unit_text(&project(&result, flag)[0]);
            assert!(!text.contains("http://x"));
        }
    }

    #[test]
    fn test_unit_text_empty_name_and_no_topics() {
        let unit = VisibleUnit {
            name: String::new(),
            topics: Vec::new(),
        };
        assert_eq!(unit_text(&unit), "Unit:");
    }

    #[test]
    fn test_results_text_joins_units() {
        let unit = |name: &str| VisibleUnit {
            name: name.to_string(),
            topics: vec![VisibleTopic {
                label: "t".to_string(),
                tier: Tier::Important,
                link: None,
            }],
        };
        assert_eq!(
            results_text(&[unit("A"), unit("B")]),
            "Unit: A\n\n• t\n\nUnit: B\n\n• t"
        );
    }
}
