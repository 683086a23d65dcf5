/**
 * Roadmap Generator
 *
 * This module generates an in-memory research roadmap draft from a topic,
 * an academic field, and a depth level.
 *
 * # Contract
 *
 * `generate` is a pure function: no network call, no persistence, and a
 * deterministic result for identical inputs. The current implementation is
 * a static template parameterized by the inputs; a real implementation
 * would call an external generation service here, and this function is the
 * extension point for that call (including its retry/timeout policy).
 *
 * # Depth
 *
 * `depth` defaults to `"intermediate"` and is otherwise treated as an
 * opaque label: it is embedded in the draft but not validated against a
 * fixed set of levels.
 */

use serde::{Deserialize, Serialize};

use crate::roadmap::{ResourceType, RoadmapError};

/// Default depth label when the caller does not supply one.
pub const DEFAULT_DEPTH: &str = "intermediate";

/// A typed reference attached to a draft step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDraft {
    pub title: String,
    pub url: String,
    /// Maps to `resource_type` when persisted
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

/// One stage of a draft roadmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDraft {
    pub title: String,
    pub description: String,
    /// 1-based, contiguous within the draft
    pub order: i64,
    /// Free-form duration text (e.g. "2 weeks")
    pub estimated_time: String,
    pub resources: Vec<ResourceDraft>,
}

/// An unpersisted roadmap, the generator's output and the persister's input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapDraft {
    pub topic: String,
    pub field: String,
    pub depth: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<StepDraft>,
}

/// Generate a research roadmap draft
///
/// # Arguments
/// * `topic` - The main research topic (required, non-blank)
/// * `field` - The academic field or domain (required, non-blank)
/// * `depth` - The level of depth; defaults to `"intermediate"`
///
/// # Errors
///
/// Returns `RoadmapError::InvalidArgument` when `topic` or `field` is
/// blank.
pub fn generate(
    topic: &str,
    field: &str,
    depth: Option<&str>,
) -> Result<RoadmapDraft, RoadmapError> {
    if topic.trim().is_empty() || field.trim().is_empty() {
        return Err(RoadmapError::InvalidArgument(
            "Both topic and field are required".to_string(),
        ));
    }

    let depth = depth.unwrap_or(DEFAULT_DEPTH);

    let resource = |title: &str, url: &str, resource_type: ResourceType| ResourceDraft {
        title: title.to_string(),
        url: url.to_string(),
        resource_type,
    };

    Ok(RoadmapDraft {
        topic: topic.to_string(),
        field: field.to_string(),
        depth: depth.to_string(),
        title: format!("Research Roadmap for {topic} in {field}"),
        description: format!(
            "A structured learning path for {depth} researchers studying {topic} in the {field} field."
        ),
        steps: vec![
            StepDraft {
                title: "Foundation Knowledge".to_string(),
                description: format!("Understand the basic concepts of {topic} in {field}"),
                order: 1,
                estimated_time: "2 weeks".to_string(),
                resources: vec![
                    resource("Introduction Book", "https://example.com/book", ResourceType::Book),
                    resource("Online Course", "https://example.com/course", ResourceType::Course),
                ],
            },
            StepDraft {
                title: "Current Research Trends".to_string(),
                description: format!("Explore recent developments in {topic}"),
                order: 2,
                estimated_time: "3 weeks".to_string(),
                resources: vec![
                    resource("Research Paper 1", "https://example.com/paper1", ResourceType::Article),
                    resource(
                        "Conference Proceedings",
                        "https://example.com/conf",
                        ResourceType::Website,
                    ),
                ],
            },
            StepDraft {
                title: "Practical Application".to_string(),
                description: format!("Apply {topic} concepts to real-world problems"),
                order: 3,
                estimated_time: "4 weeks".to_string(),
                resources: vec![
                    resource("Project Template", "https://example.com/project", ResourceType::Tool),
                    resource("Case Study", "https://example.com/case", ResourceType::Article),
                ],
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_embeds_inputs() {
        let draft = generate("Quantum Computing", "Physics", Some("beginner")).unwrap();
        assert_eq!(draft.topic, "Quantum Computing");
        assert_eq!(draft.field, "Physics");
        assert_eq!(draft.depth, "beginner");
        assert!(draft.title.contains("Quantum Computing"));
        assert!(draft.description.contains("Quantum Computing"));
        assert!(draft.description.contains("beginner"));
    }

    #[test]
    fn test_steps_contiguously_ordered_from_one() {
        let draft = generate("Topic", "Field", None).unwrap();
        assert!(!draft.steps.is_empty());
        for (i, step) in draft.steps.iter().enumerate() {
            assert_eq!(step.order, i as i64 + 1);
        }
    }

    #[test]
    fn test_every_step_has_resources() {
        let draft = generate("Topic", "Field", None).unwrap();
        for step in &draft.steps {
            assert!(!step.resources.is_empty());
        }
    }

    #[test]
    fn test_depth_defaults_to_intermediate() {
        let draft = generate("Topic", "Field", None).unwrap();
        assert_eq!(draft.depth, "intermediate");
    }

    #[test]
    fn test_depth_is_not_validated() {
        // Free-form depth labels are accepted as-is.
        let draft = generate("Topic", "Field", Some("wizard-level")).unwrap();
        assert_eq!(draft.depth, "wizard-level");
    }

    #[test]
    fn test_blank_inputs_rejected() {
        assert!(matches!(
            generate("", "Field", None),
            Err(RoadmapError::InvalidArgument(_))
        ));
        assert!(matches!(
            generate("Topic", "", None),
            Err(RoadmapError::InvalidArgument(_))
        ));
        assert!(matches!(
            generate("   ", "Field", None),
            Err(RoadmapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate("Topic", "Field", Some("advanced")).unwrap();
        let b = generate("Topic", "Field", Some("advanced")).unwrap();
        assert_eq!(a, b);
    }
}
