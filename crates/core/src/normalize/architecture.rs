//! Architecture payload normalization.
//!
//! The expected shape is `architecture_diagram.{proposal, diagram}`.
//! Either sub-object may be missing; the view degrades to its "no data"
//! state instead of failing.

use rfx_protocol::{ArchitectureProposal, ArchitectureView};
use serde_json::Value;

use crate::normalize::fields::first_str;

/// Normalize an architecture payload.
pub fn normalize_architecture(payload: &Value) -> ArchitectureView {
    let Some(root) = payload.get("architecture_diagram") else {
        return ArchitectureView::default();
    };

    ArchitectureView {
        proposal: root.get("proposal").and_then(proposal_from),
        diagram_source: root.get("diagram").and_then(diagram_source_from),
    }
}

fn proposal_from(value: &Value) -> Option<ArchitectureProposal> {
    if !value.is_object() {
        return None;
    }
    Some(ArchitectureProposal {
        project_name: first_str(value, &["project_name", "name", "title"]).map(str::to_string),
        services: services_from(value),
        explanation: first_str(value, &["explanation", "description", "summary"])
            .map(str::to_string),
        implementation_notes: first_str(value, &["implementation_notes", "notes"])
            .map(str::to_string),
    })
}

/// Recommended services: an array of strings, or of objects carrying a
/// `name`/`service` field.
fn services_from(value: &Value) -> Vec<String> {
    let services = ["aws_services", "services", "recommended_services"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array));

    services
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(_) => {
                        first_str(item, &["name", "service"]).map(str::to_string)
                    }
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Diagram source text: a bare string, or an object with a source field.
fn diagram_source_from(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => {
            first_str(value, &["source", "code", "diagram_code", "mermaid"]).map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_architecture_payload() {
        let payload = json!({
            "architecture_diagram": {
                "proposal": {
                    "project_name": "Data Lake Migration",
                    "aws_services": ["S3", "Glue", {"name": "Athena"}],
                    "explanation": "Lake-house layout with serverless query.",
                    "implementation_notes": "Phase the Glue jobs."
                },
                "diagram": "graph TD; A-->B;"
            }
        });

        let view = normalize_architecture(&payload);
        assert!(!view.is_empty());

        let proposal = view.proposal.expect("proposal present");
        assert_eq!(proposal.project_name.as_deref(), Some("Data Lake Migration"));
        assert_eq!(proposal.services, vec!["S3", "Glue", "Athena"]);
        assert_eq!(
            proposal.explanation.as_deref(),
            Some("Lake-house layout with serverless query.")
        );
        assert_eq!(view.diagram_source.as_deref(), Some("graph TD; A-->B;"));
    }

    #[test]
    fn test_missing_root_degrades_to_no_data() {
        let view = normalize_architecture(&json!({"something": "else"}));
        assert!(view.is_empty());
        assert!(view.proposal.is_none());
        assert!(view.diagram_source.is_none());
    }

    #[test]
    fn test_proposal_only() {
        let payload = json!({
            "architecture_diagram": {
                "proposal": {"name": "Edge CDN", "services": ["CloudFront"]}
            }
        });
        let view = normalize_architecture(&payload);
        assert!(!view.is_empty());
        let proposal = view.proposal.expect("proposal present");
        assert_eq!(proposal.project_name.as_deref(), Some("Edge CDN"));
        assert_eq!(proposal.services, vec!["CloudFront"]);
        assert!(view.diagram_source.is_none());
    }

    #[test]
    fn test_diagram_only_with_object_source() {
        let payload = json!({
            "architecture_diagram": {
                "diagram": {"diagram_code": "flowchart LR"}
            }
        });
        let view = normalize_architecture(&payload);
        assert!(view.proposal.is_none());
        assert_eq!(view.diagram_source.as_deref(), Some("flowchart LR"));
    }

    #[test]
    fn test_non_object_proposal_ignored() {
        let payload = json!({"architecture_diagram": {"proposal": "not an object"}});
        let view = normalize_architecture(&payload);
        assert!(view.proposal.is_none());
    }
}
