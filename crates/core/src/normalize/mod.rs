//! Shape normalization into canonical view models.
//!
//! Each role's artifact arrives in one of several known raw shapes (or an
//! unknown one). The normalizer resolves the shape by ordered structural
//! probes — never by exceptions-as-control-flow — and produces exactly one
//! canonical view model per role. A total shape mismatch yields the raw
//! fallback variant, never an error: the UI always has something to show.

pub mod architecture;
pub mod clarification;
pub mod fields;
pub mod pricing;

pub use architecture::normalize_architecture;
pub use clarification::normalize_clarification;
pub use pricing::normalize_pricing;

use rfx_protocol::{ArtifactViewModel, DownloadRef, Role};
use serde_json::Value;

/// Normalize a raw payload into the canonical view model for `role`.
///
/// Infallible by design: malformed or unexpected payloads degrade to the
/// role's fallback representation.
///
/// Pass-through roles (SOW, parsing) carry no parsed content; their
/// payload is the storage key itself and the view is a download
/// reference.
pub fn normalize(role: Role, payload: &Value) -> ArtifactViewModel {
    match role {
        Role::Pricing => ArtifactViewModel::Pricing(normalize_pricing(payload)),
        Role::Clarification => ArtifactViewModel::Clarification(normalize_clarification(payload)),
        Role::Architecture => ArtifactViewModel::Architecture(normalize_architecture(payload)),
        Role::Sow | Role::Parsing => ArtifactViewModel::Download(DownloadRef::from_key(
            payload.as_str().unwrap_or_default(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_dispatches_by_role() {
        let view = normalize(Role::Pricing, &json!([{"description": "A", "quantity": 1}]));
        assert!(matches!(view, ArtifactViewModel::Pricing(_)));

        let view = normalize(Role::Clarification, &json!(["Q1"]));
        assert!(matches!(view, ArtifactViewModel::Clarification(_)));

        let view = normalize(Role::Architecture, &json!({}));
        assert!(matches!(view, ArtifactViewModel::Architecture(_)));
    }

    #[test]
    fn test_normalize_sow_is_pass_through() {
        let view = normalize(Role::Sow, &json!("ravi/sow_outputs/RFP_1_sow.docx"));
        let ArtifactViewModel::Download(download) = view else {
            panic!("expected download ref");
        };
        assert_eq!(download.filename, "RFP_1_sow.docx");
    }

    #[test]
    fn test_normalize_never_panics_on_garbage() {
        let garbage = [
            json!(null),
            json!(3.2),
            json!("string"),
            json!([[["deep"]]]),
            json!({"a": {"b": {"c": null}}}),
        ];
        for payload in &garbage {
            for role in Role::ALL {
                let _ = normalize(role, payload);
            }
        }
    }
}
