use rfx_protocol::*;

#[test]
fn test_pipeline_result_deserialization_from_run_log() {
    // Sample run log as the backend orchestrator writes it
    let json_str = r#"
{
  "input_file": "ravi/RFP_1.pdf",
  "steps": [
    {"step": "RFx Parsing", "output": "ravi/parsed_outputs/RFP_1_parsed.json", "status": "success"},
    {"step": "Clarification", "output": "ravi/clarifications/RFP_1_clarifications.json", "status": "success"},
    {"step": "Pricing & Funding", "output": "ravi/pricing_outputs/RFP_1_pricing.json", "status": "success"},
    {"step": "SOW Drafting", "output": "ravi/sow_outputs/RFP_1_sow.docx", "status": "success"}
  ],
  "status": "completed",
  "started_at": "2025-10-13T04:54:45",
  "total_time_seconds": 142.7,
  "completed_at": "2025-10-13T04:57:08"
}
"#;

    let result: PipelineResult =
        serde_json::from_str(json_str).expect("Failed to deserialize PipelineResult");

    assert_eq!(result.status, PipelineStatus::Completed);
    assert_eq!(result.steps.len(), 4);
    assert_eq!(result.steps[0].name, "RFx Parsing");
    assert_eq!(
        result.steps[3].output.as_deref(),
        Some("ravi/sow_outputs/RFP_1_sow.docx")
    );
    assert_eq!(result.total_time_seconds, Some(142.7));
    assert_eq!(result.input_file.as_deref(), Some("ravi/RFP_1.pdf"));
    assert!(!result.is_failed());
}

#[test]
fn test_pipeline_status_absent_defaults_to_completed() {
    let result: PipelineResult =
        serde_json::from_str(r#"{"steps": []}"#).expect("Failed to deserialize");
    assert_eq!(result.status, PipelineStatus::Completed);
    assert!(result.steps.is_empty());
}

#[test]
fn test_pipeline_status_tolerates_unknown_spellings() {
    for raw in ["success", "COMPLETED", "done", ""] {
        let json = format!(r#"{{"status": "{raw}"}}"#);
        let result: PipelineResult = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(result.status, PipelineStatus::Completed, "raw = {raw:?}");
    }

    let failed: PipelineResult =
        serde_json::from_str(r#"{"status": "FAILED"}"#).expect("Failed to deserialize");
    assert_eq!(failed.status, PipelineStatus::Failed);
}

#[test]
fn test_step_record_accepts_name_alias() {
    let record: StepRecord =
        serde_json::from_str(r#"{"name": "Architecture Diagram", "output": "a.png"}"#)
            .expect("Failed to deserialize");
    assert_eq!(record.name, "Architecture Diagram");
    assert_eq!(record.status, StepStatus::Success);
}

#[test]
fn test_step_record_without_output() {
    let record: StepRecord =
        serde_json::from_str(r#"{"step": "Notify", "status": "error"}"#)
            .expect("Failed to deserialize");
    assert!(record.output.is_none());
    assert_eq!(record.status, StepStatus::Failed);
}

#[test]
fn test_role_serialization() {
    let json = serde_json::to_value(Role::Sow).expect("Failed to serialize Role");
    assert_eq!(json, "sow");

    let role: Role = serde_json::from_value(json).expect("Failed to deserialize Role");
    assert_eq!(role, Role::Sow);
}

#[test]
fn test_role_binding_round_trip() {
    let mut binding = RoleBinding::default();
    binding.set(Role::Pricing, 2);
    binding.set(Role::Sow, 3);

    let json = serde_json::to_string(&binding).expect("Failed to serialize RoleBinding");
    let deserialized: RoleBinding =
        serde_json::from_str(&json).expect("Failed to deserialize RoleBinding");

    assert_eq!(deserialized, binding);
    assert_eq!(deserialized.get(Role::Pricing), Some(2));
    assert!(deserialized.get(Role::Architecture).is_none());
    assert!(deserialized.is_bound(3));
    assert!(!deserialized.is_bound(0));
}

#[test]
fn test_role_state_tagged_serialization() {
    let state = RoleState::Error {
        message: "object missing".to_string(),
    };
    let json = serde_json::to_value(&state).expect("Failed to serialize RoleState");
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "object missing");

    let loading = serde_json::to_value(RoleState::Loading).expect("Failed to serialize");
    assert_eq!(loading["status"], "loading");
}

#[test]
fn test_event_enum_serialization() {
    use uuid::Uuid;

    let invocation_id = Uuid::new_v4();
    let event = Event::RoleStateUpdate {
        invocation_id,
        role: Role::Clarification,
        state: RoleState::Empty,
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize Event");
    assert_eq!(json["type"], "roleStateUpdate");
    assert_eq!(json["payload"]["role"], "clarification");
    assert_eq!(json["payload"]["state"]["status"], "empty");

    let deserialized: Event = serde_json::from_value(json).expect("Failed to deserialize Event");
    assert!(matches!(
        deserialized,
        Event::RoleStateUpdate {
            role: Role::Clarification,
            ..
        }
    ));
}

#[test]
fn test_download_ref_filename_derivation() {
    let download = DownloadRef::from_key("ravi/sow_outputs/RFP_1_sow_20251013.docx");
    assert_eq!(download.filename, "RFP_1_sow_20251013.docx");

    let bare = DownloadRef::from_key("statement.pdf");
    assert_eq!(bare.filename, "statement.pdf");

    let trailing = DownloadRef::from_key("ravi/sow_outputs/");
    assert_eq!(trailing.filename, "sow_outputs");
}

#[test]
fn test_funding_recommendation_uses_wire_field_name() {
    let json = r#"{"type": "POC", "amount": 50000.0, "rationale": "Validate approach quickly"}"#;
    let rec: FundingRecommendation = serde_json::from_str(json).expect("Failed to deserialize");
    assert_eq!(rec.rec_type, "POC");

    let round = serde_json::to_value(&rec).expect("Failed to serialize");
    assert_eq!(round["type"], "POC");
}

#[test]
fn test_engine_config_defaults() {
    let config: EngineConfig = serde_json::from_str("{}").expect("Failed to deserialize");
    assert_eq!(config.output_bucket, "presales-rfp-outputs");
    assert_eq!(config.signed_url_ttl_secs, 900);
    assert!(config.progress.floor < config.progress.ceiling);
    assert!(config.progress.ceiling < 100.0);
}
