//! Pipeline invocation result models.
//!
//! These structures mirror the run log the remote pipeline writes after an
//! invocation. The wire format is not contractually fixed: step labels,
//! status spellings, and optional fields vary across backend versions, so
//! deserialization here is deliberately tolerant — unknown status strings
//! map to a sensible default instead of failing the whole result.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Overall status of a pipeline invocation.
///
/// Absent or unrecognized values deserialize to `Completed`, matching the
/// backend's habit of omitting the field once a run has finished.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    /// Invocation accepted but not started.
    Pending,

    /// Invocation is still executing.
    Running,

    /// Invocation finished successfully ("success" is an accepted spelling).
    Completed,

    /// Invocation failed with an error.
    Failed,
}

impl Default for PipelineStatus {
    fn default() -> Self {
        Self::Completed
    }
}

impl<'de> Deserialize<'de> for PipelineStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "failed" | "error" => Self::Failed,
            _ => Self::Completed,
        })
    }
}

/// Status of a single pipeline step.
///
/// Unknown values deserialize to `Success`; a step the backend bothered to
/// record with an output is treated as having produced that output.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Failed,
}

impl Default for StepStatus {
    fn default() -> Self {
        Self::Success
    }
}

impl<'de> Deserialize<'de> for StepStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "failed" | "error" => Self::Failed,
            _ => Self::Success,
        })
    }
}

/// One entry in the pipeline's reported execution trace.
///
/// `name` is a free-text label ("RFx Parsing", "Pricing & Funding", ...)
/// and is only ever matched case-insensitively. `output` is an
/// object-storage key whose extension is the primary type signal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct StepRecord {
    /// Free-text step label. Serialized as `step` on the wire; `name` is
    /// accepted for older backends.
    #[serde(rename = "step", alias = "name")]
    pub name: String,

    /// Object-storage key of the step's artifact, if it produced one.
    ///
    /// A record with no output cannot be resolved to an artifact and is
    /// ineligible for classification.
    #[serde(default)]
    pub output: Option<String>,

    /// Whether the step itself succeeded.
    #[serde(default)]
    pub status: StepStatus,
}

/// Root object returned by a pipeline invocation.
///
/// Created once per successful invocation (or loaded from the result
/// cache) and immutable thereafter; role bindings and view models are
/// derived from it, never written back into it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, TS)]
pub struct PipelineResult {
    /// Overall invocation status. Absent on the wire means completed.
    #[serde(default)]
    pub status: PipelineStatus,

    /// Ordered execution trace. Order is pipeline execution order and is
    /// semantically meaningful: classification is first-match-wins.
    /// May be empty.
    #[serde(default)]
    pub steps: Vec<StepRecord>,

    /// Wall-clock duration reported by the backend.
    #[serde(default, alias = "totalTimeSeconds")]
    pub total_time_seconds: Option<f64>,

    /// Storage key of the document that triggered the run.
    #[serde(default)]
    pub input_file: Option<String>,

    /// Backend error message when `status` is failed.
    #[serde(default)]
    pub error: Option<String>,

    /// ISO-8601 timestamps from the run log. Kept verbatim; the engine
    /// never does arithmetic on them.
    #[serde(default)]
    pub started_at: Option<String>,

    #[serde(default)]
    pub completed_at: Option<String>,
}

impl PipelineResult {
    /// Whether the invocation as a whole failed.
    pub fn is_failed(&self) -> bool {
        self.status == PipelineStatus::Failed
    }
}
