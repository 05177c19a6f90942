//! Canonical view models.
//!
//! Each role's artifact can arrive in several raw shapes; the normalizer
//! reconciles them into exactly one of the structures here. View models
//! are derived data: recomputed whenever the underlying result changes,
//! never mutated in place.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Normalized artifact, polymorphic over role.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ArtifactViewModel {
    Pricing(PricingView),
    Architecture(ArchitectureView),
    Clarification(ClarificationView),
    Download(DownloadRef),
}

/// Pricing artifact in one of three mutually exclusive variants, selected
/// by payload shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum PricingView {
    /// Cost-breakdown-with-feasibility object (`pricing_check` payloads).
    Structured(StructuredEstimate),

    /// Flat line-item table.
    Tabular(TabularEstimate),

    /// Payload matched no known shape; kept verbatim for raw display.
    RawFallback {
        #[ts(type = "unknown")]
        raw: serde_json::Value,
    },
}

/// Estimated cost range with currency code.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct CostRange {
    pub low: f64,
    pub high: f64,
    pub currency: String,
}

/// One pre-rendered breakdown row.
///
/// Values are rendered at normalization time (currency-formatted, or bare
/// for duration rows) so the presentation layer displays them as-is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct BreakdownRow {
    /// Raw payload key, kept for tooling and tests.
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Feasibility verdict attached to a structured estimate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct FeasibilityVerdict {
    /// Verdict string as reported ("Feasible", "Tight", "Unrealistic", ...).
    pub verdict: String,

    /// True when the verdict equals "feasible" case-insensitively; drives
    /// the success/failure visual state.
    pub feasible: bool,

    pub funding_gap_absolute: Option<f64>,
    pub funding_gap_pct: Option<f64>,
}

/// A recommended funding tranche.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct FundingRecommendation {
    #[serde(rename = "type")]
    pub rec_type: String,
    pub amount: f64,
    pub rationale: String,
}

/// Structured cost estimate extracted from a `pricing_check` payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct StructuredEstimate {
    pub cost_range: CostRange,
    pub breakdown: Vec<BreakdownRow>,
    pub feasibility: Option<FeasibilityVerdict>,
    pub funding_recommendations: Vec<FundingRecommendation>,

    /// Narrative summary the backend sometimes attaches.
    pub summary: Option<String>,
}

/// One row of a tabular estimate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

/// Flat pricing line-item table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct TabularEstimate {
    pub line_items: Vec<LineItem>,
    pub grand_total: f64,
}

/// Architecture proposal metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, TS)]
pub struct ArchitectureProposal {
    pub project_name: Option<String>,
    pub services: Vec<String>,
    pub explanation: Option<String>,
    pub implementation_notes: Option<String>,
}

/// Architecture artifact view.
///
/// Either sub-object may be missing; both missing is the valid "no data"
/// state rather than an error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, TS)]
pub struct ArchitectureView {
    pub proposal: Option<ArchitectureProposal>,
    pub diagram_source: Option<String>,
}

impl ArchitectureView {
    /// Whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.proposal.is_none() && self.diagram_source.is_none()
    }
}

/// Ordered clarification questions extracted from the payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, TS)]
pub struct ClarificationView {
    pub questions: Vec<String>,
}

/// Per-question free-text answers the user has entered.
///
/// Client-local state only: held alongside the questions, persisted in the
/// local result cache, never written back to the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, TS)]
pub struct ClarificationAnswers {
    pub answers: Vec<String>,
}

/// Pass-through reference to a downloadable artifact (SOW documents and
/// the raw download listing). No content parsing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct DownloadRef {
    /// Object-storage key.
    pub key: String,

    /// Display filename derived from the key's basename.
    pub filename: String,
}

impl DownloadRef {
    /// Build a download reference from a storage key, deriving the display
    /// filename from the final path segment.
    pub fn from_key(key: &str) -> Self {
        let filename = key
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(key)
            .to_string();
        Self {
            key: key.to_string(),
            filename,
        }
    }
}
