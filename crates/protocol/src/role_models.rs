//! Semantic roles and the classification binding.
//!
//! A role is one of the five artifact categories a pipeline step's output
//! may be classified into. Classification maps each role to at most one
//! step; absence is a valid, expected state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::view_models::ArtifactViewModel;

/// Semantic artifact category.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parsing,
    Clarification,
    Pricing,
    Architecture,
    Sow,
}

impl Role {
    /// Every role, in classification precedence order for display.
    pub const ALL: [Role; 5] = [
        Role::Parsing,
        Role::Clarification,
        Role::Pricing,
        Role::Architecture,
        Role::Sow,
    ];

    /// Roles that are surfaced as views. Parsing output feeds the other
    /// agents and is never presented on its own.
    pub const VIEWABLE: [Role; 4] = [
        Role::Clarification,
        Role::Pricing,
        Role::Architecture,
        Role::Sow,
    ];

    /// Human-readable label for role-scoped messages.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Parsing => "Parsing",
            Role::Clarification => "Clarifications",
            Role::Pricing => "Pricing & Funding",
            Role::Architecture => "Architecture",
            Role::Sow => "Statement of Work",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classification: role → step index into `PipelineResult::steps`.
///
/// Indices (rather than cloned records) keep the binding a pure function
/// of the step list, which is what makes the cache round-trip property
/// hold: re-classifying a reloaded result reproduces the same binding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
pub struct RoleBinding {
    pub parsing: Option<usize>,
    pub clarification: Option<usize>,
    pub pricing: Option<usize>,
    pub architecture: Option<usize>,
    pub sow: Option<usize>,
}

impl RoleBinding {
    /// The step index bound to `role`, if any.
    pub fn get(&self, role: Role) -> Option<usize> {
        match role {
            Role::Parsing => self.parsing,
            Role::Clarification => self.clarification,
            Role::Pricing => self.pricing,
            Role::Architecture => self.architecture,
            Role::Sow => self.sow,
        }
    }

    /// Bind `role` to the step at `index`.
    pub fn set(&mut self, role: Role, index: usize) {
        let slot = match role {
            Role::Parsing => &mut self.parsing,
            Role::Clarification => &mut self.clarification,
            Role::Pricing => &mut self.pricing,
            Role::Architecture => &mut self.architecture,
            Role::Sow => &mut self.sow,
        };
        *slot = Some(index);
    }

    /// Whether the step at `index` is already bound to some role.
    ///
    /// Scans for later roles must skip bound steps so that no step is ever
    /// double-counted for two roles.
    pub fn is_bound(&self, index: usize) -> bool {
        Role::ALL.iter().any(|role| self.get(*role) == Some(index))
    }

    /// Roles that resolved to a step.
    pub fn resolved_roles(&self) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|role| self.get(*role).is_some())
            .collect()
    }
}

/// Per-role fetch/display lifecycle.
///
/// `unresolved → loading → {loaded | error}` when a binding exists,
/// `unresolved → empty` immediately when it does not. Empty is not an
/// error: the pipeline simply produced no artifact for that role.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RoleState {
    /// Classification has not run for this role yet.
    Unresolved,

    /// No step produced this role's artifact. Shown as "not available".
    Empty,

    /// A binding exists and the artifact fetch is in flight.
    Loading,

    /// Artifact fetched and normalized into a canonical view model.
    Loaded { view: ArtifactViewModel },

    /// The fetch or decode failed. The message is surfaced to the user,
    /// scoped to this role only.
    Error { message: String },
}

impl RoleState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, RoleState::Loaded { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RoleState::Error { .. })
    }
}
