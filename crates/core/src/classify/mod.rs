//! Step classification heuristics.
//!
//! The pipeline reports its execution trace as free-text step labels plus
//! object-storage keys. Nothing about those is contractually fixed, so
//! classification works by priority-ordered heuristic predicates: the
//! output extension is the primary type signal, name/path substrings
//! disambiguate, and each role falls back to progressively weaker matches.
//!
//! All scans share one bound-set: once a step is bound to a role, no later
//! scan — primary or fallback — may bind it again, so every step resolves
//! to at most one role.

use rfx_protocol::{Role, RoleBinding, StepRecord};

/// Classify an ordered step trace into a role binding.
///
/// Roles are resolved in a fixed precedence (pricing, architecture, SOW,
/// clarification, parsing); within a role the earliest matching step wins.
/// A role with no matching step stays unresolved — absence is a valid,
/// expected state, not an error. Steps without an output key are
/// ineligible throughout.
pub fn classify(steps: &[StepRecord]) -> RoleBinding {
    let lowered: Vec<(String, Option<String>)> = steps
        .iter()
        .map(|step| {
            (
                step.name.to_lowercase(),
                step.output.as_ref().map(|output| output.to_lowercase()),
            )
        })
        .collect();

    let find = |binding: &RoleBinding, pred: &dyn Fn(&str, &str) -> bool| -> Option<usize> {
        lowered.iter().enumerate().find_map(|(index, (name, output))| {
            let output = output.as_deref()?;
            if binding.is_bound(index) {
                return None;
            }
            pred(name, output).then_some(index)
        })
    };

    let mut binding = RoleBinding::default();

    // Role-specific matches first, in precedence order, so a clearly
    // labeled step is never stolen by another role's weaker fallback.
    if let Some(index) = find(&binding, &|name, output| {
        has_ext(output, &[".json"])
            && (name.contains("pricing") || output.contains("pricing") || output.contains("price"))
    }) {
        binding.set(Role::Pricing, index);
    }

    if let Some(index) = find(&binding, &|name, output| {
        has_ext(output, &[".png", ".json"])
            && mentions(name, output, &["architecture", "diagram"])
    }) {
        binding.set(Role::Architecture, index);
    }

    if let Some(index) = find(&binding, &|name, output| {
        has_ext(output, &[".docx", ".pdf"])
            && mentions(name, output, &["sow", "statement of work"])
    }) {
        binding.set(Role::Sow, index);
    }

    if let Some(index) = find(&binding, &|name, output| {
        has_ext(output, &[".json"]) && mentions(name, output, &["clarification"])
    }) {
        binding.set(Role::Clarification, index);
    }

    // Fallback matches, skipping everything bound above. The bare-JSON
    // fallbacks can mis-bind an unrelated JSON artifact (typically the
    // parsing output) when no role-specific match exists; kept for
    // compatibility with deployed backends (see DESIGN.md).
    if binding.pricing.is_none() {
        if let Some(index) = find(&binding, &|_, output| has_ext(output, &[".json"])) {
            binding.set(Role::Pricing, index);
        }
    }

    if binding.sow.is_none() {
        if let Some(index) = find(&binding, &|_, output| has_ext(output, &[".docx", ".pdf"])) {
            binding.set(Role::Sow, index);
        }
    }

    if binding.clarification.is_none() {
        if let Some(index) = find(&binding, &|_, output| has_ext(output, &[".json"])) {
            binding.set(Role::Clarification, index);
        }
    }

    // Parsing is never surfaced as a view; the binding records which step
    // the download listing should hide. A parsing step already consumed by
    // a fallback above stays where the fallback put it.
    if let Some(index) = find(&binding, &|name, _| name.contains("parsing")) {
        binding.set(Role::Parsing, index);
    }

    binding
}

/// Indices of output-bearing steps to offer as downloads.
///
/// Parsing steps are intermediate artifacts and are excluded from the
/// listing.
pub fn download_listing(steps: &[StepRecord]) -> Vec<usize> {
    steps
        .iter()
        .enumerate()
        .filter(|(_, step)| step.output.is_some() && !step.name.to_lowercase().contains("parsing"))
        .map(|(index, _)| index)
        .collect()
}

fn has_ext(output: &str, exts: &[&str]) -> bool {
    exts.iter().any(|ext| output.ends_with(ext))
}

fn mentions(name: &str, output: &str, needles: &[&str]) -> bool {
    needles
        .iter()
        .any(|needle| name.contains(needle) || output.contains(needle))
}
