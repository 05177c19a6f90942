//! Process-wide last-result snapshot.
//!
//! A single-slot cache holding the most recent completed `PipelineResult`
//! and, separately, the clarification answers the user has typed. It lets
//! navigation between presentation screens (or a reload) redisplay the
//! last result without re-invoking the pipeline.
//!
//! Lifecycle: initialized empty at startup, written only by the
//! orchestrator's success path (write-through), read at screen-mount
//! time. Corrupted stored values are discarded and treated as empty, not
//! as errors.

pub mod store;

pub use store::{FileStateStore, MemoryStateStore, StateStore};

use rfx_protocol::{ClarificationAnswers, PipelineResult};

/// Slot name for the last completed pipeline result.
pub const LAST_RESULT_KEY: &str = "last_result";

/// Slot name for the user's clarification answers.
pub const LAST_ANSWERS_KEY: &str = "last_clarification_answers";

/// Single-slot persisted cache over an injected [`StateStore`].
pub struct ResultCache {
    store: Box<dyn StateStore>,
}

impl ResultCache {
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Write-through: overwrite the slot with the latest result.
    ///
    /// Persistence failures are logged and swallowed; the in-flight
    /// result set must not fail because the local cache could not be
    /// written.
    pub fn save_result(&self, result: &PipelineResult) {
        match serde_json::to_string(result) {
            Ok(serialized) => {
                if let Err(err) = self.store.write(LAST_RESULT_KEY, &serialized) {
                    tracing::warn!(%err, "failed to persist last result");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to serialize last result"),
        }
    }

    /// The last completed result, if a readable one is stored.
    pub fn load_result(&self) -> Option<PipelineResult> {
        let raw = self.store.read(LAST_RESULT_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(result) => Some(result),
            Err(err) => {
                tracing::warn!(%err, "discarding corrupt cached result");
                None
            }
        }
    }

    /// Persist the user's per-question answers. Client-local only; these
    /// are never sent to the backend.
    pub fn save_answers(&self, answers: &ClarificationAnswers) {
        match serde_json::to_string(answers) {
            Ok(serialized) => {
                if let Err(err) = self.store.write(LAST_ANSWERS_KEY, &serialized) {
                    tracing::warn!(%err, "failed to persist clarification answers");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to serialize clarification answers"),
        }
    }

    /// Stored answers, or empty when absent/corrupt.
    pub fn load_answers(&self) -> ClarificationAnswers {
        let Some(raw) = self.store.read(LAST_ANSWERS_KEY) else {
            return ClarificationAnswers::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "discarding corrupt clarification answers");
            ClarificationAnswers::default()
        })
    }

    /// Drop both slots.
    pub fn clear(&self) {
        self.store.clear(LAST_RESULT_KEY);
        self.store.clear(LAST_ANSWERS_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfx_protocol::{PipelineStatus, StepRecord, StepStatus};

    fn sample_result() -> PipelineResult {
        PipelineResult {
            status: PipelineStatus::Completed,
            steps: vec![StepRecord {
                name: "Pricing & Funding".to_string(),
                output: Some("u/pricing_outputs/report.json".to_string()),
                status: StepStatus::Success,
            }],
            total_time_seconds: Some(12.0),
            ..Default::default()
        }
    }

    fn memory_cache() -> ResultCache {
        ResultCache::new(Box::new(MemoryStateStore::new()))
    }

    #[test]
    fn test_result_round_trip() {
        let cache = memory_cache();
        assert!(cache.load_result().is_none());

        let result = sample_result();
        cache.save_result(&result);
        assert_eq!(cache.load_result(), Some(result));
    }

    #[test]
    fn test_round_trip_preserves_classification() {
        // Classification is a pure function of steps, so a cached result
        // must reconcile into the same binding as the original.
        let cache = memory_cache();
        let result = sample_result();
        cache.save_result(&result);

        let reloaded = cache.load_result().expect("cached result");
        assert_eq!(
            crate::classify::classify(&reloaded.steps),
            crate::classify::classify(&result.steps)
        );
    }

    #[test]
    fn test_corrupt_slot_is_discarded() {
        let store = MemoryStateStore::new();
        store.write(LAST_RESULT_KEY, "{not json").unwrap();
        let cache = ResultCache::new(Box::new(store));
        assert!(cache.load_result().is_none());
    }

    #[test]
    fn test_write_through_overwrites() {
        let cache = memory_cache();
        cache.save_result(&sample_result());

        let mut newer = sample_result();
        newer.total_time_seconds = Some(99.0);
        cache.save_result(&newer);

        assert_eq!(cache.load_result(), Some(newer));
    }

    #[test]
    fn test_answers_round_trip_and_default() {
        let cache = memory_cache();
        assert!(cache.load_answers().answers.is_empty());

        let answers = ClarificationAnswers {
            answers: vec!["40 TB".to_string(), String::new()],
        };
        cache.save_answers(&answers);
        assert_eq!(cache.load_answers(), answers);
    }

    #[test]
    fn test_clear_drops_both_slots() {
        let cache = memory_cache();
        cache.save_result(&sample_result());
        cache.save_answers(&ClarificationAnswers {
            answers: vec!["x".to_string()],
        });

        cache.clear();
        assert!(cache.load_result().is_none());
        assert!(cache.load_answers().answers.is_empty());
    }
}
