//! Fetch orchestration.
//!
//! Drives the per-role fetch/normalize lifecycles independently:
//! classification completes first, then every resolved role fetches its
//! artifact concurrently. One role's failure never blocks or fails a
//! sibling. A generation counter guards against a late-arriving fetch
//! from a superseded invocation overwriting newer state.

pub mod invoker;
pub mod progress;

pub use invoker::{InvokeError, PipelineInvoker};
pub use progress::ProgressHandle;

use crate::cache::ResultCache;
use crate::classify::classify;
use crate::normalize::normalize;
use crate::store::{ObjectStore, StoreResult};
use rfx_protocol::{
    ArtifactViewModel, DownloadRef, EngineConfig, Event, PipelineResult, Role, RoleBinding,
    RoleState,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use uuid::Uuid;

/// Snapshot of a fully reconciled result set.
#[derive(Debug, Clone)]
pub struct ReconciledResult {
    pub binding: RoleBinding,
    pub states: HashMap<Role, RoleState>,
}

impl ReconciledResult {
    /// The state for `role`, defaulting to unresolved.
    pub fn state(&self, role: Role) -> RoleState {
        self.states
            .get(&role)
            .cloned()
            .unwrap_or(RoleState::Unresolved)
    }
}

/// Coordinates invocation, per-role fetches, progress, and the cache.
pub struct Orchestrator {
    store: Arc<dyn ObjectStore>,
    cache: ResultCache,
    config: EngineConfig,
    events_tx: Sender<Event>,

    /// Bumped on every reconcile; in-flight fetches from an older
    /// generation discard their results instead of applying them.
    generation: Arc<AtomicU64>,

    /// Live per-role states for the current generation.
    states: Arc<Mutex<HashMap<Role, RoleState>>>,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        cache: ResultCache,
        config: EngineConfig,
        events_tx: Sender<Event>,
    ) -> Self {
        Self {
            store,
            cache,
            config,
            events_tx,
            generation: Arc::new(AtomicU64::new(0)),
            states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Run a full pipeline invocation and reconcile its result.
    ///
    /// Emits `InvocationStarted`, drives the simulated progress indicator
    /// while the opaque remote call is in flight, snaps progress to 100%
    /// on both success and failure, write-through caches a successful
    /// result, and finally reconciles it into per-role states.
    ///
    /// # Errors
    ///
    /// Returns the invocation error when the remote call itself fails.
    /// No partial role states are populated in that case.
    pub async fn run_pipeline(
        &self,
        invoker: &dyn PipelineInvoker,
        document_ref: &str,
        user_id: &str,
    ) -> Result<ReconciledResult, InvokeError> {
        let invocation_id = Uuid::new_v4();
        let _ = self
            .events_tx
            .send(Event::InvocationStarted {
                invocation_id,
                document_ref: document_ref.to_string(),
            })
            .await;

        let progress = progress::start(&self.config.progress, invocation_id, self.events_tx.clone());
        let outcome = invoker.invoke(document_ref, user_id).await;
        // The simulation must be stopped on every exit path; completion
        // snaps the indicator to 100% before the outcome is surfaced.
        progress.complete().await;

        match outcome {
            Ok(result) => {
                self.cache.save_result(&result);
                let _ = self
                    .events_tx
                    .send(Event::InvocationCompleted {
                        invocation_id,
                        total_time_seconds: result.total_time_seconds,
                    })
                    .await;
                Ok(self.reconcile(invocation_id, &result).await)
            }
            Err(err) => {
                let _ = self
                    .events_tx
                    .send(Event::InvocationFailed {
                        invocation_id,
                        error: err.to_string(),
                    })
                    .await;
                Err(err)
            }
        }
    }

    /// Reconcile a pipeline result into per-role view states.
    ///
    /// Classification completes fully before any fetch starts, since the
    /// fetches depend on the resolved binding. The viewable roles then
    /// proceed independently and may complete in any order. Also used at
    /// screen-mount time with a cached result.
    pub async fn reconcile(
        &self,
        invocation_id: Uuid,
        result: &PipelineResult,
    ) -> ReconciledResult {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let binding = classify(&result.steps);

        {
            let mut states = self.states.lock().await;
            states.clear();
            for role in Role::VIEWABLE {
                states.insert(role, RoleState::Unresolved);
            }
        }

        let mut fetches = JoinSet::new();
        for role in Role::VIEWABLE {
            match binding.get(role).and_then(|index| {
                result.steps.get(index).and_then(|step| step.output.clone())
            }) {
                // No binding: empty immediately. Not an error.
                None => {
                    self.apply(generation, invocation_id, role, RoleState::Empty)
                        .await;
                }
                Some(key) => {
                    self.apply(generation, invocation_id, role, RoleState::Loading)
                        .await;

                    // Pass-through: SOW documents and binary artifacts
                    // (diagram images) are never content-parsed; the key
                    // itself is the artifact.
                    if role == Role::Sow || !is_json_key(&key) {
                        let view = ArtifactViewModel::Download(DownloadRef::from_key(&key));
                        self.apply(generation, invocation_id, role, RoleState::Loaded { view })
                            .await;
                        continue;
                    }

                    let store = Arc::clone(&self.store);
                    let states = Arc::clone(&self.states);
                    let current = Arc::clone(&self.generation);
                    let events_tx = self.events_tx.clone();
                    let bucket = self.config.output_bucket.clone();
                    fetches.spawn(async move {
                        let state = match store.get_json(&bucket, &key).await {
                            Ok(payload) => RoleState::Loaded {
                                view: normalize(role, &payload),
                            },
                            // Surfaced to the user, scoped to this role;
                            // siblings are unaffected.
                            Err(err) => RoleState::Error {
                                message: err.to_string(),
                            },
                        };
                        apply_state(
                            &states,
                            &events_tx,
                            &current,
                            generation,
                            invocation_id,
                            role,
                            state,
                        )
                        .await;
                    });
                }
            }
        }

        while fetches.join_next().await.is_some() {}

        let states = self.states.lock().await.clone();
        ReconciledResult { binding, states }
    }

    /// Mint a time-limited download link, lazily, on user action only.
    ///
    /// Listed files the user never opens cost no credential-service
    /// calls.
    pub async fn download_url(&self, key: &str) -> StoreResult<String> {
        self.store
            .get_signed_url(
                &self.config.output_bucket,
                key,
                Duration::from_secs(self.config.signed_url_ttl_secs),
            )
            .await
    }

    /// Fetch a raw artifact payload directly, outside the role lifecycle.
    pub async fn fetch_payload(&self, key: &str) -> StoreResult<Value> {
        self.store.get_json(&self.config.output_bucket, key).await
    }

    /// The last completed result, if the cache holds a readable one.
    /// Read at screen-mount time to resume a view without re-invoking
    /// the pipeline.
    pub fn resume_last(&self) -> Option<PipelineResult> {
        self.cache.load_result()
    }

    /// Access to the cache for clarification answers.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    async fn apply(&self, generation: u64, invocation_id: Uuid, role: Role, state: RoleState) {
        apply_state(
            &self.states,
            &self.events_tx,
            &self.generation,
            generation,
            invocation_id,
            role,
            state,
        )
        .await;
    }
}

fn is_json_key(key: &str) -> bool {
    key.to_ascii_lowercase().ends_with(".json")
}

/// Apply a role transition, unless the generation has moved on.
async fn apply_state(
    states: &Mutex<HashMap<Role, RoleState>>,
    events_tx: &Sender<Event>,
    current: &AtomicU64,
    generation: u64,
    invocation_id: Uuid,
    role: Role,
    state: RoleState,
) {
    if current.load(Ordering::SeqCst) != generation {
        tracing::debug!(%role, "discarding state from superseded invocation");
        return;
    }
    states.lock().await.insert(role, state.clone());
    let _ = events_tx
        .send(Event::RoleStateUpdate {
            invocation_id,
            role,
            state,
        })
        .await;
}
