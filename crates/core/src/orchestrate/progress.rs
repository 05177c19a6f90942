//! Simulated progress for an opaque remote invocation.
//!
//! The backend gives no intermediate signal: one call, one result, after
//! an unbounded wait. To show liveness anyway, a periodic task advances a
//! simulated percentage from a floor toward a ceiling, each tick covering
//! a fixed fraction of the remaining distance — so it slows as it climbs
//! and never reaches 100 on its own. The true completion snaps progress
//! to exactly 100 and cancels the simulation, on success and failure
//! alike.

use rfx_protocol::{Event, ProgressConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Cancel handle for a running progress simulation.
///
/// The periodic task is stopped on every exit path: explicitly via
/// [`ProgressHandle::complete`] or [`ProgressHandle::stop`], and as a
/// last resort when the handle is dropped.
pub struct ProgressHandle {
    invocation_id: Uuid,
    events_tx: Sender<Event>,
    stopped: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ProgressHandle {
    /// Snap progress to 100% and stop the simulation.
    ///
    /// Called when the real invocation resolves, whether it succeeded or
    /// failed.
    pub async fn complete(mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.task.abort();
        // Abort lands at the task's next await point; wait for it to
        // actually finish so no simulated tick can trail the final snap.
        let _ = (&mut self.task).await;
        let _ = self
            .events_tx
            .send(Event::ProgressTick {
                invocation_id: self.invocation_id,
                percent: 100.0,
            })
            .await;
    }

    /// Stop the simulation without emitting a final value.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

/// Start a progress simulation for `invocation_id`.
pub fn start(config: &ProgressConfig, invocation_id: Uuid, events_tx: Sender<Event>) -> ProgressHandle {
    let stopped = Arc::new(AtomicBool::new(false));
    let cfg = config.clone();

    let task = tokio::spawn({
        let stopped = Arc::clone(&stopped);
        let events_tx = events_tx.clone();
        async move {
            let mut percent = cfg.floor;
            let mut ticker = tokio::time::interval(Duration::from_millis(cfg.tick_ms));
            loop {
                ticker.tick().await;
                if stopped.load(Ordering::SeqCst) {
                    break;
                }
                let _ = events_tx
                    .send(Event::ProgressTick {
                        invocation_id,
                        percent,
                    })
                    .await;
                // Each tick covers a fraction of what's left; the value
                // approaches the ceiling asymptotically.
                percent += (cfg.ceiling - percent) * cfg.approach_factor;
                if percent > cfg.ceiling {
                    percent = cfg.ceiling;
                }
            }
        }
    });

    ProgressHandle {
        invocation_id,
        events_tx,
        stopped,
        task,
    }
}
