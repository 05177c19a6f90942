//! Engine → presentation event protocol.
//!
//! The orchestrator reports everything the UI needs through this channel:
//! invocation lifecycle, simulated progress ticks, and per-role state
//! transitions. Communication is asynchronous and channel-based so the
//! presentation layer stays responsive while fetches are in flight.
//!
//! Uses tagged enum serialization for TypeScript compatibility:
//! ```json
//! {
//!   "type": "roleStateUpdate",
//!   "payload": {
//!     "invocation_id": "uuid-here",
//!     "role": "pricing",
//!     "state": { "status": "loading" }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::role_models::{Role, RoleState};

/// Events sent from the engine to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A pipeline invocation has been dispatched.
    InvocationStarted {
        #[ts(type = "string")]
        invocation_id: Uuid,
        document_ref: String,
    },

    /// Simulated (or final) progress. Monotonically non-decreasing; the
    /// true completion snaps this to exactly 100.
    ProgressTick {
        #[ts(type = "string")]
        invocation_id: Uuid,
        percent: f64,
    },

    /// A role's fetch/display lifecycle advanced.
    RoleStateUpdate {
        #[ts(type = "string")]
        invocation_id: Uuid,
        role: Role,
        state: RoleState,
    },

    /// The remote invocation resolved successfully.
    InvocationCompleted {
        #[ts(type = "string")]
        invocation_id: Uuid,
        total_time_seconds: Option<f64>,
    },

    /// The remote invocation itself failed. No partial role states are
    /// populated for this invocation.
    InvocationFailed {
        #[ts(type = "string")]
        invocation_id: Uuid,
        error: String,
    },
}
