//! # rfx-protocol
//!
//! Shared data models and event protocol for the RFx result engine.
//!
//! This crate defines all structures exchanged between the engine core and
//! the external presentation layer:
//! - Pipeline run logs as the backend reports them (tolerantly parsed)
//! - Classification results and per-role lifecycle states
//! - Canonical artifact view models
//! - The engine → UI event protocol
//! - Engine configuration
//!
//! ## Modules
//!
//! - [`pipeline_models`]: Invocation results and step records
//! - [`role_models`]: Roles, bindings, and role lifecycle states
//! - [`view_models`]: Normalized artifact view models
//! - [`ipc`]: Events for engine → presentation communication
//! - [`config_models`]: Engine configuration
//!
//! ## Design Principles
//!
//! - Minimal dependencies: serde, ts-rs, uuid
//! - TypeScript generation: all types derive `TS` for client compatibility
//! - Tolerant parsing: the backend's schema drifts, this crate absorbs it
//! - Independent compilation: no dependencies on other engine crates

pub mod config_models;
pub mod ipc;
pub mod pipeline_models;
pub mod role_models;
pub mod view_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use ipc::*;
pub use pipeline_models::*;
pub use role_models::*;
pub use view_models::*;
