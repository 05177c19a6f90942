//! # rfx-core
//!
//! Result reconciliation engine for the RFx pipeline.
//!
//! The remote pipeline returns a loosely structured run log after an
//! unbounded amount of time. This crate turns that log into a coherent,
//! navigable result set:
//! - classifies the ordered step trace into semantic roles using tolerant
//!   heuristic matching over free-text fields
//! - fetches each role's artifact from object storage and normalizes the
//!   several known payload shapes into one canonical view model per role
//! - drives the per-role fetch lifecycles independently, with a simulated
//!   progress indicator decoupled from the single opaque completion event
//! - persists the last completed result so navigation can redisplay it
//!   without re-invoking the pipeline
//!
//! ## Modules
//!
//! - [`store`]: Object-store client abstraction
//! - [`classify`]: Step → role classification heuristics
//! - [`normalize`]: Payload shape reconciliation into view models
//! - [`orchestrate`]: Concurrent fetch lifecycle and progress simulation
//! - [`cache`]: Process-wide last-result snapshot
//! - [`config`]: Engine configuration loading

pub mod cache;
pub mod classify;
pub mod config;
pub mod normalize;
pub mod orchestrate;
pub mod store;
