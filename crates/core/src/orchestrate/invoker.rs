//! Pipeline invocation contract.
//!
//! The pipeline itself is an opaque remote procedure: it takes a document
//! reference, runs for an unbounded amount of time, and eventually returns
//! a run log or a descriptive failure. The engine only consumes the
//! contract defined here.

use async_trait::async_trait;
use rfx_protocol::PipelineResult;
use thiserror::Error;

/// Errors from a pipeline invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The remote call itself failed (transport, permissions, timeout).
    #[error("Pipeline invocation failed: {0}")]
    Failed(String),

    /// The call returned, but the response was unreadable.
    #[error("Pipeline returned an unreadable response: {0}")]
    Decode(String),
}

/// Opaque remote pipeline invocation.
#[async_trait]
pub trait PipelineInvoker: Send + Sync {
    /// Run the full pipeline for a submitted document. May take an
    /// unbounded amount of time.
    async fn invoke(&self, document_ref: &str, user_id: &str)
        -> Result<PipelineResult, InvokeError>;
}
