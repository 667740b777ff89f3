//! Error types for store access and session state.
//!
//! Command handlers propagate [`StoreError`] with `?`; the router boundary
//! converts anything that escapes into a failure envelope, so no error ever
//! reaches the hosting terminal as anything but a `success:false` result.

use thiserror::Error;

use crate::models::NodeId;

/// Faults surfaced by the remote store gateway.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced node does not exist (deleted out-of-band, bad id).
    #[error("node '{0}' not found in store")]
    NodeNotFound(NodeId),

    /// The operation is valid only for files.
    #[error("'{0}' is not a file")]
    NotAFile(String),

    /// The operation is valid only for folders.
    #[error("'{0}' is not a folder")]
    NotAFolder(String),

    /// Network-level failure between the engine and the store.
    #[error("network error: {0}")]
    Network(String),

    /// The store rejected the operation (permissions, quota, invariants).
    #[error("store rejected operation: {0}")]
    Rejected(String),
}

/// Result type alias for gateway operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Faults a command handler can leak to the router boundary.
///
/// Handlers catch what they can and produce curated diagnostics; anything
/// propagated with `?` arrives here and is rendered verbatim into the
/// failure envelope.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Resolve(#[from] crate::core::resolve::ResolveError),

    /// The persisted working location stopped resolving; the session has
    /// already been reset to root when this surfaces.
    #[error("current folder no longer exists; location reset to root")]
    LocationLost,
}
