//! Error taxonomy for the navigation domain.

use thiserror::Error;

/// Errors a navigation session can surface to the caller.
///
/// Everything not listed here is a programmer error and should fail fast
/// rather than be handled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    /// Confirm was triggered without a destination. The UI disables the
    /// confirm control when nothing is selected, so this is a defensive check.
    #[error("no destination selected")]
    InvalidSelection,

    /// A session was started with zero steps.
    #[error("navigation started with an empty step sequence")]
    EmptySteps,

    /// The requested destination is not part of the catalog.
    #[error("unknown destination: {0}")]
    UnknownDestination(String),
}
