//! Fixture error types.

use hyprlinkr_core::LinkError;
use thiserror::Error;

/// Errors that can occur while building fixtures.
#[derive(Debug, Error)]
pub enum TestError {
    /// The request URI could not be parsed.
    #[error("request build error: {0}")]
    RequestBuild(#[from] LinkError),

    /// The request was expected to match a route but did not.
    #[error("no route matches '{0}'")]
    Unrouted(String),
}
