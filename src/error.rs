//! Error taxonomy for the session boundary.
//!
//! Tool-level failures (unknown tool, handler error) are deliberately not
//! represented here: they are folded into a tool outcome and fed back to
//! the model, which reacts to them. The variants below are the errors the
//! *user* sees; each terminates the current request and nothing else.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuillError {
    /// Network or HTTP failure talking to the model API.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered, but the body was not a usable response.
    #[error("malformed response from model API: {0}")]
    BadResponse(String),

    /// No usable credentials or proxy configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The model kept requesting tools past the per-request budget.
    #[error("turn budget of {0} model calls exhausted; request aborted")]
    TurnBudget(u32),
}
