//! Error types for the advisor.
//!
//! None of these reach the player: every advisor operation has a fallback
//! text, and errors are only logged.

/// Errors that can occur while asking the model for text.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// The HTTP request could not be sent or timed out.
    #[error("model request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status.
    #[error("model API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response had no text where it should.
    #[error("model response missing {0}")]
    MissingContent(&'static str),

    /// The response text was not the expected JSON.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Failed to render a prompt template.
    #[error("template render error: {0}")]
    Template(String),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// No API key is configured.
    #[error("advisor is offline")]
    Offline,
}

impl AdvisorError {
    /// Whether this error only means no backend is configured.
    pub const fn is_offline(&self) -> bool {
        matches!(self, Self::Offline)
    }
}
