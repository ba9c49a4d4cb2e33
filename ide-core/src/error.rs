/// Errors produced by the `ide-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A base configuration field failed validation.
    #[error("invalid base configuration field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The base configuration document could not be parsed.
    #[error("base configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
