//! Error types for the boot crate.

use std::path::PathBuf;

/// Text shown to end users when the identity service reports an unknown
/// project.
pub const PROJECT_NOT_FOUND_MESSAGE: &str = "Specified project does not exist. Probably, the url is wrong. \
     If you are sure it is correct, please, send us a message.";

/// Failures while authenticating against the identity service.
///
/// The `Display` text of every variant is safe to show to the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// The identity service could not be reached or did not answer in time.
    #[error("{0}")]
    Transport(String),

    /// The identity service answered with a non-2xx status.
    #[error("We got an error: {0}")]
    Upstream(String),

    /// The identity service does not know the configured project.
    #[error(
        "Specified project does not exist. Probably, the url is wrong. \
         If you are sure it is correct, please, send us a message."
    )]
    ProjectNotFound,

    /// The response body was not the expected JSON document.
    #[error("{0}")]
    MalformedResponse(String),
}

/// Failures locating or running a client configuration profile.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigLoadError {
    /// No profile module is registered under this name.
    #[error("profile not found: {name}")]
    ProfileNotFound { name: String },

    /// The profile module rejected the assembled options.
    #[error("profile {name} failed: {reason}")]
    ProfileFailed { name: String, reason: String },

    /// The profile file exists but could not be read.
    #[error("failed to read profile {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile file is not valid JSON.
    #[error("failed to parse profile {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The assembled options could not be converted for the profile.
    #[error("failed to encode client options: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A settings file exists but could not be read. Never fatal.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
