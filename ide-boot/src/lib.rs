//! Authentication and client configuration resolution for IDE sessions.
//!
//! Authenticates callers against the identity service, reads the layered
//! settings files and assembles the per-request client configuration.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auth;
pub mod error;
mod http_client;
pub mod profile;
pub mod resolver;
pub mod settings;

pub use auth::{AuthGateway, AuthRequest, Authenticated, HttpAuthGateway, DEFAULT_AUTH_TIMEOUT};
pub use error::{AuthError, ConfigLoadError, SettingsError, PROJECT_NOT_FOUND_MESSAGE};
pub use profile::{FileProfileCatalog, ProfileCatalog, ProfileModule, StaticProfileCatalog};
pub use resolver::{assemble_options, ConfigResolver, ResolvedConfig, SessionOptions};
pub use settings::{FsSettingsLoader, SettingsLoader};
