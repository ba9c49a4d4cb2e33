//! Core types for the hosted IDE boot gateway.
//!
//! Pure domain logic only: cookie scoping, profile selection, request
//! parsing and the immutable base configuration. Nothing here performs I/O.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod cookie;
pub mod error;
pub mod identity;
pub mod options;
pub mod profile;
pub mod request;
pub mod settings;

pub use cookie::{classify_host, derive_cookie_domain, CookieDirective, CookieScope, SESSION_COOKIE};
pub use error::CoreError;
pub use identity::{ExternalId, Identity};
pub use options::{BaseConfig, CdnOptions, ClientOptions, ExtendOptions, ProjectRecord, UserRecord};
pub use profile::{requested_profile, select_profile, ProfileName};
pub use request::{numeric_flag, resolve_token, IdeQuery, RequestOverrides, SessionToken};
pub use settings::{SettingsBundle, SettingsSlot};
