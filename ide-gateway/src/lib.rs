//! HTTP gateway that boots hosted IDE sessions.
//!
//! Serves `GET /ide.html`: authenticates the caller against the identity
//! service, maintains the cross-subdomain session cookie and renders the
//! bootstrap page with the resolved client configuration.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod cookies;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;
