//! Shared, read-only application state.

use std::sync::Arc;

use ide_boot::{
    AuthGateway, ConfigResolver, FileProfileCatalog, FsSettingsLoader, HttpAuthGateway,
};
use ide_core::BaseConfig;

use crate::config::GatewayConfig;
use crate::render::{BootstrapPage, Renderer};

/// Collaborators every request handler needs.
///
/// Built once at startup; cloning only bumps reference counts. Nothing in
/// here is mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub base: Arc<BaseConfig>,
    pub auth: Arc<dyn AuthGateway>,
    pub resolver: ConfigResolver,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    #[must_use]
    pub fn new(
        base: BaseConfig,
        auth: Arc<dyn AuthGateway>,
        resolver: ConfigResolver,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            base: Arc::new(base),
            auth,
            resolver,
            renderer,
        }
    }

    /// Wire the default implementations: HTTP identity service, settings
    /// files on disk, profile templates from `config.profile_dir`.
    #[must_use]
    pub fn from_config(base: BaseConfig, config: &GatewayConfig) -> Self {
        let auth = HttpAuthGateway::with_timeout(base.options.api_url.clone(), config.auth_timeout);
        let resolver = ConfigResolver::new(
            Arc::new(FsSettingsLoader),
            Arc::new(FileProfileCatalog::new(config.profile_dir.clone())),
        );
        Self::new(base, Arc::new(auth), resolver, Arc::new(BootstrapPage))
    }
}
