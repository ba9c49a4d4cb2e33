//! Assembly of the per-request client configuration.
//!
//! The shared [`BaseConfig`] is never modified: every request works on its
//! own deep copy of the client options, then hands the result to the
//! selected profile module.

use std::path::PathBuf;
use std::sync::Arc;

use ide_core::{BaseConfig, ClientOptions, Identity, ProfileName, RequestOverrides, SettingsBundle};
use serde::Serialize;
use serde_json::Value;

use crate::{ConfigLoadError, ProfileCatalog, SettingsLoader};

/// Token recorded in the options when the identity carries none.
const PLACEHOLDER_TOKEN: &str = "token";

/// Client options for one request, before the profile module runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOptions {
    pub readonly: bool,
    pub packed: bool,
    pub options: ClientOptions,
}

/// Everything the renderer needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub profile: ProfileName,
    pub readonly: bool,
    pub packed: bool,
    pub version: Option<String>,
    pub options: ClientOptions,
    /// Output of the profile module.
    pub architect_config: Value,
}

/// Workspace directory for this request: the `w` override or the default.
#[must_use]
pub fn effective_workspace_dir(base: &BaseConfig, overrides: &RequestOverrides) -> PathBuf {
    overrides
        .workspace_dir
        .clone()
        .unwrap_or_else(|| base.workspace_dir.clone())
}

/// Layer the request and identity onto a fresh copy of the base options.
#[must_use]
pub fn assemble_options(
    base: &BaseConfig,
    profile: &ProfileName,
    overrides: &RequestOverrides,
    identity: &Identity,
    settings: SettingsBundle,
) -> SessionOptions {
    let mut options = base.options.clone();

    options.collab = overrides.collab(base.collab);

    let packed = base.packed || overrides.packed;
    options.packed = options.packed || overrides.packed;

    let cdn = &base.options.cdn.version;
    options.theme_prefix = Some(format!("/static/{cdn}/skin/{profile}"));
    options.worker_prefix = Some(format!("/static/{cdn}/worker"));
    options.cors_worker_prefix = Some(if packed {
        format!("/static/{cdn}/worker")
    } else {
        String::new()
    });

    let token = if identity.token.is_empty() {
        PLACEHOLDER_TOKEN
    } else {
        identity.token.as_str()
    };
    options.access_token = Some(token.to_owned());
    options.extend_token = Some(token.to_owned());

    let workspace_dir = effective_workspace_dir(base, overrides);
    options.project_name = workspace_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    options.workspace_dir = Some(workspace_dir);

    let user = &mut options.extend_options.user;
    user.id = Some(identity.id.clone());
    user.name.clone_from(&identity.name);
    user.email.clone_from(&identity.email);
    user.fullname.clone_from(&identity.fullname);

    // Consumers read readonly from any of these three places.
    let readonly = identity.readonly;
    options.readonly = readonly;
    options.extend_options.readonly = readonly;

    options.debug = overrides.debug;
    options.settings = Some(settings);

    SessionOptions { readonly, packed, options }
}

/// Resolves the client configuration for authenticated requests.
///
/// Holds only injected collaborators; the base configuration is passed per
/// call so one resolver can serve every request concurrently.
#[derive(Clone)]
pub struct ConfigResolver {
    settings: Arc<dyn SettingsLoader>,
    catalog: Arc<dyn ProfileCatalog>,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsLoader>, catalog: Arc<dyn ProfileCatalog>) -> Self {
        Self { settings, catalog }
    }

    /// Resolve the configuration for one authenticated request.
    ///
    /// Settings are read against the effective workspace directory, so a
    /// `w` override also redirects the project and state layers.
    ///
    /// # Errors
    /// Returns a [`ConfigLoadError`] if the profile module cannot be found,
    /// loaded or run. Settings read failures are not errors.
    pub async fn resolve(
        &self,
        base: &BaseConfig,
        overrides: &RequestOverrides,
        identity: &Identity,
    ) -> Result<ResolvedConfig, ConfigLoadError> {
        let profile = base.profile_name(overrides.requested_profile.as_deref(), identity.readonly);
        tracing::info!(%profile, "resolving client configuration");

        let workspace_dir = effective_workspace_dir(base, overrides);
        let settings = self
            .settings
            .load(base.settings_root(), &workspace_dir, base.local)
            .await;

        let session = assemble_options(base, &profile, overrides, identity, settings);

        let module = self.catalog.module(&profile).await?;
        let input = serde_json::to_value(&session.options)?;
        let architect_config = module.build(&input)?;

        Ok(ResolvedConfig {
            profile,
            readonly: session.readonly,
            packed: session.packed,
            version: base.version.clone(),
            options: session.options,
            architect_config,
        })
    }
}
