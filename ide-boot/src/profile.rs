//! Client configuration profiles.
//!
//! A profile module turns the assembled client options into the final
//! configuration tree for the renderer. Modules are looked up by
//! [`ProfileName`] through a [`ProfileCatalog`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ide_core::ProfileName;
use serde_json::{json, Value};

use crate::ConfigLoadError;

/// Builds a configuration tree from client options.
pub trait ProfileModule: Send + Sync {
    /// # Errors
    /// Returns [`ConfigLoadError::ProfileFailed`] if the options are unusable.
    fn build(&self, options: &Value) -> Result<Value, ConfigLoadError>;
}

impl<F> ProfileModule for F
where
    F: Fn(&Value) -> Result<Value, ConfigLoadError> + Send + Sync,
{
    fn build(&self, options: &Value) -> Result<Value, ConfigLoadError> {
        self(options)
    }
}

/// Lookup of profile modules by name.
#[async_trait]
pub trait ProfileCatalog: Send + Sync {
    /// # Errors
    /// Returns [`ConfigLoadError::ProfileNotFound`] for unknown names, or an
    /// I/O or parse error if the module exists but cannot be loaded.
    async fn module(&self, name: &ProfileName) -> Result<Arc<dyn ProfileModule>, ConfigLoadError>;
}

/// Catalog of modules registered in code at startup.
#[derive(Default)]
pub struct StaticProfileCatalog {
    modules: HashMap<String, Arc<dyn ProfileModule>>,
}

impl StaticProfileCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` under `name`, replacing any previous entry.
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, module: impl ProfileModule + 'static) -> Self {
        self.modules.insert(name.into(), Arc::new(module));
        self
    }
}

#[async_trait]
impl ProfileCatalog for StaticProfileCatalog {
    async fn module(&self, name: &ProfileName) -> Result<Arc<dyn ProfileModule>, ConfigLoadError> {
        self.modules
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| ConfigLoadError::ProfileNotFound { name: name.to_string() })
    }
}

/// Catalog reading `client-<name>.json` templates from a directory.
///
/// A template module outputs `{"options": <options>, "plugins": <template>}`.
#[derive(Debug, Clone)]
pub struct FileProfileCatalog {
    dir: PathBuf,
}

impl FileProfileCatalog {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn template_path(&self, name: &ProfileName) -> Option<PathBuf> {
        let name = name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return None;
        }
        Some(self.dir.join(format!("client-{name}.json")))
    }
}

#[async_trait]
impl ProfileCatalog for FileProfileCatalog {
    async fn module(&self, name: &ProfileName) -> Result<Arc<dyn ProfileModule>, ConfigLoadError> {
        let not_found = || ConfigLoadError::ProfileNotFound { name: name.to_string() };
        let path = self.template_path(name).ok_or_else(not_found)?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(source) => return Err(ConfigLoadError::Io { path, source }),
        };
        let template: Value =
            serde_json::from_str(&text).map_err(|source| ConfigLoadError::Parse { path, source })?;

        Ok(Arc::new(TemplateProfile { template }))
    }
}

struct TemplateProfile {
    template: Value,
}

impl ProfileModule for TemplateProfile {
    fn build(&self, options: &Value) -> Result<Value, ConfigLoadError> {
        Ok(json!({
            "options": options,
            "plugins": self.template,
        }))
    }
}
