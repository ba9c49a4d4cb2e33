//! Settings layers read from disk.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use ide_core::{SettingsBundle, SettingsSlot};

use crate::SettingsError;

/// Source of the three settings layers.
#[async_trait]
pub trait SettingsLoader: Send + Sync {
    /// Load every layer. Never fails: unreadable layers come back empty.
    async fn load(&self, install_path: &Path, workspace_dir: &Path, local: bool) -> SettingsBundle;
}

/// [`SettingsLoader`] reading plain files at their fixed locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSettingsLoader;

#[async_trait]
impl SettingsLoader for FsSettingsLoader {
    async fn load(&self, install_path: &Path, workspace_dir: &Path, local: bool) -> SettingsBundle {
        let mut bundle = SettingsBundle::default();
        for slot in SettingsSlot::ALL {
            let path = slot.path(install_path, workspace_dir, local);
            match read_settings_file(&path).await {
                Ok(Some(text)) => bundle.set(slot, text),
                Ok(None) => tracing::debug!(slot = slot.name(), path = %path.display(), "no settings file"),
                Err(e) => tracing::warn!(slot = slot.name(), error = %e, "ignoring unreadable settings"),
            }
        }
        bundle
    }
}

/// Read one settings file. `Ok(None)` means the file does not exist.
///
/// # Errors
/// Returns [`SettingsError::Io`] for any failure other than absence.
pub async fn read_settings_file(path: &Path) -> Result<Option<String>, SettingsError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SettingsError::Io { path: path.to_path_buf(), source }),
    }
}
