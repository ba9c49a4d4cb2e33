//! Layered settings blobs attached to the client configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Raw text of the three settings layers. Missing layers are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsBundle {
    pub user: String,
    pub project: String,
    pub state: String,
}

/// One of the three settings layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsSlot {
    User,
    Project,
    State,
}

impl SettingsSlot {
    pub const ALL: [Self; 3] = [Self::User, Self::Project, Self::State];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::State => "state",
        }
    }

    /// Location of this layer on disk.
    ///
    /// User settings always live under `install_path`; project and state
    /// settings live under the `.c9` directory of `install_path` in local
    /// mode and of `workspace_dir` otherwise.
    #[must_use]
    pub fn path(self, install_path: &Path, workspace_dir: &Path, local: bool) -> PathBuf {
        let root = if local { install_path } else { workspace_dir };
        match self {
            Self::User => install_path.join("user.settings"),
            Self::Project => root.join(".c9").join("project.settings"),
            Self::State => root.join(".c9").join("state.settings"),
        }
    }
}

impl SettingsBundle {
    /// Store `text` into the given slot.
    pub fn set(&mut self, slot: SettingsSlot, text: String) {
        match slot {
            SettingsSlot::User => self.user = text,
            SettingsSlot::Project => self.project = text,
            SettingsSlot::State => self.state = text,
        }
    }
}
