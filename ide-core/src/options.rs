//! Process-wide base configuration.
//!
//! Loaded once at startup and shared read-only. Every type here owns its
//! data outright, so `clone()` yields a fully independent deep copy that a
//! request may modify freely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::identity::ExternalId;
use crate::profile::{select_profile, ProfileName};
use crate::settings::SettingsBundle;

/// Deployment-level settings plus the client options template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseConfig {
    /// Default workspace directory served by this process.
    pub workspace_dir: PathBuf,
    #[serde(default)]
    pub install_path: Option<PathBuf>,
    /// Overrides `install_path` as the settings root when set.
    #[serde(default)]
    pub setting_dir: Option<PathBuf>,
    #[serde(default)]
    pub workspace_type: Option<String>,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub packed: bool,
    /// Deployment switch for collaborative editing.
    #[serde(default)]
    pub collab: bool,
    /// Redirect `/` straight to the IDE instead of the places page.
    #[serde(default)]
    pub sdk: bool,
    #[serde(default)]
    pub version: Option<String>,
    pub options: ClientOptions,
}

/// Options handed to the client configuration profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
    /// Base URL of the identity service.
    pub api_url: String,
    pub cdn: CdnOptions,
    /// Server-side default profile name.
    #[serde(rename = "client_config", default, skip_serializing_if = "Option::is_none")]
    pub client_config: Option<String>,
    pub extend_options: ExtendOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extend_token: Option<String>,
    #[serde(default)]
    pub collab: bool,
    #[serde(default)]
    pub packed: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_prefix: Option<String>,
    #[serde(rename = "CORSWorkerPrefix", default, skip_serializing_if = "Option::is_none")]
    pub cors_worker_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsBundle>,
    /// Options this gateway does not interpret; passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdnOptions {
    pub version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Session context embedded in the client options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendOptions {
    #[serde(default)]
    pub user: UserRecord,
    pub project: ProjectRecord,
    #[serde(default)]
    pub readonly: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExternalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ExternalId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BaseConfig {
    /// Parse and validate a base configuration document.
    ///
    /// # Errors
    /// Returns [`CoreError::Parse`] on malformed JSON and
    /// [`CoreError::InvalidConfig`] if a required field is empty.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields every request depends on.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidConfig`] naming the first empty field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.workspace_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig {
                field: "workspaceDir",
                reason: "must not be empty".to_owned(),
            });
        }
        if self.options.api_url.trim().is_empty() {
            return Err(CoreError::InvalidConfig {
                field: "options.apiUrl",
                reason: "must not be empty".to_owned(),
            });
        }
        if self.options.cdn.version.is_empty() {
            return Err(CoreError::InvalidConfig {
                field: "options.cdn.version",
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }

    /// Directory holding `user.settings`: `setting_dir`, else
    /// `install_path`, else the current directory.
    #[must_use]
    pub fn settings_root(&self) -> &Path {
        self.setting_dir
            .as_deref()
            .or(self.install_path.as_deref())
            .unwrap_or_else(|| Path::new(""))
    }

    /// Profile for a request that asked for `requested` (if anything),
    /// made on behalf of a user whose session is `readonly`.
    #[must_use]
    pub fn profile_name(&self, requested: Option<&str>, readonly: bool) -> ProfileName {
        select_profile(
            requested,
            self.workspace_type.as_deref(),
            self.options.client_config.as_deref(),
            readonly,
            self.local,
        )
    }

    /// Project whose membership the identity service checks.
    #[must_use]
    pub fn project_id(&self) -> &ExternalId {
        &self.options.extend_options.project.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"{
        "workspaceDir": "/home/ubuntu/workspace",
        "installPath": "/opt/ide",
        "collab": true,
        "options": {
            "apiUrl": "http://identity.local/api",
            "cdn": {"version": "v42"},
            "port": 8080,
            "extendOptions": {
                "user": {"id": 0, "name": "anonymous"},
                "project": {"id": 7}
            }
        }
    }"#;

    #[test]
    fn base_config_parses_and_keeps_unknown_options() {
        let config = match BaseConfig::from_json(BASE) {
            Ok(c) => c,
            Err(e) => panic!("base config must parse: {e}"),
        };
        assert!(config.collab);
        assert_eq!(config.project_id(), &ExternalId::Number(7));
        assert_eq!(config.options.extra.get("port"), Some(&Value::from(8080)));
        assert_eq!(config.settings_root(), Path::new("/opt/ide"));
    }

    #[test]
    fn setting_dir_takes_precedence_over_install_path() {
        let mut config = match BaseConfig::from_json(BASE) {
            Ok(c) => c,
            Err(e) => panic!("base config must parse: {e}"),
        };
        config.setting_dir = Some(PathBuf::from("/etc/ide"));
        assert_eq!(config.settings_root(), Path::new("/etc/ide"));
        config.setting_dir = None;
        config.install_path = None;
        assert_eq!(config.settings_root(), Path::new(""));
    }

    #[test]
    fn empty_api_url_is_rejected() {
        let text = BASE.replace("http://identity.local/api", " ");
        assert!(matches!(
            BaseConfig::from_json(&text),
            Err(CoreError::InvalidConfig { field: "options.apiUrl", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(BaseConfig::from_json("{"), Err(CoreError::Parse(_))));
    }

    #[test]
    fn profile_follows_session_readonly() {
        let mut config = match BaseConfig::from_json(BASE) {
            Ok(c) => c,
            Err(e) => panic!("base config must parse: {e}"),
        };
        assert_eq!(config.profile_name(None, true).as_str(), "ether-camp-server-ro");
        assert_eq!(config.profile_name(None, false).as_str(), "ether-camp-server");
        config.local = true;
        assert_eq!(config.profile_name(None, true).as_str(), "ether-camp-server-ro-local");
    }

    #[test]
    fn serialized_options_use_client_field_names() {
        let mut config = match BaseConfig::from_json(BASE) {
            Ok(c) => c,
            Err(e) => panic!("base config must parse: {e}"),
        };
        config.options.cors_worker_prefix = Some(String::new());
        let value = match serde_json::to_value(&config.options) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(value["apiUrl"], "http://identity.local/api");
        assert_eq!(value["CORSWorkerPrefix"], "");
        assert_eq!(value["extendOptions"]["project"]["id"], 7);
        assert_eq!(value["port"], 8080);
    }
}
