//! Client configuration profile selection.

use std::fmt;

use serde::Serialize;

/// Profile used for writable sessions when nothing else applies.
pub const DEFAULT_PROFILE: &str = "ether-camp-server";

/// Profile used for read-only sessions when nothing else applies.
pub const READONLY_PROFILE: &str = "ether-camp-server-ro";

/// Suffix appended to every profile name in local mode.
pub const LOCAL_SUFFIX: &str = "-local";

/// Name of the configuration module that builds a client configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProfileName(String);

impl ProfileName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Profile explicitly requested through query parameters.
///
/// `workspacetype=<t>` requests `workspace-<t>`; otherwise a non-empty
/// `devel` requests `devel`.
#[must_use]
pub fn requested_profile(workspace_type: Option<&str>, devel: Option<&str>) -> Option<String> {
    if let Some(kind) = non_empty(workspace_type) {
        return Some(format!("workspace-{kind}"));
    }
    non_empty(devel).map(|_| "devel".to_owned())
}

/// Choose the profile name. First match wins:
///
/// 1. the explicit `requested` name
/// 2. `workspace-<workspace_type>`
/// 3. the server-side `client_config` default
/// 4. [`READONLY_PROFILE`] when `readonly`
/// 5. [`DEFAULT_PROFILE`]
///
/// In `local` mode [`LOCAL_SUFFIX`] is appended to the chosen name.
/// Empty strings count as unset.
#[must_use]
pub fn select_profile(
    requested: Option<&str>,
    workspace_type: Option<&str>,
    client_config: Option<&str>,
    readonly: bool,
    local: bool,
) -> ProfileName {
    let mut name = if let Some(name) = non_empty(requested) {
        name.to_owned()
    } else if let Some(kind) = non_empty(workspace_type) {
        format!("workspace-{kind}")
    } else if let Some(name) = non_empty(client_config) {
        name.to_owned()
    } else if readonly {
        READONLY_PROFILE.to_owned()
    } else {
        DEFAULT_PROFILE.to_owned()
    };

    if local {
        name.push_str(LOCAL_SUFFIX);
    }
    ProfileName(name)
}
