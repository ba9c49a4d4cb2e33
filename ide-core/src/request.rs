//! Per-request inputs: query parameters, session token and overrides.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::profile::requested_profile;

/// Raw query parameters accepted by `GET /ide.html`.
///
/// Every value is kept as text; numeric flags are coerced by
/// [`numeric_flag`] so that malformed input reads as "not set".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdeQuery {
    pub workspacetype: Option<String>,
    pub devel: Option<String>,
    pub collab: Option<String>,
    pub nocollab: Option<String>,
    pub debug: Option<String>,
    pub packed: Option<String>,
    pub token: Option<String>,
    pub w: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    pub access_token: Option<String>,
}

/// Opaque session token presented by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pick the session token: query `sessionId`, then query `access_token`,
/// then the `sessionId` cookie. Empty values are skipped.
#[must_use]
pub fn resolve_token(
    query_session_id: Option<&str>,
    query_access_token: Option<&str>,
    cookie_session_id: Option<&str>,
) -> Option<SessionToken> {
    [query_session_id, query_access_token, cookie_session_id]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .map(SessionToken::new)
}

/// `true` only if `value` is an integer literal equal to `expected`.
#[must_use]
pub fn numeric_flag(value: Option<&str>, expected: i64) -> bool {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .is_some_and(|n| n == expected)
}

/// Values a single request layers on top of the base configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOverrides {
    /// Profile requested via `workspacetype` or `devel`.
    pub requested_profile: Option<String>,
    /// Workspace directory override (`w`).
    pub workspace_dir: Option<PathBuf>,
    /// `collab=0`
    pub collab_off: bool,
    /// `nocollab=1`
    pub nocollab_on: bool,
    /// `packed=1`
    pub packed: bool,
    /// `debug` present with any value.
    pub debug: bool,
}

impl RequestOverrides {
    #[must_use]
    pub fn from_query(query: &IdeQuery) -> Self {
        Self {
            requested_profile: requested_profile(
                query.workspacetype.as_deref(),
                query.devel.as_deref(),
            ),
            workspace_dir: query
                .w
                .as_deref()
                .filter(|w| !w.is_empty())
                .map(PathBuf::from),
            collab_off: numeric_flag(query.collab.as_deref(), 0),
            nocollab_on: numeric_flag(query.nocollab.as_deref(), 1),
            packed: numeric_flag(query.packed.as_deref(), 1),
            debug: query.debug.is_some(),
        }
    }

    /// Collaboration is on only if the deployment enables it and neither
    /// opt-out fired.
    #[must_use]
    pub fn collab(&self, enabled: bool) -> bool {
        enabled && !self.collab_off && !self.nocollab_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> IdeQuery {
        let value = serde_json::Value::Object(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), serde_json::Value::String((*v).to_owned())))
                .collect(),
        );
        match serde_json::from_value(value) {
            Ok(q) => q,
            Err(e) => panic!("query must deserialize: {e}"),
        }
    }

    #[test]
    fn token_precedence_query_then_access_token_then_cookie() {
        let t = resolve_token(Some("q"), Some("a"), Some("c"));
        assert_eq!(t, Some(SessionToken::new("q")));
        let t = resolve_token(None, Some("a"), Some("c"));
        assert_eq!(t, Some(SessionToken::new("a")));
        let t = resolve_token(Some(""), None, Some("c"));
        assert_eq!(t, Some(SessionToken::new("c")));
        assert_eq!(resolve_token(None, None, None), None);
    }

    #[test]
    fn numeric_flag_rejects_malformed_values() {
        assert!(numeric_flag(Some("1"), 1));
        assert!(numeric_flag(Some(" 1 "), 1));
        assert!(!numeric_flag(Some("abc"), 1));
        assert!(!numeric_flag(Some(""), 0));
        assert!(!numeric_flag(Some("1.0"), 1));
        assert!(!numeric_flag(None, 1));
    }

    #[test]
    fn collab_truth_table() {
        for enabled in [false, true] {
            for collab in [None, Some("0"), Some("1"), Some("abc")] {
                for nocollab in [None, Some("0"), Some("1"), Some("abc")] {
                    let q = IdeQuery {
                        collab: collab.map(str::to_owned),
                        nocollab: nocollab.map(str::to_owned),
                        ..IdeQuery::default()
                    };
                    let expected = enabled && collab != Some("0") && nocollab != Some("1");
                    assert_eq!(
                        RequestOverrides::from_query(&q).collab(enabled),
                        expected,
                        "enabled={enabled} collab={collab:?} nocollab={nocollab:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn debug_is_presence_only() {
        assert!(RequestOverrides::from_query(&query(&[("debug", "")])).debug);
        assert!(RequestOverrides::from_query(&query(&[("debug", "0")])).debug);
        assert!(!RequestOverrides::from_query(&query(&[])).debug);
    }

    #[test]
    fn overrides_from_query_collects_every_field() {
        let q = query(&[("workspacetype", "ruby"), ("w", "/tmp/ws"), ("packed", "1")]);
        let o = RequestOverrides::from_query(&q);
        assert_eq!(o.requested_profile.as_deref(), Some("workspace-ruby"));
        assert_eq!(o.workspace_dir, Some(PathBuf::from("/tmp/ws")));
        assert!(o.packed);
        assert!(!o.debug);
    }

    #[test]
    fn empty_workspace_override_is_ignored() {
        let o = RequestOverrides::from_query(&query(&[("w", "")]));
        assert!(o.workspace_dir.is_none());
    }
}
