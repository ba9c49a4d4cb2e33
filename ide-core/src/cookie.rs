//! Session cookie scoping.
//!
//! The session cookie is shared across every IDE subdomain, so its domain
//! attribute is derived from the request `Host` header rather than taken
//! verbatim.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Name of the session cookie read on input and written on token change.
pub const SESSION_COOKIE: &str = "sessionId";

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static IPV4_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(:\d+)?$").expect("valid IPv4 host pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static DOTTED_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-]+(\.[A-Za-z0-9_\-.]+)(:\d+)?$").expect("valid dotted host pattern")
});

/// How a `Host` header was interpreted for cookie scoping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieScope {
    /// An IPv4 address; the port is dropped.
    Address(String),
    /// A dotted name; the leading label and port are dropped,
    /// e.g. `ide.example.com:8080` scopes to `.example.com`.
    ParentDomain(String),
    /// Anything else is used unchanged.
    Verbatim(String),
}

impl CookieScope {
    /// The domain attribute value for this scope.
    #[must_use]
    pub fn domain(&self) -> &str {
        match self {
            Self::Address(d) | Self::ParentDomain(d) | Self::Verbatim(d) => d,
        }
    }

    /// Consume the scope and return its domain attribute value.
    #[must_use]
    pub fn into_domain(self) -> String {
        match self {
            Self::Address(d) | Self::ParentDomain(d) | Self::Verbatim(d) => d,
        }
    }
}

/// Classify a `Host` header value for cookie scoping.
#[must_use]
pub fn classify_host(host: &str) -> CookieScope {
    if let Some(caps) = IPV4_HOST.captures(host) {
        return CookieScope::Address(caps[1].to_owned());
    }
    if let Some(caps) = DOTTED_HOST.captures(host) {
        return CookieScope::ParentDomain(caps[1].to_owned());
    }
    CookieScope::Verbatim(host.to_owned())
}

/// Map a request `Host` header to the cookie domain attribute.
#[must_use]
pub fn derive_cookie_domain(host: &str) -> String {
    classify_host(host).into_domain()
}

/// A `Set-Cookie` instruction for the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CookieDirective {
    pub name: &'static str,
    pub value: String,
    pub path: &'static str,
    pub domain: String,
}

impl CookieDirective {
    /// Build the session cookie for `token`, scoped from the request host.
    #[must_use]
    pub fn session(token: impl Into<String>, host: &str) -> Self {
        Self {
            name: SESSION_COOKIE,
            value: token.into(),
            path: "/",
            domain: derive_cookie_domain(host),
        }
    }

    /// Return a directive only when the authoritative token differs from
    /// the one the browser already holds.
    #[must_use]
    pub fn when_changed(token: &str, incoming_cookie: Option<&str>, host: &str) -> Option<Self> {
        if incoming_cookie == Some(token) {
            return None;
        }
        Some(Self::session(token, host))
    }
}

impl fmt::Display for CookieDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; path={}; domain={}",
            self.name, self.value, self.path, self.domain
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_with_port_drops_port() {
        assert_eq!(derive_cookie_domain("10.0.0.5:3000"), "10.0.0.5");
    }

    #[test]
    fn ipv4_without_port_is_unchanged() {
        assert_eq!(derive_cookie_domain("10.0.0.5"), "10.0.0.5");
        assert_eq!(classify_host("10.0.0.5"), CookieScope::Address("10.0.0.5".to_owned()));
    }

    #[test]
    fn subdomain_with_port_scopes_to_parent() {
        assert_eq!(derive_cookie_domain("ide.example.com:8080"), ".example.com");
    }

    #[test]
    fn dotted_names_drop_first_label() {
        assert_eq!(derive_cookie_domain("a.b.c"), ".b.c");
        assert_eq!(derive_cookie_domain("example.com"), ".com");
        assert_eq!(derive_cookie_domain("someide.ether.camp:8080"), ".ether.camp");
    }

    #[test]
    fn single_label_host_falls_back_verbatim() {
        assert_eq!(
            classify_host("localhost:3000"),
            CookieScope::Verbatim("localhost:3000".to_owned())
        );
        assert_eq!(derive_cookie_domain("localhost"), "localhost");
    }

    #[test]
    fn unparseable_hosts_fall_back_verbatim() {
        for host in ["", "[::1]:8080", "ide.example.com:", "bad host.com", "ide.example.com:80x"] {
            assert_eq!(
                classify_host(host),
                CookieScope::Verbatim(host.to_owned()),
                "host {host:?} must be returned unchanged"
            );
        }
    }

    #[test]
    fn five_octet_address_is_treated_as_dotted_name() {
        assert_eq!(derive_cookie_domain("1.2.3.4.5"), ".2.3.4.5");
    }

    #[test]
    fn directive_formats_as_set_cookie_value() {
        let directive = CookieDirective::session("T1", "ide.example.com:8080");
        assert_eq!(directive.to_string(), "sessionId=T1; path=/; domain=.example.com");
    }

    #[test]
    fn directive_emitted_only_when_token_changes() {
        assert!(CookieDirective::when_changed("T1", Some("T0"), "a.b.c").is_some());
        assert!(CookieDirective::when_changed("T1", None, "a.b.c").is_some());
        assert!(CookieDirective::when_changed("T1", Some("T1"), "a.b.c").is_none());
    }

    proptest::proptest! {
        #[test]
        fn proptest_ipv4_always_strips_port(
            a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255,
            port in proptest::option::of(1u16..=65535),
        ) {
            let addr = format!("{a}.{b}.{c}.{d}");
            let host = match port {
                Some(p) => format!("{addr}:{p}"),
                None => addr.clone(),
            };
            proptest::prop_assert_eq!(derive_cookie_domain(&host), addr);
        }

        #[test]
        fn proptest_dotted_name_keeps_suffix(
            first in "[a-z][a-z0-9-]{0,10}",
            rest in proptest::collection::vec("[a-z][a-z0-9]{0,8}", 1..4usize),
            port in proptest::option::of(1u16..=65535),
        ) {
            let suffix = format!(".{}", rest.join("."));
            let mut host = format!("{first}{suffix}");
            if let Some(p) = port {
                host.push_str(&format!(":{p}"));
            }
            proptest::prop_assert_eq!(derive_cookie_domain(&host), suffix);
        }

        #[test]
        fn proptest_derive_never_panics(host in ".{0,64}") {
            let _ = derive_cookie_domain(&host);
        }
    }
}
