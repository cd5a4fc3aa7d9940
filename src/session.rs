//! Logged-in session state.
//!
//! Everything the pipeline and API client need to know about "who is
//! using this" lives in one value that gets passed around explicitly —
//! username, bearer token, server URL and the SSL-verify choice.

use serde::{Deserialize, Serialize};

/// An authenticated (or authenticating) connection to one pod.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Username on the pod; the `current_user` identity the decoder uses
    /// to filter self-mentions.
    pub username: String,
    /// API token from `/api/v1/auth`. Empty until login succeeds.
    pub token: String,
    /// Normalized base URL of the pod, no trailing slash.
    pub server_url: String,
    /// Verify TLS certificates. When off, the client talks plain `http`.
    pub verify_ssl: bool,
}

impl Session {
    /// Create a not-yet-authenticated session for `server_url`.
    pub fn new(username: &str, server_url: &str, verify_ssl: bool) -> Self {
        Self {
            username: username.to_string(),
            token: String::new(),
            server_url: normalize_server_url(server_url, verify_ssl),
            verify_ssl,
        }
    }

    /// Has a token been obtained?
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Normalize a user-entered server URL: trim the trailing slash and force
/// the scheme to match the SSL-verify choice (`https` when verifying,
/// `http` when not).
pub fn normalize_server_url(url: &str, verify_ssl: bool) -> String {
    let url = url.trim_end_matches('/');

    if verify_ssl {
        if let Some(rest) = url.strip_prefix("http://") {
            tracing::info!("SSL verify is on but URL is http, forcing https");
            return format!("https://{rest}");
        }
    } else if let Some(rest) = url.strip_prefix("https://") {
        tracing::info!("SSL verify is off but URL is https, forcing http");
        return format!("http://{rest}");
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        assert_eq!(
            normalize_server_url("https://pod.example/", true),
            "https://pod.example"
        );
    }

    #[test]
    fn forces_https_when_verifying() {
        assert_eq!(
            normalize_server_url("http://pod.example", true),
            "https://pod.example"
        );
    }

    #[test]
    fn forces_http_when_not_verifying() {
        assert_eq!(
            normalize_server_url("https://pod.example", false),
            "http://pod.example"
        );
    }

    #[test]
    fn matching_scheme_is_untouched() {
        assert_eq!(
            normalize_server_url("https://pod.example", true),
            "https://pod.example"
        );
        assert_eq!(
            normalize_server_url("http://pod.example", false),
            "http://pod.example"
        );
    }

    #[test]
    fn session_tracks_authentication() {
        let mut session = Session::new("alice", "https://pod.example/", true);
        assert!(!session.is_authenticated());
        session.token = "t".into();
        assert!(session.is_authenticated());
    }
}
