//! Per-session API credentials.
//!
//! Over stdio there is one session and the key comes from configuration.
//! Over SSE every connection gets its own [`SessionCredentials`]; each POST
//! that carries `Authorization: Bearer <token>` replaces the session key, so
//! one process can forward calls for many callers without mixing their keys.

use std::sync::Arc;
use tokio::sync::RwLock;

/// API key holder shared between a transport session and its tools.
#[derive(Clone, Default)]
pub struct SessionCredentials {
    /// Key from configuration, used when the session supplied none.
    fallback: Option<Arc<str>>,

    /// Key most recently supplied by the client for this session.
    session: Arc<RwLock<Option<String>>>,
}

impl SessionCredentials {
    /// Create credentials that fall back to the given configured key.
    pub fn new(fallback: Option<String>) -> Self {
        Self {
            fallback: fallback.filter(|k| !k.is_empty()).map(Arc::from),
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Store a client-supplied bearer token for this session.
    pub async fn set_bearer(&self, token: impl Into<String>) {
        *self.session.write().await = Some(token.into());
    }

    /// Resolve the key to use for the next upstream call.
    pub async fn api_key(&self) -> Option<String> {
        if let Some(key) = self.session.read().await.as_ref() {
            return Some(key.clone());
        }
        self.fallback.as_deref().map(str::to_string)
    }

    /// Whether the client has supplied its own key on this session.
    pub async fn has_session_key(&self) -> bool {
        self.session.read().await.is_some()
    }
}

impl std::fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("fallback", &self.fallback.as_ref().map(|_| "[REDACTED]"))
            .field("session", &"[REDACTED]")
            .finish()
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Only the `Bearer` scheme is accepted (case-insensitive); an empty token
/// yields `None`.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_used_without_session_key() {
        let creds = SessionCredentials::new(Some("configured".to_string()));
        assert_eq!(creds.api_key().await.as_deref(), Some("configured"));
        assert!(!creds.has_session_key().await);
    }

    #[tokio::test]
    async fn test_session_key_wins_and_latest_replaces() {
        let creds = SessionCredentials::new(Some("configured".to_string()));
        creds.set_bearer("first").await;
        assert_eq!(creds.api_key().await.as_deref(), Some("first"));
        creds.set_bearer("second").await;
        assert_eq!(creds.api_key().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_clones_share_session_key() {
        let creds = SessionCredentials::new(None);
        let shared = creds.clone();
        assert_eq!(shared.api_key().await, None);
        creds.set_bearer("token").await;
        assert_eq!(shared.api_key().await.as_deref(), Some("token"));
    }

    #[tokio::test]
    async fn test_empty_fallback_is_ignored() {
        let creds = SessionCredentials::new(Some(String::new()));
        assert_eq!(creds.api_key().await, None);
    }

    #[tokio::test]
    async fn test_debug_redacts_keys() {
        let creds = SessionCredentials::new(Some("super_secret_key".to_string()));
        creds.set_bearer("another_secret").await;
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(!debug_str.contains("another_secret"));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("bearer  abc123 "), Some("abc123"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token(""), None);
    }
}
