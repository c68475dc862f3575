//! Session management: the persisted token pair and the in-memory identity.
//!
//! The token pair is the only client-side persistence; the session itself is
//! reconstructed from it on startup by a single identity fetch. A failed
//! startup validation clears the stored credentials and leaves the session
//! anonymous; that decision is local and final, never retried.

use crate::api::{ApiClient, RequestSigner};
use crate::error::ApiError;
use crate::models::{TokenPair, User};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Persisted access/refresh pair, cached in memory after the first load.
///
/// Writes go through a temp file and rename so both strings change
/// atomically; `clear` removes the file and the cache together.
pub struct TokenStore {
    path: PathBuf,
    cached: Mutex<Option<TokenPair>>,
}

impl TokenStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).ok(),
            Err(_) => None,
        };
        Self {
            path,
            cached: Mutex::new(cached),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.cached
            .lock()
            .expect("token cache poisoned")
            .as_ref()
            .map(|pair| pair.access.clone())
    }

    pub fn save(&self, pair: TokenPair) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string(&pair).expect("token pair serializes");
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        *self.cached.lock().expect("token cache poisoned") = Some(pair);
        Ok(())
    }

    /// Remove both tokens. Clearing an already-empty store is a no-op.
    pub fn clear(&self) -> io::Result<()> {
        *self.cached.lock().expect("token cache poisoned") = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RequestSigner for TokenStore {
    fn bearer_token(&self) -> Option<String> {
        self.access_token()
    }
}

/// Authentication state as the views should treat it.
///
/// `Unknown` means the startup identity check is still outstanding; views
/// must render it as loading, not as anonymous, so protected routes do not
/// redirect prematurely.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Session::Unknown)
    }
}

/// Owns the login/logout/startup-validation flow.
pub struct AuthGate {
    api: ApiClient,
    store: std::sync::Arc<TokenStore>,
    session: Session,
}

impl AuthGate {
    pub fn new(api: ApiClient, store: std::sync::Arc<TokenStore>) -> Self {
        Self {
            api,
            store,
            session: Session::Unknown,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Exchange credentials for a token pair, persist it, and fetch the
    /// identity record. Invalid credentials persist nothing; if the identity
    /// fetch fails after the exchange, the stored pair is left for the next
    /// startup validation to settle.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User, ApiError> {
        let pair = self.api.obtain_token(username, password).await?;
        self.store.save(pair)?;
        let user = self.api.current_user().await?;
        self.session = Session::Authenticated(user);
        match &self.session {
            Session::Authenticated(user) => Ok(user),
            _ => unreachable!(),
        }
    }

    /// Drop the in-memory identity and the persisted tokens, synchronously.
    pub fn logout(&mut self) {
        self.session = Session::Anonymous;
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear token store: {e}");
        }
    }

    /// Startup check: with a persisted token, one identity fetch decides the
    /// session. Failure clears all persisted credentials and settles on
    /// anonymous.
    pub async fn bootstrap(&mut self) -> &Session {
        if self.store.access_token().is_none() {
            self.session = Session::Anonymous;
            return &self.session;
        }

        match self.api.current_user().await {
            Ok(user) => {
                self.session = Session::Authenticated(user);
            }
            Err(e) => {
                tracing::debug!("startup token validation failed: {e}");
                if let Err(e) = self.store.clear() {
                    tracing::warn!("failed to clear token store: {e}");
                }
                self.session = Session::Anonymous;
            }
        }
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NoAuth;
    use std::sync::Arc;

    fn pair() -> TokenPair {
        TokenPair {
            access: "access-token".to_string(),
            refresh: "refresh-token".to_string(),
        }
    }

    #[test]
    fn save_then_reopen_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let store = TokenStore::open(&path);
        assert!(store.access_token().is_none());
        store.save(pair()).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("access-token"));

        let reopened = TokenStore::open(&path);
        assert_eq!(reopened.access_token().as_deref(), Some("access-token"));
    }

    #[test]
    fn clear_removes_both_tokens_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let store = TokenStore::open(&path);
        store.save(pair()).unwrap();
        store.clear().unwrap();
        assert!(store.access_token().is_none());
        assert!(!path.exists());

        // Clearing again must not error.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_token_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "not json").unwrap();

        let store = TokenStore::open(&path);
        assert!(store.access_token().is_none());
    }

    #[test]
    fn session_starts_unknown() {
        let session = Session::default();
        assert!(!session.is_settled());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn bootstrap_without_token_settles_anonymous_without_a_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(TokenStore::open(dir.path().join("tokens.json")));
        // Unroutable base URL: if bootstrap tried to fetch, it would error
        // slowly instead of settling immediately.
        let api = ApiClient::new("http://127.0.0.1:1", Arc::new(NoAuth));
        let mut gate = AuthGate::new(api, store);

        assert_eq!(gate.bootstrap().await, &Session::Anonymous);
        assert!(gate.session().is_settled());
    }

    #[tokio::test]
    async fn logout_clears_store_and_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = Arc::new(TokenStore::open(&path));
        store.save(pair()).unwrap();

        let api = ApiClient::new("http://127.0.0.1:1", Arc::new(NoAuth));
        let mut gate = AuthGate::new(api, store.clone());
        gate.logout();

        assert_eq!(gate.session(), &Session::Anonymous);
        assert!(store.access_token().is_none());
        assert!(!path.exists());
    }
}
