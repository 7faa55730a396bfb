use std::{
    fs,
    path::PathBuf,
    sync::{Arc, RwLock},
};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::api::Backend;
use crate::error::{Error, Result};
use crate::models::{Role, User};

/// On-disk shape of the persisted credential. Only the token survives a
/// restart; the user record is re-fetched on restore.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
}

#[derive(Debug, Default, Clone)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// UI-facing view of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub user: Option<User>,
}

struct SessionInner {
    backend: Arc<dyn Backend>,
    path: PathBuf,
    state: RwLock<SessionState>,
    // Guards the verify exchange: a second attempt while one is in
    // flight is rejected rather than interleaved.
    verify_gate: Mutex<()>,
}

/// Owns the access token and the identity behind it.
///
/// `user` is set iff `token` is set and has been validated against the
/// server at least once; the pair is always written under one lock so a
/// reader can never observe a token without its actor or vice versa.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    pub fn new(path: PathBuf, backend: Arc<dyn Backend>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                backend,
                path,
                state: RwLock::new(SessionState::default()),
                verify_gate: Mutex::new(()),
            }),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.read().unwrap().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.read().unwrap().user.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.inner.state.read().unwrap().user.as_ref().map(|u| u.role)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.state.read().unwrap();
        SessionSnapshot {
            authenticated: state.user.is_some(),
            user: state.user.clone(),
        }
    }

    /// Ask the server to send a one-time code. Leaves the session
    /// untouched.
    pub async fn request_code(&self, email: &str) -> Result<()> {
        let email = normalize_email(email)?;
        self.inner.backend.request_login_code(&email).await
    }

    /// Exchange the one-time code for a token and resolve the account
    /// behind it. State is written only after both calls succeed, so a
    /// wrong code never leaves a half-built session.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<User> {
        let _gate = self.inner.verify_gate.try_lock().map_err(|_| {
            Error::validation("a login verification is already in progress")
        })?;

        let email = normalize_email(email)?;
        if code.trim().is_empty() {
            return Err(Error::validation("login code must not be empty"));
        }

        let token = self
            .inner
            .backend
            .verify_login_code(&email, code.trim())
            .await?;
        let user = self.inner.backend.current_user(&token).await?;

        {
            let mut state = self.inner.state.write().unwrap();
            state.token = Some(token.clone());
            state.user = Some(user.clone());
        }
        self.persist(&token);

        info!("signed in as {} ({})", user.email, user.role.as_str());
        Ok(user)
    }

    /// Re-validate a token left over from a previous run. Any failure
    /// (missing file, revoked token, unreachable server) degrades to
    /// anonymous without surfacing an error.
    pub async fn restore(&self) -> SessionSnapshot {
        let stored = match fs::read_to_string(&self.inner.path) {
            Ok(contents) => serde_json::from_str::<StoredCredential>(&contents).ok(),
            Err(_) => None,
        };

        let Some(StoredCredential { token }) = stored else {
            return self.snapshot();
        };

        match self.inner.backend.current_user(&token).await {
            Ok(user) => {
                let mut state = self.inner.state.write().unwrap();
                state.token = Some(token);
                state.user = Some(user);
            }
            Err(err) => {
                warn!("stored session rejected, starting anonymous: {err}");
                self.clear();
            }
        }

        self.snapshot()
    }

    /// Drop the credential and its persisted copy unconditionally.
    pub fn logout(&self) {
        self.clear();
        info!("signed out");
    }

    fn clear(&self) {
        {
            let mut state = self.inner.state.write().unwrap();
            state.token = None;
            state.user = None;
        }
        if self.inner.path.exists() {
            if let Err(err) = fs::remove_file(&self.inner.path) {
                warn!("failed to remove stored credential: {err}");
            }
        }
    }

    // Persistence failures only cost the user a re-login on next start.
    fn persist(&self, token: &str) {
        let stored = StoredCredential {
            token: token.to_string(),
        };
        let serialized = match serde_json::to_string_pretty(&stored) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!("failed to serialize credential: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.inner.path, serialized) {
            warn!(
                "failed to persist credential to {}: {err}",
                self.inner.path.display()
            );
        }
    }
}

/// Minimal local check: non-empty, with a user and a domain part. The
/// server remains the authority on whether the account exists.
fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.'),
        None => false,
    };
    if !valid {
        return Err(Error::validation("enter a valid email address"));
    }
    Ok(email)
}
