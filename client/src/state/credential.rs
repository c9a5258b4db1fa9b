//! Bearer credential and its durable, origin-scoped store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The stored credential is the sole source of truth for "signed in" across
//! reloads: a missing key means anonymous. Only the session manager writes it.

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::fmt;

/// Opaque bearer token issued by the server. Never parsed, only forwarded.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a server-issued token. Blank tokens are not credentials.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() { None } else { Some(Self(token)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Holds at most one credential.
///
/// Storage failures are swallowed: an unreadable store behaves as empty.
pub trait CredentialStore {
    fn get(&self) -> Option<Credential>;
    fn set(&self, credential: &Credential);
    fn clear(&self);
}

/// `localStorage`-backed store used by the browser build.
#[derive(Clone, Copy, Debug)]
pub struct BrowserCredentialStore {
    key: &'static str,
}

impl BrowserCredentialStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    #[cfg(feature = "hydrate")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl CredentialStore for BrowserCredentialStore {
    fn get(&self) -> Option<Credential> {
        #[cfg(feature = "hydrate")]
        {
            let raw = Self::storage()?.get_item(self.key).ok().flatten()?;
            Credential::new(raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = self.key;
            None
        }
    }

    fn set(&self, credential: &Credential) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = Self::storage() else {
                log::warn!("credential: localStorage unavailable, session will not persist");
                return;
            };
            let _ = storage.set_item(self.key, credential.as_str());
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credential;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = Self::storage() {
                let _ = storage.remove_item(self.key);
            }
        }
    }
}
