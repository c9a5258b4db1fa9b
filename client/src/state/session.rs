//! Session state snapshot shared with guards and the navigation shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionManager` owns the live state and publishes clones of it; the view
//! tree holds the latest snapshot in an `RwSignal<SessionState>` context and
//! only ever reads it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::credential::Credential;
use crate::net::types::User;

/// Lifecycle phase of the browser session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Before the credential store has been consulted.
    #[default]
    Bootstrapping,
    Anonymous,
    /// Login or registration request in flight.
    Authenticating,
    /// Credential held, identity not yet confirmed by `/users/me`.
    Resolving,
    Authenticated,
}

/// Identity, credential, and request flags for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Present only while authenticated.
    pub identity: Option<User>,
    pub credential: Option<Credential>,
    /// True while identity resolution or login/registration is in flight.
    pub loading: bool,
    /// True while a profile update or avatar upload is in flight.
    pub saving: bool,
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Bootstrapping,
            identity: None,
            credential: None,
            loading: true,
            saving: false,
            error: None,
        }
    }
}

impl SessionState {
    /// Initial state for a freshly constructed manager.
    pub fn initial(credential: Option<Credential>) -> Self {
        let phase = if credential.is_some() { SessionPhase::Resolving } else { SessionPhase::Anonymous };
        Self {
            phase,
            loading: phase == SessionPhase::Resolving,
            credential,
            ..Self::default()
        }
    }

    pub fn anonymous(error: Option<String>) -> Self {
        Self { phase: SessionPhase::Anonymous, loading: false, error, ..Self::default() }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// `identity ⇒ credential`, and `loading` matches the in-flight phases.
    pub fn is_consistent(&self) -> bool {
        let identity_ok = self.identity.is_none() || self.credential.is_some();
        let loading_ok = self.loading
            == matches!(
                self.phase,
                SessionPhase::Bootstrapping | SessionPhase::Authenticating | SessionPhase::Resolving
            );
        identity_ok && loading_ok
    }
}
