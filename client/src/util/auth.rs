//! Route-guard decisions shared by every gated page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components must apply identical redirect behavior, so the decision
//! is a pure function of the session snapshot and the guard components only
//! render its outcome.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::{HOME_PATH, LOGIN_PATH};
use crate::state::session::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    /// Login and registration screens.
    AnonymousOnly,
    /// Profile and editing screens.
    AuthenticatedOnly,
    /// Admin screens. There is no role model yet, so this admits any
    /// authenticated session exactly like `AuthenticatedOnly`.
    ElevatedOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    RenderChildren,
    Redirect(&'static str),
    RenderLoading,
}

/// Decide what a guarded route shows for the given session.
pub fn decide(kind: GuardKind, state: &SessionState) -> GuardOutcome {
    if state.loading {
        return GuardOutcome::RenderLoading;
    }
    match kind {
        GuardKind::AnonymousOnly if state.is_authenticated() => GuardOutcome::Redirect(HOME_PATH),
        GuardKind::AuthenticatedOnly | GuardKind::ElevatedOnly if !state.is_authenticated() => {
            GuardOutcome::Redirect(LOGIN_PATH)
        }
        _ => GuardOutcome::RenderChildren,
    }
}
