//! Route guard wrappers for gated pages.
//!
//! Each guard renders the outcome of `util::auth::decide` for its kind. The
//! outcome is memoized so identity or `saving` changes that keep the same
//! decision do not rebuild the guarded page.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::state::session::SessionState;
use crate::util::auth::{GuardKind, GuardOutcome, decide};

/// Only for visitors without a session (login, registration).
#[component]
pub fn AnonymousOnly(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::AnonymousOnly, children)
}

/// Only for signed-in visitors; others are sent to the login page.
#[component]
pub fn AuthenticatedOnly(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::AuthenticatedOnly, children)
}

/// Admin pages. Same admission rule as `AuthenticatedOnly` until roles exist.
#[component]
pub fn ElevatedOnly(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::ElevatedOnly, children)
}

fn guarded(kind: GuardKind, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let outcome = Memo::new(move |_| session.with(|s| decide(kind, s)));

    move || match outcome.get() {
        GuardOutcome::RenderChildren => children().into_any(),
        GuardOutcome::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        GuardOutcome::RenderLoading => view! { <LoadingScreen/> }.into_any(),
    }
}

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen" role="status" aria-live="polite">
            <span class="loading-screen__spinner" aria-hidden="true"></span>
            <span class="loading-screen__label">"Loading..."</span>
        </div>
    }
}
