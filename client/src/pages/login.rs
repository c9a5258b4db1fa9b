//! Login page with email + password sign-in.
//!
//! Rendered behind `AnonymousOnly`: once the session resolves an identity the
//! guard redirects home, so success needs no explicit navigation here.

use leptos::prelude::*;

use crate::app::use_session_handle;
use crate::state::session::SessionState;
use crate::state::validation;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let handle = use_session_handle();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let busy = move || session.with(|s| s.loading);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.with_untracked(|s| s.loading) {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(message) = validation::login_request(&email_value, &password_value) {
            info.set(message.to_owned());
            return;
        }
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        if let Some(handle) = handle {
            let manager = handle.get_value();
            leptos::task::spawn_local(async move {
                let _ = manager.login(&email_value, &password_value).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = handle;
    };

    let message = move || {
        let local = info.get();
        if local.is_empty() { session.with(|s| s.error.clone()).unwrap_or_default() } else { local }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn auth-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !message().is_empty()>
                    <p class="auth-message auth-message--error">{message}</p>
                </Show>
                <p class="auth-card__footer">
                    "No account yet? " <a href="/register">"Create one"</a>
                </p>
            </div>
        </div>
    }
}
