//! Registration page. A successful sign-up signs the visitor in directly.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::app::use_session_handle;
use crate::net::types::RegisterRequest;
use crate::state::session::SessionState;
use crate::state::validation;

/// Check the form locally before anything is sent.
fn validate_register_form(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterRequest, &'static str> {
    let request = validation::register_request(name, email, password)?;
    validation::check_password_confirmation(password, confirm)?;
    Ok(request)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let handle = use_session_handle();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let busy = move || session.with(|s| s.loading);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.with_untracked(|s| s.loading) {
            return;
        }
        let request = match validate_register_form(
            &name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        if let Some(handle) = handle {
            let manager = handle.get_value();
            leptos::task::spawn_local(async move {
                let _ = manager
                    .register(&request.name, &request.email, &request.password)
                    .await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (handle, request);
    };

    let message = move || {
        let local = info.get();
        if local.is_empty() { session.with(|s| s.error.clone()).unwrap_or_default() } else { local }
    };

    let field = move |signal: RwSignal<String>, kind: &'static str, placeholder: &'static str| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=placeholder
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    {field(name, "text", "Name")}
                    {field(email, "email", "you@example.com")}
                    {field(password, "password", "Password")}
                    {field(confirm, "password", "Confirm password")}
                    <button class="btn auth-button" type="submit" disabled=busy>
                        {move || if busy() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || !message().is_empty()>
                    <p class="auth-message auth-message--error">{message}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
