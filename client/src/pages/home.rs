//! Public landing page.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::state::session::SessionState;

/// Headline for the landing page.
fn greeting(state: &SessionState) -> String {
    match &state.identity {
        Some(user) => format!("Welcome back, {}!", user.name),
        None => "Welcome to Catalog".to_owned(),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let signed_in = move || session.with(SessionState::is_authenticated);

    view! {
        <div class="home-page">
            <h1>{move || session.with(greeting)}</h1>
            <Show
                when=signed_in
                fallback=|| {
                    view! {
                        <p>
                            <a href="/login">"Sign in"</a>
                            " or "
                            <a href="/register">"create an account"</a>
                            " to manage your profile."
                        </p>
                    }
                }
            >
                <p>
                    "Manage your " <a href="/profile">"profile"</a> " or browse the "
                    <a href="/admin/users">"user list"</a> "."
                </p>
            </Show>
        </div>
    }
}
