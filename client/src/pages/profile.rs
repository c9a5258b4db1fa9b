//! Profile page: identity details, name/password edit, and avatar upload.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind `AuthenticatedOnly`. Edits go through the session manager
//! so the identity shown everywhere is replaced by the server's reply.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::app::use_session_handle;
use crate::net::types::{ProfileUpdate, User};
use crate::state::session::SessionState;
use crate::state::validation;

#[cfg(feature = "hydrate")]
const SUCCESS_MESSAGE_MS: u64 = 6_000;

/// Build the update request from the form fields.
fn profile_form_update(name: &str, password: &str, confirm: &str) -> Result<ProfileUpdate, &'static str> {
    validation::check_password_confirmation(password, confirm)?;
    validation::profile_update(ProfileUpdate {
        name: Some(name.to_owned()),
        password: (!password.is_empty()).then(|| password.to_owned()),
    })
}

/// Placeholder letter shown when the user has no avatar.
fn avatar_initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map_or_else(|| "?".to_owned(), |c| c.to_uppercase().collect())
}

/// Date part of an RFC 3339 timestamp.
fn member_since(user: &User) -> Option<&str> {
    user.created_at
        .as_deref()
        .map(|ts| ts.split_once('T').map_or(ts, |(date, _)| date))
}

#[cfg(feature = "hydrate")]
async fn read_image(file: web_sys::File) -> Result<crate::net::types::ImagePayload, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    Ok(crate::net::types::ImagePayload {
        file_name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let handle = use_session_handle();

    let initial_name = session.with_untracked(|s| s.identity.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let name = RwSignal::new(initial_name);
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let success = RwSignal::new(None::<String>);

    let saving = move || session.with(|s| s.saving);
    let identity = move || session.with(|s| s.identity.clone());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.with_untracked(|s| s.saving) {
            return;
        }
        success.set(None);
        let update = match profile_form_update(&name.get_untracked(), &password.get_untracked(), &confirm.get_untracked())
        {
            Ok(update) => update,
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
                if manager.update_profile(update).await.is_ok() {
                    password.set(String::new());
                    confirm.set(String::new());
                    show_success(success, "Profile updated successfully!").await;
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (handle, update);
    };

    let on_image = move |ev: leptos::ev::Event| {
        success.set(None);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            let Some(handle) = handle else {
                return;
            };
            let manager = handle.get_value();
            leptos::task::spawn_local(async move {
                let payload = match read_image(file).await {
                    Ok(payload) => payload,
                    Err(e) => {
                        log::warn!("profile: could not read selected file: {e}");
                        info.set("Could not read the selected file.".to_owned());
                        return;
                    }
                };
                match manager.upload_profile_image(payload).await {
                    Ok(_) => show_success(success, "Profile picture updated!").await,
                    Err(crate::state::session_manager::SessionError::Validation(message)) => info.set(message),
                    Err(_) => {}
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, handle);
    };

    let message = move || {
        let local = info.get();
        if local.is_empty() { session.with(|s| s.error.clone()).unwrap_or_default() } else { local }
    };

    view! {
        <div class="profile-page">
            <section class="profile-card">
                <div class="profile-card__avatar">
                    {move || match identity().and_then(|u| u.image_path) {
                        Some(src) => view! { <img class="avatar avatar--large" src=src alt="Profile picture"/> }.into_any(),
                        None => {
                            let initial = identity().map(|u| avatar_initial(&u.name)).unwrap_or_default();
                            view! { <span class="avatar avatar--large avatar--placeholder">{initial}</span> }.into_any()
                        }
                    }}
                    <label class="btn profile-card__upload">
                        "Change picture"
                        <input
                            type="file"
                            accept="image/jpeg,image/png,image/gif"
                            hidden=true
                            disabled=saving
                            on:change=on_image
                        />
                    </label>
                </div>
                <dl class="profile-card__details">
                    <dt>"Name"</dt>
                    <dd>{move || identity().map(|u| u.name).unwrap_or_default()}</dd>
                    <dt>"Email"</dt>
                    <dd>{move || identity().map(|u| u.email).unwrap_or_default()}</dd>
                    <dt>"Member since"</dt>
                    <dd>
                        {move || {
                            identity()
                                .and_then(|u| member_since(&u).map(str::to_owned))
                                .unwrap_or_else(|| "unknown".to_owned())
                        }}
                    </dd>
                </dl>
            </section>

            <form class="profile-form" on:submit=on_submit>
                <h2>"Edit profile"</h2>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="New password (optional)"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm new password"
                    autocomplete="new-password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button class="btn auth-button" type="submit" disabled=saving>
                    {move || if saving() { "Saving..." } else { "Save changes" }}
                </button>
            </form>

            <Show when=move || !message().is_empty()>
                <p class="auth-message auth-message--error">{message}</p>
            </Show>
            <Show when=move || success.get().is_some()>
                <p class="auth-message auth-message--success">{move || success.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}

#[cfg(feature = "hydrate")]
async fn show_success(success: RwSignal<Option<String>>, message: &str) {
    success.set(Some(message.to_owned()));
    gloo_timers::future::sleep(std::time::Duration::from_millis(SUCCESS_MESSAGE_MS)).await;
    success.set(None);
}
