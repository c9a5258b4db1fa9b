//! User administration page: list every account and delete others.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind `ElevatedOnly`. Requests go straight through the shared
//! pipeline, so an expired credential still resets the session.

#[cfg(test)]
#[path = "admin_users_test.rs"]
mod admin_users_test;

use leptos::prelude::*;

use crate::app::use_session_handle;
use crate::net::pipeline::ApiError;
use crate::net::types::User;
use crate::state::session::SessionState;

const LIST_FAILED: &str = "Failed to load users";
const DELETE_FAILED: &str = "Failed to delete user";

/// Whether the row for `user` offers a delete action. Nobody deletes themselves.
fn can_delete(user: &User, session: &SessionState) -> bool {
    session.identity.as_ref().is_some_and(|me| me.id != user.id)
}

fn failure_message(error: &ApiError, fallback: &str) -> String {
    error.server_message().unwrap_or(fallback).to_owned()
}

/// Drop the deleted row locally instead of refetching the whole list.
fn without_user(users: &mut Vec<User>, user_id: u64) {
    users.retain(|u| u.id != user_id);
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let handle = use_session_handle();

    let users = RwSignal::new(Vec::<User>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let pending_delete = RwSignal::new(None::<User>);

    #[cfg(feature = "hydrate")]
    if let Some(handle) = handle {
        let pipeline = handle.get_value().pipeline();
        leptos::task::spawn_local(async move {
            match crate::net::api::list_users(&pipeline).await {
                Ok(list) => users.set(list),
                Err(e) => {
                    log::warn!("admin: list users failed: {e}");
                    error.set(Some(failure_message(&e, LIST_FAILED)));
                }
            }
            loading.set(false);
        });
    }

    let confirm_delete = move |_| {
        let Some(target) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);

        #[cfg(feature = "hydrate")]
        if let Some(handle) = handle {
            let pipeline = handle.get_value().pipeline();
            leptos::task::spawn_local(async move {
                match crate::net::api::delete_user(&pipeline, target.id).await {
                    Ok(message) => {
                        users.update(|list| without_user(list, target.id));
                        error.set(None);
                        notice.set(Some(message));
                    }
                    Err(e) => {
                        log::warn!("admin: delete user {} failed: {e}", target.id);
                        error.set(Some(failure_message(&e, DELETE_FAILED)));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (handle, target);
    };

    view! {
        <div class="admin-page">
            <h1>"Users"</h1>
            <Show when=move || error.get().is_some()>
                <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || notice.get().is_some()>
                <p class="auth-message auth-message--success">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="admin-page__loading">"Loading users..."</p> }
            >
                <table class="admin-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || users.get() key=|u| u.id let:user>
                            {
                                let deletable = session.with_untracked(|s| can_delete(&user, s));
                                let row_user = user.clone();
                                view! {
                                    <tr>
                                        <td>{user.id}</td>
                                        <td>{user.name.clone()}</td>
                                        <td>{user.email.clone()}</td>
                                        <td>
                                            <Show when=move || deletable>
                                                {
                                                    let row_user = row_user.clone();
                                                    view! {
                                                        <button
                                                            class="btn btn--danger"
                                                            on:click=move |_| pending_delete.set(Some(row_user.clone()))
                                                        >
                                                            "Delete"
                                                        </button>
                                                    }
                                                }
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>
            </Show>

            <Show when=move || pending_delete.get().is_some()>
                <div class="dialog-backdrop" on:click=move |_| pending_delete.set(None)>
                    <div class="dialog" on:click=|ev| ev.stop_propagation()>
                        <p>
                            "Delete "
                            {move || pending_delete.get().map(|u| u.name).unwrap_or_default()}
                            "? This cannot be undone."
                        </p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| pending_delete.set(None)>
                                "Cancel"
                            </button>
                            <button class="btn btn--danger" on:click=confirm_delete>
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
