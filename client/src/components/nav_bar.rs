//! Top navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the session snapshot only to choose which links to offer; access is
//! enforced by the route guards, not by hiding links here.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;

use crate::app::use_session_handle;
use crate::config::HOME_PATH;
use crate::state::session::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavItem {
    Link { label: &'static str, href: &'static str },
    Logout,
}

/// Links offered for the given session.
pub fn nav_items(state: &SessionState) -> Vec<NavItem> {
    let mut items = vec![NavItem::Link { label: "Home", href: "/" }];
    if state.loading {
        return items;
    }
    if state.is_authenticated() {
        items.push(NavItem::Link { label: "Profile", href: "/profile" });
        items.push(NavItem::Link { label: "Users", href: "/admin/users" });
        items.push(NavItem::Logout);
    } else {
        items.push(NavItem::Link { label: "Login", href: "/login" });
        items.push(NavItem::Link { label: "Register", href: "/register" });
    }
    items
}

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let handle = use_session_handle();

    // The router intercepts the anchor click and moves to `/` after logout.
    let on_logout = move |_| {
        if let Some(handle) = handle {
            handle.get_value().logout();
        }
    };

    let user_name = move || session.with(|s| s.identity.as_ref().map(|u| u.name.clone()));

    view! {
        <header class="nav-bar">
            <a href=HOME_PATH class="nav-bar__brand">"Catalog"</a>
            <nav class="nav-bar__links">
                {move || {
                    session
                        .with(nav_items)
                        .into_iter()
                        .map(|item| match item {
                            NavItem::Link { label, href } => {
                                view! { <a href=href class="nav-bar__link">{label}</a> }.into_any()
                            }
                            NavItem::Logout => {
                                view! {
                                    <a href=HOME_PATH class="nav-bar__link nav-bar__logout" on:click=on_logout>
                                        "Logout"
                                    </a>
                                }
                                    .into_any()
                            }
                        })
                        .collect_view()
                }}
            </nav>
            <Show when=move || user_name().is_some()>
                <span class="nav-bar__self">{move || user_name().unwrap_or_default()}</span>
            </Show>
        </header>
    }
}
