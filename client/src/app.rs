//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::route_guard::{AnonymousOnly, AuthenticatedOnly, ElevatedOnly};
use crate::config::ClientConfig;
use crate::net::http::BrowserTransport;
use crate::pages::{
    admin_users::AdminUsersPage, home::HomePage, login::LoginPage, not_found::NotFoundPage, profile::ProfilePage,
    register::RegisterPage,
};
use crate::state::session::SessionState;
use crate::state::session_manager::SessionManager;

/// Session manager type used by the browser build.
pub type AppSession = SessionManager<BrowserTransport>;

/// `Copy` context handle to the tab's session manager.
///
/// Only provided in the browser; SSR renders every guarded route as loading.
pub type SessionHandle = StoredValue<AppSession, LocalStorage>;

pub fn use_session_handle() -> Option<SessionHandle> {
    use_context::<SessionHandle>()
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the session manager for the lifetime of the page and mirrors its
/// state into an `RwSignal<SessionState>` context for guards and pages.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let session = RwSignal::new(SessionState::default());
    provide_context(config);
    provide_context(session);

    #[cfg(feature = "hydrate")]
    {
        use std::rc::Rc;

        use crate::state::credential::BrowserCredentialStore;
        use crate::util::navigation::BrowserNavigator;

        let manager = SessionManager::new(
            BrowserTransport,
            Rc::new(BrowserCredentialStore::new(config.token_storage_key)),
            Rc::new(BrowserNavigator),
            &config,
        );
        manager.subscribe(move |state| session.set(state.clone()));
        let handle: SessionHandle = StoredValue::new_local(manager);
        provide_context(handle);

        // Publish the stored-credential state only after hydration so the
        // first client render matches the server's loading shell.
        Effect::new(move || {
            let manager = handle.get_value();
            session.set(manager.snapshot());
            leptos::task::spawn_local(async move {
                let _ = manager.bootstrap().await;
            });
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/catalog.css"/>
        <Title text="Catalog"/>

        <Router>
            <NavBar/>
            <main class="page">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <AnonymousOnly><LoginPage/></AnonymousOnly> }
                    />
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <AnonymousOnly><RegisterPage/></AnonymousOnly> }
                    />
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <AuthenticatedOnly><ProfilePage/></AuthenticatedOnly> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("users"))
                        view=|| view! { <ElevatedOnly><AdminUsersPage/></ElevatedOnly> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
