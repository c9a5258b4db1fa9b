use super::*;
use crate::net::types::User;
use crate::state::credential::Credential;
use crate::state::session::SessionPhase;

fn labels(items: &[NavItem]) -> Vec<&'static str> {
    items
        .iter()
        .map(|item| match item {
            NavItem::Link { label, .. } => *label,
            NavItem::Logout => "Logout",
        })
        .collect()
}

#[test]
fn anonymous_visitors_are_offered_login_and_register() {
    let items = nav_items(&SessionState::anonymous(None));
    assert_eq!(labels(&items), vec!["Home", "Login", "Register"]);
}

#[test]
fn signed_in_visitors_are_offered_profile_users_and_logout() {
    let state = SessionState {
        phase: SessionPhase::Authenticated,
        identity: Some(User { id: 1, name: "A".to_owned(), ..User::default() }),
        credential: Credential::new("T"),
        loading: false,
        saving: false,
        error: None,
    };
    let items = nav_items(&state);
    assert_eq!(labels(&items), vec!["Home", "Profile", "Users", "Logout"]);
    assert!(items.contains(&NavItem::Link { label: "Users", href: "/admin/users" }));
}

#[test]
fn only_home_is_offered_while_loading() {
    assert_eq!(labels(&nav_items(&SessionState::default())), vec!["Home"]);
}
