//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates session changes to
//! the `SessionManager` held in context. Access control lives in
//! `components::route_guard`, never in the pages themselves.

pub mod admin_users;
pub mod home;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod register;
