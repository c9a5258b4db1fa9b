//! Shared UI components.
//!
//! `route_guard` gates pages on the session state; `nav_bar` is the
//! navigation shell rendered above every route.

pub mod nav_bar;
pub mod route_guard;
