//! Client-side session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session_manager` owns the authoritative `SessionState`; `credential`
//! persists the bearer token; `validation` checks form input before any
//! request leaves the browser.

pub mod credential;
pub mod session;
pub mod session_manager;
pub mod validation;
