//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` abstracts the wire, `pipeline` attaches credentials and watches for
//! rejections, `api` maps endpoints to typed calls, and `types` defines the
//! shared JSON schema.

pub mod api;
pub mod http;
pub mod pipeline;
pub mod types;
