//! Local input checks that run before any request is issued.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::config::ClientConfig;
use crate::net::types::{ImagePayload, LoginRequest, ProfileUpdate, RegisterRequest};

pub const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required.";
pub const REGISTER_FIELDS_REQUIRED: &str = "Name, email and password are required.";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match.";
pub const NAME_REQUIRED: &str = "Name cannot be empty.";
pub const NOTHING_TO_UPDATE: &str = "Nothing to update.";
pub const IMAGE_EMPTY: &str = "Select an image to upload.";
pub const IMAGE_UNSUPPORTED: &str = "Unsupported file format. Use JPEG, PNG or GIF.";
pub const IMAGE_TOO_LARGE: &str = "File too large. The maximum size is 5MB.";

/// Email is trimmed; the password is sent exactly as typed.
pub fn login_request(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(LOGIN_FIELDS_REQUIRED);
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

pub fn register_request(name: &str, email: &str, password: &str) -> Result<RegisterRequest, &'static str> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(REGISTER_FIELDS_REQUIRED);
    }
    Ok(RegisterRequest { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

/// Confirmation must match whenever either password box is filled.
pub fn check_password_confirmation(password: &str, confirm: &str) -> Result<(), &'static str> {
    if (!password.is_empty() || !confirm.is_empty()) && password != confirm {
        return Err(PASSWORDS_DIFFER);
    }
    Ok(())
}

/// Normalize a profile edit: trim the name, drop an empty password.
pub fn profile_update(update: ProfileUpdate) -> Result<ProfileUpdate, &'static str> {
    let name = match update.name {
        Some(name) if name.trim().is_empty() => return Err(NAME_REQUIRED),
        Some(name) => Some(name.trim().to_owned()),
        None => None,
    };
    let password = update.password.filter(|p| !p.is_empty());
    if name.is_none() && password.is_none() {
        return Err(NOTHING_TO_UPDATE);
    }
    Ok(ProfileUpdate { name, password })
}

pub fn image_payload(payload: &ImagePayload, config: &ClientConfig) -> Result<(), &'static str> {
    if payload.bytes.is_empty() {
        return Err(IMAGE_EMPTY);
    }
    if !config
        .avatar_content_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&payload.content_type))
    {
        return Err(IMAGE_UNSUPPORTED);
    }
    if payload.bytes.len() > config.max_avatar_bytes {
        return Err(IMAGE_TOO_LARGE);
    }
    Ok(())
}
