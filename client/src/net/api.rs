//! REST endpoint helpers for auth, profile, and admin user calls.
//!
//! Each helper unwraps the server's response envelope (`{token}`, `{user}`,
//! `{users}`) so callers deal in domain values.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `ApiError` values; a success body without the expected field
//! (e.g. a login reply with no token) is reported as `ApiError::Decode`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{Method, Transport};
use super::pipeline::{ApiError, RequestPipeline};
use super::types::{
    ImagePayload, LoginRequest, MessageEnvelope, ProfileUpdate, RegisterRequest, TokenEnvelope, User, UserEnvelope,
    UsersEnvelope,
};

pub const ME_PATH: &str = "/users/me";
pub const ME_IMAGE_PATH: &str = "/users/me/image";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const ADMIN_USERS_PATH: &str = "/admin/users";

fn admin_user_endpoint(user_id: u64) -> String {
    format!("{ADMIN_USERS_PATH}/{user_id}")
}

fn require_token(envelope: TokenEnvelope) -> Result<String, ApiError> {
    envelope
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Decode("token not found in response".to_owned()))
}

/// Fetch the identity bound to the stored credential (`GET /users/me`).
///
/// # Errors
///
/// Propagates pipeline failures.
pub async fn fetch_current_user<T: Transport>(pipeline: &RequestPipeline<T>) -> Result<User, ApiError> {
    let body: UserEnvelope = pipeline.get_json(ME_PATH).await?;
    Ok(body.user)
}

/// Exchange email + password for a token (`POST /auth/login`).
///
/// # Errors
///
/// Propagates pipeline failures; `ApiError::Decode` when no token is returned.
pub async fn login<T: Transport>(pipeline: &RequestPipeline<T>, request: &LoginRequest) -> Result<String, ApiError> {
    let body: TokenEnvelope = pipeline.send_json(Method::Post, LOGIN_PATH, request).await?;
    require_token(body)
}

/// Create an account and receive a token (`POST /auth/register`).
///
/// # Errors
///
/// Propagates pipeline failures; `ApiError::Decode` when no token is returned.
pub async fn register<T: Transport>(
    pipeline: &RequestPipeline<T>,
    request: &RegisterRequest,
) -> Result<String, ApiError> {
    let body: TokenEnvelope = pipeline.send_json(Method::Post, REGISTER_PATH, request).await?;
    require_token(body)
}

/// Update name and/or password (`PUT /users/me`).
///
/// # Errors
///
/// Propagates pipeline failures.
pub async fn update_current_user<T: Transport>(
    pipeline: &RequestPipeline<T>,
    update: &ProfileUpdate,
) -> Result<User, ApiError> {
    let body: UserEnvelope = pipeline.send_json(Method::Put, ME_PATH, update).await?;
    Ok(body.user)
}

/// Upload a new avatar (`POST /users/me/image`, multipart field `image`).
///
/// # Errors
///
/// Propagates pipeline failures.
pub async fn upload_current_user_image<T: Transport>(
    pipeline: &RequestPipeline<T>,
    payload: ImagePayload,
) -> Result<User, ApiError> {
    let body: UserEnvelope = pipeline.post_multipart(ME_IMAGE_PATH, payload).await?;
    Ok(body.user)
}

/// List every registered user (`GET /admin/users`).
///
/// # Errors
///
/// Propagates pipeline failures.
pub async fn list_users<T: Transport>(pipeline: &RequestPipeline<T>) -> Result<Vec<User>, ApiError> {
    let body: UsersEnvelope = pipeline.get_json(ADMIN_USERS_PATH).await?;
    Ok(body.users)
}

/// Delete a user (`DELETE /admin/users/{id}`), returning the server's message.
///
/// # Errors
///
/// Propagates pipeline failures.
pub async fn delete_user<T: Transport>(pipeline: &RequestPipeline<T>, user_id: u64) -> Result<String, ApiError> {
    let body: MessageEnvelope = pipeline.delete_json(&admin_user_endpoint(user_id)).await?;
    Ok(body.message.unwrap_or_else(|| "User deleted".to_owned()))
}
