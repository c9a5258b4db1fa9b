//! Shared request pipeline: credential injection and rejection detection.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every REST call in the client goes through one `RequestPipeline`, so a
//! rejected credential anywhere in the app is observed in one place.
//!
//! DESIGN
//! ======
//! The pipeline only reports a 401 to its listeners. Clearing the stored
//! credential and moving the browser to the login route belong to the session
//! manager, which subscribes when it is constructed.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::http::{ApiRequest, ApiResponse, Method, RequestBody, Transport};
use super::types::{ImagePayload, error_message};
use crate::state::credential::CredentialStore;

pub const UNAUTHORIZED: u16 = 401;

/// Failure of a single API call as seen by its caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401: the credential (or login attempt) was refused.
    #[error("unauthorized: {message}")]
    Rejected { message: String },
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied error text, if the response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => Some(message.as_str()),
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// Emitted to listeners whenever a response carries a 401.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub path: String,
    /// Whether the refused request carried a bearer credential.
    pub credential_attached: bool,
}

type RejectionListener = Rc<dyn Fn(&Rejection)>;

pub struct RequestPipeline<T> {
    transport: T,
    credentials: Rc<dyn CredentialStore>,
    api_base: String,
    listeners: RefCell<Vec<RejectionListener>>,
}

impl<T: Transport> RequestPipeline<T> {
    pub fn new(transport: T, credentials: Rc<dyn CredentialStore>, api_base: &str) -> Self {
        Self {
            transport,
            credentials,
            api_base: api_base.trim_end_matches('/').to_owned(),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Register a callback for credential rejections.
    pub fn on_rejection(&self, listener: impl Fn(&Rejection) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Send a request, attaching the stored credential when there is one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for 401 (after notifying listeners),
    /// `ApiError::Status` for any other non-2xx, and `ApiError::Transport`
    /// when no response was received.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let credential = self.credentials.get();
        if let Some(credential) = &credential {
            request.headers.push(("Authorization".to_owned(), credential.bearer()));
        }
        request.url = format!("{}/{}", self.api_base, request.path.trim_start_matches('/'));

        let path = request.path.clone();
        let method = request.method;
        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("api: {method} {path} transport failure: {e}");
            ApiError::Transport(e.0)
        })?;

        if response.status == UNAUTHORIZED {
            let message = error_message(&response.body).unwrap_or_else(|| "Unauthorized".to_owned());
            log::warn!("api: {method} {path} rejected (credential attached: {})", credential.is_some());
            self.notify(&Rejection { path, credential_attached: credential.is_some() });
            return Err(ApiError::Rejected { message });
        }
        if !response.is_success() {
            log::warn!("api: {method} {path} failed with status {}", response.status);
            return Err(ApiError::Status { status: response.status, message: error_message(&response.body) });
        }
        Ok(response)
    }

    /// `GET` a JSON document.
    ///
    /// # Errors
    ///
    /// See [`RequestPipeline::send`]; also `ApiError::Decode` for unexpected bodies.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.send(ApiRequest::new(Method::Get, path, RequestBody::Empty)).await?;
        decode(&response)
    }

    /// Send a JSON body and decode a JSON reply.
    ///
    /// # Errors
    ///
    /// See [`RequestPipeline::get_json`].
    pub async fn send_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.send(ApiRequest::new(method, path, RequestBody::Json(value))).await?;
        decode(&response)
    }

    /// `DELETE` a resource and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// See [`RequestPipeline::get_json`].
    pub async fn delete_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.send(ApiRequest::new(Method::Delete, path, RequestBody::Empty)).await?;
        decode(&response)
    }

    /// `POST` a multipart image upload and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// See [`RequestPipeline::get_json`].
    pub async fn post_multipart<R: DeserializeOwned>(&self, path: &str, payload: ImagePayload) -> Result<R, ApiError> {
        let response = self
            .send(ApiRequest::new(Method::Post, path, RequestBody::Multipart(payload)))
            .await?;
        decode(&response)
    }

    fn notify(&self, rejection: &Rejection) {
        // Snapshot first: a listener may register further listeners.
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(rejection);
        }
    }
}

fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
