//! HTTP transport seam between the request pipeline and the browser.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: `BrowserTransport` reports a transport
//! error, and tests substitute a scripted transport.
//!
//! ERROR HANDLING
//! ==============
//! Only failures to build, send, or read a request are transport errors.
//! Every HTTP status, including 401 and 5xx, is a successful `ApiResponse`
//! that the pipeline classifies.

#![allow(clippy::unused_async)]

use std::fmt;

use super::types::ImagePayload;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Multipart form with a single `image` file field.
    Multipart(ImagePayload),
}

/// A fully resolved outbound request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path relative to the API base (e.g. `/users/me`).
    pub path: String,
    /// Absolute or origin-relative URL, filled in by the pipeline.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: RequestBody) -> Self {
        Self { method, path: path.into(), url: String::new(), headers: Vec::new(), body }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends a request and returns the raw response.
///
/// Single-threaded: implementations run on the browser event loop, so the
/// returned future is not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// `fetch`-backed transport used by the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Multipart(payload) => builder.body(multipart_form(&payload)?),
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let resp = built.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(TransportError("not available on server".to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
fn multipart_form(payload: &ImagePayload) -> Result<web_sys::FormData, TransportError> {
    let js_err = |e: wasm_bindgen::JsValue| TransportError(format!("{e:?}"));

    let bytes = js_sys::Uint8Array::from(payload.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&payload.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;

    let form = web_sys::FormData::new().map_err(js_err)?;
    form.append_with_blob_and_filename("image", &blob, &payload.file_name)
        .map_err(js_err)?;
    Ok(form)
}
