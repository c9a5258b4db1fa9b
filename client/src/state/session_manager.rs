//! Session lifecycle: credential bootstrap, login, registration, profile
//! mutations, logout, and reaction to credential rejection.
//!
//! SYSTEM CONTEXT
//! ==============
//! One manager is created by the root component and shared through context.
//! It owns the request pipeline, is the only writer of the credential store,
//! and publishes every state transition to its observers (the app mirrors
//! them into an `RwSignal<SessionState>` read by guards and the nav bar).
//!
//! STATE MACHINE
//! =============
//! ```text
//! Bootstrapping -> Resolving | Anonymous
//! Anonymous --login/register--> Authenticating --token--> Resolving
//! Resolving --/users/me ok--> Authenticated
//! Resolving | Authenticating --failure--> Anonymous (error set)
//! any --logout | 401 with credential--> Anonymous
//! ```
//!
//! CANCELLATION
//! ============
//! `logout` and rejection advance a session epoch. Operations capture the
//! epoch when they start and drop their response with
//! `SessionError::Cancelled` if it moved, so a late reply can never
//! repopulate a session that was reset while it was in flight.
//!
//! Concurrent mutations within one epoch are not serialized; the UI disables
//! its buttons while `loading`/`saving` is set.

#[cfg(test)]
#[path = "session_manager_test.rs"]
mod session_manager_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::credential::{Credential, CredentialStore};
use super::session::{SessionPhase, SessionState};
use super::validation;
use crate::config::ClientConfig;
use crate::net::api;
use crate::net::http::Transport;
use crate::net::pipeline::{ApiError, Rejection, RequestPipeline};
use crate::net::types::{ImagePayload, ProfileUpdate, User};
use crate::util::navigation::Navigator;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const AUTHENTICATION_FAILED: &str = "Failed to authenticate";
pub const UPDATE_FAILED: &str = "Failed to update profile";
pub const UPLOAD_FAILED: &str = "Failed to upload image";
pub const SESSION_EXPIRED: &str = "Session expired. Please sign in again.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Input rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// The request failed; `message` is the server's text or a generic fallback.
    #[error("{message}")]
    Request { message: String, source: ApiError },
    #[error("not signed in")]
    NotAuthenticated,
    /// The session was reset while the request was in flight.
    #[error("session was reset before the request completed")]
    Cancelled,
}

fn validation_error(message: &'static str) -> SessionError {
    SessionError::Validation(message.to_owned())
}

type Observer = Rc<dyn Fn(&SessionState)>;

struct Inner<T> {
    pipeline: Rc<RequestPipeline<T>>,
    credentials: Rc<dyn CredentialStore>,
    navigator: Rc<dyn Navigator>,
    config: ClientConfig,
    state: RefCell<SessionState>,
    epoch: Cell<u64>,
    observers: RefCell<Vec<Observer>>,
}

impl<T> Inner<T> {
    /// Apply `f` and publish the new snapshot if anything changed.
    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let (before, after) = {
            let mut state = self.state.borrow_mut();
            let before = state.clone();
            f(&mut state);
            if *state == before {
                return;
            }
            (before.phase, state.clone())
        };
        if before != after.phase {
            log::debug!("session: {before:?} -> {:?}", after.phase);
        }
        let observers = self.observers.borrow().clone();
        for observer in observers {
            observer(&after);
        }
    }

    fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    fn invalidate_in_flight(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
    }

    fn handle_rejection(&self, rejection: &Rejection) {
        self.credentials.clear();
        if rejection.credential_attached {
            log::warn!("session: credential rejected by {}, signing out", rejection.path);
            self.invalidate_in_flight();
            self.update(|s| *s = SessionState::anonymous(Some(SESSION_EXPIRED.to_owned())));
        }
        if self.navigator.current_path() != self.config.login_path {
            self.navigator.navigate(self.config.login_path);
        }
    }
}

/// Cheaply clonable handle to the session of this browser tab.
pub struct SessionManager<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for SessionManager<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Transport + 'static> SessionManager<T> {
    /// Build the pipeline over `credentials` and start in `Resolving` when a
    /// credential is already stored, `Anonymous` otherwise.
    pub fn new(
        transport: T,
        credentials: Rc<dyn CredentialStore>,
        navigator: Rc<dyn Navigator>,
        config: &ClientConfig,
    ) -> Self {
        let pipeline = Rc::new(RequestPipeline::new(transport, Rc::clone(&credentials), config.api_base));
        let state = SessionState::initial(credentials.get());
        log::debug!("session: starting in {:?}", state.phase);

        let inner = Rc::new(Inner {
            pipeline,
            credentials,
            navigator,
            config: *config,
            state: RefCell::new(state),
            epoch: Cell::new(0),
            observers: RefCell::new(Vec::new()),
        });
        let weak = Rc::downgrade(&inner);
        inner.pipeline.on_rejection(move |rejection| {
            if let Some(inner) = weak.upgrade() {
                inner.handle_rejection(rejection);
            }
        });
        Self { inner }
    }
}

impl<T: Transport> SessionManager<T> {
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Call `observer` with the new state after every transition.
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) {
        self.inner.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Shared pipeline for calls made outside the session (e.g. admin screens).
    pub fn pipeline(&self) -> Rc<RequestPipeline<T>> {
        Rc::clone(&self.inner.pipeline)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Resolve the identity for a credential found in storage at startup.
    ///
    /// Returns `Ok(None)` when there was nothing to resolve.
    ///
    /// # Errors
    ///
    /// `SessionError::Request` when `/users/me` fails (credential cleared),
    /// `SessionError::Cancelled` when the session was reset meanwhile.
    pub async fn bootstrap(&self) -> Result<Option<User>, SessionError> {
        let phase = self.inner.state.borrow().phase;
        if phase != SessionPhase::Resolving {
            return Ok(None);
        }
        let epoch = self.inner.epoch();
        self.resolve_identity(epoch, AUTHENTICATION_FAILED).await.map(Some)
    }

    /// Sign in, persist the issued credential, then resolve the identity.
    ///
    /// The returned user is the one reported by `/users/me`, not the login reply.
    ///
    /// # Errors
    ///
    /// `SessionError::Validation` without any request when a field is empty;
    /// `SessionError::Request` when either call fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let request = validation::login_request(email, password).map_err(validation_error)?;
        let epoch = self.begin_authentication();
        let result = api::login(&self.inner.pipeline, &request).await;
        self.complete_authentication(epoch, result, LOGIN_FAILED).await
    }

    /// Create an account and sign in with the issued credential.
    ///
    /// # Errors
    ///
    /// Same as [`SessionManager::login`].
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, SessionError> {
        let request = validation::register_request(name, email, password).map_err(validation_error)?;
        let epoch = self.begin_authentication();
        let result = api::register(&self.inner.pipeline, &request).await;
        self.complete_authentication(epoch, result, REGISTRATION_FAILED).await
    }

    /// Send a profile edit; on success the server's user replaces the identity.
    ///
    /// # Errors
    ///
    /// `SessionError::NotAuthenticated` or `SessionError::Validation` without
    /// any request; `SessionError::Request` when the server refuses.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User, SessionError> {
        self.require_identity()?;
        let update = validation::profile_update(update).map_err(validation_error)?;
        let epoch = self.begin_save();
        let result = api::update_current_user(&self.inner.pipeline, &update).await;
        self.complete_save(epoch, result, UPDATE_FAILED)
    }

    /// Upload a new avatar; on success the server's user replaces the identity.
    ///
    /// # Errors
    ///
    /// Same as [`SessionManager::update_profile`].
    pub async fn upload_profile_image(&self, payload: ImagePayload) -> Result<User, SessionError> {
        self.require_identity()?;
        validation::image_payload(&payload, &self.inner.config).map_err(validation_error)?;
        let epoch = self.begin_save();
        let result = api::upload_current_user_image(&self.inner.pipeline, payload).await;
        self.complete_save(epoch, result, UPLOAD_FAILED)
    }

    /// Forget the identity and credential. No request is made.
    pub fn logout(&self) {
        self.inner.invalidate_in_flight();
        self.inner.credentials.clear();
        self.inner.update(|s| {
            if *s != SessionState::anonymous(s.error.clone()) {
                *s = SessionState::anonymous(None);
            }
        });
        log::info!("session: signed out");
    }

    fn require_identity(&self) -> Result<(), SessionError> {
        if self.inner.state.borrow().identity.is_none() {
            return Err(SessionError::NotAuthenticated);
        }
        Ok(())
    }

    fn begin_authentication(&self) -> u64 {
        self.inner.update(|s| {
            s.phase = SessionPhase::Authenticating;
            s.loading = true;
            s.error = None;
        });
        self.inner.epoch()
    }

    async fn complete_authentication(
        &self,
        epoch: u64,
        result: Result<String, ApiError>,
        fallback: &str,
    ) -> Result<User, SessionError> {
        if self.inner.epoch() != epoch {
            return Err(SessionError::Cancelled);
        }
        let credential = result.and_then(|token| {
            Credential::new(token).ok_or_else(|| ApiError::Decode("token not found in response".to_owned()))
        });
        let credential = match credential {
            Ok(credential) => credential,
            Err(source) => {
                let message = source.server_message().unwrap_or(fallback).to_owned();
                log::warn!("session: authentication failed: {source}");
                let held_credential = self.inner.state.borrow().credential.is_some();
                if held_credential {
                    self.inner.credentials.clear();
                }
                self.inner.update(|s| *s = SessionState::anonymous(Some(message.clone())));
                return Err(SessionError::Request { message, source });
            }
        };

        self.inner.credentials.set(&credential);
        self.inner.update(|s| {
            s.phase = SessionPhase::Resolving;
            s.identity = None;
            s.credential = Some(credential);
        });
        self.resolve_identity(epoch, fallback).await
    }

    async fn resolve_identity(&self, epoch: u64, fallback: &str) -> Result<User, SessionError> {
        let result = api::fetch_current_user(&self.inner.pipeline).await;
        if self.inner.epoch() != epoch {
            log::debug!("session: dropping identity reply for a reset session");
            return Err(SessionError::Cancelled);
        }
        match result {
            Ok(user) => {
                log::info!("session: signed in as user {}", user.id);
                self.inner.update(|s| {
                    s.phase = SessionPhase::Authenticated;
                    s.identity = Some(user.clone());
                    s.loading = false;
                    s.error = None;
                });
                Ok(user)
            }
            Err(source) => {
                let message = source.server_message().unwrap_or(fallback).to_owned();
                log::warn!("session: identity resolution failed: {source}");
                self.inner.credentials.clear();
                self.inner.update(|s| *s = SessionState::anonymous(Some(message.clone())));
                Err(SessionError::Request { message, source })
            }
        }
    }

    fn begin_save(&self) -> u64 {
        self.inner.update(|s| {
            s.saving = true;
            s.error = None;
        });
        self.inner.epoch()
    }

    fn complete_save(&self, epoch: u64, result: Result<User, ApiError>, fallback: &str) -> Result<User, SessionError> {
        if self.inner.epoch() != epoch {
            return Err(SessionError::Cancelled);
        }
        match result {
            Ok(user) => {
                log::info!("session: profile of user {} updated", user.id);
                self.inner.update(|s| {
                    s.identity = Some(user.clone());
                    s.saving = false;
                    s.error = None;
                });
                Ok(user)
            }
            Err(source) => {
                let message = source.server_message().unwrap_or(fallback).to_owned();
                log::warn!("session: profile change failed: {source}");
                self.inner.update(|s| {
                    s.saving = false;
                    s.error = Some(message.clone());
                });
                Err(SessionError::Request { message, source })
            }
        }
    }
}
