//! Test doubles for the transport, credential store, and navigator seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;

use crate::config::ClientConfig;
use crate::net::http::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::state::credential::{Credential, CredentialStore};
use crate::state::session_manager::SessionManager;
use crate::util::navigation::Navigator;

type Reply = Result<ApiResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// Transport that replays queued replies in order and records every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Rc<RefCell<VecDeque<Scripted>>>,
    requests: Rc<RefCell<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(ApiResponse::new(status, body.to_string()))));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Err(TransportError(message.to_owned()))));
        self
    }

    /// Queue a reply the test resolves later through the returned sender.
    pub fn defer(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.path.clone()).collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.path == path).count()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError("deferred reply dropped".to_owned()))),
            None => Err(TransportError("no scripted reply".to_owned())),
        }
    }
}

pub fn ok(body: serde_json::Value) -> Reply {
    Ok(ApiResponse::new(200, body.to_string()))
}

/// In-memory credential store that counts writes.
#[derive(Default)]
pub struct MemoryCredentialStore {
    value: RefCell<Option<Credential>>,
    writes: Cell<usize>,
}

impl MemoryCredentialStore {
    pub fn with_token(token: &str) -> Self {
        Self { value: RefCell::new(Credential::new(token)), writes: Cell::new(0) }
    }

    pub fn token(&self) -> Option<String> {
        self.value.borrow().as_ref().map(|c| c.as_str().to_owned())
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Credential> {
        self.value.borrow().clone()
    }

    fn set(&self, credential: &Credential) {
        self.writes.set(self.writes.get() + 1);
        *self.value.borrow_mut() = Some(credential.clone());
    }

    fn clear(&self) {
        self.writes.set(self.writes.get() + 1);
        *self.value.borrow_mut() = None;
    }
}

/// Navigator that records every navigation and tracks the current path.
pub struct RecordingNavigator {
    path: RefCell<String>,
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self { path: RefCell::new(path.to_owned()), visits: RefCell::new(Vec::new()) }
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        path.clone_into(&mut self.path.borrow_mut());
        self.visits.borrow_mut().push(path.to_owned());
    }
}

/// A manager wired to fresh doubles, plus handles to inspect them.
pub struct Harness {
    pub transport: MockTransport,
    pub store: Rc<MemoryCredentialStore>,
    pub navigator: Rc<RecordingNavigator>,
    pub manager: SessionManager<MockTransport>,
}

impl Harness {
    pub fn new(stored_token: Option<&str>, path: &str) -> Self {
        let transport = MockTransport::new();
        let store = Rc::new(stored_token.map_or_else(MemoryCredentialStore::default, MemoryCredentialStore::with_token));
        let navigator = Rc::new(RecordingNavigator::at(path));
        let manager = SessionManager::new(
            transport.clone(),
            store.clone(),
            navigator.clone(),
            &ClientConfig::default(),
        );
        Self { transport, store, navigator, manager }
    }

    pub fn anonymous() -> Self {
        Self::new(None, "/login")
    }
}
