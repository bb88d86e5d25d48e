//! Test fixtures shared by the module tests

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::retry::{RetryPolicy, Sleep};
use crate::session::MemoryStore;
use crate::transport::{ApiRequest, RawResponse, Transport, TransportError};

/// Replays scripted responses and records every request it sees
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Result<RawResponse, TransportError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies.borrow_mut().push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())))
    }
}

/// Records requested delays instead of sleeping
#[derive(Default)]
pub struct RecordingSleep {
    delays: RefCell<Vec<u32>>,
}

impl RecordingSleep {
    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    pub fn total(&self) -> u32 {
        self.delays.borrow().iter().sum()
    }
}

impl Sleep for RecordingSleep {
    async fn sleep(&self, ms: u32) {
        self.delays.borrow_mut().push(ms);
    }
}

pub type TestClient<'a> = ApiClient<&'a MockTransport, &'a MemoryStore, &'a RecordingSleep>;

/// Client wired to the given fixtures, with the default retry policy
pub fn client<'a>(
    transport: &'a MockTransport,
    storage: &'a MemoryStore,
    sleeper: &'a RecordingSleep,
) -> TestClient<'a> {
    ApiClient::new(ApiConfig::default(), transport, storage, sleeper).with_retry(RetryPolicy::default())
}

/// Storage that already holds a signed-in session
pub fn signed_in_storage() -> MemoryStore {
    let storage = MemoryStore::default();
    crate::session::SessionStore::new(&storage).set_session("tok123", 7, "member");
    storage
}
