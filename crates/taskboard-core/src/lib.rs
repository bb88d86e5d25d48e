//! Taskboard Core
//!
//! Target-independent pieces of the Taskboard web client:
//! - models: Entities exchanged with the backend
//! - client: REST client over a pluggable transport
//! - retry: Exponential backoff for transport failures
//! - session: Token and identity persistence over a key/value store
//! - page / status: View-mode state machines and the status notifier
//! - view / forms: Entity to view-model transforms and form validation
//! - routes: Page URLs and `?id=` parsing

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod page;
pub mod retry;
pub mod routes;
pub mod session;
pub mod status;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ValidationError};
pub use retry::{RetryPolicy, Sleep};
pub use session::{KeyValueStore, MemoryStore, SessionStore};
pub use transport::{ApiRequest, Method, RawResponse, Transport, TransportError};
