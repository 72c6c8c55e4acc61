//! `dispatch-client` provides async HTTP access to the designer portal.
//!
//! Every call sends one request to `<base>/api/<path>` and returns the decoded
//! [`ApiEnvelope`]. Outbound bodies are validated locally first; a failed
//! check returns [`ClientError::Validation`] without touching the network.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;

pub use api::upload::StoredFile;
pub use client::DispatchClient;
pub use config::ClientConfig;
pub use envelope::{ApiEnvelope, MutationAck};
pub use error::{ApiReason, ClientError, ClientResult};
