//! `dispatch-core` provides domain primitives shared by the order access layer.
//!
//! This crate contains **pure domain** building blocks: the error model,
//! integer identifiers, the portal's 0/1 flag and timestamp encodings, and the
//! application response codes. It performs no IO.

pub mod codes;
pub mod entity;
pub mod error;
pub mod flag;
pub mod id;
pub mod time;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use flag::Flag;
pub use id::{AnnotationId, DistributionId, OrderId, RecordId, UserId};
pub use time::ServerTime;
