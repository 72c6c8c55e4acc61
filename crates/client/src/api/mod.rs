//! One API surface per endpoint family, all implemented on [`DispatchClient`].
//!
//! [`DispatchClient`]: crate::DispatchClient

pub mod dictionary;
pub mod dispatch;
pub mod orders;
pub mod schedule;
pub mod service;
pub mod upload;

/// Query string for endpoints that take none.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];
