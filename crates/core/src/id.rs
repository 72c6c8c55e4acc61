//! Strongly-typed identifiers used across the domain.
//!
//! The portal keys every record by a positive database integer. Wrapping them
//! keeps an order id from being passed where a user id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of an order (stable across its lifecycle).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

/// Identifier of a dispatch record (one order may be dispatched more than once).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributionId(i64);

/// Identifier of a portal user (designer, broker or administrator).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of an annotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(i64);

/// Identifier of any other server row (draft history, disclaimer, dictionary entry).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw identifier, rejecting non-positive values.
            pub fn new(raw: i64) -> DomainResult<Self> {
                if raw <= 0 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must be positive, got {}",
                        $name, raw
                    )));
                }
                Ok(Self(raw))
            }

            /// Wrap a raw identifier without checking it.
            ///
            /// Only for values that came from the server or from tests.
            pub const fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(raw)
            }
        }
    };
}

impl_int_newtype!(OrderId, "OrderId");
impl_int_newtype!(DistributionId, "DistributionId");
impl_int_newtype!(UserId, "UserId");
impl_int_newtype!(AnnotationId, "AnnotationId");
impl_int_newtype!(RecordId, "RecordId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert!(OrderId::new(0).is_err());
        assert!(OrderId::new(-3).is_err());
        assert_eq!(OrderId::new(42).unwrap().get(), 42);
    }

    #[test]
    fn parse_from_str_trims_and_validates() {
        let id: UserId = " 17 ".parse().unwrap();
        assert_eq!(id, UserId::from_raw(17));
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&OrderId::from_raw(9)).unwrap();
        assert_eq!(json, "9");
        let back: OrderId = serde_json::from_str("9").unwrap();
        assert_eq!(back.get(), 9);
    }
}
