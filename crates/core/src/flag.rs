//! The portal's boolean encoding.
//!
//! Booleans travel as `0`/`1` integers. Some endpoints send real JSON
//! booleans for the same fields, so decoding accepts both; encoding always
//! produces the integer form the server expects.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// A 0/1 wire flag.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Flag(bool);

impl Flag {
    pub const ON: Flag = Flag(true);
    pub const OFF: Flag = Flag(false);

    pub const fn is_set(self) -> bool {
        self.0
    }

    pub const fn as_int(self) -> u8 {
        if self.0 { 1 } else { 0 }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(value)
    }
}

impl From<Flag> for bool {
    fn from(value: Flag) -> Self {
        value.0
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_int())
    }
}

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = Flag;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("0, 1 or a boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Flag, E> {
        Ok(Flag(v))
    }

    // A bare `null` on a non-optional flag reads as unset.
    fn visit_unit<E: de::Error>(self) -> Result<Flag, E> {
        Ok(Flag::OFF)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Flag, E> {
        match v {
            0 => Ok(Flag::OFF),
            1 => Ok(Flag::ON),
            other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Flag, E> {
        match v {
            0 => Ok(Flag::OFF),
            1 => Ok(Flag::ON),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }
}
