//! The portal's response envelope.
//!
//! Every endpoint answers HTTP 200 with `{code, type, message, result, extras,
//! time}`; business rejections are reported through `code`.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use dispatch_core::codes;

use crate::error::{ClientError, ClientResult};

/// `result` is typed only on success. A rejection whose result does not fit
/// `T` still decodes, with `result` left empty, so its code and message reach
/// the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEnvelope<T> {
    pub code: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub result: Option<T>,
    pub extras: Value,
    pub time: Option<String>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    code: i32,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    extras: Value,
    #[serde(default)]
    time: Option<String>,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::deserialize(deserializer)?;
        let result = if raw.result.is_null() {
            None
        } else if codes::is_success(raw.code) {
            Some(T::deserialize(raw.result).map_err(D::Error::custom)?)
        } else {
            T::deserialize(raw.result).ok()
        };
        Ok(Self {
            code: raw.code,
            kind: raw.kind,
            message: raw.message,
            result,
            extras: raw.extras,
            time: raw.time,
        })
    }
}

impl<T> ApiEnvelope<T> {
    pub fn success(result: T) -> Self {
        Self {
            code: codes::SUCCESS,
            kind: codes::TYPE_SUCCESS.to_string(),
            message: String::new(),
            result: Some(result),
            extras: Value::Null,
            time: None,
        }
    }

    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: codes::TYPE_ERROR.to_string(),
            message: message.into(),
            result: None,
            extras: Value::Null,
            time: None,
        }
    }

    pub fn is_success(&self) -> bool {
        codes::is_success(self.code)
    }

    /// Fail with [`ClientError::Api`] unless the code is success.
    pub fn ensure_success(self) -> ClientResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Api {
                code: self.code,
                message: self.message,
            })
        }
    }

    /// The payload of a successful response.
    ///
    /// A success envelope without a result is a decode failure.
    pub fn into_result(self) -> ClientResult<T> {
        let envelope = self.ensure_success()?;
        envelope.result.ok_or_else(|| {
            ClientError::decode(
                "result",
                <serde_json::Error as serde::de::Error>::custom("success envelope without result"),
            )
        })
    }

    /// The payload if any, for endpoints whose result may be `null`.
    pub fn into_optional(self) -> ClientResult<Option<T>> {
        Ok(self.ensure_success()?.result)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        ApiEnvelope {
            code: self.code,
            kind: self.kind,
            message: self.message,
            result: self.result.map(f),
            extras: self.extras,
            time: self.time,
        }
    }
}

/// Loosely-typed result of a mutation.
///
/// Mutations answer with `0`, `true`, a message string or an arbitrary object
/// depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MutationAck {
    Flag(bool),
    Code(i64),
    Text(String),
    Other(Value),
}

impl MutationAck {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MutationAck::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiReason;

    #[test]
    fn decodes_success_envelope() {
        let json = r#"{"code":200,"type":"success","message":"","result":[1,2],"extras":null,"time":"2025-08-14 10:39:26"}"#;
        let envelope: ApiEnvelope<Vec<u8>> = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.time.as_deref(), Some("2025-08-14 10:39:26"));
        assert_eq!(envelope.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn rejection_becomes_api_error() {
        let json = r#"{"code":4001,"type":"error","message":"order already taken","result":null}"#;
        let envelope: ApiEnvelope<String> = serde_json::from_str(json).unwrap();
        assert!(!envelope.is_success());
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.api_reason(), Some(ApiReason::AlreadyTaken));
        assert!(err.to_string().contains("order already taken"));
    }

    #[test]
    fn missing_result_on_success_is_a_decode_error() {
        let envelope: ApiEnvelope<String> = serde_json::from_str(r#"{"code":200}"#).unwrap();
        assert!(matches!(
            envelope.clone().into_result(),
            Err(ClientError::Decode { .. })
        ));
        assert_eq!(envelope.into_optional().unwrap(), None);
    }

    #[test]
    fn mutation_ack_accepts_any_shape() {
        let acks: Vec<MutationAck> =
            serde_json::from_str(r#"[0, true, "ok", {"id": 3}]"#).unwrap();
        assert_eq!(acks[0], MutationAck::Code(0));
        assert_eq!(acks[1], MutationAck::Flag(true));
        assert_eq!(acks[2].as_text(), Some("ok"));
        assert!(matches!(acks[3], MutationAck::Other(_)));
    }

    #[test]
    fn rejection_with_mismatched_result_keeps_code_and_message() {
        let json = r#"{"code":500,"type":"error","message":"server busy","result":""}"#;
        let envelope: ApiEnvelope<dispatch_orders::OrderPage> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.code, 500);
        assert!(envelope.result.is_none());
        match envelope.into_result() {
            Err(ClientError::Api { code, message }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "server busy");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn success_with_mismatched_result_fails_to_decode() {
        let json = r#"{"code":200,"type":"success","message":"","result":""}"#;
        assert!(serde_json::from_str::<ApiEnvelope<dispatch_orders::OrderPage>>(json).is_err());
    }
}
