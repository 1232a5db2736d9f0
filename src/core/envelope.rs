//! Uniform result envelope returned by every service operation
//!
//! Operations never leak exceptions to callers: success and failure both
//! serialize to the same `{ok, data?, error?, code?}` shape. The `error`
//! field carries the localized human message, `code` the machine tag from
//! [`FeriaError::error_code`](crate::core::error::FeriaError::error_code).

use crate::core::error::{FeriaError, FeriaResult};
use serde::Serialize;

/// Success/failure wrapper returned by every operation
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult<T> {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T> ActionResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn failure(err: &FeriaError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(err.to_string()),
            code: Some(err.error_code()),
        }
    }
}

impl ActionResult<()> {
    /// Success envelope with no payload (delete operations)
    pub fn done() -> Self {
        Self {
            ok: true,
            data: None,
            error: None,
            code: None,
        }
    }
}

impl<T> From<FeriaResult<T>> for ActionResult<T> {
    fn from(result: FeriaResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(ref err) => Self::failure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_success_shape() {
        let result = ActionResult::success(42);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let err = FeriaError::NotFound {
            entity: "producto",
            id: Uuid::nil(),
        };
        let result: ActionResult<u8> = ActionResult::failure(&err);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ok"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json["error"].as_str().unwrap().contains("producto"));
    }

    #[test]
    fn test_from_result() {
        let ok: ActionResult<u8> = Ok(7).into();
        assert!(ok.ok);
        let err: ActionResult<u8> = Err(FeriaError::SelfReference).into();
        assert!(!err.ok);
        assert_eq!(err.code, Some("SELF_REFERENCE"));
    }
}
