use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the engine for non-2xx responses.
///
/// See: <https://docs.camunda.org/manual/latest/reference/rest/overview/#error-handling>
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EngineErrorPayload {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    /// only sent by engines that support custom error codes (7.15+)
    #[serde(default)]
    pub code: Option<i64>,
}

#[derive(Debug, Error)]
pub enum CamundaError {
    #[error("MissingField({0})")]
    MissingField(String),
    #[error("DecodeError({0:?})")]
    Decode(serde_json::Error),
    #[error("InvalidParameter({0})")]
    InvalidParameter(String),
    #[error("TransportError({0:?})")]
    Transport(reqwest::Error),
    #[error("EngineError(status={status}, payload={payload:?}, body={body})")]
    Engine {
        status: u16,
        payload: Option<EngineErrorPayload>,
        body: String,
    },
    #[error("ConfigError({0})")]
    ConfigError(String),
}

impl CamundaError {
    /// Classifies a serde error raised while loading a response.
    ///
    /// serde reports an absent key as "missing field `name`"; those become
    /// `MissingField(name)` so callers can tell a contract violation apart
    /// from malformed JSON.
    pub fn from_decode(e: serde_json::Error) -> Self {
        let msg = e.to_string();
        match msg
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => CamundaError::MissingField(field.to_string()),
            None => CamundaError::Decode(e),
        }
    }

    /// Returns true if the same call could succeed when sent again unchanged.
    /// Nothing in this workspace retries; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            CamundaError::Transport(e) => e.is_timeout() || e.is_connect(),
            CamundaError::Engine { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Engine-reported exception type, e.g. `MigrationPlanValidationException`.
    pub fn engine_error_type(&self) -> Option<&str> {
        match self {
            CamundaError::Engine {
                payload: Some(p), ..
            } => Some(p.error_type.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CamundaError {
    fn from(e: reqwest::Error) -> Self {
        CamundaError::Transport(e)
    }
}
impl From<serde_json::Error> for CamundaError {
    fn from(e: serde_json::Error) -> Self {
        CamundaError::from_decode(e)
    }
}
impl From<url::ParseError> for CamundaError {
    fn from(e: url::ParseError) -> Self {
        CamundaError::InvalidParameter(format!("cannot parse url: {e:?}"))
    }
}

pub type Result<T> = std::result::Result<T, CamundaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct Sample {
        source_activity_ids: Vec<String>,
    }

    #[test]
    fn test_missing_field_is_classified() {
        let e = serde_json::from_value::<Sample>(serde_json::json!({})).unwrap_err();
        match CamundaError::from_decode(e) {
            CamundaError::MissingField(f) => assert_eq!(f, "sourceActivityIds"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_is_decode_error() {
        let e = serde_json::from_value::<Sample>(serde_json::json!({"sourceActivityIds": 1}))
            .unwrap_err();
        assert!(matches!(CamundaError::from_decode(e), CamundaError::Decode(_)));
    }

    #[test]
    fn test_engine_error_retryable_by_status() {
        let err = |status| CamundaError::Engine {
            status,
            payload: None,
            body: String::new(),
        };
        assert!(err(503).is_retryable());
        assert!(!err(400).is_retryable());
        assert!(!CamundaError::MissingField("id".to_string()).is_retryable());
    }

    #[test]
    fn test_engine_error_payload() {
        let payload: EngineErrorPayload = serde_json::from_value(serde_json::json!({
            "type": "MigrationPlanValidationException",
            "message": "Migration plan is not valid"
        }))
        .unwrap();
        assert_eq!(payload.code, None);
        let e = CamundaError::Engine {
            status: 400,
            payload: Some(payload),
            body: String::new(),
        };
        assert_eq!(
            e.engine_error_type(),
            Some("MigrationPlanValidationException")
        );
    }
}
