use async_trait::async_trait;
use bytes::Bytes;
use camunda_base::engine_config::EngineConfig;
use camunda_base::error::{CamundaError, EngineErrorPayload, Result};
use reqwest::{header::CONTENT_TYPE, Method, StatusCode};
use serde_json::Value;
use url::Url;

/// Raw engine response before status translation.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body of a 2xx response, or the engine error translated into `CamundaError::Engine`.
    pub fn into_success_body(self) -> Result<Bytes> {
        if self.status.is_success() {
            return Ok(self.body);
        }
        let payload = serde_json::from_slice::<EngineErrorPayload>(&self.body).ok();
        let body = String::from_utf8_lossy(self.body.as_ref()).to_string();
        tracing::warn!(
            "engine responded {}: {}",
            self.status,
            payload.as_ref().map(|p| p.message.as_str()).unwrap_or(&body)
        );
        Err(CamundaError::Engine {
            status: self.status.as_u16(),
            payload,
            body,
        })
    }
}

/// One JSON request/response round trip against the engine.
/// Connection pooling, auth and timeouts belong to the implementation.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<TransportResponse>;
}

#[derive(Clone, Debug)]
enum Auth {
    None,
    Basic {
        username: String,
        password: Option<String>,
    },
    Bearer(String),
}

/// reqwest backed transport
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    auth: Auth,
}

impl ReqwestTransport {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| CamundaError::ConfigError(format!("http client build error: {e:?}")))?;
        let auth = match (&config.username, &config.token) {
            (Some(username), _) => Auth::Basic {
                username: username.clone(),
                password: config.password.clone(),
            },
            (None, Some(token)) => Auth::Bearer(token.clone()),
            (None, None) => Auth::None,
        };
        Ok(Self { client, auth })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<TransportResponse> {
        let req = self.client.request(method, url);
        let req = match &self.auth {
            Auth::None => req,
            Auth::Basic { username, password } => req.basic_auth(username, password.as_ref()),
            Auth::Bearer(token) => req.bearer_auth(token),
        };
        let req = if let Some(b) = body {
            req.header(CONTENT_TYPE, "application/json; charset=utf-8")
                .body(b.to_string())
        } else {
            req
        };
        let res = req.send().await.map_err(CamundaError::Transport)?;
        let status = res.status();
        let body = res.bytes().await.map_err(CamundaError::Transport)?;
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_passes_through() {
        let res = TransportResponse::new(StatusCode::OK, r#"{"id":"b1"}"#);
        assert_eq!(res.into_success_body().unwrap(), Bytes::from(r#"{"id":"b1"}"#));
    }

    #[test]
    fn test_no_content_is_success() {
        let res = TransportResponse::new(StatusCode::NO_CONTENT, Bytes::new());
        assert!(res.into_success_body().unwrap().is_empty());
    }

    #[test]
    fn test_engine_error_with_payload() {
        let res = TransportResponse::new(
            StatusCode::BAD_REQUEST,
            r#"{"type":"InvalidRequestException","message":"process definition does not exist"}"#,
        );
        match res.into_success_body() {
            Err(CamundaError::Engine {
                status, payload, ..
            }) => {
                assert_eq!(status, 400);
                let payload = payload.unwrap();
                assert_eq!(payload.error_type, "InvalidRequestException");
                assert_eq!(payload.message, "process definition does not exist");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_engine_error_without_payload_keeps_body() {
        let res = TransportResponse::new(StatusCode::BAD_GATEWAY, "upstream down");
        match res.into_success_body() {
            Err(CamundaError::Engine {
                status,
                payload,
                body,
            }) => {
                assert_eq!(status, 502);
                assert!(payload.is_none());
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_reqwest_transport_auth_selection() {
        let mut config = EngineConfig::default();
        config.token = Some("t0ken".to_string());
        let transport = ReqwestTransport::new(&config).unwrap();
        assert!(matches!(transport.auth, Auth::Bearer(ref t) if t == "t0ken"));

        config.username = Some("demo".to_string());
        config.password = Some("demo".to_string());
        let transport = ReqwestTransport::new(&config).unwrap();
        assert!(matches!(transport.auth, Auth::Basic { ref username, .. } if username == "demo"));
    }
}
