use crate::transport::HttpTransport;
use async_trait::async_trait;
use camunda_base::error::{CamundaError, Result};
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// A single-shot call against one engine REST endpoint.
///
/// Implementors describe the call (url, wire body, decoding); `send` performs it.
/// Nothing here retries or recovers: every failure is returned to the caller.
#[async_trait]
pub trait CamundaRequest: Send + Sync {
    type Output: Send;

    fn method(&self) -> Method {
        Method::POST
    }
    /// evaluated at send time, so flags mutated after construction are honored
    fn url(&self) -> Result<Url>;
    /// wire-format body (camelCase keys)
    fn body(&self) -> Option<Value>;
    fn decode(&self, body: &[u8]) -> Result<Self::Output>;

    /// checks that need no I/O
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    async fn send(&self, transport: &dyn HttpTransport) -> Result<Self::Output> {
        self.validate()?;
        let method = self.method();
        let url = self.url()?;
        tracing::debug!("camunda request: {} {}", method, url);
        let res = transport.request(method, url, self.body()).await?;
        let body = res.into_success_body()?;
        self.decode(body.as_ref())
    }
}

/// Appends `path` segments to the engine base url.
///
/// `http://host/engine-rest` and `http://host/engine-rest/` both become
/// `http://host/engine-rest/<path>`.
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| {
            CamundaError::InvalidParameter(format!("engine url cannot be a base: {base}"))
        })?
        .pop_if_empty()
        .extend(path.split('/').filter(|s| !s.is_empty()));
    Ok(url)
}

/// Parses a JSON response body.
pub(crate) fn parse_json(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(CamundaError::from_decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_with_and_without_trailing_slash() {
        let a = Url::parse("http://localhost:8080/engine-rest").unwrap();
        let b = Url::parse("http://localhost:8080/engine-rest/").unwrap();
        assert_eq!(
            endpoint(&a, "migration/generate").unwrap().as_str(),
            "http://localhost:8080/engine-rest/migration/generate"
        );
        assert_eq!(
            endpoint(&b, "migration/generate").unwrap().as_str(),
            "http://localhost:8080/engine-rest/migration/generate"
        );
    }

    #[test]
    fn test_endpoint_on_root() {
        let root = Url::parse("http://localhost:8080").unwrap();
        assert_eq!(
            endpoint(&root, "migration/executeAsync").unwrap().as_str(),
            "http://localhost:8080/migration/executeAsync"
        );
    }

    #[test]
    fn test_endpoint_rejects_non_base_url() {
        let url = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(
            endpoint(&url, "migration/validate"),
            Err(CamundaError::InvalidParameter(_))
        ));
    }
}
