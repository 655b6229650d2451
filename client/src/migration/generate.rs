use super::builder::validate_definition_ids;
use super::plan::MigrationPlan;
use crate::request::{endpoint, parse_json, CamundaRequest};
use camunda_base::error::Result;
use serde_json::Value;
use url::Url;

/// Asks the engine to propose a migration plan between two process definitions.
///
/// The engine maps equally named / equally shaped activities itself.
/// POST `<url>/migration/generate`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generate {
    pub url: Url,
    pub source_process_definition_id: String,
    pub target_process_definition_id: String,
    /// configure generated event-to-event instructions to update the event trigger
    pub update_event_triggers: bool,
}

impl Generate {
    pub fn new(
        url: Url,
        source_process_definition_id: impl Into<String>,
        target_process_definition_id: impl Into<String>,
    ) -> Self {
        Self {
            url,
            source_process_definition_id: source_process_definition_id.into(),
            target_process_definition_id: target_process_definition_id.into(),
            update_event_triggers: false,
        }
    }

    pub fn update_event_triggers(mut self, update_event_triggers: bool) -> Self {
        self.update_event_triggers = update_event_triggers;
        self
    }
}

impl CamundaRequest for Generate {
    type Output = MigrationPlan;

    fn url(&self) -> Result<Url> {
        endpoint(&self.url, "migration/generate")
    }
    fn body(&self) -> Option<Value> {
        Some(serde_json::json!({
            "sourceProcessDefinitionId": self.source_process_definition_id,
            "targetProcessDefinitionId": self.target_process_definition_id,
            "updateEventTriggers": self.update_event_triggers,
        }))
    }
    fn validate(&self) -> Result<()> {
        validate_definition_ids(
            &self.source_process_definition_id,
            &self.target_process_definition_id,
        )
    }
    fn decode(&self, body: &[u8]) -> Result<MigrationPlan> {
        MigrationPlan::load(&parse_json(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockHttpTransport, TransportResponse};
    use camunda_base::error::CamundaError;
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    fn base_url() -> Url {
        Url::parse("http://localhost:8080/engine-rest").unwrap()
    }

    #[test]
    fn test_generate_body_and_url() {
        let request = Generate::new(base_url(), "procA", "procB").update_event_triggers(true);
        assert_eq!(
            request.url().unwrap().as_str(),
            "http://localhost:8080/engine-rest/migration/generate"
        );
        assert_eq!(
            request.body().unwrap(),
            json!({
                "sourceProcessDefinitionId": "procA",
                "targetProcessDefinitionId": "procB",
                "updateEventTriggers": true
            })
        );
        assert_eq!(request.method(), Method::POST);
    }

    #[tokio::test]
    async fn test_generate_send_returns_plan() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_request()
            .withf(|method, url, body| {
                *method == Method::POST
                    && url.path() == "/engine-rest/migration/generate"
                    && body.as_ref().map(|b| b["updateEventTriggers"] == false) == Some(true)
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(TransportResponse::new(
                    StatusCode::OK,
                    json!({
                        "sourceProcessDefinitionId": "procA",
                        "targetProcessDefinitionId": "procB",
                        "instructions": [{
                            "sourceActivityIds": ["userTask"],
                            "targetActivityIds": ["userTask"],
                            "updateEventTrigger": false
                        }]
                    })
                    .to_string(),
                ))
            });

        let plan = Generate::new(base_url(), "procA", "procB")
            .send(&transport)
            .await
            .unwrap();
        assert_eq!(plan.source_process_definition_id, "procA");
        assert_eq!(plan.instructions.len(), 1);
    }

    #[tokio::test]
    async fn test_send_with_empty_definition_id_does_no_io() {
        let mut transport = MockHttpTransport::new();
        transport.expect_request().times(0);
        for (source, target) in [("", ""), ("", "procB"), ("procA", "")] {
            let err = Generate::new(base_url(), source, target)
                .send(&transport)
                .await
                .unwrap_err();
            assert!(matches!(err, CamundaError::InvalidParameter(_)));
        }
    }

    #[tokio::test]
    async fn test_generate_engine_error() {
        let mut transport = MockHttpTransport::new();
        transport.expect_request().times(1).returning(|_, _, _| {
            Ok(TransportResponse::new(
                StatusCode::NOT_FOUND,
                r#"{"type":"NotFoundException","message":"no deployed process definition found with id 'procX'"}"#,
            ))
        });
        let err = Generate::new(base_url(), "procX", "procB")
            .send(&transport)
            .await
            .unwrap_err();
        assert!(matches!(err, CamundaError::Engine { status: 404, .. }));
        assert_eq!(err.engine_error_type(), Some("NotFoundException"));
    }

    #[tokio::test]
    async fn test_generate_response_missing_key() {
        let mut transport = MockHttpTransport::new();
        transport.expect_request().times(1).returning(|_, _, _| {
            Ok(TransportResponse::new(
                StatusCode::OK,
                r#"{"sourceProcessDefinitionId":"procA","targetProcessDefinitionId":"procB"}"#,
            ))
        });
        let err = Generate::new(base_url(), "procA", "procB")
            .send(&transport)
            .await
            .unwrap_err();
        assert!(matches!(err, CamundaError::MissingField(ref f) if f == "instructions"));
    }
}
