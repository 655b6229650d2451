use super::builder::PlanBuilder;
use super::plan::{InstructionReport, MigrationInstruction, MigrationPlan};
use crate::request::{endpoint, parse_json, CamundaRequest};
use camunda_base::error::{CamundaError, Result};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationResponse {
    instruction_reports: Vec<InstructionReport>,
}

/// Validates a migration plan without touching any process instance.
///
/// POST `<url>/migration/validate`, one report per submitted instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validate {
    pub url: Url,
    pub plan: PlanBuilder,
}

impl Validate {
    pub fn new(
        url: Url,
        source_process_definition_id: impl Into<String>,
        target_process_definition_id: impl Into<String>,
    ) -> Self {
        Self {
            url,
            plan: PlanBuilder::new(source_process_definition_id, target_process_definition_id),
        }
    }

    pub fn from_migration_plan(url: Url, plan: &MigrationPlan) -> Self {
        Self {
            url,
            plan: PlanBuilder::from(plan),
        }
    }

    pub fn add_instruction<S, T>(
        &mut self,
        source_activity_ids: S,
        target_activity_ids: T,
        update_event_trigger: bool,
    ) -> &mut Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        self.plan
            .add_instruction(source_activity_ids, target_activity_ids, update_event_trigger);
        self
    }

    pub fn instructions(&self) -> &[MigrationInstruction] {
        self.plan.instructions()
    }
}

impl CamundaRequest for Validate {
    type Output = Vec<InstructionReport>;

    fn url(&self) -> Result<Url> {
        endpoint(&self.url, "migration/validate")
    }
    fn body(&self) -> Option<Value> {
        Some(self.plan.to_json())
    }
    fn validate(&self) -> Result<()> {
        self.plan.validate()
    }
    fn decode(&self, body: &[u8]) -> Result<Vec<InstructionReport>> {
        let res = ValidationResponse::deserialize(&parse_json(body)?)
            .map_err(CamundaError::from_decode)?;
        Ok(res.instruction_reports)
    }
}
