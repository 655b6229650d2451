use super::builder::PlanBuilder;
use super::plan::{MigrationInstruction, MigrationPlan};
use crate::batch::Batch;
use crate::request::{endpoint, parse_json, CamundaRequest};
use camunda_base::error::{CamundaError, Result};
use serde_json::Value;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// synchronous migration finished on the engine
    Completed,
    /// asynchronous migration was scheduled as a batch
    Batch(Batch),
}

/// Migrates process instances according to a migration plan.
///
/// POST `<url>/migration/execute`, or `<url>/migration/executeAsync` when
/// `asynchronous` is set at send time.
/// Instances are selected by explicit ids only; selection by process instance
/// query is not supported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Execute {
    pub url: Url,
    pub plan: PlanBuilder,
    pub process_instance_ids: Vec<String>,
    pub skip_custom_listeners: bool,
    pub skip_io_mappings: bool,
    pub asynchronous: bool,
}

impl Execute {
    pub fn new<I>(
        url: Url,
        source_process_definition_id: impl Into<String>,
        target_process_definition_id: impl Into<String>,
        process_instance_ids: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::with_plan(
            url,
            PlanBuilder::new(source_process_definition_id, target_process_definition_id),
            process_instance_ids,
        )
    }

    pub fn from_migration_plan<I>(url: Url, plan: &MigrationPlan, process_instance_ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::with_plan(url, PlanBuilder::from(plan), process_instance_ids)
    }

    fn with_plan<I>(url: Url, plan: PlanBuilder, process_instance_ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            url,
            plan,
            process_instance_ids: process_instance_ids.into_iter().map(Into::into).collect(),
            skip_custom_listeners: false,
            skip_io_mappings: false,
            asynchronous: false,
        }
    }

    pub fn skip_custom_listeners(mut self, skip: bool) -> Self {
        self.skip_custom_listeners = skip;
        self
    }
    pub fn skip_io_mappings(mut self, skip: bool) -> Self {
        self.skip_io_mappings = skip;
        self
    }
    pub fn asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = asynchronous;
        self
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

impl CamundaRequest for Execute {
    type Output = ExecuteOutcome;

    fn url(&self) -> Result<Url> {
        if self.asynchronous {
            endpoint(&self.url, "migration/executeAsync")
        } else {
            endpoint(&self.url, "migration/execute")
        }
    }
    fn body(&self) -> Option<Value> {
        Some(serde_json::json!({
            "migrationPlan": self.plan.to_json(),
            "processInstanceIds": self.process_instance_ids,
            "skipCustomListeners": self.skip_custom_listeners,
            "skipIoMappings": self.skip_io_mappings,
        }))
    }
    fn validate(&self) -> Result<()> {
        self.plan.validate()?;
        if self.process_instance_ids.is_empty() {
            return Err(CamundaError::InvalidParameter(
                "no process instance ids to migrate".to_string(),
            ));
        }
        Ok(())
    }
    fn decode(&self, body: &[u8]) -> Result<ExecuteOutcome> {
        if !self.asynchronous {
            // engine answers 204 No Content
            return Ok(ExecuteOutcome::Completed);
        }
        let batch = Batch::load(&parse_json(body)?)?;
        tracing::info!(
            "migration batch {} scheduled for {} process instance(s)",
            batch.id,
            self.process_instance_ids.len()
        );
        Ok(ExecuteOutcome::Batch(batch))
    }
}
