use super::plan::{plan_to_json, MigrationInstruction, MigrationPlan};
use camunda_base::error::{CamundaError, Result};
use serde_json::Value;

/// Migration plan assembled on the client side, shared by `Validate` and `Execute`.
///
/// Instructions keep insertion order through serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanBuilder {
    pub source_process_definition_id: String,
    pub target_process_definition_id: String,
    instructions: Vec<MigrationInstruction>,
}

impl PlanBuilder {
    pub fn new(
        source_process_definition_id: impl Into<String>,
        target_process_definition_id: impl Into<String>,
    ) -> Self {
        Self {
            source_process_definition_id: source_process_definition_id.into(),
            target_process_definition_id: target_process_definition_id.into(),
            instructions: Vec::new(),
        }
    }

    pub fn add_instruction<S, T>(
        &mut self,
        source_activity_ids: S,
        target_activity_ids: T,
        update_event_trigger: bool,
    ) where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        self.instructions.push(MigrationInstruction::new(
            source_activity_ids,
            target_activity_ids,
            update_event_trigger,
        ));
    }

    pub fn push(&mut self, instruction: MigrationInstruction) {
        self.instructions.push(instruction);
    }

    pub fn instructions(&self) -> &[MigrationInstruction] {
        &self.instructions
    }

    pub fn validate(&self) -> Result<()> {
        validate_definition_ids(
            &self.source_process_definition_id,
            &self.target_process_definition_id,
        )
    }

    pub fn to_plan(&self) -> MigrationPlan {
        MigrationPlan::new(
            self.source_process_definition_id.clone(),
            self.target_process_definition_id.clone(),
            self.instructions.clone(),
        )
    }

    /// nested `migrationPlan` wire object
    pub fn to_json(&self) -> Value {
        plan_to_json(
            &self.source_process_definition_id,
            &self.target_process_definition_id,
            &self.instructions,
        )
    }
}

/// Both process definition ids must be non-empty.
pub(crate) fn validate_definition_ids(
    source_process_definition_id: &str,
    target_process_definition_id: &str,
) -> Result<()> {
    if source_process_definition_id.is_empty() {
        return Err(CamundaError::InvalidParameter(
            "source process definition id is empty".to_string(),
        ));
    }
    if target_process_definition_id.is_empty() {
        return Err(CamundaError::InvalidParameter(
            "target process definition id is empty".to_string(),
        ));
    }
    Ok(())
}

impl From<&MigrationPlan> for PlanBuilder {
    fn from(plan: &MigrationPlan) -> Self {
        Self {
            source_process_definition_id: plan.source_process_definition_id.clone(),
            target_process_definition_id: plan.target_process_definition_id.clone(),
            instructions: plan.instructions.clone(),
        }
    }
}

impl From<MigrationPlan> for PlanBuilder {
    fn from(plan: MigrationPlan) -> Self {
        Self {
            source_process_definition_id: plan.source_process_definition_id,
            target_process_definition_id: plan.target_process_definition_id,
            instructions: plan.instructions,
        }
    }
}
