use camunda_base::error::{CamundaError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maps source activities to target activities.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MigrationInstruction {
    pub source_activity_ids: Vec<String>,
    pub target_activity_ids: Vec<String>,
    pub update_event_trigger: bool,
}

impl MigrationInstruction {
    pub fn new<S, T>(
        source_activity_ids: S,
        target_activity_ids: T,
        update_event_trigger: bool,
    ) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            source_activity_ids: source_activity_ids.into_iter().map(Into::into).collect(),
            target_activity_ids: target_activity_ids.into_iter().map(Into::into).collect(),
            update_event_trigger,
        }
    }

    /// All keys are required; a missing key fails with `MissingField`.
    pub fn load(data: &Value) -> Result<Self> {
        Self::deserialize(data).map_err(CamundaError::from_decode)
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "sourceActivityIds": self.source_activity_ids,
            "targetActivityIds": self.target_activity_ids,
            "updateEventTrigger": self.update_event_trigger,
        })
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlan {
    pub source_process_definition_id: String,
    pub target_process_definition_id: String,
    pub instructions: Vec<MigrationInstruction>,
}

impl MigrationPlan {
    pub fn new(
        source_process_definition_id: impl Into<String>,
        target_process_definition_id: impl Into<String>,
        instructions: Vec<MigrationInstruction>,
    ) -> Self {
        Self {
            source_process_definition_id: source_process_definition_id.into(),
            target_process_definition_id: target_process_definition_id.into(),
            instructions,
        }
    }

    /// Instruction order of `data` is kept.
    pub fn load(data: &Value) -> Result<Self> {
        Self::deserialize(data).map_err(CamundaError::from_decode)
    }

    pub fn to_json(&self) -> Value {
        plan_to_json(
            &self.source_process_definition_id,
            &self.target_process_definition_id,
            &self.instructions,
        )
    }
}

pub(crate) fn plan_to_json(
    source_process_definition_id: &str,
    target_process_definition_id: &str,
    instructions: &[MigrationInstruction],
) -> Value {
    serde_json::json!({
        "sourceProcessDefinitionId": source_process_definition_id,
        "targetProcessDefinitionId": target_process_definition_id,
        "instructions": instructions
            .iter()
            .map(MigrationInstruction::to_json)
            .collect::<Vec<_>>(),
    })
}

/// Validation result for one submitted instruction.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionReport {
    pub instruction: MigrationInstruction,
    pub failures: Vec<String>,
}

impl InstructionReport {
    pub fn load(data: &Value) -> Result<Self> {
        Self::deserialize(data).map_err(CamundaError::from_decode)
    }
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}
