//! Process instance migration (`/migration/*`).
//!
//! The engine computes and applies migrations; this module only builds the
//! requests and decodes the responses.

pub mod builder;
pub mod execute;
pub mod generate;
pub mod plan;
pub mod validate;

pub use builder::PlanBuilder;
pub use execute::{Execute, ExecuteOutcome};
pub use generate::Generate;
pub use plan::{InstructionReport, MigrationInstruction, MigrationPlan};
pub use validate::Validate;
