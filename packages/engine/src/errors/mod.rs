//! Error handling for the rule engine.

pub mod engine;

pub use engine::{EngineError, RuleViolationKind, SetupIssueKind};
