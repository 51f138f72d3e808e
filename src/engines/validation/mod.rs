pub mod orchestrator;
pub mod strategies;

pub use orchestrator::{StrategyReport, ValidationOrchestrator, ValidationReport};
pub use strategies::{ScoreGenerator, TrialOutcome};
