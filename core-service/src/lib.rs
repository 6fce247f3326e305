//! Enforcement Engine
//!
//! Scores per-account behavioral telemetry against a weighted rule set and
//! decides MONITOR / THROTTLE / BLOCK, with an explanation and an audit trail.

pub mod constants;
pub mod logic;

pub use logic::risk::{
    EnforcementAction,
    EvaluationResult,
    Intent,
    RiskEvaluator,
    TelemetrySample,
};

pub use logic::rules::{ConfigError, RuleConfig};
