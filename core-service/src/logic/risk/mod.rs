//! Risk Module
//!
//! Chấm điểm telemetry, suy ra intent, quyết định MONITOR / THROTTLE / BLOCK.
//! Đây là CORE STEP - deterministic and explainable.
//!
//! ## Structure
//! - `types`: TelemetrySample, EvaluationResult, Intent, EnforcementAction
//! - `checks`: Raw threshold predicates + rationale labels
//! - `engine`: Pure scoring (score, confidence, intent, ladder)
//! - `audit`: Append-only decision log
//! - `evaluator`: `RiskEvaluator` = engine + audit log
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use enforcement_engine::logic::risk::{RiskEvaluator, TelemetrySample};
//! use enforcement_engine::logic::rules::RuleConfig;
//!
//! let evaluator = RiskEvaluator::new(Arc::new(RuleConfig::default()));
//! let result = evaluator.evaluate(&TelemetrySample::new("acct_bfdc9309", 8.2, 95.0, 97.0, 50));
//! assert_eq!(result.enforcement_action, EnforcementAction::Block);
//! ```

pub mod types;
pub mod checks;
pub mod engine;
pub mod audit;
pub mod evaluator;


pub use types::{
    TelemetrySample,
    EvaluationResult,
    Intent,
    EnforcementAction,
};

pub use engine::{score_sample, compute_confidence, classify_intent, decide_action};

pub use audit::{AuditLog, AuditEntry, AuditSummary};

pub use evaluator::RiskEvaluator;
