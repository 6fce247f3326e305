//! Risk Evaluator
//!
//! Holds the injected `RuleConfig` and the session's `AuditLog`.
//! Scoring runs lock-free; only the audit append is serialized.

use std::sync::Arc;

use crate::logic::rules::RuleConfig;
use super::audit::{AuditLog, AuditSummary};
use super::engine::score_sample;
use super::types::{EnforcementAction, EvaluationResult, TelemetrySample};

pub struct RiskEvaluator {
    config: Arc<RuleConfig>,
    audit: AuditLog,
}

impl RiskEvaluator {
    pub fn new(config: Arc<RuleConfig>) -> Self {
        let audit = AuditLog::new(config.fingerprint());
        log::info!(
            "Risk evaluator ready (session {}, rules {})",
            audit.session_id(),
            audit.config_fingerprint()
        );
        Self { config, audit }
    }

    /// Evaluator over the canonical rule set
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(RuleConfig::default()))
    }

    /// Score one sample, record it, return it
    pub fn evaluate(&self, sample: &TelemetrySample) -> EvaluationResult {
        let result = score_sample(&self.config, sample);

        if result.enforcement_action == EnforcementAction::Block {
            log::info!(
                "BLOCK {} (score {}, {}): {}",
                result.account_id,
                result.risk_score,
                result.intent_classification,
                result.rationale_text()
            );
        }

        self.audit.append(result.clone());
        result
    }

    /// Evaluate in input order
    pub fn evaluate_batch(&self, samples: &[TelemetrySample]) -> Vec<EvaluationResult> {
        samples.iter().map(|s| self.evaluate(s)).collect()
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn summary(&self) -> AuditSummary {
        self.audit.summary()
    }
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
