//! Risk Scoring Engine
//!
//! CHỈ chứa logic tính điểm - không có state, không có audit.
//! Input: TelemetrySample + RuleConfig
//! Output: EvaluationResult

use crate::logic::rules::defaults::CONFIDENCE_PRECISION;
use crate::logic::rules::{RuleConfig, Signal};
use super::checks::{self, REASON_EXTREME, REASON_SYNERGY};
use super::types::*;

// ============================================================================
// MAIN SCORING FUNCTION
// ============================================================================

/// Score one sample without touching any audit log
pub fn score_sample(config: &RuleConfig, sample: &TelemetrySample) -> EvaluationResult {
    let mut risk_score: i64 = 0;
    let mut rationale = Vec::new();

    // Independent signals, fixed order
    for signal in Signal::ALL {
        if checks::signal_triggered(signal, config, sample) {
            risk_score += config.weight(signal);
            rationale.push(checks::reason_for(signal).to_string());
        }
    }

    // Composites re-test the raw predicates
    if checks::synergy(config, sample) {
        risk_score += config.synergy_bonus();
        rationale.push(REASON_SYNERGY.to_string());
    }

    if checks::extreme(config, sample) {
        risk_score += config.extreme_bonus();
        rationale.push(REASON_EXTREME.to_string());
    }

    let confidence_score = compute_confidence(risk_score, config.normalization_denominator());
    let intent_classification = classify_intent(config, sample);
    let enforcement_action = decide_action(risk_score, config);

    log::debug!(
        "{}: score={} confidence={:.2} intent={} action={}",
        sample.account_id,
        risk_score,
        confidence_score,
        intent_classification,
        enforcement_action
    );

    EvaluationResult {
        account_id: sample.account_id.clone(),
        risk_score,
        confidence_score,
        intent_classification,
        rationale,
        enforcement_action,
    }
}

// ============================================================================
// CONFIDENCE
// ============================================================================

/// `min(score / denominator, 1.0)`, rounded to reporting precision
pub fn compute_confidence(risk_score: i64, denominator: f64) -> f64 {
    let raw = (risk_score as f64 / denominator).clamp(0.0, 1.0);
    round_to(raw, CONFIDENCE_PRECISION)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// INTENT
// ============================================================================

/// First matching rule wins
pub fn classify_intent(config: &RuleConfig, sample: &TelemetrySample) -> Intent {
    let entropy = checks::entropy_high(config, sample);
    let jit = checks::jit_high(config, sample);
    let cpu = checks::cpu_high(config, sample);
    let pivots = checks::pivots_high(config, sample);

    if entropy && jit {
        Intent::ModelExtraction
    } else if cpu && !pivots {
        Intent::ResourceHijacking
    } else if pivots {
        Intent::LateralPropagation
    } else {
        Intent::UnknownAbuse
    }
}

// ============================================================================
// ENFORCEMENT LADDER
// ============================================================================

/// Two-level threshold ladder, no hysteresis
pub fn decide_action(risk_score: i64, config: &RuleConfig) -> EnforcementAction {
    if risk_score >= config.block_score() {
        EnforcementAction::Block
    } else if risk_score >= config.throttle_score() {
        EnforcementAction::Throttle
    } else {
        EnforcementAction::Monitor
    }
}

// ============================================================================
// TESTS
// ============================================================================
