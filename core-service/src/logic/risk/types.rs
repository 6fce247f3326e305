//! Risk Types
//!
//! Input sample, output result, intent and action enums.
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// TELEMETRY SAMPLE
// ============================================================================

/// One observation of an account's runtime behavior.
///
/// Values are scored as given; range checks belong to whoever builds the sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub account_id: String,
    /// Shannon-entropy-like payload randomness
    pub entropy_score: f64,
    /// Conventionally 0-100, not clamped
    pub cpu_usage_pct: f64,
    /// Runtime code mutation/regeneration rate, conventionally 0-100
    pub jit_regen_pct: f64,
    /// Distinct egress/tunneling events
    pub network_pivots: u32,
}

impl TelemetrySample {
    pub fn new(
        account_id: impl Into<String>,
        entropy_score: f64,
        cpu_usage_pct: f64,
        jit_regen_pct: f64,
        network_pivots: u32,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            entropy_score,
            cpu_usage_pct,
            jit_regen_pct,
            network_pivots,
        }
    }
}

// ============================================================================
// INTENT
// ============================================================================

/// Inferred motive behind the triggered signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Packed payload + runtime code regeneration
    ModelExtraction,
    /// CPU burn without lateral movement
    ResourceHijacking,
    /// Aggressive egress pivoting
    LateralPropagation,
    UnknownAbuse,
}

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::ModelExtraction,
        Intent::ResourceHijacking,
        Intent::LateralPropagation,
        Intent::UnknownAbuse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ModelExtraction => "MODEL_EXTRACTION",
            Intent::ResourceHijacking => "RESOURCE_HIJACKING",
            Intent::LateralPropagation => "LATERAL_PROPAGATION",
            Intent::UnknownAbuse => "UNKNOWN_ABUSE",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ENFORCEMENT ACTION
// ============================================================================

/// Enforcement ladder: MONITOR < THROTTLE < BLOCK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnforcementAction {
    Monitor,
    Throttle,
    Block,
}

impl EnforcementAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnforcementAction::Monitor => "MONITOR",
            EnforcementAction::Throttle => "THROTTLE",
            EnforcementAction::Block => "BLOCK",
        }
    }

    /// THROTTLE or BLOCK
    pub fn is_enforced(&self) -> bool {
        !matches!(self, EnforcementAction::Monitor)
    }
}

impl std::fmt::Display for EnforcementAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// EVALUATION RESULT
// ============================================================================

/// Decision for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub account_id: String,
    pub risk_score: i64,
    /// 0.0 - 1.0, two decimals
    pub confidence_score: f64,
    pub intent_classification: Intent,
    /// One entry per triggered rule, in evaluation order
    pub rationale: Vec<String>,
    pub enforcement_action: EnforcementAction,
}

impl EvaluationResult {
    /// Rationale as a single line
    pub fn rationale_text(&self) -> String {
        self.rationale.join("; ")
    }
}
