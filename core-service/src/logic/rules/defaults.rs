//! Default Rule Set
//!
//! Canonical thresholds, weights and bonuses.
//! KHÔNG chứa logic - chỉ constants.

// ============================================================================
// SIGNAL THRESHOLDS (strictly greater than triggers)
// ============================================================================

/// Payload entropy above this = packed/encrypted code
pub const ENTROPY_THRESHOLD: f64 = 7.2;

/// JIT regeneration rate (%) above this = runtime code mutation
pub const JIT_THRESHOLD: f64 = 90.0;

/// CPU usage (%) above this = sustained high CPU
pub const CPU_THRESHOLD: f64 = 85.0;

/// Distinct egress/tunneling events above this = aggressive pivoting
pub const PIVOT_THRESHOLD: u32 = 30;

// ============================================================================
// EXTREME THRESHOLDS
// ============================================================================

pub const EXTREME_ENTROPY_THRESHOLD: f64 = 8.0;

pub const EXTREME_JIT_THRESHOLD: f64 = 95.0;

// ============================================================================
// WEIGHTS (points per triggered signal)
// ============================================================================

pub const ENTROPY_WEIGHT: i64 = 30;
pub const JIT_WEIGHT: i64 = 30;
pub const CPU_WEIGHT: i64 = 20;
pub const PIVOTS_WEIGHT: i64 = 20;

// ============================================================================
// BONUSES
// ============================================================================

/// Entropy + JIT co-occurring (model extraction signature)
pub const SYNERGY_BONUS: i64 = 25;

/// Both extreme thresholds exceeded
pub const EXTREME_BONUS: i64 = 20;

// ============================================================================
// DECISION BOUNDARIES
// ============================================================================

/// At or above this score = BLOCK
pub const BLOCK_SCORE: i64 = 100;

/// At or above this score = THROTTLE (if below BLOCK_SCORE)
pub const THROTTLE_SCORE: i64 = 60;

/// Risk score that maps to confidence 1.0.
/// Tuned separately from the max reachable score (165).
pub const NORMALIZATION_DENOMINATOR: f64 = 100.0;

/// Decimal places kept in reported confidence
pub const CONFIDENCE_PRECISION: i32 = 2;
