//! Signal Checks
//!
//! Raw threshold predicates over a sample. Every check is strictly-greater-than.
//! Composite checks call the base predicates again instead of reading
//! any "points awarded" flag.

use crate::logic::rules::{RuleConfig, Signal};
use super::types::TelemetrySample;

// ============================================================================
// RATIONALE LABELS
// ============================================================================

pub const REASON_ENTROPY: &str = "High Entropy";
pub const REASON_JIT: &str = "High JIT Regeneration";
pub const REASON_CPU: &str = "Sustained High CPU Usage";
pub const REASON_PIVOTS: &str = "Aggressive Egress Pivots";
pub const REASON_SYNERGY: &str = "SYNERGY: Entropy + JIT";
pub const REASON_EXTREME: &str = "EXTREME: Zero-Day Polymorphism";

pub fn reason_for(signal: Signal) -> &'static str {
    match signal {
        Signal::Entropy => REASON_ENTROPY,
        Signal::Jit => REASON_JIT,
        Signal::Cpu => REASON_CPU,
        Signal::Pivots => REASON_PIVOTS,
    }
}

// ============================================================================
// BASE PREDICATES
// ============================================================================

pub fn entropy_high(config: &RuleConfig, sample: &TelemetrySample) -> bool {
    sample.entropy_score > config.entropy_threshold()
}

pub fn jit_high(config: &RuleConfig, sample: &TelemetrySample) -> bool {
    sample.jit_regen_pct > config.jit_threshold()
}

pub fn cpu_high(config: &RuleConfig, sample: &TelemetrySample) -> bool {
    sample.cpu_usage_pct > config.cpu_threshold()
}

pub fn pivots_high(config: &RuleConfig, sample: &TelemetrySample) -> bool {
    sample.network_pivots > config.pivot_threshold()
}

pub fn signal_triggered(signal: Signal, config: &RuleConfig, sample: &TelemetrySample) -> bool {
    match signal {
        Signal::Entropy => entropy_high(config, sample),
        Signal::Jit => jit_high(config, sample),
        Signal::Cpu => cpu_high(config, sample),
        Signal::Pivots => pivots_high(config, sample),
    }
}

// ============================================================================
// COMPOSITE PREDICATES
// ============================================================================

/// Entropy + JIT co-occurring
pub fn synergy(config: &RuleConfig, sample: &TelemetrySample) -> bool {
    entropy_high(config, sample) && jit_high(config, sample)
}

/// Both extreme thresholds exceeded
pub fn extreme(config: &RuleConfig, sample: &TelemetrySample) -> bool {
    sample.entropy_score > config.extreme_entropy_threshold()
        && sample.jit_regen_pct > config.extreme_jit_threshold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let config = RuleConfig::default();
        let at = TelemetrySample::new("a", 7.2, 85.0, 90.0, 30);
        for signal in Signal::ALL {
            assert!(!signal_triggered(signal, &config, &at), "{} fired at threshold", signal);
        }

        let above = TelemetrySample::new("a", 7.21, 85.1, 90.5, 31);
        for signal in Signal::ALL {
            assert!(signal_triggered(signal, &config, &above), "{} did not fire", signal);
        }
    }

    #[test]
    fn test_nan_never_triggers() {
        let config = RuleConfig::default();
        let sample = TelemetrySample::new("a", f64::NAN, f64::NAN, f64::NAN, 0);
        assert!(!entropy_high(&config, &sample));
        assert!(!synergy(&config, &sample));
        assert!(!extreme(&config, &sample));
    }

    #[test]
    fn test_extreme_needs_both() {
        let config = RuleConfig::default();
        assert!(extreme(&config, &TelemetrySample::new("a", 8.1, 0.0, 96.0, 0)));
        assert!(!extreme(&config, &TelemetrySample::new("a", 8.1, 0.0, 95.0, 0)));
        assert!(!extreme(&config, &TelemetrySample::new("a", 8.0, 0.0, 99.0, 0)));
    }
}
