//! Rule Configuration
//!
//! Immutable thresholds, weights, bonuses and decision boundaries.
//! Build once (defaults, builder, preset or JSON file), then share via `Arc`.
//! Không có setter sau khi build - mọi evaluation trong một run thấy cùng config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::defaults::*;
use super::error::{ConfigError, ConfigResult};

// ============================================================================
// SIGNALS
// ============================================================================

/// The four independent behavioral signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Entropy,
    Jit,
    Cpu,
    Pivots,
}

impl Signal {
    /// Evaluation order (also rationale order)
    pub const ALL: [Signal; 4] = [Signal::Entropy, Signal::Jit, Signal::Cpu, Signal::Pivots];

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Entropy => "entropy",
            Signal::Jit => "jit",
            Signal::Cpu => "cpu",
            Signal::Pivots => "pivots",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// WEIGHTS
// ============================================================================

/// Points added when a signal triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub entropy: i64,
    pub jit: i64,
    pub cpu: i64,
    pub pivots: i64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            entropy: ENTROPY_WEIGHT,
            jit: JIT_WEIGHT,
            cpu: CPU_WEIGHT,
            pivots: PIVOTS_WEIGHT,
        }
    }
}

impl SignalWeights {
    pub fn get(&self, signal: Signal) -> i64 {
        match signal {
            Signal::Entropy => self.entropy,
            Signal::Jit => self.jit,
            Signal::Cpu => self.cpu,
            Signal::Pivots => self.pivots,
        }
    }

    /// Sum of all base weights
    pub fn total(&self) -> i64 {
        Signal::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

// ============================================================================
// RULE CONFIG
// ============================================================================

/// Validated, read-only rule set.
///
/// Fields are private: the only way in is through [`RuleConfigBuilder::build`],
/// a preset, or deserialization (which runs the same validation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleConfigBuilder")]
pub struct RuleConfig {
    entropy_threshold: f64,
    jit_threshold: f64,
    cpu_threshold: f64,
    pivot_threshold: u32,
    extreme_entropy_threshold: f64,
    extreme_jit_threshold: f64,
    weights: SignalWeights,
    synergy_bonus: i64,
    extreme_bonus: i64,
    block_score: i64,
    throttle_score: i64,
    normalization_denominator: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            entropy_threshold: ENTROPY_THRESHOLD,
            jit_threshold: JIT_THRESHOLD,
            cpu_threshold: CPU_THRESHOLD,
            pivot_threshold: PIVOT_THRESHOLD,
            extreme_entropy_threshold: EXTREME_ENTROPY_THRESHOLD,
            extreme_jit_threshold: EXTREME_JIT_THRESHOLD,
            weights: SignalWeights::default(),
            synergy_bonus: SYNERGY_BONUS,
            extreme_bonus: EXTREME_BONUS,
            block_score: BLOCK_SCORE,
            throttle_score: THROTTLE_SCORE,
            normalization_denominator: NORMALIZATION_DENOMINATOR,
        }
    }
}

impl RuleConfig {
    pub fn builder() -> RuleConfigBuilder {
        RuleConfigBuilder::default()
    }

    /// Strict mode - lower decision boundaries, more enforcement
    pub fn strict() -> Self {
        Self {
            block_score: 80,
            throttle_score: 40,
            ..Default::default()
        }
    }

    /// Lenient mode - higher decision boundaries, fewer enforcements
    pub fn lenient() -> Self {
        Self {
            block_score: 120,
            throttle_score: 80,
            ..Default::default()
        }
    }

    /// Look up a preset by name (`default`, `strict`, `lenient`)
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            "lenient" => Some(Self::lenient()),
            _ => None,
        }
    }

    /// Parse from JSON. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let builder: RuleConfigBuilder = serde_json::from_str(json)?;
        builder.build()
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        log::info!("Loaded rule config from {} ({})", path.display(), config.fingerprint());
        Ok(config)
    }

    /// Check all construction invariants
    pub fn validate(&self) -> ConfigResult<()> {
        let thresholds = [
            ("entropy_threshold", self.entropy_threshold),
            ("jit_threshold", self.jit_threshold),
            ("cpu_threshold", self.cpu_threshold),
            ("extreme_entropy_threshold", self.extreme_entropy_threshold),
            ("extreme_jit_threshold", self.extreme_jit_threshold),
        ];
        for (name, value) in thresholds {
            if value.is_nan() {
                return Err(ConfigError::NanThreshold(name));
            }
        }

        for signal in Signal::ALL {
            let value = self.weights.get(signal);
            if value < 0 {
                return Err(ConfigError::NegativeWeight { signal, value });
            }
        }

        if self.synergy_bonus < 0 {
            return Err(ConfigError::NegativeBonus { name: "synergy_bonus", value: self.synergy_bonus });
        }
        if self.extreme_bonus < 0 {
            return Err(ConfigError::NegativeBonus { name: "extreme_bonus", value: self.extreme_bonus });
        }

        if self.checked_max_score().is_none() {
            return Err(ConfigError::ScoreOverflow);
        }

        if self.throttle_score < 0 {
            return Err(ConfigError::NegativeThrottle(self.throttle_score));
        }
        if self.block_score <= self.throttle_score {
            return Err(ConfigError::InvertedLadder {
                block: self.block_score,
                throttle: self.throttle_score,
            });
        }

        if !self.normalization_denominator.is_finite() || self.normalization_denominator <= 0.0 {
            return Err(ConfigError::InvalidDenominator(self.normalization_denominator));
        }

        Ok(())
    }

    /// Hex SHA-256 over a canonical text form of every field.
    /// Two configs with the same fingerprint make identical decisions.
    pub fn fingerprint(&self) -> String {
        let canonical = format!(
            "entropy={};jit={};cpu={};pivots={};x_entropy={};x_jit={};\
             w_entropy={};w_jit={};w_cpu={};w_pivots={};synergy={};extreme={};\
             block={};throttle={};denominator={}",
            self.entropy_threshold,
            self.jit_threshold,
            self.cpu_threshold,
            self.pivot_threshold,
            self.extreme_entropy_threshold,
            self.extreme_jit_threshold,
            self.weights.entropy,
            self.weights.jit,
            self.weights.cpu,
            self.weights.pivots,
            self.synergy_bonus,
            self.extreme_bonus,
            self.block_score,
            self.throttle_score,
            self.normalization_denominator,
        );
        hex::encode(Sha256::digest(canonical.as_bytes()))
    }

    /// Highest score any sample can reach under this config.
    /// Always fits in i64 for a validated config.
    pub fn max_score(&self) -> i64 {
        self.checked_max_score().unwrap_or(i64::MAX)
    }

    /// Sum of all weights and bonuses, `None` on overflow
    fn checked_max_score(&self) -> Option<i64> {
        Signal::ALL
            .iter()
            .map(|s| self.weights.get(*s))
            .chain([self.synergy_bonus, self.extreme_bonus])
            .try_fold(0i64, |acc, v| acc.checked_add(v))
    }

    // --- accessors ---

    pub fn entropy_threshold(&self) -> f64 {
        self.entropy_threshold
    }

    pub fn jit_threshold(&self) -> f64 {
        self.jit_threshold
    }

    pub fn cpu_threshold(&self) -> f64 {
        self.cpu_threshold
    }

    pub fn pivot_threshold(&self) -> u32 {
        self.pivot_threshold
    }

    pub fn extreme_entropy_threshold(&self) -> f64 {
        self.extreme_entropy_threshold
    }

    pub fn extreme_jit_threshold(&self) -> f64 {
        self.extreme_jit_threshold
    }

    pub fn weights(&self) -> &SignalWeights {
        &self.weights
    }

    pub fn weight(&self, signal: Signal) -> i64 {
        self.weights.get(signal)
    }

    pub fn synergy_bonus(&self) -> i64 {
        self.synergy_bonus
    }

    pub fn extreme_bonus(&self) -> i64 {
        self.extreme_bonus
    }

    pub fn block_score(&self) -> i64 {
        self.block_score
    }

    pub fn throttle_score(&self) -> i64 {
        self.throttle_score
    }

    pub fn normalization_denominator(&self) -> f64 {
        self.normalization_denominator
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Mutable staging area for a [`RuleConfig`]. Also the serde input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfigBuilder {
    pub entropy_threshold: f64,
    pub jit_threshold: f64,
    pub cpu_threshold: f64,
    pub pivot_threshold: u32,
    pub extreme_entropy_threshold: f64,
    pub extreme_jit_threshold: f64,
    pub weights: SignalWeights,
    pub synergy_bonus: i64,
    pub extreme_bonus: i64,
    pub block_score: i64,
    pub throttle_score: i64,
    pub normalization_denominator: f64,
}

impl Default for RuleConfigBuilder {
    fn default() -> Self {
        RuleConfig::default().into()
    }
}

impl From<RuleConfig> for RuleConfigBuilder {
    fn from(c: RuleConfig) -> Self {
        Self {
            entropy_threshold: c.entropy_threshold,
            jit_threshold: c.jit_threshold,
            cpu_threshold: c.cpu_threshold,
            pivot_threshold: c.pivot_threshold,
            extreme_entropy_threshold: c.extreme_entropy_threshold,
            extreme_jit_threshold: c.extreme_jit_threshold,
            weights: c.weights,
            synergy_bonus: c.synergy_bonus,
            extreme_bonus: c.extreme_bonus,
            block_score: c.block_score,
            throttle_score: c.throttle_score,
            normalization_denominator: c.normalization_denominator,
        }
    }
}

impl RuleConfigBuilder {
    pub fn entropy_threshold(mut self, value: f64) -> Self {
        self.entropy_threshold = value;
        self
    }

    pub fn jit_threshold(mut self, value: f64) -> Self {
        self.jit_threshold = value;
        self
    }

    pub fn cpu_threshold(mut self, value: f64) -> Self {
        self.cpu_threshold = value;
        self
    }

    pub fn pivot_threshold(mut self, value: u32) -> Self {
        self.pivot_threshold = value;
        self
    }

    pub fn extreme_entropy_threshold(mut self, value: f64) -> Self {
        self.extreme_entropy_threshold = value;
        self
    }

    pub fn extreme_jit_threshold(mut self, value: f64) -> Self {
        self.extreme_jit_threshold = value;
        self
    }

    pub fn weights(mut self, weights: SignalWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weight(mut self, signal: Signal, value: i64) -> Self {
        match signal {
            Signal::Entropy => self.weights.entropy = value,
            Signal::Jit => self.weights.jit = value,
            Signal::Cpu => self.weights.cpu = value,
            Signal::Pivots => self.weights.pivots = value,
        }
        self
    }

    pub fn synergy_bonus(mut self, value: i64) -> Self {
        self.synergy_bonus = value;
        self
    }

    pub fn extreme_bonus(mut self, value: i64) -> Self {
        self.extreme_bonus = value;
        self
    }

    pub fn block_score(mut self, value: i64) -> Self {
        self.block_score = value;
        self
    }

    pub fn throttle_score(mut self, value: i64) -> Self {
        self.throttle_score = value;
        self
    }

    pub fn normalization_denominator(mut self, value: f64) -> Self {
        self.normalization_denominator = value;
        self
    }

    /// Validate and freeze
    pub fn build(self) -> ConfigResult<RuleConfig> {
        let config = RuleConfig {
            entropy_threshold: self.entropy_threshold,
            jit_threshold: self.jit_threshold,
            cpu_threshold: self.cpu_threshold,
            pivot_threshold: self.pivot_threshold,
            extreme_entropy_threshold: self.extreme_entropy_threshold,
            extreme_jit_threshold: self.extreme_jit_threshold,
            weights: self.weights,
            synergy_bonus: self.synergy_bonus,
            extreme_bonus: self.extreme_bonus,
            block_score: self.block_score,
            throttle_score: self.throttle_score,
            normalization_denominator: self.normalization_denominator,
        };

        if let Err(e) = config.validate() {
            log::warn!("Rejected rule config: {}", e);
            return Err(e);
        }
        Ok(config)
    }
}

impl TryFrom<RuleConfigBuilder> for RuleConfig {
    type Error = ConfigError;

    fn try_from(builder: RuleConfigBuilder) -> ConfigResult<Self> {
        builder.build()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.entropy_threshold(), 7.2);
        assert_eq!(config.pivot_threshold(), 30);
        assert_eq!(config.weight(Signal::Jit), 30);
        assert_eq!(config.block_score(), 100);
        assert_eq!(config.throttle_score(), 60);
        assert_eq!(config.max_score(), 145);
    }

    #[test]
    fn test_presets_are_valid() {
        for name in ["default", "strict", "lenient"] {
            let config = RuleConfig::preset(name).unwrap();
            assert!(config.validate().is_ok(), "preset {} invalid", name);
        }
        assert!(RuleConfig::preset("paranoid").is_none());
        assert_eq!(RuleConfig::strict().block_score(), 80);
        assert_eq!(RuleConfig::lenient().throttle_score(), 80);
    }

    #[test]
    fn test_reject_inverted_ladder() {
        let result = RuleConfig::builder().block_score(60).throttle_score(60).build();
        match result {
            Err(ConfigError::InvertedLadder { block, throttle }) => {
                assert_eq!(block, 60);
                assert_eq!(throttle, 60);
            }
            other => panic!("Expected InvertedLadder, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_negative_throttle() {
        let result = RuleConfig::builder().throttle_score(-1).build();
        assert!(matches!(result, Err(ConfigError::NegativeThrottle(-1))));
    }

    #[test]
    fn test_reject_negative_weight() {
        let result = RuleConfig::builder().weight(Signal::Cpu, -5).build();
        match result {
            Err(ConfigError::NegativeWeight { signal, value }) => {
                assert_eq!(signal, Signal::Cpu);
                assert_eq!(value, -5);
            }
            other => panic!("Expected NegativeWeight, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_negative_bonus() {
        assert!(matches!(
            RuleConfig::builder().synergy_bonus(-1).build(),
            Err(ConfigError::NegativeBonus { name: "synergy_bonus", .. })
        ));
        assert!(matches!(
            RuleConfig::builder().extreme_bonus(-20).build(),
            Err(ConfigError::NegativeBonus { name: "extreme_bonus", .. })
        ));
    }

    #[test]
    fn test_reject_bad_denominator() {
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let result = RuleConfig::builder().normalization_denominator(bad).build();
            assert!(matches!(result, Err(ConfigError::InvalidDenominator(_))));
        }
    }

    #[test]
    fn test_reject_nan_threshold() {
        let result = RuleConfig::builder().jit_threshold(f64::NAN).build();
        assert!(matches!(result, Err(ConfigError::NanThreshold("jit_threshold"))));
    }

    #[test]
    fn test_reject_score_overflow() {
        let huge = i64::MAX / 2 + 1;
        let result = RuleConfig::builder()
            .weight(Signal::Entropy, huge)
            .weight(Signal::Jit, huge)
            .block_score(i64::MAX)
            .build();
        assert!(matches!(result, Err(ConfigError::ScoreOverflow)));

        // Largest sum that still fits is accepted
        let config = RuleConfig::builder()
            .weights(SignalWeights { entropy: i64::MAX - 45, jit: 0, cpu: 0, pivots: 0 })
            .block_score(i64::MAX)
            .build()
            .unwrap();
        assert_eq!(config.max_score(), i64::MAX);
    }

    #[test]
    fn test_zero_weights_allowed() {
        let config = RuleConfig::builder()
            .weights(SignalWeights { entropy: 0, jit: 0, cpu: 0, pivots: 0 })
            .synergy_bonus(0)
            .extreme_bonus(0)
            .throttle_score(0)
            .block_score(1)
            .build()
            .unwrap();
        assert_eq!(config.max_score(), 0);
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{ "block_score": 90, "weights": { "pivots": 10 } }"#;
        let config = RuleConfig::from_json_str(json).unwrap();
        assert_eq!(config.block_score(), 90);
        assert_eq!(config.throttle_score(), 60);
        assert_eq!(config.weight(Signal::Pivots), 10);
        assert_eq!(config.weight(Signal::Entropy), 30);
    }

    #[test]
    fn test_from_json_invalid() {
        let json = r#"{ "block_score": 50 }"#;
        assert!(matches!(
            RuleConfig::from_json_str(json),
            Err(ConfigError::InvertedLadder { .. })
        ));

        assert!(matches!(
            RuleConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_serde_deserialize_validates() {
        let result: Result<RuleConfig, _> = serde_json::from_str(r#"{ "extreme_bonus": -3 }"#);
        assert!(result.is_err());

        let json = serde_json::to_string(&RuleConfig::strict()).unwrap();
        let back: RuleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RuleConfig::strict());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"{ "synergy_bonus": 40 }"#).unwrap();

        let config = RuleConfig::from_json_file(&path).unwrap();
        assert_eq!(config.synergy_bonus(), 40);

        let missing = RuleConfig::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_fingerprint() {
        let a = RuleConfig::default();
        let b = RuleConfig::default();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
        assert_ne!(a.fingerprint(), RuleConfig::strict().fingerprint());
    }
}
