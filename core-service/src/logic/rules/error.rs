//! Rule Configuration Errors
//!
//! Lỗi duy nhất của engine: cấu hình không hợp lệ.
//! Raised at construction time, never during evaluation.

use thiserror::Error;

use super::config::Signal;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("block_score ({block}) must be greater than throttle_score ({throttle})")]
    InvertedLadder { block: i64, throttle: i64 },

    #[error("sum of weights and bonuses overflows the risk score range")]
    ScoreOverflow,

    #[error("throttle_score ({0}) must not be negative")]
    NegativeThrottle(i64),

    #[error("weight for signal '{signal}' must not be negative (got {value})")]
    NegativeWeight { signal: Signal, value: i64 },

    #[error("{name} must not be negative (got {value})")]
    NegativeBonus { name: &'static str, value: i64 },

    #[error("normalization_denominator must be finite and > 0 (got {0})")]
    InvalidDenominator(f64),

    #[error("threshold '{0}' must not be NaN")]
    NanThreshold(&'static str),

    #[error("unknown preset '{0}' (expected default, strict or lenient)")]
    UnknownPreset(String),

    #[error("failed to read rule config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rule config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
